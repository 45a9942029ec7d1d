//! taskdeck task command implementations.

use chrono::Local;

use crate::cli::{Context, TaskCommands};
use crate::error::Result;
use crate::model::{Priority, Status, Task, TaskDraft};
use crate::output::{emit_success, HumanOutput};
use crate::store::CachePolicy;
use crate::validate;

pub async fn run(ctx: &Context, command: &TaskCommands) -> Result<()> {
    match command {
        TaskCommands::List {
            status,
            priority,
            refresh,
        } => run_list(ctx, *status, *priority, *refresh).await,
        TaskCommands::Add {
            title,
            description,
            priority,
            due,
        } => run_add(ctx, title, description.as_deref(), *priority, *due).await,
        TaskCommands::Edit {
            id,
            title,
            description,
            priority,
            due,
        } => {
            run_edit(
                ctx,
                id,
                title.as_deref(),
                description.as_deref(),
                *priority,
                *due,
            )
            .await
        }
        TaskCommands::Show { id } => run_show(ctx, id).await,
        TaskCommands::Done { id } => run_done(ctx, id).await,
        TaskCommands::Reopen { id } => run_reopen(ctx, id).await,
        TaskCommands::Rm { id } => run_rm(ctx, id).await,
    }
}

async fn run_list(
    ctx: &Context,
    status: Option<Status>,
    priority: Option<Priority>,
    refresh: bool,
) -> Result<()> {
    let mut store = ctx.task_store();
    let policy = if refresh {
        CachePolicy::Invalidate
    } else {
        CachePolicy::Prefer
    };
    store.refresh(policy).await?;

    let tasks: Vec<Task> = store
        .tasks()
        .iter()
        .filter(|task| status.map(|wanted| task.status == wanted).unwrap_or(true))
        .filter(|task| {
            priority
                .map(|wanted| task.priority == wanted)
                .unwrap_or(true)
        })
        .cloned()
        .collect();

    let mut human = HumanOutput::new(format!("{} task(s)", tasks.len()));
    for task in &tasks {
        human.push_detail(format_line(task));
    }
    emit_success(ctx.output, "task list", &tasks, Some(&human))
}

async fn run_add(
    ctx: &Context,
    title: &str,
    description: Option<&str>,
    priority: Option<Priority>,
    due: Option<chrono::NaiveDate>,
) -> Result<()> {
    let today = Local::now().date_naive();
    validate::title(title)?;
    if let Some(due) = due {
        validate::due_date(due, today)?;
    }

    // Fall back to the profile's default priority, like the creation form.
    // An unavailable profile must not block adding a task.
    let priority = match priority {
        Some(priority) => priority,
        None => {
            let mut users = ctx.user_store();
            match users.refresh(CachePolicy::Prefer).await {
                Ok(()) => users
                    .user()
                    .map(|user| user.default_priority)
                    .unwrap_or(Priority::Medium),
                Err(err) => {
                    tracing::debug!(error = %err, "profile unavailable, using medium priority");
                    Priority::Medium
                }
            }
        }
    };

    let mut store = ctx.task_store();
    store.refresh(CachePolicy::Prefer).await?;
    let task = store
        .add_task(TaskDraft {
            title: title.to_string(),
            description: description.map(str::to_string),
            priority,
            due_date: due,
        })
        .await?;

    let mut human = HumanOutput::new(format!("Added task {}", task.id));
    human.push_summary("title", &task.title);
    human.push_summary("priority", task.priority.to_string());
    if let Some(due) = task.due_date {
        human.push_summary("due", due.to_string());
    }
    emit_success(ctx.output, "task add", &task, Some(&human))
}

async fn run_edit(
    ctx: &Context,
    id: &str,
    title: Option<&str>,
    description: Option<&str>,
    priority: Option<Priority>,
    due: Option<chrono::NaiveDate>,
) -> Result<()> {
    if title.is_none() && description.is_none() && priority.is_none() && due.is_none() {
        return Err(crate::error::Error::InvalidArgument(
            "task edit requires at least one field".to_string(),
        ));
    }

    let today = Local::now().date_naive();
    if let Some(title) = title {
        validate::title(title)?;
    }
    if let Some(due) = due {
        validate::due_date(due, today)?;
    }

    let mut store = ctx.task_store();
    store.refresh(CachePolicy::Prefer).await?;
    let mut edit = store
        .get(id)
        .cloned()
        .ok_or_else(|| crate::error::Error::TaskNotFound(id.to_string()))?;
    if let Some(title) = title {
        edit.title = title.to_string();
    }
    if let Some(description) = description {
        edit.description = Some(description.to_string());
    }
    if let Some(priority) = priority {
        edit.priority = priority;
    }
    if let Some(due) = due {
        edit.due_date = Some(due);
    }

    // Status and completed_at are untouched; the store's edit
    // reconciliation keeps them consistent.
    let stored = store.update_task(edit, today).await?;
    let human = HumanOutput::new(format_line(&stored));
    emit_success(ctx.output, "task edit", &stored, Some(&human))
}

async fn run_show(ctx: &Context, id: &str) -> Result<()> {
    let mut store = ctx.task_store();
    store.refresh(CachePolicy::Prefer).await?;
    let task = store
        .get(id)
        .cloned()
        .ok_or_else(|| crate::error::Error::TaskNotFound(id.to_string()))?;

    let mut human = HumanOutput::new(format_line(&task));
    if let Some(description) = &task.description {
        human.push_detail(description.clone());
    }
    human.push_summary("created", task.created_at.to_rfc3339());
    if let Some(completed_at) = task.completed_at {
        human.push_summary("completed", completed_at.to_string());
    }
    emit_success(ctx.output, "task show", &task, Some(&human))
}

async fn run_done(ctx: &Context, id: &str) -> Result<()> {
    let today = Local::now().date_naive();
    let mut store = ctx.task_store();
    store.refresh(CachePolicy::Prefer).await?;
    store.mark_complete(id, today).await?;

    let human = match store.get(id) {
        Some(task) => HumanOutput::new(format_line(task)),
        None => HumanOutput::new(format!("No task {id}; nothing to do")),
    };
    emit_success(ctx.output, "task done", &store.get(id).cloned(), Some(&human))
}

async fn run_reopen(ctx: &Context, id: &str) -> Result<()> {
    let today = Local::now().date_naive();
    let mut store = ctx.task_store();
    store.refresh(CachePolicy::Prefer).await?;
    store.mark_incomplete(id, today).await?;

    let human = match store.get(id) {
        Some(task) => HumanOutput::new(format_line(task)),
        None => HumanOutput::new(format!("No task {id}; nothing to do")),
    };
    emit_success(
        ctx.output,
        "task reopen",
        &store.get(id).cloned(),
        Some(&human),
    )
}

async fn run_rm(ctx: &Context, id: &str) -> Result<()> {
    let mut store = ctx.task_store();
    store.refresh(CachePolicy::Prefer).await?;
    store.delete_task(id).await?;

    let human = HumanOutput::new(format!("Deleted task {id}"));
    emit_success(ctx.output, "task rm", &id, Some(&human))
}

pub async fn run_stats(ctx: &Context) -> Result<()> {
    let today = Local::now().date_naive();
    let mut store = ctx.task_store();
    store.refresh(CachePolicy::Prefer).await?;
    let stats = store.stats(today);

    let mut human = HumanOutput::new(format!("{} task(s)", stats.total));
    human.push_summary("completed", stats.completed.to_string());
    human.push_summary("pending", stats.pending.to_string());
    human.push_summary("overdue", stats.overdue.to_string());
    human.push_summary("completed today", stats.completed_today.to_string());
    emit_success(ctx.output, "stats", &stats, Some(&human))
}

fn format_line(task: &Task) -> String {
    let marker = match task.status {
        Status::Pending => "[ ]",
        Status::Completed => "[x]",
    };
    let mut line = format!("{marker} {} ({}) {}", task.id, task.priority, task.title);
    if let Some(due) = task.due_date {
        line.push_str(&format!(" due {due}"));
    }
    line
}
