//! taskdeck profile command implementations.

use crate::cli::{Context, ProfileCommands};
use crate::error::{Error, Result};
use crate::model::{Priority, Theme, UserPatch};
use crate::output::{emit_success, HumanOutput};
use crate::store::CachePolicy;
use crate::validate;

pub async fn run(ctx: &Context, command: &ProfileCommands) -> Result<()> {
    match command {
        ProfileCommands::Show => run_show(ctx).await,
        ProfileCommands::Set {
            name,
            email,
            age,
            theme,
            default_priority,
        } => {
            run_set(
                ctx,
                name.clone(),
                email.clone(),
                *age,
                *theme,
                *default_priority,
            )
            .await
        }
    }
}

async fn run_show(ctx: &Context) -> Result<()> {
    let mut store = ctx.user_store();
    store.refresh(CachePolicy::Prefer).await?;
    let user = store
        .user()
        .cloned()
        .ok_or_else(|| Error::OperationFailed("profile did not load".to_string()))?;

    let mut human = HumanOutput::new(format!("{} <{}>", user.name, user.email));
    human.push_summary("theme", user.theme.to_string());
    human.push_summary("age", user.age.to_string());
    human.push_summary("default priority", user.default_priority.to_string());
    emit_success(ctx.output, "profile show", &user, Some(&human))
}

async fn run_set(
    ctx: &Context,
    name: Option<String>,
    email: Option<String>,
    age: Option<u8>,
    theme: Option<Theme>,
    default_priority: Option<Priority>,
) -> Result<()> {
    if name.is_none()
        && email.is_none()
        && age.is_none()
        && theme.is_none()
        && default_priority.is_none()
    {
        return Err(Error::InvalidArgument(
            "profile set requires at least one field".to_string(),
        ));
    }

    if let Some(name) = &name {
        validate::name(name)?;
    }
    if let Some(email) = &email {
        validate::email(email)?;
    }
    if let Some(age) = age {
        validate::age(age)?;
    }

    let mut store = ctx.user_store();
    store.refresh(CachePolicy::Prefer).await?;
    store
        .update(UserPatch {
            name,
            email,
            age,
            theme,
            default_priority,
        })
        .await?;

    let user = store
        .user()
        .cloned()
        .ok_or_else(|| Error::OperationFailed("profile did not load".to_string()))?;
    let mut human = HumanOutput::new("Profile updated");
    human.push_summary("name", &user.name);
    human.push_summary("email", &user.email);
    human.push_summary("theme", user.theme.to_string());
    emit_success(ctx.output, "profile set", &user, Some(&human))
}
