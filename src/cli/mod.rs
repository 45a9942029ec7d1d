//! Command-line interface for taskdeck
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cache::MirrorCache;
use crate::client::ApiClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Priority, Status, Theme};
use crate::output::OutputOptions;
use crate::store::{TaskStore, UserStore};

mod profile;
mod serve;
mod task;

/// taskdeck - personal task manager
///
/// Serves a local task API and talks to it through an offline-friendly
/// store: reads prefer a local cache, writes go to the server and rewrite
/// the cache on success.
#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./.taskdeck.toml)
    #[arg(long, global = true, env = "TASKDECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the task API
    #[arg(long, global = true, env = "TASKDECK_API")]
    pub api: Option<String>,

    /// Directory for the mirror cache
    #[arg(long, global = true, env = "TASKDECK_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the task API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Listener port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Profile management
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Summary counts over the task collection
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks, newest-first
    List {
        /// Only show tasks with this status
        #[arg(long, value_enum)]
        status: Option<Status>,

        /// Only show tasks with this priority
        #[arg(long, value_enum)]
        priority: Option<Priority>,

        /// Drop the cached collection and re-read from the server
        #[arg(long)]
        refresh: bool,
    },

    /// Add a task
    Add {
        /// Task title (at least 3 characters)
        title: String,

        /// Longer description
        #[arg(long)]
        description: Option<String>,

        /// Priority; defaults to the profile's default priority
        #[arg(long, value_enum)]
        priority: Option<Priority>,

        /// Due date (YYYY-MM-DD, not in the past)
        #[arg(long)]
        due: Option<NaiveDate>,
    },

    /// Edit fields of an existing task
    Edit {
        /// Task id
        id: String,

        /// New title (at least 3 characters)
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New priority
        #[arg(long, value_enum)]
        priority: Option<Priority>,

        /// New due date (YYYY-MM-DD, not in the past)
        #[arg(long)]
        due: Option<NaiveDate>,
    },

    /// Show one task
    Show {
        /// Task id
        id: String,
    },

    /// Mark a task completed
    Done {
        /// Task id
        id: String,
    },

    /// Move a completed task back to pending
    Reopen {
        /// Task id
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the profile record
    Show,

    /// Update profile fields
    Set {
        /// Display name (at least 2 characters)
        #[arg(long)]
        name: Option<String>,

        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Age (1-120)
        #[arg(long)]
        age: Option<u8>,

        /// Color theme
        #[arg(long, value_enum)]
        theme: Option<Theme>,

        /// Default priority for new tasks
        #[arg(long, value_enum)]
        default_priority: Option<Priority>,
    },
}

/// Resolved globals shared by client-side commands.
pub struct Context {
    pub config: Config,
    pub output: OutputOptions,
    api_url: String,
    cache_dir: PathBuf,
}

impl Context {
    fn resolve(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let api_url = cli
            .api
            .clone()
            .unwrap_or_else(|| config.client.api_url.clone());
        let cache_dir = cli
            .cache_dir
            .clone()
            .or_else(|| config.cache.dir.clone())
            .or_else(MirrorCache::default_dir)
            .ok_or_else(|| {
                Error::InvalidConfig(
                    "no cache directory available; set [cache] dir or --cache-dir".to_string(),
                )
            })?;
        Ok(Self {
            output: OutputOptions {
                json: cli.json,
                quiet: cli.quiet,
            },
            config,
            api_url,
            cache_dir,
        })
    }

    pub fn task_store(&self) -> TaskStore {
        TaskStore::new(
            ApiClient::new(self.api_url.clone()),
            MirrorCache::new(self.cache_dir.clone()),
        )
    }

    pub fn user_store(&self) -> UserStore {
        UserStore::new(
            ApiClient::new(self.api_url.clone()),
            MirrorCache::new(self.cache_dir.clone()),
        )
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Runtime::new()?)
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match &self.command {
            Commands::Serve { host, port } => {
                let config = Config::load(self.config.as_deref())?;
                let host = host.clone().unwrap_or(config.server.host);
                let port = (*port).unwrap_or(config.server.port);
                runtime()?.block_on(serve::run(&host, port))
            }
            Commands::Task(command) => {
                let ctx = Context::resolve(&self)?;
                runtime()?.block_on(task::run(&ctx, command))
            }
            Commands::Profile(command) => {
                let ctx = Context::resolve(&self)?;
                runtime()?.block_on(profile::run(&ctx, command))
            }
            Commands::Stats => {
                let ctx = Context::resolve(&self)?;
                runtime()?.block_on(task::run_stats(&ctx))
            }
        }
    }
}
