//! taskdeck - Personal Task Manager Library
//!
//! This library provides the core functionality for the taskdeck CLI:
//! a local HTTP API over in-memory collections, and client-side stores
//! that mirror those collections into a file-backed cache.
//!
//! # Core Concepts
//!
//! - **Task / User records**: the data model, with status transitions
//!   owning the `completed_at` field
//! - **Stores**: stateful façades holding the current in-memory view of
//!   one entity, backed by the API client and the mirror cache
//! - **Mirror cache**: fixed `tasks`/`user` slots preferred on reads and
//!   rewritten after every successful server round trip
//! - **Stats**: pure summary counts over a task collection
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `.taskdeck.toml`
//! - `error`: error types and result aliases
//! - `model`: task and user records plus status transition rules
//! - `stats`: summary counts over a task collection
//! - `server`: axum HTTP API over in-memory repositories
//! - `client`: reqwest client for the API
//! - `cache`: file-backed mirror cache
//! - `store`: task and user stores over client + cache
//! - `validate`: client-side form constraints
//! - `output`: CLI output formatting

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod server;
pub mod stats;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
