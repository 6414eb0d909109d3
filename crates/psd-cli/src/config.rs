//! Layered run configuration for the `expand` command.

mod builder;
mod defaults;
mod env;
mod file;
mod models;

pub use builder::{build_config, resolve_work_dir};
pub use env::process_env;
pub use models::{AppConfig, StringSettings};
