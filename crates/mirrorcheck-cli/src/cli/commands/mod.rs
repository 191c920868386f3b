//! CLI command handlers. Each command is in its own file.

mod check;
mod config;
mod list;

#[cfg(test)]
pub(crate) use check::build_options;
pub use check::run_check;
pub use config::run_config;
pub use list::run_list;
