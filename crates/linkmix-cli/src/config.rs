//! Generation settings, merged from the TOML file, command-line overrides and
//! built-in defaults.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::AppConfig;
