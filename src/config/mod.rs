#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

/// json-server default used by the storefront during development.
pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_DATA_DIR: &str = "./.cart";
/// Upper bound accepted for request timeouts, in seconds.
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;
