use crate::config::{DEFAULT_API_URL, DEFAULT_DATA_DIR, MAX_TIMEOUT_SECONDS};
use crate::core::engine::DEFAULT_STORAGE_KEY;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "cart-sync")]
#[command(about = "Shopping cart backed by the catalog API and a local saved copy")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,

    #[arg(long, help = "Request timeout in seconds (no timeout when omitted)")]
    pub timeout: Option<u64>,

    /// Path to a TOML configuration file; replaces the API and storage flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add { product_id: u64 },
    /// Remove a product from the cart
    Remove { product_id: u64 },
    /// Set the amount of a product already in the cart
    Update {
        product_id: u64,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_url
    }

    fn storage_path(&self) -> &str {
        &self.data_dir
    }

    fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.api_url)?;
        validate_path("data_dir", &self.data_dir)?;
        validate_non_empty_string("storage_key", &self.storage_key)?;
        if let Some(timeout) = self.timeout {
            validate_range("timeout", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }
        Ok(())
    }
}
