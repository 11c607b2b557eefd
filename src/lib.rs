pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::toml_config::TomlConfig;

pub use adapters::{ChannelNotifier, HttpProductApi, LocalStorage, MemoryStorage};
pub use core::{
    engine::{CartEngine, DEFAULT_STORAGE_KEY},
    store::CartStore,
    sync::CartSynchronizer,
};
pub use domain::model::{
    CartSnapshot, LineItem, Notification, Product, StockRecord, UpdateProductAmount,
};
pub use utils::error::{CartError, Result};
