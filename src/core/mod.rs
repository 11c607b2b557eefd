pub mod engine;
pub mod store;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{CartSnapshot, LineItem, Notification, UpdateProductAmount};
pub use crate::domain::ports::{ConfigProvider, Notifier, ProductApi, Storage};
pub use crate::utils::error::Result;
