use crate::domain::model::{Notification, Product, StockRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Catalog and inventory lookups.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// `GET /products/{id}`
    async fn product(&self, product_id: u64) -> Result<Product>;

    /// `GET /stock/{id}`. Never cached by callers.
    async fn stock(&self, product_id: u64) -> Result<StockRecord>;
}

/// Durable key-value slot holding the serialized cart.
pub trait Storage: Send + Sync {
    fn get_item(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn set_item(
        &self,
        key: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// One-way channel for user-facing failure messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn storage_key(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}
