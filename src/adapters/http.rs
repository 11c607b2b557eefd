use crate::domain::model::{Product, StockRecord};
use crate::domain::ports::{ConfigProvider, ProductApi};
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// `ProductApi` backed by the REST catalog (`/products/{id}`, `/stock/{id}`).
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: Client,
    base_url: String,
}

impl HttpProductApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Without a timeout a hung request stays pending until the server answers.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::with_timeout(config.api_base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        let body = response.error_for_status()?.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| CartError::UnexpectedResponse {
            endpoint: url,
            message: e.to_string(),
        })
    }
}

fn ensure_id(endpoint: String, expected: u64, actual: u64) -> Result<()> {
    if expected != actual {
        return Err(CartError::UnexpectedResponse {
            endpoint,
            message: format!("expected id {}, got {}", expected, actual),
        });
    }
    Ok(())
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn product(&self, product_id: u64) -> Result<Product> {
        let path = format!("products/{}", product_id);
        let product: Product = self.get_json(&path).await?;
        ensure_id(self.endpoint(&path), product_id, product.id)?;
        Ok(product)
    }

    async fn stock(&self, product_id: u64) -> Result<StockRecord> {
        let path = format!("stock/{}", product_id);
        let stock: StockRecord = self.get_json(&path).await?;
        ensure_id(self.endpoint(&path), product_id, stock.id)?;
        Ok(stock)
    }
}
