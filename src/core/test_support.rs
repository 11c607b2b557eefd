use crate::domain::model::{Product, StockRecord};
use crate::domain::ports::{ProductApi, Storage};
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory catalog. Unknown ids answer like a 404 from the real service.
#[derive(Default)]
pub(crate) struct FakeApi {
    products: HashMap<u64, Product>,
    stock: Mutex<HashMap<u64, u32>>,
    stock_calls: AtomicUsize,
    product_calls: AtomicUsize,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_product(mut self, id: u64, title: &str, price: f64, stock: u32) -> Self {
        let product = serde_json::from_value(json!({
            "id": id,
            "title": title,
            "price": price,
            "image": format!("https://example.com/{}.jpg", id),
        }))
        .unwrap();
        self.products.insert(id, product);
        self.stock.lock().unwrap().insert(id, stock);
        self
    }

    /// Stock is known but the catalog has no entry for `id`.
    pub(crate) fn with_stock_only(self, id: u64, stock: u32) -> Self {
        self.stock.lock().unwrap().insert(id, stock);
        self
    }

    pub(crate) fn set_stock(&self, id: u64, stock: u32) {
        self.stock.lock().unwrap().insert(id, stock);
    }

    pub(crate) fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductApi for FakeApi {
    async fn product(&self, product_id: u64) -> Result<Product> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        self.products
            .get(&product_id)
            .cloned()
            .ok_or_else(|| CartError::UnexpectedResponse {
                endpoint: format!("/products/{}", product_id),
                message: "404 Not Found".to_string(),
            })
    }

    async fn stock(&self, product_id: u64) -> Result<StockRecord> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        let stock = self.stock.lock().unwrap();
        stock
            .get(&product_id)
            .map(|available| StockRecord {
                id: product_id,
                available: *available,
            })
            .ok_or_else(|| CartError::UnexpectedResponse {
                endpoint: format!("/stock/{}", product_id),
                message: "404 Not Found".to_string(),
            })
    }
}

/// Storage that records every write and can be told to fail reads or writes.
#[derive(Clone, Default)]
pub(crate) struct RecordingStorage {
    items: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    writes: Arc<AtomicUsize>,
    fail_writes: bool,
    fail_reads: bool,
}

impl RecordingStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub(crate) fn unreadable() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub(crate) fn seeded(key: &str, data: &[u8]) -> Self {
        let storage = Self::new();
        storage
            .items
            .lock()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
        storage
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.items.lock().unwrap().get(key).cloned()
    }
}

impl Storage for RecordingStorage {
    async fn get_item(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.fail_reads {
            return Err(CartError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage is unreadable",
            )));
        }
        Ok(self.raw(key))
    }

    async fn set_item(&self, key: &str, data: &[u8]) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(CartError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage is read-only",
            )));
        }
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }
}
