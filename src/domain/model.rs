use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A catalog entry as returned by `GET /products/{id}`.
///
/// Only `id` is interpreted; everything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Inventory datum returned by `GET /stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: u64,
    #[serde(rename = "amount")]
    pub available: u32,
}

/// One product in the cart together with the requested quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
    pub amount: u32,
}

impl LineItem {
    pub fn from_product(product: Product) -> Self {
        let mut attributes = product.attributes;
        attributes.remove("amount");
        Self {
            id: product.id,
            attributes,
            amount: 1,
        }
    }

    /// Returns a copy carrying `amount`; the original value is left as is.
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.attributes.get("title").and_then(Value::as_str)
    }

    pub fn price(&self) -> Option<f64> {
        self.attributes.get("price").and_then(Value::as_f64)
    }

    pub fn image(&self) -> Option<&str> {
        self.attributes.get("image").and_then(Value::as_str)
    }
}

/// Immutable view of the cart at one point in time.
///
/// Every publish produces a new snapshot with `version` bumped by one, so
/// observers detect changes by comparing versions instead of contents.
/// Cloning is cheap: the items are shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    version: u64,
    items: Arc<[LineItem]>,
}

impl CartSnapshot {
    pub fn new(items: Vec<LineItem>) -> Self {
        Self {
            version: 0,
            items: items.into(),
        }
    }

    pub(crate) fn next(&self, items: Vec<LineItem>) -> Self {
        Self {
            version: self.version.wrapping_add(1),
            items: items.into(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, product_id: u64) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == product_id)
    }

    pub fn position(&self, product_id: u64) -> Option<usize> {
        self.items.iter().position(|item| item.id == product_id)
    }

    /// Current quantity of `product_id`, 0 when absent.
    pub fn amount_of(&self, product_id: u64) -> u32 {
        self.get(product_id).map(|item| item.amount).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }
}

impl Default for CartSnapshot {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<'a> IntoIterator for &'a CartSnapshot {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Request for `update_product_amount`. Amounts of zero or below are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: u64,
    pub amount: i64,
}

/// User-facing failure message emitted by the cart operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    StockExceeded,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl Notification {
    pub fn message(&self) -> &'static str {
        match self {
            Notification::StockExceeded => "Requested quantity is out of stock",
            Notification::AddFailed => "Failed to add product",
            Notification::RemoveFailed => "Failed to remove product",
            Notification::UpdateFailed => "Failed to update product amount",
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
