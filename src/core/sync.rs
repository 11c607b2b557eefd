use crate::domain::model::{CartSnapshot, LineItem};
use crate::domain::ports::Storage;
use crate::utils::error::{CartError, Result};
use std::collections::HashSet;

pub fn encode_cart(items: &[LineItem]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(items)?)
}

/// Parses a persisted cart, rejecting payloads that break the cart invariants
/// (repeated ids, zero amounts).
pub fn decode_cart(data: &[u8]) -> Result<Vec<LineItem>> {
    let items: Vec<LineItem> = serde_json::from_slice(data)?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(item.id) {
            return Err(CartError::CorruptCart {
                message: format!("duplicate product id {}", item.id),
            });
        }
        if item.amount == 0 {
            return Err(CartError::CorruptCart {
                message: format!("product {} has amount 0", item.id),
            });
        }
    }

    Ok(items)
}

/// Reads the persisted cart. Anything other than a valid payload yields an
/// empty cart.
pub async fn load_cart<S: Storage>(storage: &S, key: &str) -> Vec<LineItem> {
    let data = match storage.get_item(key).await {
        Ok(Some(data)) => data,
        Ok(None) => {
            tracing::debug!("No saved cart under '{}', starting empty", key);
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!("Could not read saved cart '{}': {}", key, e);
            return Vec::new();
        }
    };

    match decode_cart(&data) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Discarding malformed saved cart '{}': {}", key, e);
            Vec::new()
        }
    }
}

/// Flushes the cart to durable storage whenever a new snapshot is observed.
pub struct CartSynchronizer<S: Storage> {
    storage: S,
    key: String,
    last_seen: u64,
}

impl<S: Storage> CartSynchronizer<S> {
    /// `initial` is the snapshot the store starts from; observing it again is
    /// not a change.
    pub fn new(storage: S, key: impl Into<String>, initial: &CartSnapshot) -> Self {
        Self {
            storage,
            key: key.into(),
            last_seen: initial.version(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persists `snapshot` if its version differs from the last one seen.
    /// Returns whether a write was attempted. Write failures are logged only.
    pub async fn observe(&mut self, snapshot: &CartSnapshot) -> bool {
        if snapshot.version() == self.last_seen {
            return false;
        }
        self.last_seen = snapshot.version();

        let result = match encode_cart(snapshot.items()) {
            Ok(data) => self.storage.set_item(&self.key, &data).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => tracing::debug!(
                "Saved cart version {} ({} items) under '{}'",
                snapshot.version(),
                snapshot.len(),
                self.key
            ),
            Err(e) => tracing::warn!("Failed to save cart under '{}': {}", self.key, e),
        }
        true
    }
}
