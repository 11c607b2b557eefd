use crate::core::store::CartStore;
use crate::core::sync::{load_cart, CartSynchronizer};
use crate::domain::model::{CartSnapshot, UpdateProductAmount};
use crate::domain::ports::{Notifier, ProductApi, Storage};

/// Storage key the cart is saved under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// One client's cart: the store plus the synchronizer that keeps the saved
/// copy up to date. Every mutation settles (observe, then persist) before
/// returning.
pub struct CartEngine<A: ProductApi, N: Notifier, S: Storage> {
    store: CartStore<A, N>,
    sync: CartSynchronizer<S>,
}

impl<A: ProductApi, N: Notifier, S: Storage> CartEngine<A, N, S> {
    /// Restores the saved cart under `key`, or starts empty.
    pub async fn open(api: A, notifier: N, storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let snapshot = CartSnapshot::new(load_cart(&storage, &key).await);
        tracing::info!("🛒 Cart '{}' opened with {} items", key, snapshot.len());

        let sync = CartSynchronizer::new(storage, key, &snapshot);
        let store = CartStore::with_snapshot(api, notifier, snapshot);

        Self { store, sync }
    }

    pub fn cart(&self) -> &CartSnapshot {
        self.store.snapshot()
    }

    pub fn store(&self) -> &CartStore<A, N> {
        &self.store
    }

    pub fn synchronizer(&self) -> &CartSynchronizer<S> {
        &self.sync
    }

    pub async fn add_product(&mut self, product_id: u64) {
        self.store.add_product(product_id).await;
        self.settle().await;
    }

    pub async fn remove_product(&mut self, product_id: u64) {
        self.store.remove_product(product_id);
        self.settle().await;
    }

    pub async fn update_product_amount(&mut self, request: UpdateProductAmount) {
        self.store.update_product_amount(request).await;
        self.settle().await;
    }

    async fn settle(&mut self) {
        self.sync.observe(self.store.snapshot()).await;
    }
}
