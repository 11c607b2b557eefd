use crate::domain::model::{CartSnapshot, LineItem, Notification, UpdateProductAmount};
use crate::domain::ports::{Notifier, ProductApi};
use crate::utils::error::{CartError, Result};

/// Owns the current cart snapshot and is its only writer.
///
/// Every mutation validates against the stock service before committing and
/// publishes a brand-new snapshot on success. Failures never reach the
/// caller: they are turned into a [`Notification`] and the snapshot stays
/// exactly as it was.
///
/// Mutations borrow the store mutably, so at most one is in flight per store.
pub struct CartStore<A: ProductApi, N: Notifier> {
    api: A,
    notifier: N,
    snapshot: CartSnapshot,
}

impl<A: ProductApi, N: Notifier> CartStore<A, N> {
    pub fn new(api: A, notifier: N, items: Vec<LineItem>) -> Self {
        Self::with_snapshot(api, notifier, CartSnapshot::new(items))
    }

    pub fn with_snapshot(api: A, notifier: N, snapshot: CartSnapshot) -> Self {
        Self {
            api,
            notifier,
            snapshot,
        }
    }

    pub fn snapshot(&self) -> &CartSnapshot {
        &self.snapshot
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Adds one unit of `product_id`, fetching catalog data on first addition.
    pub async fn add_product(&mut self, product_id: u64) {
        match self.try_add_product(product_id).await {
            Ok(items) => self.publish(items),
            Err(e) => self.reject(Notification::AddFailed, e),
        }
    }

    pub fn remove_product(&mut self, product_id: u64) {
        match self.try_remove_product(product_id) {
            Ok(items) => self.publish(items),
            Err(e) => self.reject(Notification::RemoveFailed, e),
        }
    }

    /// Sets the amount of a product already in the cart. Amounts of zero or
    /// below are ignored without any notification.
    pub async fn update_product_amount(&mut self, request: UpdateProductAmount) {
        if request.amount <= 0 {
            tracing::debug!(
                "Ignoring amount {} for product {}",
                request.amount,
                request.product_id
            );
            return;
        }

        match self.try_update_product_amount(request).await {
            Ok(items) => self.publish(items),
            Err(e) => self.reject(Notification::UpdateFailed, e),
        }
    }

    async fn try_add_product(&self, product_id: u64) -> Result<Vec<LineItem>> {
        let desired = u64::from(self.snapshot.amount_of(product_id)) + 1;
        let stock = self.api.stock(product_id).await?;
        ensure_in_stock(product_id, desired, stock.available)?;

        let mut items = self.snapshot.items().to_vec();
        match self.snapshot.position(product_id) {
            // bounded by stock.available, fits in u32
            Some(index) => items[index] = items[index].with_amount(desired as u32),
            None => {
                let product = self.api.product(product_id).await?;
                items.push(LineItem::from_product(product));
            }
        }
        Ok(items)
    }

    fn try_remove_product(&self, product_id: u64) -> Result<Vec<LineItem>> {
        let index = self
            .snapshot
            .position(product_id)
            .ok_or(CartError::ItemNotFound { product_id })?;

        let mut items = self.snapshot.items().to_vec();
        items.remove(index);
        Ok(items)
    }

    async fn try_update_product_amount(
        &self,
        request: UpdateProductAmount,
    ) -> Result<Vec<LineItem>> {
        let UpdateProductAmount { product_id, amount } = request;
        let requested = amount as u64;

        let stock = self.api.stock(product_id).await?;
        ensure_in_stock(product_id, requested, stock.available)?;

        let index = self
            .snapshot
            .position(product_id)
            .ok_or(CartError::ItemNotFound { product_id })?;

        let mut items = self.snapshot.items().to_vec();
        items[index] = items[index].with_amount(requested as u32);
        Ok(items)
    }

    fn publish(&mut self, items: Vec<LineItem>) {
        self.snapshot = self.snapshot.next(items);
        tracing::debug!(
            "Published cart version {} with {} items",
            self.snapshot.version(),
            self.snapshot.len()
        );
    }

    fn reject(&self, fallback: Notification, error: CartError) {
        let notification = match error {
            CartError::StockExceeded { .. } => Notification::StockExceeded,
            _ => fallback,
        };
        tracing::warn!("{}: {}", notification, error);
        self.notifier.notify(notification);
    }
}

fn ensure_in_stock(product_id: u64, requested: u64, available: u32) -> Result<()> {
    if requested > u64::from(available) {
        return Err(CartError::StockExceeded {
            product_id,
            requested,
            available,
        });
    }
    Ok(())
}
