//! Cart synchronisation engine.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::{
        Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use rusty_money::{Money, iso::Currency};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::{
    carts::{
        gateway::{CartGateway, CreatedCart, RemoteOutcome},
        models::{Cart, CartLine, NewCartLine, RemoteCart},
        store::CartStore,
        transitions::{AddPlan, CartChange, LinePlan},
    },
    catalog::PriceError,
    storefront::StorefrontError,
};

/// How a cart mutation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The backend confirmed the change and the local cart was updated.
    Applied,

    /// The backend refused the change, or the shop is unavailable. Nothing changed locally.
    Rejected,

    /// The remote cart no longer exists; the local cart was emptied.
    CartReset,

    /// Nothing was sent because the cart is not in a state where the intent makes sense.
    Skipped,

    /// The request did not complete. Nothing changed locally.
    Failed,
}

/// How a reconciliation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No remote cart to check, or a reconciliation is already running.
    Skipped,

    /// The remote cart still exists and holds items.
    InSync,

    /// The remote cart is gone or empty; the local cart was emptied.
    Reset,

    /// The remote cart could not be checked. Nothing changed locally.
    Failed,
}

/// Owns the local cart and mediates every change through the remote cart.
///
/// Mutations queue behind each other in arrival order, so each one plans against the cart the
/// previous one left behind. Reads never wait on the network.
pub struct CartEngine {
    gateway: Arc<dyn CartGateway>,
    store: Arc<dyn CartStore>,
    state: RwLock<Cart>,
    mutations: Mutex<()>,
    pending: AtomicUsize,
    syncing: AtomicBool,
}

impl Debug for CartEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartEngine")
            .field("state", &*self.read())
            .field("pending", &self.pending.load(Ordering::Acquire))
            .field("syncing", &self.syncing.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

/// Counts a queued or running mutation for as long as it is alive.
struct PendingGuard<'a>(&'a AtomicUsize);

impl<'a> PendingGuard<'a> {
    fn new(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);

        Self(counter)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Clears the reconciliation flag on every exit path.
struct SyncingGuard<'a>(&'a AtomicBool);

impl Drop for SyncingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CartEngine {
    /// Engine with an empty, unbacked cart.
    pub fn new(gateway: Arc<dyn CartGateway>, store: Arc<dyn CartStore>) -> Self {
        Self::with_cart(gateway, store, Cart::new())
    }

    /// Engine seeded with the last persisted snapshot.
    ///
    /// The snapshot is not checked against the backend here; call [`CartEngine::sync`] when the
    /// cart is next shown. An unreadable snapshot is logged and replaced by an empty cart.
    pub async fn restore(gateway: Arc<dyn CartGateway>, store: Arc<dyn CartStore>) -> Self {
        let cart = match store.load().await {
            Ok(Some(snapshot)) => Cart::from_snapshot(snapshot),
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!("discarding unreadable cart snapshot: {error}");

                Cart::new()
            }
        };

        Self::with_cart(gateway, store, cart)
    }

    fn with_cart(gateway: Arc<dyn CartGateway>, store: Arc<dyn CartStore>, cart: Cart) -> Self {
        Self {
            gateway,
            store,
            state: RwLock::new(cart),
            mutations: Mutex::new(()),
            pending: AtomicUsize::new(0),
            syncing: AtomicBool::new(false),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Cart> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Cart> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn open_drawer(&self) {
        self.write().set_drawer_open(true);
    }

    pub fn close_drawer(&self) {
        self.write().set_drawer_open(false);
    }

    pub fn is_drawer_open(&self) -> bool {
        self.read().is_drawer_open()
    }

    /// Whether a mutation is queued or in flight. Advisory, for disabling controls.
    pub fn is_loading(&self) -> bool {
        self.pending.load(Ordering::Acquire) > 0
    }

    /// Whether a reconciliation is running.
    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::Acquire)
    }

    /// A copy of the current cart.
    pub fn cart(&self) -> Cart {
        self.read().clone()
    }

    /// A copy of the current lines.
    pub fn lines(&self) -> Vec<CartLine> {
        self.read().lines().to_vec()
    }

    pub fn cart_id(&self) -> Option<String> {
        self.read().cart_id().map(str::to_owned)
    }

    pub fn checkout_url(&self) -> Option<String> {
        self.read().checkout_url().map(str::to_owned)
    }

    pub fn total_items(&self) -> u64 {
        self.read().total_items()
    }

    /// Subtotal of the current lines, `None` for an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error when a line price cannot be read or currencies differ.
    pub fn subtotal(&self) -> Result<Option<Money<'static, Currency>>, PriceError> {
        self.read().subtotal()
    }

    /// Add `item.quantity` units of a variant.
    ///
    /// A variant already in the cart has its quantity increased instead of gaining a second line.
    /// The drawer opens when the add succeeds.
    pub async fn add_item(&self, item: NewCartLine) -> MutationOutcome {
        if item.quantity == 0 {
            warn!(variant_id = %item.variant_id, "ignoring add with zero quantity");

            return MutationOutcome::Skipped;
        }

        let _pending = PendingGuard::new(&self.pending);
        let _gate = self.mutations.lock().await;

        let plan = self.read().plan_add(&item.variant_id, item.quantity);

        match plan {
            AddPlan::CreateCart => {
                let result = self
                    .gateway
                    .create_cart(&item.variant_id, item.quantity)
                    .await;

                self.settle("add item", result, true, |created: CreatedCart| {
                    CartChange::Create {
                        remote: RemoteCart {
                            cart_id: created.cart_id,
                            checkout_url: created.checkout_url,
                        },
                        line: item.into_line(Some(created.line_id)),
                    }
                })
                .await
            }
            AddPlan::IncreaseQuantity {
                cart_id,
                line_id,
                quantity,
            } => {
                let result = self
                    .gateway
                    .update_line(&cart_id, &line_id, quantity)
                    .await;

                self.settle("add item", result, true, |()| CartChange::SetQuantity {
                    variant_id: item.variant_id,
                    quantity,
                })
                .await
            }
            AddPlan::AppendLine { cart_id } => {
                let result = self
                    .gateway
                    .add_line(&cart_id, &item.variant_id, item.quantity)
                    .await;

                self.settle("add item", result, true, |line_id: Option<String>| {
                    if line_id.is_none() {
                        warn!(
                            variant_id = %item.variant_id,
                            "backend did not report the new line id"
                        );
                    }

                    CartChange::AppendLine(item.into_line(line_id))
                })
                .await
            }
            AddPlan::Skip(reason) => {
                warn!(variant_id = %item.variant_id, reason, "add item skipped");

                MutationOutcome::Skipped
            }
        }
    }

    /// Set a line's quantity. Zero or less removes the line.
    pub async fn update_quantity(&self, variant_id: &str, quantity: i64) -> MutationOutcome {
        if quantity <= 0 {
            return self.remove_item(variant_id).await;
        }

        let Ok(quantity) = u32::try_from(quantity) else {
            warn!(variant_id, quantity, "quantity out of range");

            return MutationOutcome::Skipped;
        };

        let _pending = PendingGuard::new(&self.pending);
        let _gate = self.mutations.lock().await;

        let plan = self.read().plan_line(variant_id);

        let (cart_id, line_id) = match plan {
            LinePlan::Remote { cart_id, line_id } => (cart_id, line_id),
            LinePlan::Skip(reason) => {
                warn!(variant_id, reason, "update quantity skipped");

                return MutationOutcome::Skipped;
            }
        };

        let result = self
            .gateway
            .update_line(&cart_id, &line_id, quantity)
            .await;

        self.settle("update quantity", result, false, |()| {
            CartChange::SetQuantity {
                variant_id: variant_id.to_string(),
                quantity,
            }
        })
        .await
    }

    /// Remove a variant's line. Removing the last line empties the cart and drops the remote
    /// cart reference.
    pub async fn remove_item(&self, variant_id: &str) -> MutationOutcome {
        let _pending = PendingGuard::new(&self.pending);
        let _gate = self.mutations.lock().await;

        let plan = self.read().plan_line(variant_id);

        let (cart_id, line_id) = match plan {
            LinePlan::Remote { cart_id, line_id } => (cart_id, line_id),
            LinePlan::Skip(reason) => {
                warn!(variant_id, reason, "remove item skipped");

                return MutationOutcome::Skipped;
            }
        };

        let result = self.gateway.remove_lines(&cart_id, &[line_id]).await;

        self.settle("remove item", result, false, |()| CartChange::RemoveLine {
            variant_id: variant_id.to_string(),
        })
        .await
    }

    /// Empty the cart locally and forget the remote cart.
    pub async fn clear_cart(&self) {
        let _pending = PendingGuard::new(&self.pending);
        let _gate = self.mutations.lock().await;

        self.commit(CartChange::Reset, false).await;
    }

    /// Check that the remote cart still exists and holds items, emptying the local cart if not.
    pub async fn sync(&self) -> SyncOutcome {
        if !self.read().is_backed() {
            return SyncOutcome::Skipped;
        }

        if self.syncing.swap(true, Ordering::AcqRel) {
            return SyncOutcome::Skipped;
        }

        let _syncing = SyncingGuard(&self.syncing);
        let _gate = self.mutations.lock().await;

        let Some(cart_id) = self.cart_id() else {
            return SyncOutcome::Skipped;
        };

        match self.gateway.fetch_summary(&cart_id).await {
            Ok(RemoteOutcome::Success(summary)) if summary.total_quantity > 0 => {
                SyncOutcome::InSync
            }
            Ok(RemoteOutcome::Success(_) | RemoteOutcome::NotFound) => {
                info!(%cart_id, "remote cart expired, resetting local cart");

                self.commit(CartChange::Reset, false).await;

                SyncOutcome::Reset
            }
            Ok(RemoteOutcome::Failure(errors)) => {
                warn!(%cart_id, ?errors, "could not check remote cart");

                SyncOutcome::Failed
            }
            Err(error) => {
                error!(%cart_id, "failed to sync cart: {error}");

                SyncOutcome::Failed
            }
        }
    }

    async fn settle<T>(
        &self,
        intent: &'static str,
        result: Result<RemoteOutcome<T>, StorefrontError>,
        open_drawer: bool,
        on_success: impl FnOnce(T) -> CartChange,
    ) -> MutationOutcome {
        match result {
            Ok(RemoteOutcome::Success(value)) => {
                self.commit(on_success(value), open_drawer).await;

                MutationOutcome::Applied
            }
            Ok(RemoteOutcome::NotFound) => {
                info!(intent, "remote cart no longer exists, resetting local cart");

                self.commit(CartChange::Reset, false).await;

                MutationOutcome::CartReset
            }
            Ok(RemoteOutcome::Failure(errors)) => {
                warn!(intent, ?errors, "backend rejected cart change");

                MutationOutcome::Rejected
            }
            Err(error) => {
                error!(intent, "failed to {intent}: {error}");

                MutationOutcome::Failed
            }
        }
    }

    async fn commit(&self, change: CartChange, open_drawer: bool) {
        let snapshot = {
            let mut cart = self.write();

            cart.apply(change);

            if open_drawer {
                cart.set_drawer_open(true);
            }

            cart.snapshot()
        };

        if let Err(error) = self.store.save(&snapshot).await {
            error!("failed to persist cart: {error}");
        }
    }
}
