//! App Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use thiserror::Error;
use tracing::debug;

use crate::{
    carts::{CartEngine, FileCartStore, StorefrontCartGateway},
    catalog::{CatalogService, StorefrontCatalog},
    config::AppConfig,
    storefront::StorefrontClient,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("no cart storage directory configured and the platform has no data directory")]
    NoStateDir,
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub cart: Arc<CartEngine>,
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from configuration, restoring the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error when no cart storage directory can be determined.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let dir = config
            .storage
            .resolve_dir()
            .ok_or(AppInitError::NoStateDir)?;

        let client = StorefrontClient::new(config.storefront.client_config());
        let store = FileCartStore::in_dir(dir);

        debug!(
            endpoint = client.endpoint(),
            store = %store.path().display(),
            "building app context"
        );

        let gateway = StorefrontCartGateway::new(client.clone(), config.checkout.settings());
        let cart = CartEngine::restore(Arc::new(gateway), Arc::new(store)).await;

        Ok(Self {
            catalog: Arc::new(StorefrontCatalog::new(client)),
            cart: Arc::new(cart),
        })
    }
}
