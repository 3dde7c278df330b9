//! Catalog errors.

use thiserror::Error;

use crate::storefront::StorefrontError;

/// Errors raised by catalog queries.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backend reported the shop as unavailable.
    #[error("store is temporarily unavailable")]
    Unavailable,

    /// The underlying storefront request failed.
    #[error("storefront request failed")]
    Storefront(#[from] StorefrontError),
}
