//! Catalog
//!
//! Read-only product and collection queries.

mod errors;
pub mod models;
pub mod prices;
mod queries;
mod service;

pub use errors::CatalogError;
pub use models::*;
pub use prices::{Price, PriceError};
pub use service::*;
