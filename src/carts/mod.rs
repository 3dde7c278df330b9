//! Carts
//!
//! Local cart state kept in step with the remote cart resource.

pub mod checkout;
mod engine;
pub mod gateway;
pub mod models;
mod queries;
pub mod store;
mod transitions;

pub use checkout::{CheckoutSettings, format_checkout_url};
pub use engine::*;
pub use gateway::{
    CartGateway, CartSummary, CreatedCart, MockCartGateway, RemoteOutcome, StorefrontCartGateway,
    is_cart_not_found,
};
pub use models::{Cart, CartLine, NewCartLine, RemoteCart};
pub use store::{CartStore, CartStoreError, FileCartStore, MemoryCartStore, PersistedCart};
