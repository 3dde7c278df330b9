//! Storefront API
//!
//! The single request/response primitive every remote call goes through: one GraphQL endpoint,
//! authenticated with a fixed public access token.

mod client;
mod errors;
pub mod graphql;
mod notices;

pub use client::{StorefrontClient, StorefrontClientConfig};
pub use errors::StorefrontError;
pub use graphql::{Connection, Edge, UserError};
pub use notices::*;
