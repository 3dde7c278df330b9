//! LuvRang
//!
//! Storefront client for the LuvRang handmade-goods shop: catalog queries and a cart that is kept
//! in sync with the remote commerce backend.

pub mod carts;
pub mod catalog;
pub mod config;
pub mod context;
pub mod observability;
pub mod storefront;
pub mod tables;

#[cfg(test)]
mod test;
