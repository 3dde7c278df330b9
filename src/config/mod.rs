//! Application configuration module

use clap::Args;

pub use crate::config::{
    checkout::CheckoutConfig,
    logging::{LogFormat, LoggingConfig},
    storage::StorageConfig,
    storefront::StorefrontConfig,
};

pub(crate) mod checkout;
pub(crate) mod logging;
pub(crate) mod storage;
pub(crate) mod storefront;

/// LuvRang storefront client configuration
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Storefront endpoint settings.
    #[command(flatten)]
    pub storefront: StorefrontConfig,

    /// Checkout link settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Local cart storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
