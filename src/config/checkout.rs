//! Checkout Config

use clap::Args;

use crate::carts::CheckoutSettings;

/// Checkout link settings.
#[derive(Debug, Clone, Args)]
pub struct CheckoutConfig {
    /// Sales channel attributed to checkouts
    #[arg(long, env = "CHECKOUT_CHANNEL", default_value = "online_store")]
    pub checkout_channel: String,

    /// Where the shopper lands after checkout
    #[arg(long, env = "CHECKOUT_RETURN_TO", default_value = "https://luvrang.in")]
    pub checkout_return_to: String,
}

impl CheckoutConfig {
    pub fn settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            channel: self.checkout_channel.clone(),
            return_to: self.checkout_return_to.clone(),
        }
    }
}
