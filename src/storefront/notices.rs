//! User-facing notices raised by the storefront layer.

use mockall::automock;
use tracing::warn;

/// A condition the user should be told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The shop's backend account is not in good standing (HTTP 402), so the store cannot take
    /// requests for now.
    StoreUnavailable,
}

impl Notice {
    /// Short headline for the notice.
    pub fn title(self) -> &'static str {
        match self {
            Self::StoreUnavailable => "Store temporarily unavailable",
        }
    }

    /// Longer explanation shown under the headline.
    pub fn description(self) -> &'static str {
        match self {
            Self::StoreUnavailable => {
                "The shop is not accepting orders right now. Please try again in a little while."
            }
        }
    }
}

/// Receives notices for display.
#[automock]
pub trait Notifier: Send + Sync {
    /// Surface a notice to the user.
    fn notify(&self, notice: Notice);
}

/// Notifier that writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        warn!(?notice, "{}: {}", notice.title(), notice.description());
    }
}
