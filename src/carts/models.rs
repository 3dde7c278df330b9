//! Cart Models

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    carts::store::PersistedCart,
    catalog::{Price, PriceError, Product, SelectedOption, Variant},
};

/// One distinct variant in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Remote line identifier, unset until the backend has confirmed the line.
    pub line_id: Option<String>,

    /// Catalog snapshot taken when the line was added.
    pub product: Product,

    pub variant_id: String,
    pub variant_title: String,

    /// Unit price.
    pub price: Price,

    /// Always at least 1.
    pub quantity: u32,

    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

impl CartLine {
    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns an error when the unit price cannot be read as money.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, PriceError> {
        self.price.times(self.quantity)
    }
}

/// A line the shopper wants to add; the remote line id is not known yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    pub product: Product,
    pub variant_id: String,
    pub variant_title: String,
    pub price: Price,
    pub quantity: u32,
    pub selected_options: Vec<SelectedOption>,
}

impl NewCartLine {
    /// Build a line intent for `quantity` units of a catalog variant.
    pub fn from_variant(product: &Product, variant: &Variant, quantity: u32) -> Self {
        Self {
            product: product.clone(),
            variant_id: variant.id.clone(),
            variant_title: variant.title.clone(),
            price: variant.price.clone(),
            quantity,
            selected_options: variant.selected_options.clone(),
        }
    }

    pub(crate) fn into_line(self, line_id: Option<String>) -> CartLine {
        CartLine {
            line_id,
            product: self.product,
            variant_id: self.variant_id,
            variant_title: self.variant_title,
            price: self.price,
            quantity: self.quantity,
            selected_options: self.selected_options,
        }
    }
}

/// The remote cart resource backing the local cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCart {
    pub cart_id: String,
    pub checkout_url: String,
}

/// Local view of the shopping cart.
///
/// The remote identifier and checkout URL live in one [`RemoteCart`], so they are always set or
/// cleared together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    pub(crate) lines: Vec<CartLine>,
    pub(crate) remote: Option<RemoteCart>,
    pub(crate) drawer_open: bool,
}

impl Cart {
    /// An empty, unbacked cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `variant_id`, if present.
    pub fn line(&self, variant_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.variant_id == variant_id)
    }

    pub fn remote(&self) -> Option<&RemoteCart> {
        self.remote.as_ref()
    }

    pub fn cart_id(&self) -> Option<&str> {
        self.remote.as_ref().map(|remote| remote.cart_id.as_str())
    }

    pub fn checkout_url(&self) -> Option<&str> {
        self.remote.as_ref().map(|remote| remote.checkout_url.as_str())
    }

    /// Whether a remote cart resource backs this cart.
    pub fn is_backed(&self) -> bool {
        self.remote.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub(crate) fn set_drawer_open(&mut self, open: bool) {
        self.drawer_open = open;
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price × quantity across all lines; `None` for an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error when a price cannot be read, or when lines carry different currencies.
    pub fn subtotal(&self) -> Result<Option<Money<'static, Currency>>, PriceError> {
        let Some(first) = self.lines.first() else {
            return Ok(None);
        };

        let total = self.lines.iter().try_fold(
            Money::from_minor(0, first.price.currency()?),
            |acc, line| -> Result<_, PriceError> { Ok(acc.add(line.line_total()?)?) },
        )?;

        Ok(Some(total))
    }

    /// Drop every line and the remote backing in one step.
    pub(crate) fn reset(&mut self) {
        self.lines.clear();
        self.remote = None;
    }

    /// The durable part of the cart.
    pub fn snapshot(&self) -> PersistedCart {
        PersistedCart {
            items: self.lines.clone(),
            cart_id: self.cart_id().map(str::to_owned),
            checkout_url: self.checkout_url().map(str::to_owned),
        }
    }

    /// Rebuild a cart from a persisted snapshot.
    ///
    /// A snapshot with only one of cart id / checkout URL, or with lines but no backing cart, is
    /// restored as an empty unbacked cart.
    pub fn from_snapshot(snapshot: PersistedCart) -> Self {
        let PersistedCart {
            items,
            cart_id,
            checkout_url,
        } = snapshot;

        let Some(remote) = cart_id
            .zip(checkout_url)
            .map(|(cart_id, checkout_url)| RemoteCart {
                cart_id,
                checkout_url,
            })
        else {
            if !items.is_empty() {
                warn!(
                    lines = items.len(),
                    "persisted cart has lines but no remote cart, discarding"
                );
            }

            return Self::default();
        };

        let lines: Vec<CartLine> = items.into_iter().filter(|line| line.quantity > 0).collect();

        if lines.is_empty() {
            return Self::default();
        }

        Self {
            lines,
            remote: Some(remote),
            drawer_open: false,
        }
    }
}
