//! Staged cart transitions.
//!
//! Every mutation is split in two: a plan computed from the current cart before the remote call,
//! and a [`CartChange`] applied only once the remote call has succeeded.

use tracing::debug;

use crate::carts::models::{Cart, CartLine, RemoteCart};

/// Remote call needed to add a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AddPlan {
    /// No remote cart yet: create one holding this line.
    CreateCart,

    /// The variant is already in the cart: set its line to the summed quantity.
    IncreaseQuantity {
        cart_id: String,
        line_id: String,
        quantity: u32,
    },

    /// Add a new line to the existing remote cart.
    AppendLine { cart_id: String },

    /// Nothing can be sent.
    Skip(&'static str),
}

/// Remote coordinates of an existing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LinePlan {
    Remote { cart_id: String, line_id: String },
    Skip(&'static str),
}

/// A confirmed change to apply to the local cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CartChange {
    Create { remote: RemoteCart, line: CartLine },
    SetQuantity { variant_id: String, quantity: u32 },
    AppendLine(CartLine),
    RemoveLine { variant_id: String },
    Reset,
}

impl Cart {
    pub(crate) fn plan_add(&self, variant_id: &str, quantity: u32) -> AddPlan {
        let Some(remote) = self.remote() else {
            return AddPlan::CreateCart;
        };

        let Some(existing) = self.line(variant_id) else {
            return AddPlan::AppendLine {
                cart_id: remote.cart_id.clone(),
            };
        };

        let Some(line_id) = existing.line_id.clone() else {
            return AddPlan::Skip("existing line has no remote line id");
        };

        let Some(quantity) = existing.quantity.checked_add(quantity) else {
            return AddPlan::Skip("summed quantity overflows");
        };

        AddPlan::IncreaseQuantity {
            cart_id: remote.cart_id.clone(),
            line_id,
            quantity,
        }
    }

    pub(crate) fn plan_line(&self, variant_id: &str) -> LinePlan {
        let Some(remote) = self.remote() else {
            return LinePlan::Skip("cart is not backed by a remote cart");
        };

        let Some(line) = self.line(variant_id) else {
            return LinePlan::Skip("variant is not in the cart");
        };

        let Some(line_id) = line.line_id.clone() else {
            return LinePlan::Skip("line has no remote line id");
        };

        LinePlan::Remote {
            cart_id: remote.cart_id.clone(),
            line_id,
        }
    }

    pub(crate) fn apply(&mut self, change: CartChange) {
        debug!(?change, "applying cart change");

        match change {
            CartChange::Create { remote, line } => {
                self.lines = vec![line];
                self.remote = Some(remote);
            }
            CartChange::SetQuantity {
                variant_id,
                quantity,
            } => {
                if quantity == 0 {
                    self.apply(CartChange::RemoveLine { variant_id });
                    return;
                }

                if let Some(line) = self
                    .lines
                    .iter_mut()
                    .find(|line| line.variant_id == variant_id)
                {
                    line.quantity = quantity;
                }
            }
            CartChange::AppendLine(line) => {
                match self
                    .lines
                    .iter_mut()
                    .find(|existing| existing.variant_id == line.variant_id)
                {
                    Some(existing) => *existing = line,
                    None => self.lines.push(line),
                }
            }
            CartChange::RemoveLine { variant_id } => {
                self.lines.retain(|line| line.variant_id != variant_id);

                if self.lines.is_empty() {
                    self.reset();
                }
            }
            CartChange::Reset => self.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test::fixtures::{backed_cart, line, remote};

    use super::*;

    #[test]
    fn unbacked_cart_plans_creation() {
        assert_eq!(Cart::new().plan_add("V1", 1), AddPlan::CreateCart);
    }

    #[test]
    fn known_variant_plans_summed_quantity() {
        let cart = backed_cart(vec![line("V1", "1299.0", 1)]);

        assert_eq!(
            cart.plan_add("V1", 2),
            AddPlan::IncreaseQuantity {
                cart_id: "C1".to_string(),
                line_id: "L-V1".to_string(),
                quantity: 3,
            }
        );
    }

    #[test]
    fn planning_does_not_touch_the_cart() {
        let cart = backed_cart(vec![line("V1", "1299.0", 1)]);
        let before = cart.clone();

        let _plan = cart.plan_add("V1", 5);

        assert_eq!(cart, before);
    }

    #[test]
    fn new_variant_plans_append() {
        let cart = backed_cart(vec![line("V1", "1299.0", 1)]);

        assert_eq!(
            cart.plan_add("V2", 1),
            AddPlan::AppendLine {
                cart_id: "C1".to_string()
            }
        );
    }

    #[test]
    fn line_without_remote_id_is_skipped() {
        let mut pending = line("V1", "1299.0", 1);
        pending.line_id = None;

        let cart = backed_cart(vec![pending]);

        assert!(matches!(cart.plan_add("V1", 1), AddPlan::Skip(_)));
        assert!(matches!(cart.plan_line("V1"), LinePlan::Skip(_)));
    }

    #[test]
    fn unknown_variant_line_plan_is_skipped() {
        let cart = backed_cart(vec![line("V1", "1299.0", 1)]);

        assert!(matches!(cart.plan_line("V9"), LinePlan::Skip(_)));
        assert!(matches!(Cart::new().plan_line("V1"), LinePlan::Skip(_)));
    }

    #[test]
    fn create_replaces_lines_and_sets_remote() {
        let mut cart = Cart::new();

        cart.apply(CartChange::Create {
            remote: remote("C1"),
            line: line("V1", "1299.0", 1),
        });

        assert_eq!(cart.cart_id(), Some("C1"));
        assert!(cart.checkout_url().is_some());
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn append_keeps_one_line_per_variant() {
        let mut cart = backed_cart(vec![line("V1", "1299.0", 1)]);

        cart.apply(CartChange::AppendLine(line("V1", "1299.0", 4)));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line("V1").map(|line| line.quantity), Some(4));
    }

    #[test]
    fn removing_last_line_resets_the_cart() {
        let mut cart = backed_cart(vec![line("V1", "1299.0", 1)]);

        cart.apply(CartChange::RemoveLine {
            variant_id: "V1".to_string(),
        });

        assert!(cart.is_empty());
        assert_eq!(cart.cart_id(), None);
        assert_eq!(cart.checkout_url(), None);
    }

    #[test]
    fn removing_one_of_two_lines_keeps_backing() {
        let mut cart = backed_cart(vec![line("V1", "1299.0", 1), line("V2", "500.0", 1)]);

        cart.apply(CartChange::RemoveLine {
            variant_id: "V1".to_string(),
        });

        assert_eq!(cart.cart_id(), Some("C1"));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn zero_quantity_removes_the_line() {
        let mut cart = backed_cart(vec![line("V1", "1299.0", 1), line("V2", "500.0", 1)]);

        cart.apply(CartChange::SetQuantity {
            variant_id: "V2".to_string(),
            quantity: 0,
        });

        assert!(cart.line("V2").is_none());
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn reset_clears_everything_together() {
        let mut cart = backed_cart(vec![line("V1", "1299.0", 2)]);

        cart.apply(CartChange::Reset);

        assert_eq!(cart.snapshot(), crate::carts::PersistedCart::default());
    }
}
