//! Cart commands

use std::io;

use clap::Subcommand;
use tracing::{info, warn};

use luvrang::{
    carts::{MutationOutcome, NewCartLine, SyncOutcome},
    context::AppContext,
    tables,
};

use crate::cli::CliError;

#[derive(Debug, Subcommand)]
pub(crate) enum CartCommand {
    /// Show the cart
    Show {
        /// Skip checking the remote cart first
        #[arg(long)]
        offline: bool,
    },

    /// Add a product to the cart
    Add {
        /// Product handle
        handle: String,

        /// Variant id (defaults to the first variant available for sale)
        #[arg(long)]
        variant: Option<String>,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },

    /// Set a line's quantity; zero or less removes it
    Update {
        /// Variant id of the line
        variant_id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line from the cart
    Remove {
        /// Variant id of the line
        variant_id: String,
    },

    /// Empty the cart
    Clear,

    /// Check the cart against the remote cart
    Sync,

    /// Print the checkout link
    Checkout,
}

impl CartCommand {
    pub async fn run(self, context: &AppContext, mut out: impl io::Write) -> Result<(), CliError> {
        let cart = &context.cart;

        match self {
            Self::Show { offline } => {
                if !offline {
                    match cart.sync().await {
                        SyncOutcome::Reset => {
                            writeln!(out, "Your cart had expired and has been cleared.")?;
                        }
                        SyncOutcome::Failed => {
                            warn!("could not check the remote cart, showing the local copy");
                        }
                        SyncOutcome::Skipped | SyncOutcome::InSync => {}
                    }
                }

                tables::write_cart(out, &cart.cart())?;
            }
            Self::Add {
                handle,
                variant,
                quantity,
            } => {
                let item = resolve_line(context, handle, variant, quantity).await?;
                let title = format!("{} - {}", item.product.title, item.variant_title);

                let outcome = expect_applied(cart.add_item(item).await)?;

                report(&mut out, outcome, &format!("Added {quantity} × {title}"))?;
                tables::write_cart(out, &cart.cart())?;
            }
            Self::Update {
                variant_id,
                quantity,
            } => {
                let outcome = expect_applied(cart.update_quantity(&variant_id, quantity).await)?;

                report(&mut out, outcome, "Cart updated")?;
                tables::write_cart(out, &cart.cart())?;
            }
            Self::Remove { variant_id } => {
                let outcome = expect_applied(cart.remove_item(&variant_id).await)?;

                report(&mut out, outcome, "Item removed")?;
                tables::write_cart(out, &cart.cart())?;
            }
            Self::Clear => {
                cart.clear_cart().await;

                writeln!(out, "Cart cleared.")?;
            }
            Self::Sync => match cart.sync().await {
                SyncOutcome::Skipped => writeln!(out, "Nothing to sync.")?,
                SyncOutcome::InSync => writeln!(out, "Cart is up to date.")?,
                SyncOutcome::Reset => writeln!(out, "Cart expired and was cleared.")?,
                SyncOutcome::Failed => return Err(CliError::SyncFailed),
            },
            Self::Checkout => match cart.checkout_url() {
                Some(url) => writeln!(out, "{url}")?,
                None => writeln!(out, "Your cart is empty.")?,
            },
        }

        Ok(())
    }
}

async fn resolve_line(
    context: &AppContext,
    handle: String,
    variant_id: Option<String>,
    quantity: u32,
) -> Result<NewCartLine, CliError> {
    let Some(product) = context.catalog.product_by_handle(&handle).await? else {
        return Err(CliError::ProductNotFound(handle));
    };

    let variant = match &variant_id {
        Some(id) => product.variant(id),
        None => product.default_variant(),
    };

    let Some(variant) = variant else {
        return Err(CliError::VariantNotFound {
            handle,
            variant_id: variant_id.unwrap_or_default(),
        });
    };

    if !variant.available_for_sale {
        return Err(CliError::SoldOut(format!("{} - {}", product.title, variant.title)));
    }

    Ok(NewCartLine::from_variant(&product, variant, quantity))
}

fn expect_applied(outcome: MutationOutcome) -> Result<MutationOutcome, CliError> {
    match outcome {
        MutationOutcome::Applied | MutationOutcome::CartReset => Ok(outcome),
        MutationOutcome::Rejected | MutationOutcome::Skipped | MutationOutcome::Failed => {
            Err(CliError::CartUnchanged(outcome))
        }
    }
}

fn report(out: &mut impl io::Write, outcome: MutationOutcome, applied: &str) -> io::Result<()> {
    if outcome == MutationOutcome::CartReset {
        info!("cart expired while changing it");

        return writeln!(out, "Your cart had expired and has been cleared.");
    }

    writeln!(out, "{applied}.")
}
