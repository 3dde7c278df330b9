//! Command line interface

use std::io;

use clap::{Parser, Subcommand};
use thiserror::Error;

use luvrang::{
    carts::MutationOutcome, catalog::CatalogError, config::AppConfig, context::AppContext,
    tables::TableError,
};

use crate::cli::{cart::CartCommand, catalog::CatalogCommand};

pub(crate) mod cart;
pub(crate) mod catalog;

/// LuvRang storefront client
#[derive(Debug, Parser)]
#[command(name = "luvrang", about = "LuvRang storefront client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub config: AppConfig,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Browse products and collections
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// Inspect and change the shopping cart
    #[command(subcommand)]
    Cart(CartCommand),
}

impl Command {
    pub async fn run(self, context: &AppContext, out: impl io::Write) -> Result<(), CliError> {
        match self {
            Self::Catalog(command) => command.run(context, out).await,
            Self::Cart(command) => command.run(context, out).await,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("failed to write output")]
    Io(#[from] io::Error),

    #[error("no product with handle {0:?}")]
    ProductNotFound(String),

    #[error("no collection with handle {0:?}")]
    CollectionNotFound(String),

    #[error("product {handle:?} has no variant {variant_id:?}")]
    VariantNotFound { handle: String, variant_id: String },

    #[error("{0} is sold out")]
    SoldOut(String),

    #[error("the cart was not changed ({0:?})")]
    CartUnchanged(MutationOutcome),

    #[error("the remote cart could not be checked")]
    SyncFailed,
}
