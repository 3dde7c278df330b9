//! Catalog commands

use std::io;

use clap::Subcommand;

use luvrang::{context::AppContext, tables};

use crate::cli::CliError;

#[derive(Debug, Subcommand)]
pub(crate) enum CatalogCommand {
    /// List products
    Products {
        /// Number of products to fetch
        #[arg(long, default_value_t = 20)]
        first: u32,

        /// Storefront search query, e.g. `tag:lippan`
        #[arg(long)]
        query: Option<String>,
    },

    /// Show one product and its variants
    Product {
        /// Product handle
        handle: String,
    },

    /// List collections
    Collections {
        /// Number of collections to fetch
        #[arg(long, default_value_t = 10)]
        first: u32,
    },

    /// List the products in one collection
    Collection {
        /// Collection handle
        handle: String,
    },
}

impl CatalogCommand {
    pub async fn run(self, context: &AppContext, mut out: impl io::Write) -> Result<(), CliError> {
        match self {
            Self::Products { first, query } => {
                let products = context.catalog.products(first, query).await?;

                tables::write_products(out, &products)?;
            }
            Self::Product { handle } => {
                let product = context
                    .catalog
                    .product_by_handle(&handle)
                    .await?
                    .ok_or(CliError::ProductNotFound(handle))?;

                tables::write_product(out, &product)?;
            }
            Self::Collections { first } => {
                let collections = context.catalog.collections(first).await?;

                tables::write_collections(out, &collections)?;
            }
            Self::Collection { handle } => {
                let collection = context
                    .catalog
                    .collection_by_handle(&handle)
                    .await?
                    .ok_or(CliError::CollectionNotFound(handle))?;

                writeln!(out, "{} ({})", collection.title, collection.handle)?;

                tables::write_products(out, &collection.products.into_nodes())?;
            }
        }

        Ok(())
    }
}
