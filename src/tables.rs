//! Terminal tables for catalog and cart views.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    carts::Cart,
    catalog::{Collection, PriceError, Product},
};

/// Errors that can occur when writing a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// A line total could not be computed.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Failed to write output.
    #[error("failed to write output")]
    Io(#[from] io::Error),
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    right_aligned: Columns<std::ops::Range<usize>>,
) -> Result<(), TableError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(right_aligned, Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Write one row per product.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_products(mut out: impl io::Write, products: &[Product]) -> Result<(), TableError> {
    if products.is_empty() {
        writeln!(out, "No products found.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Handle", "Title", "Type", "From", "Variants"]);

    for product in products {
        builder.push_record([
            product.handle.clone(),
            product.title.clone(),
            product.product_type.clone(),
            product.price_range.min_variant_price.display(),
            product.variants.len().to_string(),
        ]);
    }

    write_table(&mut out, builder, Columns::new(3..5))
}

/// Write a product's details and its variants.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_product(mut out: impl io::Write, product: &Product) -> Result<(), TableError> {
    writeln!(out, "{} ({})", product.title, product.handle)?;

    if !product.description.is_empty() {
        writeln!(out, "\n{}\n", product.description)?;
    }

    let mut builder = Builder::default();

    builder.push_record(["Variant", "Title", "Options", "Available", "Price"]);

    for variant in product.variants.nodes() {
        let options = variant
            .selected_options
            .iter()
            .map(|option| format!("{}: {}", option.name, option.value))
            .collect::<Vec<_>>()
            .join(", ");

        builder.push_record([
            variant.id.clone(),
            variant.title.clone(),
            options,
            if variant.available_for_sale { "yes" } else { "no" }.to_string(),
            variant.price.display(),
        ]);
    }

    write_table(&mut out, builder, Columns::new(4..5))
}

/// Write one row per collection.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_collections(
    mut out: impl io::Write,
    collections: &[Collection],
) -> Result<(), TableError> {
    if collections.is_empty() {
        writeln!(out, "No collections found.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Handle", "Title", "Products"]);

    for collection in collections {
        builder.push_record([
            collection.handle.clone(),
            collection.title.clone(),
            collection.products.len().to_string(),
        ]);
    }

    write_table(&mut out, builder, Columns::new(2..3))
}

/// Write the cart lines followed by item count, subtotal and checkout link.
///
/// # Errors
///
/// Returns an error if a line total cannot be computed or the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), TableError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Variant", "Item", "Unit Price", "Qty", "Total"]);

    for line in cart.lines() {
        builder.push_record([
            line.variant_id.clone(),
            format!("{} - {}", line.product.title, line.variant_title),
            line.price.display(),
            line.quantity.to_string(),
            line.line_total()?.to_string(),
        ]);
    }

    write_table(&mut out, builder, Columns::new(2..5))?;

    writeln!(out, " Items:    {}", cart.total_items())?;

    if let Some(subtotal) = cart.subtotal()? {
        writeln!(out, " Subtotal: {subtotal}")?;
    }

    if let Some(url) = cart.checkout_url() {
        writeln!(out, " Checkout: {url}")?;
    }

    Ok(())
}
