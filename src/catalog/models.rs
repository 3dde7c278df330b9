//! Catalog Models

use serde::{Deserialize, Serialize};

use crate::{catalog::prices::Price, storefront::Connection};

/// Product or variant image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image URL.
    pub url: String,

    /// Alternative text.
    #[serde(default)]
    pub alt_text: Option<String>,

    /// Width in pixels.
    #[serde(default)]
    pub width: Option<u32>,

    /// Height in pixels.
    #[serde(default)]
    pub height: Option<u32>,
}

/// One chosen product option, e.g. `Size: Large`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name.
    pub name: String,

    /// Option value.
    pub value: String,
}

/// Purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub available_for_sale: bool,

    pub price: Price,

    #[serde(default)]
    pub compare_at_price: Option<Price>,

    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,

    #[serde(default)]
    pub image: Option<Image>,
}

/// Minimum and maximum variant prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Cheapest variant price.
    pub min_variant_price: Price,

    /// Most expensive variant price.
    #[serde(default)]
    pub max_variant_price: Option<Price>,
}

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub handle: String,
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub description_html: String,

    #[serde(default)]
    pub images: Connection<Image>,

    #[serde(default)]
    pub variants: Connection<Variant>,

    pub price_range: PriceRange,

    #[serde(default)]
    pub compare_at_price_range: Option<PriceRange>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub product_type: String,
}

impl Product {
    /// Find a variant by its identifier.
    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.nodes().find(|variant| variant.id == variant_id)
    }

    /// The variant to preselect: the first one available for sale, otherwise the first one.
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants
            .nodes()
            .find(|variant| variant.available_for_sale)
            .or_else(|| self.variants.first())
    }

    /// First product image.
    pub fn featured_image(&self) -> Option<&Image> {
        self.images.first()
    }
}

/// Catalog collection with a page of its products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub handle: String,
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image: Option<Image>,

    #[serde(default)]
    pub products: Connection<Product>,
}
