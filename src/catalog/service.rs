//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use serde::Deserialize;
use serde_json::json;

use crate::{
    catalog::{
        errors::CatalogError,
        models::{Collection, Product},
        queries::{
            COLLECTION_BY_HANDLE_QUERY, COLLECTIONS_QUERY, PRODUCT_BY_HANDLE_QUERY, PRODUCTS_QUERY,
        },
    },
    storefront::{Connection, StorefrontClient},
};

/// Catalog backed by the storefront API.
#[derive(Debug, Clone)]
pub struct StorefrontCatalog {
    client: StorefrontClient,
}

impl StorefrontCatalog {
    #[must_use]
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: Connection<Product>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductByHandleData {
    product_by_handle: Option<Product>,
}

#[derive(Debug, Deserialize)]
struct CollectionsData {
    collections: Connection<Collection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionByHandleData {
    collection_by_handle: Option<Collection>,
}

#[async_trait]
impl CatalogService for StorefrontCatalog {
    async fn products(
        &self,
        first: u32,
        query: Option<String>,
    ) -> Result<Vec<Product>, CatalogError> {
        let data: ProductsData = self
            .client
            .request(PRODUCTS_QUERY, &json!({ "first": first, "query": query }))
            .await?
            .ok_or(CatalogError::Unavailable)?;

        Ok(data.products.into_nodes())
    }

    async fn product_by_handle(&self, handle: &str) -> Result<Option<Product>, CatalogError> {
        let data: ProductByHandleData = self
            .client
            .request(PRODUCT_BY_HANDLE_QUERY, &json!({ "handle": handle }))
            .await?
            .ok_or(CatalogError::Unavailable)?;

        Ok(data.product_by_handle)
    }

    async fn collections(&self, first: u32) -> Result<Vec<Collection>, CatalogError> {
        let data: CollectionsData = self
            .client
            .request(COLLECTIONS_QUERY, &json!({ "first": first }))
            .await?
            .ok_or(CatalogError::Unavailable)?;

        Ok(data.collections.into_nodes())
    }

    async fn collection_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Collection>, CatalogError> {
        let data: CollectionByHandleData = self
            .client
            .request(COLLECTION_BY_HANDLE_QUERY, &json!({ "handle": handle }))
            .await?
            .ok_or(CatalogError::Unavailable)?;

        Ok(data.collection_by_handle)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List products, optionally filtered by a free-text search query.
    async fn products(
        &self,
        first: u32,
        query: Option<String>,
    ) -> Result<Vec<Product>, CatalogError>;

    /// Look up a product by its handle.
    async fn product_by_handle(&self, handle: &str) -> Result<Option<Product>, CatalogError>;

    /// List collections with their first page of products.
    async fn collections(&self, first: u32) -> Result<Vec<Collection>, CatalogError>;

    /// Look up a collection by its handle.
    async fn collection_by_handle(&self, handle: &str)
    -> Result<Option<Collection>, CatalogError>;
}
