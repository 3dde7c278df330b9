//! Integration tests for the storefront client and catalog queries

use std::sync::Arc;

use serde_json::{Value, json};
use testresult::TestResult;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, body_string_contains, header, method, path},
};

use luvrang::{
    catalog::{CatalogError, CatalogService, StorefrontCatalog},
    storefront::{
        MockNotifier, Notice, StorefrontClient, StorefrontClientConfig, StorefrontError,
    },
};

const TOKEN: &str = "storefront-token";

fn config(server: &MockServer) -> StorefrontClientConfig {
    StorefrontClientConfig {
        endpoint: format!("{}/api/2024-01/graphql.json", server.uri()),
        access_token: TOKEN.to_string(),
    }
}

fn silent_notifier() -> Arc<MockNotifier> {
    let mut notifier = MockNotifier::new();

    notifier.expect_notify().never();

    Arc::new(notifier)
}

fn product(handle: &str) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{handle}"),
        "handle": handle,
        "title": "Lippan Mirror",
        "description": "",
        "descriptionHtml": "",
        "tags": [],
        "productType": "Wall Art",
        "images": { "edges": [] },
        "variants": { "edges": [
            { "node": {
                "id": "gid://shopify/ProductVariant/11",
                "title": "Large",
                "availableForSale": true,
                "price": { "amount": "1299.0", "currencyCode": "INR" },
                "compareAtPrice": null,
                "selectedOptions": [{ "name": "Size", "value": "Large" }],
                "image": null
            } }
        ] },
        "priceRange": {
            "minVariantPrice": { "amount": "1299.0", "currencyCode": "INR" },
            "maxVariantPrice": { "amount": "1299.0", "currencyCode": "INR" }
        },
        "compareAtPriceRange": null
    })
}

#[tokio::test]
async fn request_sends_token_and_variables() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/2024-01/graphql.json"))
        .and(header("X-Shopify-Storefront-Access-Token", TOKEN))
        .and(body_partial_json(json!({ "variables": { "first": 2, "query": "tag:lippan" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "products": { "edges": [
                { "node": product("lippan-mirror") },
                { "node": product("lippan-clock") }
            ] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = StorefrontCatalog::new(StorefrontClient::with_notifier(
        config(&server),
        silent_notifier(),
    ));

    let products = catalog.products(2, Some("tag:lippan".to_string())).await?;

    assert_eq!(
        products
            .iter()
            .map(|product| product.handle.as_str())
            .collect::<Vec<_>>(),
        ["lippan-mirror", "lippan-clock"]
    );

    Ok(())
}

#[tokio::test]
async fn payment_required_returns_nothing_and_notifies() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(402).set_body_string("Payment Required"))
        .expect(1)
        .mount(&server)
        .await;

    let mut notifier = MockNotifier::new();

    notifier
        .expect_notify()
        .withf(|notice| *notice == Notice::StoreUnavailable)
        .times(1)
        .return_const(());

    let client = StorefrontClient::with_notifier(config(&server), Arc::new(notifier));

    let result: Option<Value> = client.request("{ shop { name } }", &json!({})).await?;

    assert_eq!(result, None);

    Ok(())
}

#[tokio::test]
async fn payment_required_makes_catalog_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(402))
        .mount(&server)
        .await;

    let mut notifier = MockNotifier::new();

    notifier.expect_notify().return_const(());

    let catalog = StorefrontCatalog::new(StorefrontClient::with_notifier(
        config(&server),
        Arc::new(notifier),
    ));

    assert!(matches!(
        catalog.collections(10).await,
        Err(CatalogError::Unavailable)
    ));
}

#[tokio::test]
async fn other_failure_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = StorefrontClient::with_notifier(config(&server), silent_notifier());

    let result = client.request::<_, Value>("{ shop { name } }", &json!({})).await;

    assert!(
        matches!(
            &result,
            Err(StorefrontError::UnexpectedStatus { status: 500, body }) if body == "boom"
        ),
        "{result:?}"
    );
}

#[tokio::test]
async fn graphql_errors_are_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Field 'nope' doesn't exist" }, { "message": "Throttled" }]
        })))
        .mount(&server)
        .await;

    let client = StorefrontClient::with_notifier(config(&server), silent_notifier());

    let result = client.request::<_, Value>("{ nope }", &json!({})).await;

    assert!(
        matches!(&result, Err(StorefrontError::Graphql(messages)) if messages.len() == 2),
        "{result:?}"
    );
}

#[tokio::test]
async fn missing_data_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = StorefrontClient::with_notifier(config(&server), silent_notifier());

    assert!(matches!(
        client.request::<_, Value>("{ shop { name } }", &json!({})).await,
        Err(StorefrontError::MissingData)
    ));
}

#[tokio::test]
async fn unknown_handle_is_none() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("productByHandle"))
        .and(body_partial_json(json!({ "variables": { "handle": "missing" } })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "productByHandle": null } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let catalog = StorefrontCatalog::new(StorefrontClient::with_notifier(
        config(&server),
        silent_notifier(),
    ));

    assert_eq!(catalog.product_by_handle("missing").await?, None);

    Ok(())
}

#[tokio::test]
async fn collection_by_handle_includes_products() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("collectionByHandle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "collectionByHandle": {
                "id": "gid://shopify/Collection/1",
                "handle": "wall-art",
                "title": "Wall Art",
                "description": "",
                "image": null,
                "products": { "edges": [{ "node": product("lippan-mirror") }] }
            } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = StorefrontCatalog::new(StorefrontClient::with_notifier(
        config(&server),
        silent_notifier(),
    ));

    let collection = catalog
        .collection_by_handle("wall-art")
        .await?
        .ok_or("collection missing")?;

    assert_eq!(collection.title, "Wall Art");
    assert_eq!(collection.products.len(), 1);

    Ok(())
}
