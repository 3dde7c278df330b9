//! Integration tests for keeping the local cart in step with the remote cart

use std::{path::Path, sync::Arc};

use rusty_money::{Money, iso::INR};
use serde_json::{Value, json};
use tempfile::tempdir;
use testresult::TestResult;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, body_string_contains, method},
};

use luvrang::{
    carts::{
        CartEngine, CartGateway, CartStore, CheckoutSettings, FileCartStore, MutationOutcome,
        NewCartLine, PersistedCart, RemoteOutcome, StorefrontCartGateway, SyncOutcome,
    },
    catalog::Product,
    storefront::{MockNotifier, StorefrontClient, StorefrontClientConfig},
};

fn gateway(server: &MockServer) -> StorefrontCartGateway {
    let mut notifier = MockNotifier::new();

    notifier.expect_notify().return_const(());

    let client = StorefrontClient::with_notifier(
        StorefrontClientConfig {
            endpoint: format!("{}/graphql.json", server.uri()),
            access_token: "token".to_string(),
        },
        Arc::new(notifier),
    );

    StorefrontCartGateway::new(client, CheckoutSettings::default())
}

async fn engine(server: &MockServer, dir: &Path) -> CartEngine {
    CartEngine::restore(
        Arc::new(gateway(server)),
        Arc::new(FileCartStore::in_dir(dir)),
    )
    .await
}

fn item(variant_id: &str, amount: &str, quantity: u32) -> TestResult<NewCartLine> {
    let product: Product = serde_json::from_value(json!({
        "id": format!("gid://shopify/Product/{variant_id}"),
        "handle": format!("handle-{variant_id}"),
        "title": "Lippan Mirror",
        "variants": { "edges": [{ "node": {
            "id": variant_id,
            "title": "Large",
            "availableForSale": true,
            "price": { "amount": amount, "currencyCode": "INR" },
            "selectedOptions": [{ "name": "Size", "value": "Large" }]
        } }] },
        "priceRange": { "minVariantPrice": { "amount": amount, "currencyCode": "INR" } }
    }))?;

    let variant = product.variant(variant_id).ok_or("variant missing")?;

    Ok(NewCartLine::from_variant(&product, variant, quantity))
}

fn data(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": body }))
}

fn line_edges(lines: &[(&str, &str)]) -> Value {
    json!({
        "edges": lines
            .iter()
            .map(|(line_id, variant_id)| json!({
                "node": { "id": line_id, "merchandise": { "id": variant_id } }
            }))
            .collect::<Vec<_>>()
    })
}

async fn mount_create(server: &MockServer, variant_id: &str) {
    Mock::given(method("POST"))
        .and(body_string_contains("cartCreate"))
        .respond_with(data(json!({ "cartCreate": {
            "cart": {
                "id": "C1",
                "checkoutUrl": "https://luvrang.myshopify.com/cart/c/C1?key=abc",
                "lines": line_edges(&[("L1", variant_id)])
            },
            "userErrors": []
        } })))
        .expect(1)
        .mount(server)
        .await;
}

async fn create_cart_with(server: &MockServer, dir: &Path) -> TestResult<CartEngine> {
    mount_create(server, "V1").await;

    let engine = engine(server, dir).await;

    assert_eq!(
        engine.add_item(item("V1", "1299.0", 1)?).await,
        MutationOutcome::Applied
    );

    Ok(engine)
}

#[tokio::test]
async fn first_add_creates_cart_with_normalised_checkout_url() -> TestResult {
    let server = MockServer::start().await;
    let dir = tempdir()?;

    let engine = create_cart_with(&server, dir.path()).await?;

    assert_eq!(engine.cart_id().as_deref(), Some("C1"));
    assert_eq!(
        engine.checkout_url().as_deref(),
        Some(
            "https://luvrang.myshopify.com/cart/c/C1?key=abc&channel=online_store&return_to=https%3A%2F%2Fluvrang.in"
        )
    );
    assert_eq!(engine.total_items(), 1);
    assert_eq!(engine.subtotal()?, Some(Money::from_minor(129_900, INR)));
    assert!(engine.is_drawer_open(), "adding opens the drawer");

    Ok(())
}

#[tokio::test]
async fn repeated_add_updates_the_existing_line() -> TestResult {
    let server = MockServer::start().await;
    let dir = tempdir()?;

    let engine = create_cart_with(&server, dir.path()).await?;

    Mock::given(method("POST"))
        .and(body_string_contains("cartLinesUpdate"))
        .and(body_partial_json(json!({
            "variables": { "cartId": "C1", "lines": [{ "id": "L1", "quantity": 3 }] }
        })))
        .respond_with(data(json!({ "cartLinesUpdate": {
            "cart": { "id": "C1" },
            "userErrors": []
        } })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(
        engine.add_item(item("V1", "1299.0", 2)?).await,
        MutationOutcome::Applied
    );
    assert_eq!(engine.lines().len(), 1);
    assert_eq!(engine.total_items(), 3);
    assert_eq!(engine.subtotal()?, Some(Money::from_minor(389_700, INR)));

    Ok(())
}

#[tokio::test]
async fn added_line_takes_the_id_of_its_variant() -> TestResult {
    let server = MockServer::start().await;
    let dir = tempdir()?;

    let engine = create_cart_with(&server, dir.path()).await?;

    Mock::given(method("POST"))
        .and(body_string_contains("cartLinesAdd"))
        .respond_with(data(json!({ "cartLinesAdd": {
            "cart": { "id": "C1", "lines": line_edges(&[("L1", "V1"), ("L2", "V2")]) },
            "userErrors": []
        } })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(
        engine.add_item(item("V2", "500.0", 1)?).await,
        MutationOutcome::Applied
    );

    let line = engine
        .lines()
        .into_iter()
        .find(|line| line.variant_id == "V2")
        .ok_or("V2 line missing")?;

    assert_eq!(line.line_id.as_deref(), Some("L2"));
    assert_eq!(engine.subtotal()?, Some(Money::from_minor(179_900, INR)));

    Ok(())
}

#[tokio::test]
async fn cart_not_found_on_add_resets_and_persists_empty_cart() -> TestResult {
    let server = MockServer::start().await;
    let dir = tempdir()?;

    let engine = create_cart_with(&server, dir.path()).await?;

    Mock::given(method("POST"))
        .and(body_string_contains("cartLinesAdd"))
        .respond_with(data(json!({ "cartLinesAdd": {
            "cart": null,
            "userErrors": [{ "field": ["cartId"], "message": "The specified cart does not exist." }]
        } })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(
        engine.add_item(item("V2", "500.0", 1)?).await,
        MutationOutcome::CartReset
    );
    assert!(engine.lines().is_empty(), "both lines gone");
    assert_eq!(engine.cart_id(), None);
    assert_eq!(engine.checkout_url(), None);
    assert_eq!(
        FileCartStore::in_dir(dir.path()).load().await?,
        Some(PersistedCart::default())
    );

    Ok(())
}

#[tokio::test]
async fn store_unavailable_leaves_cart_untouched() -> TestResult {
    let server = MockServer::start().await;
    let dir = tempdir()?;

    let engine = create_cart_with(&server, dir.path()).await?;
    let before = engine.cart();

    Mock::given(method("POST"))
        .and(body_string_contains("cartLinesUpdate"))
        .respond_with(ResponseTemplate::new(402))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(
        engine.update_quantity("V1", 5).await,
        MutationOutcome::Rejected
    );
    assert_eq!(engine.cart(), before);

    Ok(())
}

#[tokio::test]
async fn removing_the_only_line_resets_the_cart() -> TestResult {
    let server = MockServer::start().await;
    let dir = tempdir()?;

    let engine = create_cart_with(&server, dir.path()).await?;

    Mock::given(method("POST"))
        .and(body_string_contains("cartLinesRemove"))
        .and(body_partial_json(json!({ "variables": { "cartId": "C1", "lineIds": ["L1"] } })))
        .respond_with(data(json!({ "cartLinesRemove": {
            "cart": { "id": "C1" },
            "userErrors": []
        } })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(engine.remove_item("V1").await, MutationOutcome::Applied);
    assert!(engine.lines().is_empty(), "line removed");
    assert_eq!(engine.cart_id(), None);
    assert_eq!(engine.checkout_url(), None);

    Ok(())
}

#[tokio::test]
async fn restored_cart_resets_when_remote_cart_expired() -> TestResult {
    let server = MockServer::start().await;
    let dir = tempdir()?;

    let first = create_cart_with(&server, dir.path()).await?;
    let persisted = first.cart().snapshot();

    drop(first);

    let restored = engine(&server, dir.path()).await;

    assert_eq!(restored.cart().snapshot(), persisted);
    assert!(!restored.is_drawer_open(), "drawer state is not persisted");

    Mock::given(method("POST"))
        .and(body_string_contains("query cart("))
        .and(body_partial_json(json!({ "variables": { "id": "C1" } })))
        .respond_with(data(json!({ "cart": null })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(restored.sync().await, SyncOutcome::Reset);
    assert_eq!(restored.cart_id(), None);
    assert!(restored.lines().is_empty(), "expired cart is emptied");

    Ok(())
}

#[tokio::test]
async fn sync_keeps_a_live_cart() -> TestResult {
    let server = MockServer::start().await;
    let dir = tempdir()?;

    let engine = create_cart_with(&server, dir.path()).await?;

    Mock::given(method("POST"))
        .and(body_string_contains("query cart("))
        .respond_with(data(json!({ "cart": { "id": "C1", "totalQuantity": 1 } })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(engine.sync().await, SyncOutcome::InSync);
    assert_eq!(engine.total_items(), 1);

    Ok(())
}

#[tokio::test]
async fn gateway_reports_validation_errors_as_failure() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("cartCreate"))
        .respond_with(data(json!({ "cartCreate": {
            "cart": null,
            "userErrors": [{ "field": ["input", "lines", "0", "quantity"], "message": "Quantity is invalid" }]
        } })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gateway(&server).create_cart("V1", 1).await?;

    assert!(
        matches!(&outcome, RemoteOutcome::Failure(errors) if errors.len() == 1),
        "{outcome:?}"
    );

    Ok(())
}
