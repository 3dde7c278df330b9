//! Remote cart protocol.
//!
//! Each operation issues exactly one storefront request and folds the answer into a
//! [`RemoteOutcome`]. Nothing here touches local cart state.

use async_trait::async_trait;
use mockall::automock;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::{
    carts::{
        checkout::{CheckoutSettings, format_checkout_url},
        queries::{CART_CREATE, CART_LINES_ADD, CART_LINES_REMOVE, CART_LINES_UPDATE, CART_QUERY},
    },
    storefront::{Connection, StorefrontClient, StorefrontError, UserError},
};

/// Backend phrasing that means the referenced cart is gone.
///
/// The backend has no structured error code for this, so the text is matched loosely.
const CART_NOT_FOUND_PHRASES: [&str; 2] = ["cart not found", "does not exist"];

/// Result of one remote cart call that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome<T> {
    /// The backend accepted the request.
    Success(T),

    /// The backend refused the request, or the shop is unavailable (no errors).
    Failure(Vec<UserError>),

    /// The remote cart resource no longer exists.
    NotFound,
}

impl<T> RemoteOutcome<T> {
    fn from_user_errors(errors: Vec<UserError>, success: impl FnOnce() -> T) -> Self {
        if is_cart_not_found(&errors) {
            Self::NotFound
        } else if errors.is_empty() {
            Self::Success(success())
        } else {
            Self::Failure(errors)
        }
    }

    fn unavailable() -> Self {
        Self::Failure(Vec::new())
    }
}

/// Whether the backend's errors say the cart itself no longer exists.
pub fn is_cart_not_found(errors: &[UserError]) -> bool {
    errors.iter().any(|error| {
        let message = error.message.to_lowercase();

        CART_NOT_FOUND_PHRASES
            .iter()
            .any(|phrase| message.contains(phrase))
    })
}

/// A freshly created remote cart with its single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCart {
    pub cart_id: String,

    /// Checkout URL, already normalised.
    pub checkout_url: String,

    pub line_id: String,
}

/// Remote cart totals used for expiry detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub total_quantity: u64,
}

#[automock]
#[async_trait]
pub trait CartGateway: Send + Sync {
    /// Create a remote cart holding one line.
    async fn create_cart(
        &self,
        variant_id: &str,
        quantity: u32,
    ) -> Result<RemoteOutcome<CreatedCart>, StorefrontError>;

    /// Add a line to an existing cart, returning the new line's id when the backend reports it.
    async fn add_line(
        &self,
        cart_id: &str,
        variant_id: &str,
        quantity: u32,
    ) -> Result<RemoteOutcome<Option<String>>, StorefrontError>;

    /// Set a line's quantity.
    async fn update_line(
        &self,
        cart_id: &str,
        line_id: &str,
        quantity: u32,
    ) -> Result<RemoteOutcome<()>, StorefrontError>;

    /// Remove lines from the cart.
    async fn remove_lines(
        &self,
        cart_id: &str,
        line_ids: &[String],
    ) -> Result<RemoteOutcome<()>, StorefrontError>;

    /// Fetch the cart's total quantity.
    async fn fetch_summary(
        &self,
        cart_id: &str,
    ) -> Result<RemoteOutcome<CartSummary>, StorefrontError>;
}

/// [`CartGateway`] backed by the storefront API.
#[derive(Debug, Clone)]
pub struct StorefrontCartGateway {
    client: StorefrontClient,
    checkout: CheckoutSettings,
}

impl StorefrontCartGateway {
    #[must_use]
    pub fn new(client: StorefrontClient, checkout: CheckoutSettings) -> Self {
        Self { client, checkout }
    }
}

#[derive(Debug, Deserialize)]
struct Merchandise {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LineNode {
    id: String,
    merchandise: Merchandise,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartPayloadCart {
    id: String,

    #[serde(default)]
    checkout_url: Option<String>,

    #[serde(default)]
    lines: Connection<LineNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartPayload {
    #[serde(default)]
    cart: Option<CartPayloadCart>,

    #[serde(default)]
    user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartCreateData {
    cart_create: Option<CartPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartLinesAddData {
    cart_lines_add: Option<CartPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartLinesUpdateData {
    cart_lines_update: Option<CartPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartLinesRemoveData {
    cart_lines_remove: Option<CartPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartSummaryNode {
    total_quantity: u64,
}

#[derive(Debug, Deserialize)]
struct CartQueryData {
    cart: Option<CartSummaryNode>,
}

fn missing_payload<T>(operation: &str) -> RemoteOutcome<T> {
    warn!(operation, "storefront response is missing the mutation payload");

    RemoteOutcome::unavailable()
}

#[async_trait]
impl CartGateway for StorefrontCartGateway {
    async fn create_cart(
        &self,
        variant_id: &str,
        quantity: u32,
    ) -> Result<RemoteOutcome<CreatedCart>, StorefrontError> {
        debug!(variant_id, quantity, "creating remote cart");

        let variables = json!({
            "input": { "lines": [{ "quantity": quantity, "merchandiseId": variant_id }] },
        });

        let Some(data) = self
            .client
            .request::<_, CartCreateData>(CART_CREATE, &variables)
            .await?
        else {
            return Ok(RemoteOutcome::unavailable());
        };

        let Some(payload) = data.cart_create else {
            return Ok(missing_payload("cartCreate"));
        };

        if !payload.user_errors.is_empty() {
            return Ok(RemoteOutcome::Failure(payload.user_errors));
        }

        let Some(cart) = payload.cart else {
            return Ok(missing_payload("cartCreate"));
        };

        let Some(checkout_url) = cart.checkout_url else {
            warn!(cart_id = %cart.id, "created cart has no checkout url");

            return Ok(RemoteOutcome::unavailable());
        };

        let Some(line_id) = cart.lines.into_nodes().into_iter().next().map(|line| line.id) else {
            warn!(cart_id = %cart.id, "created cart has no lines");

            return Ok(RemoteOutcome::unavailable());
        };

        Ok(RemoteOutcome::Success(CreatedCart {
            cart_id: cart.id,
            checkout_url: format_checkout_url(&checkout_url, &self.checkout),
            line_id,
        }))
    }

    async fn add_line(
        &self,
        cart_id: &str,
        variant_id: &str,
        quantity: u32,
    ) -> Result<RemoteOutcome<Option<String>>, StorefrontError> {
        debug!(cart_id, variant_id, quantity, "adding line to remote cart");

        let variables = json!({
            "cartId": cart_id,
            "lines": [{ "quantity": quantity, "merchandiseId": variant_id }],
        });

        let Some(data) = self
            .client
            .request::<_, CartLinesAddData>(CART_LINES_ADD, &variables)
            .await?
        else {
            return Ok(RemoteOutcome::unavailable());
        };

        let Some(payload) = data.cart_lines_add else {
            return Ok(missing_payload("cartLinesAdd"));
        };

        let lines = payload.cart.map(|cart| cart.lines).unwrap_or_default();

        Ok(RemoteOutcome::from_user_errors(payload.user_errors, || {
            lines
                .into_nodes()
                .into_iter()
                .find(|line| line.merchandise.id.as_deref() == Some(variant_id))
                .map(|line| line.id)
        }))
    }

    async fn update_line(
        &self,
        cart_id: &str,
        line_id: &str,
        quantity: u32,
    ) -> Result<RemoteOutcome<()>, StorefrontError> {
        debug!(cart_id, line_id, quantity, "updating remote cart line");

        let variables = json!({
            "cartId": cart_id,
            "lines": [{ "id": line_id, "quantity": quantity }],
        });

        let Some(data) = self
            .client
            .request::<_, CartLinesUpdateData>(CART_LINES_UPDATE, &variables)
            .await?
        else {
            return Ok(RemoteOutcome::unavailable());
        };

        let Some(payload) = data.cart_lines_update else {
            return Ok(missing_payload("cartLinesUpdate"));
        };

        Ok(RemoteOutcome::from_user_errors(payload.user_errors, || ()))
    }

    async fn remove_lines(
        &self,
        cart_id: &str,
        line_ids: &[String],
    ) -> Result<RemoteOutcome<()>, StorefrontError> {
        debug!(cart_id, ?line_ids, "removing remote cart lines");

        let variables = json!({ "cartId": cart_id, "lineIds": line_ids });

        let Some(data) = self
            .client
            .request::<_, CartLinesRemoveData>(CART_LINES_REMOVE, &variables)
            .await?
        else {
            return Ok(RemoteOutcome::unavailable());
        };

        let Some(payload) = data.cart_lines_remove else {
            return Ok(missing_payload("cartLinesRemove"));
        };

        Ok(RemoteOutcome::from_user_errors(payload.user_errors, || ()))
    }

    async fn fetch_summary(
        &self,
        cart_id: &str,
    ) -> Result<RemoteOutcome<CartSummary>, StorefrontError> {
        debug!(cart_id, "fetching remote cart summary");

        let Some(data) = self
            .client
            .request::<_, CartQueryData>(CART_QUERY, &json!({ "id": cart_id }))
            .await?
        else {
            return Ok(RemoteOutcome::unavailable());
        };

        Ok(match data.cart {
            Some(cart) => RemoteOutcome::Success(CartSummary {
                total_quantity: cart.total_quantity,
            }),
            None => RemoteOutcome::NotFound,
        })
    }
}
