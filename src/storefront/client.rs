//! Storefront GraphQL client.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::storefront::{
    errors::StorefrontError,
    graphql::{GraphqlRequest, GraphqlResponse},
    notices::{Notice, Notifier, TracingNotifier},
};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Configuration for connecting to a storefront endpoint.
#[derive(Debug, Clone)]
pub struct StorefrontClientConfig {
    /// GraphQL endpoint, e.g. `"https://shop.myshopify.com/api/2024-01/graphql.json"`.
    pub endpoint: String,

    /// Public storefront access token.
    pub access_token: String,
}

impl StorefrontClientConfig {
    /// Build the configuration for a shop domain and API version.
    pub fn for_shop(domain: &str, api_version: &str, access_token: impl Into<String>) -> Self {
        Self {
            endpoint: format!("https://{domain}/api/{api_version}/graphql.json"),
            access_token: access_token.into(),
        }
    }
}

/// HTTP client for the storefront GraphQL endpoint.
#[derive(Clone)]
pub struct StorefrontClient {
    config: StorefrontClientConfig,
    http: Client,
    notifier: Arc<dyn Notifier>,
}

impl Debug for StorefrontClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StorefrontClient")
            .field("endpoint", &self.config.endpoint)
            .finish_non_exhaustive()
    }
}

impl StorefrontClient {
    /// Create a client that logs user-facing notices.
    #[must_use]
    pub fn new(config: StorefrontClientConfig) -> Self {
        Self::with_notifier(config, Arc::new(TracingNotifier))
    }

    /// Create a client that reports user-facing notices to `notifier`.
    #[must_use]
    pub fn with_notifier(config: StorefrontClientConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config,
            http: Client::new(),
            notifier,
        }
    }

    /// Endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Execute a GraphQL document with the given variables.
    ///
    /// Returns `Ok(None)` when the backend reports that the shop cannot take requests (HTTP 402);
    /// the configured notifier is told about it.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, any other non-2xx status, top-level GraphQL errors,
    /// or a response without data.
    pub async fn request<V, T>(
        &self,
        document: &str,
        variables: &V,
    ) -> Result<Option<T>, StorefrontError>
    where
        V: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(endpoint = %self.config.endpoint, "sending storefront request");

        let response = self
            .http
            .post(&self.config.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .json(&GraphqlRequest {
                query: document,
                variables,
            })
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::PAYMENT_REQUIRED {
            warn!("storefront rejected request with 402, shop is unavailable");

            self.notifier.notify(Notice::StoreUnavailable);

            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(StorefrontError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GraphqlResponse<T> = response.json().await?;

        if let Some(errors) = parsed.errors.filter(|errors| !errors.is_empty()) {
            return Err(StorefrontError::Graphql(
                errors.into_iter().map(|error| error.message).collect(),
            ));
        }

        parsed.data.map(Some).ok_or(StorefrontError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_built_from_shop_domain() {
        let config = StorefrontClientConfig::for_shop("luvrang.myshopify.com", "2024-01", "token");

        assert_eq!(
            config.endpoint,
            "https://luvrang.myshopify.com/api/2024-01/graphql.json"
        );
        assert_eq!(config.access_token, "token");
    }
}
