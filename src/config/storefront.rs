//! Storefront Config

use clap::Args;

use crate::storefront::StorefrontClientConfig;

/// Storefront API settings.
#[derive(Debug, Clone, Args)]
pub struct StorefrontConfig {
    /// Shop domain
    #[arg(long, env = "SHOPIFY_STORE_DOMAIN", default_value = "luvrang.myshopify.com")]
    pub store_domain: String,

    /// Storefront API version
    #[arg(long, env = "SHOPIFY_API_VERSION", default_value = "2024-01")]
    pub api_version: String,

    /// Public storefront access token
    #[arg(long, env = "SHOPIFY_STOREFRONT_TOKEN", hide_env_values = true)]
    pub storefront_token: String,

    /// Full GraphQL endpoint, overriding the one derived from domain and version
    #[arg(long, env = "SHOPIFY_STOREFRONT_ENDPOINT")]
    pub storefront_endpoint: Option<String>,
}

impl StorefrontConfig {
    /// Client settings for the configured endpoint.
    pub fn client_config(&self) -> StorefrontClientConfig {
        match &self.storefront_endpoint {
            Some(endpoint) => StorefrontClientConfig {
                endpoint: endpoint.clone(),
                access_token: self.storefront_token.clone(),
            },
            None => StorefrontClientConfig::for_shop(
                &self.store_domain,
                &self.api_version,
                self.storefront_token.clone(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: Option<&str>) -> StorefrontConfig {
        StorefrontConfig {
            store_domain: "luvrang.myshopify.com".to_string(),
            api_version: "2024-01".to_string(),
            storefront_token: "token".to_string(),
            storefront_endpoint: endpoint.map(str::to_owned),
        }
    }

    #[test]
    fn endpoint_derives_from_domain_and_version() {
        assert_eq!(
            config(None).client_config().endpoint,
            "https://luvrang.myshopify.com/api/2024-01/graphql.json"
        );
    }

    #[test]
    fn explicit_endpoint_wins() {
        let client = config(Some("http://127.0.0.1:9000/graphql")).client_config();

        assert_eq!(client.endpoint, "http://127.0.0.1:9000/graphql");
        assert_eq!(client.access_token, "token");
    }
}
