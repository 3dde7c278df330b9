//! Checkout URL normalisation.

use reqwest::Url;
use tracing::warn;

/// Query parameters added to every checkout URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// Sales channel, sent as `channel`.
    pub channel: String,

    /// Where the shopper lands after checkout, sent as `return_to`.
    pub return_to: String,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            channel: "online_store".to_string(),
            return_to: "https://luvrang.in".to_string(),
        }
    }
}

/// Set the `channel` and `return_to` query parameters on a backend checkout URL.
///
/// URLs that do not parse are returned as-is.
pub fn format_checkout_url(raw: &str, settings: &CheckoutSettings) -> String {
    let mut url = match Url::parse(raw) {
        Ok(url) => url,
        Err(error) => {
            warn!(url = raw, "keeping unparseable checkout url: {error}");

            return raw.to_string();
        }
    };

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "channel" && key != "return_to")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("channel", &settings.channel)
        .append_pair("return_to", &settings.return_to);

    url.into()
}
