//! Storefront errors.

use thiserror::Error;

/// Errors raised by the storefront request primitive.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// An HTTP transport or body decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status other than 402.
    #[error("storefront request failed with status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,

        /// Raw response body, if any.
        body: String,
    },

    /// The response carried top-level GraphQL errors.
    #[error("storefront returned errors: {}", .0.join(", "))]
    Graphql(Vec<String>),

    /// The response had neither errors nor a data payload.
    #[error("storefront response did not contain data")]
    MissingData,
}
