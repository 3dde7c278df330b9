//! GraphQL wire types.

use serde::{Deserialize, Serialize};

/// Request body sent to the storefront endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct GraphqlRequest<'a, V> {
    pub query: &'a str,
    pub variables: &'a V,
}

/// Response envelope returned by the storefront endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlResponse<T> {
    pub data: Option<T>,

    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

/// A top-level GraphQL error.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlError {
    pub message: String,
}

/// Relay-style connection (`edges { node }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection<T> {
    /// Edges in backend order.
    pub edges: Vec<Edge<T>>,
}

/// One edge of a [`Connection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<T> {
    /// The wrapped node.
    pub node: T,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    /// Wrap plain nodes into a connection.
    pub fn from_nodes(nodes: impl IntoIterator<Item = T>) -> Self {
        Self {
            edges: nodes.into_iter().map(|node| Edge { node }).collect(),
        }
    }

    /// Iterate over the nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }

    /// Unwrap the connection into its nodes.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }

    /// First node, if any.
    pub fn first(&self) -> Option<&T> {
        self.edges.first().map(|edge| &edge.node)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the connection has no nodes.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// A validation error reported by a mutation payload (`userErrors`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the offending input field.
    #[serde(default)]
    pub field: Option<Vec<String>>,

    /// Human-readable message.
    pub message: String,
}

impl UserError {
    /// Build a user error without a field path.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}
