//! Cart persistence.

use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::carts::models::CartLine;

/// Name under which the cart snapshot is stored.
pub const STORAGE_NAMESPACE: &str = "shopify-cart";

/// The durable part of a cart. Drawer and in-flight flags are session-only and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCart {
    #[serde(default)]
    pub items: Vec<CartLine>,

    #[serde(default)]
    pub cart_id: Option<String>,

    #[serde(default)]
    pub checkout_url: Option<String>,
}

/// On-disk wrapper around the snapshot.
#[derive(Debug, Serialize, Deserialize)]
struct StoredState<T> {
    state: T,

    #[serde(default)]
    version: u32,
}

#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("cart storage io error")]
    Io(#[from] io::Error),

    #[error("stored cart could not be decoded")]
    Decode(#[source] serde_json::Error),

    #[error("cart could not be encoded")]
    Encode(#[source] serde_json::Error),
}

#[automock]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Load the last written snapshot, `None` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<PersistedCart>, CartStoreError>;

    /// Replace the stored snapshot.
    async fn save(&self, cart: &PersistedCart) -> Result<(), CartStoreError>;
}

/// Stores the snapshot as a JSON file.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    path: PathBuf,
}

impl FileCartStore {
    /// Store the snapshot as `<dir>/shopify-cart.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_NAMESPACE}.json")),
        }
    }

    /// Store the snapshot at an explicit path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CartStore for FileCartStore {
    async fn load(&self) -> Result<Option<PersistedCart>, CartStoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        let stored: StoredState<PersistedCart> =
            serde_json::from_slice(&bytes).map_err(CartStoreError::Decode)?;

        Ok(Some(stored.state))
    }

    async fn save(&self, cart: &PersistedCart) -> Result<(), CartStoreError> {
        let bytes = serde_json::to_vec(&StoredState {
            state: cart,
            version: 0,
        })
        .map_err(CartStoreError::Encode)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let staging = self.path.with_extension("json.tmp");

        fs::write(&staging, bytes).await?;
        fs::rename(&staging, &self.path).await?;

        debug!(path = %self.path.display(), "cart snapshot written");

        Ok(())
    }
}

/// Keeps the snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    snapshot: Mutex<Option<PersistedCart>>,
}

impl MemoryCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: PersistedCart) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
        }
    }

    /// The last saved snapshot.
    pub fn snapshot(&self) -> Option<PersistedCart> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn load(&self) -> Result<Option<PersistedCart>, CartStoreError> {
        Ok(self.snapshot())
    }

    async fn save(&self, cart: &PersistedCart) -> Result<(), CartStoreError> {
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = Some(cart.clone());

        Ok(())
    }
}
