//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Local cart storage settings.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// Directory holding the persisted cart (defaults to the platform data directory)
    #[arg(long, env = "CART_STATE_DIR")]
    pub cart_state_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// The configured directory, else `<data dir>/luvrang`. `None` when the platform has no data
    /// directory and none was configured.
    pub fn resolve_dir(&self) -> Option<PathBuf> {
        self.cart_state_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("luvrang")))
    }
}
