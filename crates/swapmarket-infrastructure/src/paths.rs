//! Centralized path resolution for persisted client state.

use std::path::PathBuf;

use swapmarket_core::error::{MarketError, Result};

const APP_DIR: &str = "swapmarket";
const CREDENTIALS_FILE: &str = "credentials.json";

/// Returns the platform config directory for the client,
/// e.g. `~/.config/swapmarket` on Linux.
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| MarketError::storage("Could not determine config directory"))
}

/// Returns the credential store file path under `base`.
pub fn credentials_file(base: &std::path::Path) -> PathBuf {
    base.join(CREDENTIALS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_file_lands_under_base() {
        let path = credentials_file(std::path::Path::new("/tmp/example"));
        assert_eq!(path, PathBuf::from("/tmp/example/credentials.json"));
    }
}
