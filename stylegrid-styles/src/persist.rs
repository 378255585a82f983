//! JSON state files shared by the usage tracker and the preset store.

use crate::error::StyleError;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Load `path`, returning the default when it is missing or malformed.
pub(crate) fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            return T::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
        T::default()
    })
}

/// Overwrite `path` with pretty-printed JSON, creating parent directories.
pub(crate) fn save<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StyleError::file_write(parent, e))?;
    }
    let content = serde_json::to_string_pretty(value).map_err(|source| StyleError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, content).map_err(|e| StyleError::file_write(path, e))
}
