//! Atomic JSON document writes and tolerant reads.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use memory_core::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes `value` to a sibling `.tmp` file, then renames it over `path`.
/// Readers observe either the old or the new document, never a partial one.
/// Non-ASCII text is written verbatim.
pub async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = serde_json::to_vec(value).map_err(|e| StoreError::Encode(e.to_string()))?;
    let tmp = temp_path(path);
    tokio::fs::write(&tmp, &bytes).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

/// Reads and decodes `path`. `Ok(None)` when the file does not exist;
/// [`StoreError::Corrupt`] when it exists but does not decode.
pub async fn read_json_opt<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StoreError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Renames an undecodable document to `<name>.corrupt-<unix secs>` and returns
/// the new path, so the next write starts fresh without losing the bytes.
pub async fn quarantine_corrupt(path: &Path) -> Result<PathBuf, StoreError> {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".corrupt-{}", Utc::now().timestamp()));
    let target = path.with_file_name(name);
    tokio::fs::rename(path, &target).await?;
    Ok(target)
}
