use crate::models::DealBatch;
use anyhow::{Context, Result};
use std::path::Path;

/// Write the batch as pretty JSON, replacing `path` only once the new
/// content is fully on disk.
pub async fn write_batch(path: impl AsRef<Path>, batch: &DealBatch) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(batch).context("Failed to serialize deals")?;

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json)
        .await
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("Failed to move {} into place", tmp.display()))?;

    Ok(())
}
