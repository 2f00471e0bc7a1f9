//! Local-disk storage for uploaded files.
//!
//! Files are written under the configured upload directory with a generated
//! name (millisecond timestamp + random suffix + original extension) so two
//! uploads of the same filename never collide.

use std::path::Path;

use chrono::Utc;

#[derive(Debug)]
pub struct StoredFile {
    /// Path of the file on disk, as recorded in the document row.
    pub path: String,
    pub size: i64,
}

pub async fn save(dir: &Path, original_name: &str, data: &[u8]) -> Result<StoredFile, String> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| format!("Failed to create upload directory: {e}"))?;

    let suffix: [u8; 4] = rand::random();
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let stored_name = format!(
        "{}-{}{ext}",
        Utc::now().timestamp_millis(),
        hex::encode(suffix)
    );

    let path = dir.join(stored_name);
    tokio::fs::write(&path, data)
        .await
        .map_err(|e| format!("Failed to write uploaded file: {e}"))?;

    Ok(StoredFile {
        path: path.to_string_lossy().into_owned(),
        size: data.len() as i64,
    })
}

/// Best-effort removal; failures are logged, not surfaced.
pub async fn remove(path: &str) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!("Failed to remove stored file {path}: {e}");
    }
}
