//! # Archive Sink
//!
//! Writes generated archives into the output directory.

use crate::strings::logs;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ArchiveSink {
    dir: PathBuf,
}

impl ArchiveSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Saves `bytes` as `filename` inside the output directory and returns the full path.
    /// Path separators in the name are replaced so the file cannot escape the directory.
    pub async fn save(&self, bytes: &[u8], filename: &str) -> Result<PathBuf> {
        let safe_name = sanitize_filename(filename);
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let path = self.dir.join(safe_name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::warn!("{}", logs::archive_overwritten(&path.display().to_string()));
        }
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    match cleaned.trim_start_matches('.') {
        "" => "archive.zip".to_string(),
        rest if rest.len() != cleaned.len() => format!("_{rest}"),
        _ => cleaned,
    }
}
