//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Ensure the data directory exists (sqlite files, local uploads).
/// A missing `.env` is only worth a warning.
pub async fn ensure_env(data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(".env").await.is_err() {
        warn!("no .env file found; relying on process environment");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ensure_env;

    #[tokio::test]
    async fn creates_missing_data_dir() {
        let dir = std::env::temp_dir().join(format!("comment-api-env-{}", std::process::id()));
        let path = dir.to_string_lossy().to_string();
        ensure_env(&path).await.unwrap();
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
