use anyhow::{Context, Result};

/// Runs synchronous storage work on the blocking pool so the UI thread
/// never waits on SQLite.
pub async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .context("blocking task did not complete")
}
