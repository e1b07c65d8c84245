use crate::errors::ReflectionError;
use crate::models::AppData;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// Load the reflection document, starting empty when the file is missing or
/// unreadable.
pub async fn load_data(path: &Path) -> AppData {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no reflection data yet, starting empty");
            return AppData::default();
        }
        Err(err) => {
            error!(path = %path.display(), "failed to read reflection data: {err}");
            return AppData::default();
        }
    };

    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        error!(path = %path.display(), "failed to parse reflection data: {err}");
        AppData::default()
    })
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), ReflectionError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}

/// Apply `change` to a copy of `data`, write the copy, and only then make it
/// the live document. A failed write leaves `data` untouched.
pub async fn commit<T>(
    path: &Path,
    data: &mut AppData,
    change: impl FnOnce(&mut AppData) -> T,
) -> Result<T, ReflectionError> {
    let mut next = data.clone();
    let outcome = change(&mut next);
    persist_data(path, &next).await?;
    *data = next;
    Ok(outcome)
}
