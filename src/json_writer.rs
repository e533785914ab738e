use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::path::Path;

use crate::models::NormalizedServiceRecord;

/// Writes the normalized services as a compact JSON array.
pub async fn write_services(file_path: &Path, services: &[NormalizedServiceRecord]) -> Result<()> {
    let payload = serde_json::to_vec(services).context("Failed to serialize normalized services")?;
    write_file(file_path, payload).await?;
    info!("Wrote {} services to {:?}", services.len(), file_path);
    Ok(())
}

/// Writes any serializable value as pretty JSON (used for reports).
pub async fn write_pretty<T: Serialize + ?Sized>(file_path: &Path, value: &T) -> Result<()> {
    let payload = serde_json::to_vec_pretty(value).context("Failed to serialize report")?;
    write_file(file_path, payload).await
}

async fn write_file(file_path: &Path, payload: Vec<u8>) -> Result<()> {
    tokio::fs::write(file_path, payload)
        .await
        .with_context(|| format!("Failed to write {:?}", file_path))
}
