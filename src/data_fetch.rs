use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::models::{NormalizedServiceRecord, RawServiceRecord};

/// Reads one language's ActivityInfo export. A missing or malformed file is an error.
pub async fn read_raw_services(path: &Path) -> Result<Vec<RawServiceRecord>> {
    info!("Reading raw services from {:?}...", path);
    let services: Vec<RawServiceRecord> = read_json_array(path).await?;
    info!("Read {} raw service records from {:?}.", services.len(), path);
    Ok(services)
}

/// Reads a previously transformed file back, for reporting.
pub async fn read_transformed_services(path: &Path) -> Result<Vec<NormalizedServiceRecord>> {
    info!("Reading transformed services from {:?}...", path);
    read_json_array(path).await
}

async fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {:?}", path))?;
    debug!("Loaded {} bytes from {:?}", contents.len(), path);
    serde_json::from_slice(&contents)
        .with_context(|| format!("Failed to parse JSON array in {:?}", path))
}
