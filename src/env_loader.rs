use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;

const ENV_PATHS: [&str; 3] = [".env", ".env.local", "../.env"];

/// Loads the first `.env` file found. Variables already set in the process win.
pub fn load_env() {
    let mut loaded_env = false;
    for path in ENV_PATHS.iter() {
        if Path::new(path).exists() {
            match load_env_from_file(Path::new(path)) {
                Ok(count) => {
                    info!("Loaded {} environment variables from {}", count, path);
                    loaded_env = true;
                    break;
                }
                Err(e) => warn!("Failed to load environment from {}: {}", path, e),
            }
        }
    }
    if !loaded_env {
        info!("No .env file found, using environment variables from system");
    }
}

/// Applies `KEY=value` lines from `file_path`, returning how many were set.
pub fn load_env_from_file(file_path: &Path) -> Result<usize> {
    let contents = std::fs::read_to_string(file_path)
        .with_context(|| format!("Could not read env file {:?}", file_path))?;

    let mut applied = 0;
    for (key, value) in parse_env_lines(&contents) {
        if std::env::var(&key).is_err() {
            debug!("Set env var from file: {} = {}", key, value);
            std::env::set_var(&key, &value);
            applied += 1;
        }
    }
    Ok(applied)
}

fn parse_env_lines(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.is_empty())
        .filter_map(|line| {
            let idx = line.find('=')?;
            let key = line[..idx].trim();
            let value = line[idx + 1..].trim().trim_matches('"');
            if key.is_empty() {
                None
            } else {
                Some((key.to_string(), value.to_string()))
            }
        })
        .collect()
}
