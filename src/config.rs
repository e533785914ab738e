// config.rs
use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// One language entry as written in the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
    pub downloaded_json: PathBuf,
    pub transformed_json: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    pub languages: BTreeMap<String, LanguageEntry>,
}

/// A language with its paths resolved against the configuration file's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    pub key: String,
    pub name: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

/// Picks the configuration path: CLI argument, then `SERVICES_CONFIG`, then the default.
pub fn config_path(cli_arg: Option<String>) -> PathBuf {
    cli_arg
        .or_else(|| std::env::var("SERVICES_CONFIG").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Reads the configuration file and applies the `SERVICES_LANGUAGES` filter, if set.
pub async fn load_languages(path: &Path) -> Result<Vec<LanguageConfig>> {
    info!("Loading language configuration from {:?}", path);
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read configuration file {:?}", path))?;
    let config: ServicesConfig = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse configuration file {:?}", path))?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let selected = std::env::var("SERVICES_LANGUAGES").ok();
    let languages = resolve_languages(config, base_dir, selected.as_deref())?;

    info!(
        "Configured languages: {:?}",
        languages.iter().map(|l| l.key.as_str()).collect::<Vec<_>>()
    );
    Ok(languages)
}

/// Resolves relative paths and restricts the table to a comma-separated key list.
pub fn resolve_languages(
    config: ServicesConfig,
    base_dir: &Path,
    selected: Option<&str>,
) -> Result<Vec<LanguageConfig>> {
    if config.languages.is_empty() {
        return Err(anyhow::anyhow!("No languages configured"));
    }

    let wanted: Option<Vec<&str>> = selected.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .collect()
    });

    if let Some(keys) = &wanted {
        for key in keys {
            if !config.languages.contains_key(*key) {
                return Err(anyhow::anyhow!("Unknown language selected: {}", key));
            }
        }
    }

    let languages = config
        .languages
        .into_iter()
        .filter(|(key, _)| {
            wanted
                .as_ref()
                .map_or(true, |keys| keys.contains(&key.as_str()))
        })
        .map(|(key, entry)| LanguageConfig {
            key,
            name: entry.name,
            input_path: base_dir.join(entry.downloaded_json),
            output_path: base_dir.join(entry.transformed_json),
        })
        .collect();

    Ok(languages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_config() -> ServicesConfig {
        serde_json::from_value(json!({
            "languages": {
                "en": {
                    "name": "English",
                    "downloaded_json": "js/services_EN.json",
                    "transformed_json": "js/services_EN_transformed.json"
                },
                "ar": {
                    "name": "Arabic",
                    "downloaded_json": "/data/services_AR.json",
                    "transformed_json": "/data/services_AR_transformed.json"
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let languages = resolve_languages(sample_config(), Path::new("/srv/site"), None).unwrap();
        let en = languages.iter().find(|l| l.key == "en").unwrap();
        assert_eq!(en.input_path, PathBuf::from("/srv/site/js/services_EN.json"));
        assert_eq!(en.output_path, PathBuf::from("/srv/site/js/services_EN_transformed.json"));

        let ar = languages.iter().find(|l| l.key == "ar").unwrap();
        assert_eq!(ar.input_path, PathBuf::from("/data/services_AR.json"));
    }

    #[test]
    fn languages_come_out_in_key_order() {
        let languages = resolve_languages(sample_config(), Path::new(""), None).unwrap();
        let keys: Vec<&str> = languages.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["ar", "en"]);
    }

    #[test]
    fn selection_restricts_languages() {
        let languages = resolve_languages(sample_config(), Path::new(""), Some(" en ,")).unwrap();
        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].name, "English");
    }

    #[test]
    fn unknown_selection_is_rejected() {
        let err = resolve_languages(sample_config(), Path::new(""), Some("fr")).unwrap_err();
        assert!(err.to_string().contains("fr"));
    }

    #[test]
    fn empty_language_table_is_rejected() {
        let config = ServicesConfig { languages: BTreeMap::new() };
        assert!(resolve_languages(config, Path::new(""), None).is_err());
    }

    #[test]
    fn cli_argument_wins() {
        assert_eq!(config_path(Some("site.json".into())), PathBuf::from("site.json"));
    }
}
