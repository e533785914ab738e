// pipeline.rs
use anyhow::Error;
use futures::future::join_all;
use log::{error, info, warn};

use crate::config::LanguageConfig;
use crate::data_fetch;
use crate::json_writer;
use crate::transform::{self, TransformStats};

/// What happened to one configured language during a run.
#[derive(Debug)]
pub enum LanguageOutcome {
    Written { stats: TransformStats },
    /// Input missing or not valid JSON; nothing was written.
    LoadFailed { error: Error },
    WriteFailed { stats: TransformStats, error: Error },
}

#[derive(Debug)]
pub struct LanguageReport {
    pub key: String,
    pub name: String,
    pub outcome: LanguageOutcome,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub languages: Vec<LanguageReport>,
}

impl RunSummary {
    pub fn load_failures(&self) -> usize {
        self.languages
            .iter()
            .filter(|l| matches!(l.outcome, LanguageOutcome::LoadFailed { .. }))
            .count()
    }

    pub fn write_failures(&self) -> usize {
        self.languages
            .iter()
            .filter(|l| matches!(l.outcome, LanguageOutcome::WriteFailed { .. }))
            .count()
    }

    pub fn get(&self, key: &str) -> Option<&LanguageReport> {
        self.languages.iter().find(|l| l.key == key)
    }
}

/// Transforms every configured language. Languages run concurrently and fail
/// independently; the summary lists them in configuration order.
pub async fn run(languages: &[LanguageConfig]) -> RunSummary {
    info!("Transforming {} language(s)...", languages.len());

    let reports = join_all(languages.iter().map(|language| async move {
        LanguageReport {
            key: language.key.clone(),
            name: language.name.clone(),
            outcome: process_language(language).await,
        }
    }))
    .await;

    RunSummary { languages: reports }
}

async fn process_language(language: &LanguageConfig) -> LanguageOutcome {
    info!("Transforming {}", language.name);

    let raw_services = match data_fetch::read_raw_services(&language.input_path).await {
        Ok(services) => services,
        Err(error) => {
            error!("Could not load services for {}: {:#}", language.name, error);
            return LanguageOutcome::LoadFailed { error };
        }
    };

    let normalized = transform::normalize_with_stats(raw_services);
    let stats = normalized.stats;
    info!(
        "{}: {} input, {} duplicates skipped, {} without location skipped, {} kept",
        language.name, stats.input, stats.duplicates, stats.unlocated, stats.output
    );

    match json_writer::write_services(&language.output_path, &normalized.services).await {
        Ok(()) => LanguageOutcome::Written { stats },
        Err(error) => {
            warn!("{}", error);
            LanguageOutcome::WriteFailed { stats, error }
        }
    }
}
