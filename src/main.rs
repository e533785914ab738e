use anyhow::Result;
use log::{info, warn};
use std::env;

use service_directory::config;
use service_directory::env_loader;
use service_directory::pipeline::{self, LanguageOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    env_loader::load_env();
    env_logger::init();

    info!("Starting service transform.");

    // Config path from command line args, SERVICES_CONFIG, or the default
    let config_path = config::config_path(env::args().nth(1));
    let languages = config::load_languages(&config_path).await?;

    let summary = pipeline::run(&languages).await;

    for report in &summary.languages {
        match &report.outcome {
            LanguageOutcome::Written { stats } => {
                info!("{} ({}): wrote {} services", report.name, report.key, stats.output)
            }
            LanguageOutcome::WriteFailed { stats, .. } => warn!(
                "{} ({}): {} services transformed but not written",
                report.name, report.key, stats.output
            ),
            LanguageOutcome::LoadFailed { .. } => {
                warn!("{} ({}): input could not be loaded", report.name, report.key)
            }
        }
    }

    let load_failures = summary.load_failures();
    if load_failures > 0 {
        return Err(anyhow::anyhow!(
            "{} of {} language(s) failed to load",
            load_failures,
            summary.languages.len()
        ));
    }

    info!("Service transform completed.");
    Ok(())
}
