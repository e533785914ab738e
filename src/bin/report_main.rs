use anyhow::{Context, Result};
use log::info;
use std::env;
use std::path::PathBuf;

use service_directory::config;
use service_directory::dashboard::{DashboardDocument, DirectoryReport};
use service_directory::data_fetch;
use service_directory::env_loader;
use service_directory::json_writer;

#[tokio::main]
async fn main() -> Result<()> {
    env_loader::load_env();
    env_logger::init();

    info!("Starting directory report generation...");

    let config_path = config::config_path(env::args().nth(1));
    let output_path = env::var("SERVICES_REPORT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("directory_report.json"));

    let languages = config::load_languages(&config_path).await?;

    let mut reports = Vec::new();
    for language in &languages {
        let services = data_fetch::read_transformed_services(&language.output_path)
            .await
            .with_context(|| format!("Failed to load transformed services for {}", language.name))?;
        let report = DirectoryReport::from_services(&language.key, &services);
        info!(
            "{}: {} services, {:.1}% require a referral",
            language.name,
            report.total,
            report.referral_required_percentage()
        );
        reports.push(report);
    }

    let document = DashboardDocument {
        generated_at: chrono::Utc::now(),
        languages: reports,
    };
    json_writer::write_pretty(&output_path, &document).await?;

    info!("Directory report available at: {:?}", output_path);
    println!("Directory report written to {:?}", output_path);

    Ok(())
}
