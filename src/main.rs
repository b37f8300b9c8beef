//! Respiguard: Opioid-induced respiratory depression risk scoring
//!
//! Main entry point: loads one patient record and prints its assessment.

#![allow(non_snake_case)]

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use Respiguard::adapters::json::JsonFileSource;
use Respiguard::adapters::sanitize::SanitizingMakeWriter;
use Respiguard::application::AssessmentService;
use Respiguard::domain::RiskModel;

fn main() -> Result<()> {
    // Initialize logging.
    //
    // The report goes to stdout; logs default to stderr so the two streams
    // stay separable. RESPIGUARD_LOG_MODE=file (with RESPIGUARD_LOG_FILE)
    // persists logs instead.
    let log_mode = std::env::var("RESPIGUARD_LOG_MODE").unwrap_or_else(|_| "stderr".to_string());

    let (writer, _guard) = if log_mode == "file" {
        let log_file = std::env::var("RESPIGUARD_LOG_FILE")
            .unwrap_or_else(|_| "respiguard.log".to_string());

        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    let path = std::env::args()
        .nth(1)
        .context("Usage: respiguard <patient.json>")?;

    let model = match std::env::var("RESPIGUARD_PROFILE").as_deref() {
        Ok("legacy") => {
            tracing::info!("Using legacy 39-point scoring profile");
            RiskModel::legacy()
        }
        _ => RiskModel::extended(),
    };

    let service = AssessmentService::with_model(JsonFileSource::new(), model);
    let assessment = service
        .assess_from(&path)
        .with_context(|| format!("Failed to assess patient record {path:?}"))?;

    println!("\nRisk Assessment Results:");
    println!("{}", "-".repeat(50));
    println!(
        "PRODIGY Risk Score: {:.2}/{:.0}",
        assessment.static_score, assessment.static_max
    );
    println!("Overall Risk Score (ORS): {:.3}", assessment.ors);
    println!("Risk Level: {}", assessment.risk_level.description());
    println!("{}", "-".repeat(50));

    Ok(())
}
