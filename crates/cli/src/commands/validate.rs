//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{OverlayConfig, ParseReport};
use ingestion::LoadedSession;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::commands::{load_config, load_session};

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    telemetry_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SessionSummary>,
}

#[derive(Serialize)]
struct SessionSummary {
    report: ParseReport,
    samples: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_range: Option<(f64, f64)>,
    metadata_loaded: bool,
}

/// Execute the `validate` command
pub async fn run_validate(args: &ValidateArgs) -> Result<()> {
    let result = match load_config(&args.source) {
        Ok(config) => {
            info!(telemetry = %config.sources.telemetry.display(), "Validating session sources");
            validate_session(&config).await
        }
        Err(e) => ValidationResult {
            valid: false,
            telemetry_path: String::new(),
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    };

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Session validation failed")
    }
}

async fn validate_session(config: &OverlayConfig) -> ValidationResult {
    let telemetry_path = config.sources.telemetry.display().to_string();

    match load_session(config).await {
        Ok(session) => {
            let warnings = collect_warnings(config, &session);
            ValidationResult {
                valid: true,
                telemetry_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(SessionSummary {
                    samples: session.series.len(),
                    time_range: session.series.time_range(),
                    metadata_loaded: !session.metadata.venue.is_empty()
                        || !session.metadata.format.is_empty(),
                    report: session.report,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            telemetry_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect non-fatal issues
fn collect_warnings(config: &OverlayConfig, session: &LoadedSession) -> Vec<String> {
    let mut warnings = Vec::new();

    if session.series.is_empty() {
        warnings.push("No samples parsed - every lookup will be empty".to_string());
    }

    if session.report.rows_skipped > 0 {
        warnings.push(format!(
            "{} of {} rows skipped (too few fields or unreadable timestamp)",
            session.report.rows_skipped, session.report.rows_seen
        ));
    }

    if session.report.header_line.is_none() {
        warnings.push("No header found - assumed the default vendor column layout".to_string());
    }

    if config.sources.metadata.is_none() {
        warnings.push("No metadata sidecar configured".to_string());
    }

    let declared = session.metadata.duration;
    if declared > 0.0 {
        if let Some((_, last)) = session.series.time_range() {
            if (declared - last).abs() > 1.0 {
                warnings.push(format!(
                    "Metadata duration {:.1}s differs from last timestamp {:.1}s",
                    declared, last
                ));
            }
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Session is valid: {}", result.telemetry_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Dialect: {}", summary.report.dialect);
            match summary.report.header_line {
                Some(line) => println!("  Header line: {}", line + 1),
                None => println!("  Header line: (assumed)"),
            }
            println!(
                "  Rows: {} seen, {} accepted, {} skipped",
                summary.report.rows_seen, summary.report.rows_accepted, summary.report.rows_skipped
            );
            println!("  Samples: {}", summary.samples);
            if let Some((start, end)) = summary.time_range {
                println!("  Time range: {:.2}s - {:.2}s", start, end);
            }
            println!(
                "  Metadata: {}",
                if summary.metadata_loaded { "loaded" } else { "defaults" }
            );
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Session is invalid: {}", result.telemetry_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
