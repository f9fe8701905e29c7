use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use verify_core::{Value, VerifyOptions};
use verify_parser::parse_file;
use verify_validator::Verifier;

use crate::output;

pub fn execute(paths: &[String], format: &str, tag_key: &str, strict_keywords: bool) -> Result<()> {
    info!("Checking {} record document(s)", paths.len());
    info!("Rule tag: {}", tag_key);
    info!("Strict keywords: {}", strict_keywords);

    let verifier = Verifier::with_options(
        VerifyOptions::new()
            .with_tag_key(tag_key)
            .with_strict_keywords(strict_keywords),
    );

    // Parse everything first so a broken document fails before any output
    let mut records = Vec::with_capacity(paths.len());
    for record_path in paths {
        let record = parse_file(Path::new(record_path))
            .with_context(|| format!("Failed to parse record document: {}", record_path))?;
        records.push((record_path.as_str(), record));
    }

    let reports: Vec<_> = records
        .into_iter()
        .map(|(path, record)| {
            if format != "json" {
                output::print_info(&format!(
                    "Record loaded: {} ({} fields) from {}",
                    record.name,
                    record.len(),
                    path
                ));
            }
            (path, verifier.report(&Value::Record(record)))
        })
        .collect();

    output::print_verification_reports(&reports, format)?;

    if reports.iter().any(|(_, report)| !report.passed) {
        std::process::exit(1);
    }

    Ok(())
}
