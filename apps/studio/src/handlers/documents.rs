use anyhow::{Context, Result};
use atria::kernel::ids::DocumentId;
use atria::schema::Registry;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

/// Validates every document in `files` and prints its markers.
///
/// # Result
/// `ExitCode::FAILURE` when any document has a blocking marker or cannot be validated.
/// Such documents are reported and the run goes on.
///
/// # Errors
/// Returns an error if a file cannot be read or parsed.
pub(crate) fn validate(registry: &Registry, files: &[PathBuf]) -> Result<ExitCode> {
    let mut blocked = 0usize;
    let mut total = 0usize;

    for file in files {
        let documents = match read(file)? {
            Value::Array(documents) => documents,
            document => vec![document],
        };
        for (index, document) in documents.iter().enumerate() {
            total += 1;
            let report = match registry.validate(document) {
                Ok(report) => report,
                Err(err) => {
                    let name = document
                        .get("_id")
                        .and_then(Value::as_str)
                        .map_or_else(|| format!("#{index}"), str::to_owned);
                    warn!(file = %file.display(), document = %name, "Document skipped: {err}");
                    println!("{}: {name}: [error] {err}", file.display());
                    blocked += 1;
                    continue;
                },
            };
            let name = report.document_id.as_deref().unwrap_or(&report.document_type);

            if report.markers().is_empty() {
                println!("{}: {name}: ok", file.display());
                continue;
            }
            if !report.is_valid() {
                blocked += 1;
            }
            for marker in report.markers() {
                println!("{}: {name}: {marker}", file.display());
            }
        }
    }

    info!(documents = total, blocked, "Validation finished");
    Ok(if blocked == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Prints the visibility report of one document as JSON.
///
/// # Errors
/// Returns an error if the file cannot be read, or the document has no registered type.
pub(crate) fn visibility(registry: &Registry, file: &Path) -> Result<()> {
    let report = registry.visibility(&read(file)?)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Prints a new document of `type_name`.
///
/// # Errors
/// Returns an error for an unknown type or an invalid id.
pub(crate) fn create(registry: &Registry, type_name: &str, id: Option<&str>) -> Result<()> {
    let id = match id {
        Some(id) => DocumentId::verify(id)?.to_owned(),
        None => DocumentId::draft(&DocumentId::generate()),
    };
    let document = registry.initial_document(type_name, &id)?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn read(file: &Path) -> Result<Value> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("Cannot read {}", file.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", file.display()))
}
