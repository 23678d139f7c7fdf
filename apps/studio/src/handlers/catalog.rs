use anyhow::Result;
use atria::domain::config::StudioConfig;
use atria::schema::Registry;

/// Prints one line per document type: name, title and top-level field count.
pub(crate) fn list_types(registry: &Registry) {
    for doc_type in registry.iter() {
        println!("{}\t{}\t{} fields", doc_type.name, doc_type.title, doc_type.fields.len());
    }
}

/// Prints the definitions as the host receives them.
///
/// # Errors
/// Returns an error if the definitions cannot be serialised.
pub(crate) fn dump_schema(registry: &Registry, pretty: bool) -> Result<()> {
    let schema = registry.to_json()?;
    let out = if pretty { serde_json::to_string_pretty(&schema)? } else { serde_json::to_string(&schema)? };
    println!("{out}");
    Ok(())
}

pub(crate) fn list_workspaces(config: &StudioConfig) {
    for workspace in &config.workspaces {
        println!("{}\t{}\t{}\t{}", workspace.name, workspace.title, workspace.dataset, workspace.base_path);
    }
}
