use std::path::Path;

use anyhow::{Context, Result};
use fmi2_xml::ModelDescription;
use serde::Serialize;
use tracing::debug;

/// Load a model description, attaching the path to any error.
pub fn load(path: &Path) -> Result<ModelDescription> {
    let md = fmi2_xml::parse_model_description_file(path)
        .with_context(|| format!("parse model description {}", path.display()))?;
    debug!(
        model = %md.base.model_name,
        variables = md.variables().len(),
        "loaded model description"
    );
    Ok(md)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialise JSON output")?;
    println!("{text}");
    Ok(())
}

/// Render an optional value, using `-` when absent.
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Render an empty string as `-`.
pub fn text_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
