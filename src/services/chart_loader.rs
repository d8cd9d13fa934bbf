//! Reference chart loading from YAML files.
//!
//! A chart file looks like:
//!
//! ```yaml
//! name: Basic
//! entries:
//!   - { code: N10, hex: "#1e1e1e" }
//!   - { code: R60, hex: "#c8332a" }
//! ```
//!
//! Entries are read leniently: one with a missing code or an unparsable
//! color is skipped with a warning and the rest of the chart still loads.
//! Only a file that is not YAML, or has no `entries` list, is an error.

use serde_yaml::Value;
use swatch_core::{Anchors, ReferenceChart};

use crate::assets::AssetLoader;
use crate::error::AppError;

/// Parse chart YAML into a [`ReferenceChart`] with the given anchors.
pub fn parse_chart(content: &str, anchors: Anchors) -> Result<ReferenceChart, AppError> {
    let doc: Value =
        serde_yaml::from_str(content).map_err(|e| AppError::Chart(e.to_string()))?;

    let entries = doc
        .get("entries")
        .and_then(Value::as_sequence)
        .ok_or_else(|| AppError::Chart("missing `entries` list".to_string()))?;

    let mut builder = ReferenceChart::builder().anchors(anchors);
    for (i, entry) in entries.iter().enumerate() {
        let code = entry.get("code").and_then(scalar_to_string);
        let hex = entry.get("hex").and_then(Value::as_str);
        builder = match (code, hex) {
            (Some(code), Some(hex)) => builder.hex_entry(&code, hex),
            _ => {
                tracing::warn!(index = i, "Skipping chart entry without code or hex");
                builder.skip()
            }
        };
    }

    let skipped = builder.skipped();
    let chart = builder.build();
    let name = doc.get("name").and_then(Value::as_str).unwrap_or("unnamed");
    tracing::info!(name, entries = chart.len(), skipped, "Loaded reference chart");
    Ok(chart)
}

/// Load a chart by file name through the asset loader.
pub fn load_chart(
    loader: &AssetLoader,
    name: &str,
    anchors: Anchors,
) -> Result<ReferenceChart, AppError> {
    let content = loader
        .read_chart_string(name)
        .map_err(|e| AppError::Chart(format!("{name}: {e}")))?;
    parse_chart(&content, anchors)
}

/// Codes are usually strings, but unquoted numeric codes are common.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
