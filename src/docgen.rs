//! Markdown reference documentation for dictionary types.

use serde::{Deserialize, Serialize};

use crate::dict::SchemaDict;
use crate::error::{Error, Result};
use crate::field::ARRAY_PREFIX;

/// One section of generated documentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocEntry {
    /// Registered type to document.
    pub name: String,
    /// Heading level of the section.
    pub level: usize,
    /// Whether to include a generated example.
    #[serde(default)]
    pub example: bool,
}

impl DocEntry {
    pub fn new(name: impl Into<String>, level: usize) -> Self {
        Self {
            name: name.into(),
            level,
            example: false,
        }
    }

    /// Include a generated example in the section.
    pub fn with_example(mut self) -> Self {
        self.example = true;
        self
    }
}

/// Assemble markdown documentation for a list of types.
///
/// Each section has a heading, the type's description, its rendered shape, an optional JSON
/// example, and its note. Array types and unregistered names are skipped.
pub fn generate_doc(dict: &SchemaDict, entries: &[DocEntry]) -> Result<String> {
    let mut out = String::new();
    for entry in entries {
        if entry.name.starts_with(ARRAY_PREFIX) {
            continue;
        }
        if !dict.has(&entry.name) {
            log::warn!("Skipping documentation for unknown type '{}'", entry.name);
            continue;
        }
        section(dict, entry, &mut out)?;
    }
    Ok(out)
}

fn section(dict: &SchemaDict, entry: &DocEntry, out: &mut String) -> Result<()> {
    let resolved = dict.get(entry.name.as_str())?;
    out.push_str(&format!("{} {}\n", "#".repeat(entry.level.max(1)), entry.name));
    if let Some(ref description) = resolved.doc.description {
        out.push_str(&format!("{}\n", description));
    }
    if let Some(shape) = dict.render_shape(entry.name.as_str())? {
        out.push_str(&format!("###### Schema\n```\n{}\n```\n", shape));
    }
    if entry.example {
        let example = dict.generate_example(entry.name.as_str())?;
        let json = serde_json::to_string_pretty(&example)
            .map_err(|e| Error::invalid(e.to_string(), entry.name.as_str()))?;
        out.push_str(&format!("###### Example\n```json\n{}\n```\n", json));
    }
    if let Some(ref note) = resolved.doc.note {
        out.push_str(&format!("> {}\n", note));
    }
    out.push('\n');
    Ok(())
}
