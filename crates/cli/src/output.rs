//! Output rendering for CLI commands.
//!
//! Provides two output formats: plain text and JSON.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

use crate::args::OutputFormat;

/// The result of a command, before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Value(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
    ArrayMap(BTreeMap<String, Vec<String>>),
}

impl Output {
    /// Render in `format`. Text output has no trailing newline.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => Ok(self.to_text()),
        }
    }

    fn to_text(&self) -> String {
        match self {
            Output::Value(value) => value.clone(),
            Output::List(items) => items.join("\n"),
            Output::Map(map) => map
                .iter()
                .map(|(key, value)| format!("{key} = {value}"))
                .collect::<Vec<_>>()
                .join("\n"),
            // Tab-separated so parts containing spaces stay distinguishable.
            Output::ArrayMap(map) => map
                .iter()
                .map(|(key, parts)| {
                    std::iter::once(key.as_str())
                        .chain(parts.iter().map(String::as_str))
                        .collect::<Vec<_>>()
                        .join("\t")
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
