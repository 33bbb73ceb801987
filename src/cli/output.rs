//! Build result formatting for `--output`

use anyhow::{Context, Result};

use crate::launch::BuildResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `launch.toml` layout
    Toml,
    Json,
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, result: &BuildResult) -> Result<String> {
        match self.format {
            OutputFormat::Toml => {
                toml::to_string(&result.launch).context("Failed to serialize result to TOML")
            }
            OutputFormat::Json => {
                serde_json::to_string_pretty(result).context("Failed to serialize result to JSON")
            }
            OutputFormat::Human => Ok(result.to_string()),
        }
    }
}
