//! Output formatting utilities.
//!
//! Every command result implements [`OutputFormatter`] so it prints the same
//! way under `--json`, `--jsonl`, `--pretty`, and the default compact mode.

use nu_ansi_term::{Color, Style};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

/// Color output mode.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Auto-detect based on TTY (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Configuration for pretty output mode.
///
/// Example config.toml:
/// ```toml
/// [pretty]
/// enabled = true       # auto-enable when TTY (default: auto)
/// colors = "auto"      # "auto", "always", or "never"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, schemars::JsonSchema)]
#[serde(default)]
pub struct PrettyConfig {
    /// Enable pretty mode. None = auto (true when stdout is TTY)
    pub enabled: Option<bool>,
    /// Color mode: auto (default), always, or never
    pub colors: Option<ColorMode>,
}

impl PrettyConfig {
    /// Should pretty mode be enabled?
    /// Respects explicit setting, otherwise auto-detects TTY.
    pub fn enabled(&self) -> bool {
        self.enabled
            .unwrap_or_else(|| std::io::stdout().is_terminal())
    }
}

/// Output format and display mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact text output, no colors.
    #[default]
    Compact,
    /// Pretty text output (human-friendly, with colors if available).
    Pretty { colors: bool },
    /// JSON output.
    Json,
    /// JSON Lines output (one JSON object per line, arrays emit each element).
    JsonLines,
}

impl OutputFormat {
    /// Create from CLI flags and config (fully resolved).
    pub fn from_cli(
        json: bool,
        jsonl: bool,
        pretty: bool,
        compact: bool,
        config: &PrettyConfig,
    ) -> Self {
        // JSON modes take precedence
        if jsonl {
            return OutputFormat::JsonLines;
        }
        if json {
            return OutputFormat::Json;
        }

        let is_pretty = if compact {
            false
        } else {
            pretty || config.enabled()
        };

        if is_pretty {
            // Determine colors: respect "never", otherwise --pretty forces colors
            let use_colors = if std::env::var("NO_COLOR").is_ok() {
                false
            } else {
                match config.colors.unwrap_or_default() {
                    ColorMode::Never => false,
                    ColorMode::Always => true,
                    ColorMode::Auto => pretty || std::io::stdout().is_terminal(),
                }
            };
            OutputFormat::Pretty { colors: use_colors }
        } else {
            OutputFormat::Compact
        }
    }
}

/// Trait for types that can format output in multiple formats.
///
/// JSON serialization uses serde, text formatting is custom, and
/// [`output_schema`] describes the JSON form.
pub trait OutputFormatter: Serialize + schemars::JsonSchema {
    /// Format as minimal text (default).
    fn format_text(&self) -> String;

    /// Format as pretty text. `colors` says whether ANSI styling is allowed.
    /// Default implementation falls back to format_text().
    fn format_pretty(&self, colors: bool) -> String {
        let _ = colors;
        self.format_text()
    }

    /// Render in the specified format.
    fn render(&self, format: &OutputFormat) -> String {
        match format {
            OutputFormat::Compact => self.format_text(),
            OutputFormat::Pretty { colors } => self.format_pretty(*colors),
            OutputFormat::Json => serde_json::to_string(self).unwrap_or_default(),
            OutputFormat::JsonLines => {
                let json = serde_json::to_value(self).unwrap_or_default();
                jsonl_lines(&json).join("\n")
            }
        }
    }

    /// Print to stdout in the specified format.
    fn print(&self, format: &OutputFormat) {
        println!("{}", self.render(format));
    }
}

/// JSON value as JSON Lines.
/// Arrays emit each element as a separate line, other values emit as single line.
fn jsonl_lines(value: &serde_json::Value) -> Vec<String> {
    if let serde_json::Value::Array(arr) = value {
        arr.iter()
            .map(|item| serde_json::to_string(item).unwrap_or_default())
            .collect()
    } else {
        vec![serde_json::to_string(value).unwrap_or_default()]
    }
}

/// JSON schema of a report's `--json` output.
pub fn output_schema<T: OutputFormatter>() -> schemars::Schema {
    schemars::schema_for!(T)
}

/// Paint `text` with `style` when colors are on.
pub fn paint(text: &str, style: Style, colors: bool) -> String {
    if colors {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// Style for symbol names.
pub fn symbol_style() -> Style {
    Style::new().bold()
}

/// Style for numeric values.
pub fn value_style() -> Style {
    Color::Cyan.normal()
}

/// Style for error lines.
pub fn error_style() -> Style {
    Color::Red.bold()
}
