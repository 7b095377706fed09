//! `importdecl check`: load everything, report every invalid declaration.

use super::Loaded;
use importdecl_output::{OutputFormatter, error_style, paint};
use serde::Serialize;

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct CheckReport {
    pub files: usize,
    pub declarations: usize,
    pub errors: Vec<String>,
}

impl CheckReport {
    pub fn from_loaded(loaded: &Loaded) -> Self {
        Self {
            files: loaded.files,
            declarations: loaded.table.len(),
            errors: loaded.errors.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn summary(&self) -> String {
        format!(
            "{} declaration(s) from {} manifest file(s)",
            self.declarations, self.files
        )
    }
}

impl OutputFormatter for CheckReport {
    fn format_text(&self) -> String {
        let mut lines = vec![if self.is_ok() {
            format!("ok: {}", self.summary())
        } else {
            format!("{} error(s); {}", self.errors.len(), self.summary())
        }];
        lines.extend(self.errors.iter().map(|e| format!("error: {e}")));
        lines.join("\n")
    }

    fn format_pretty(&self, colors: bool) -> String {
        let mut lines = vec![self.summary()];
        for e in &self.errors {
            lines.push(format!("{} {e}", paint("error:", error_style(), colors)));
        }
        lines.join("\n")
    }
}
