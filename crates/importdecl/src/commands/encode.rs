//! `importdecl encode`: numeric encoding of members.

use importdecl_core::SymbolTable;
use importdecl_output::{OutputFormatter, paint, value_style};
use serde::Serialize;

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct EncodeReport {
    pub symbol: String,
    pub projected: String,
    pub members: Vec<String>,
    pub value: i64,
}

impl EncodeReport {
    fn render(&self, colors: bool) -> String {
        let lhs = self
            .members
            .iter()
            .map(|m| format!("{}.{m}", self.projected))
            .collect::<Vec<_>>()
            .join(" | ");
        let value = paint(&self.value.to_string(), value_style(), colors);
        format!("{lhs} = {value}")
    }
}

impl OutputFormatter for EncodeReport {
    fn format_text(&self) -> String {
        self.render(false)
    }

    fn format_pretty(&self, colors: bool) -> String {
        self.render(colors)
    }
}

/// Encode one member, or OR several members of a flags enumeration.
pub fn run(table: &SymbolTable, name: &str, members: &[String]) -> anyhow::Result<EncodeReport> {
    let decl = table.lookup(name)?;
    let value = match members {
        [single] => decl.encode_member(single)?,
        many => {
            let refs: Vec<&str> = many.iter().map(String::as_str).collect();
            decl.combine_flags(&refs)?
        }
    };
    Ok(EncodeReport {
        symbol: decl.qualified_name(),
        projected: decl.projected_name(),
        members: members.to_vec(),
        value,
    })
}
