//! `importdecl resolve`: one declaration in full.

use super::list::{linkage_name, representation_name};
use importdecl_core::{Declaration, Linkage, SymbolTable};
use importdecl_output::{OutputFormatter, paint, symbol_style, value_style};
use serde::Serialize;

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct MemberLine {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct DeclarationReport {
    pub symbol: String,
    pub projected: String,
    pub kind: String,
    pub linkage: String,
    pub attributes: Vec<String>,
    pub flags: bool,
    pub underlying: Option<String>,
    pub representation: Option<String>,
    pub template: Option<String>,
    pub members: Vec<MemberLine>,
}

impl DeclarationReport {
    pub fn new(decl: &Declaration) -> Self {
        let shape = decl.enum_shape();
        let template = match decl.linkage() {
            Linkage::Local(body) => body.template.clone(),
            Linkage::External(_) => None,
        };
        Self {
            symbol: decl.qualified_name(),
            projected: decl.projected_name(),
            kind: decl.shape().kind().as_str().to_string(),
            linkage: linkage_name(decl.linkage()).to_string(),
            attributes: decl
                .attributes()
                .tags()
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            flags: shape.is_some_and(|s| s.flags),
            underlying: shape.map(|s| s.underlying.as_str().to_string()),
            representation: shape
                .map(|_| representation_name(decl.attributes().enum_repr).to_string()),
            template,
            members: decl
                .members()
                .iter()
                .map(|m| MemberLine {
                    name: m.name.clone(),
                    value: m.value,
                })
                .collect(),
        }
    }

    fn render(&self, colors: bool) -> String {
        let mut lines = vec![
            format!("symbol: {}", paint(&self.symbol, symbol_style(), colors)),
            format!("projected: {}", self.projected),
            format!("kind: {}", self.kind),
            format!("linkage: {}", self.linkage),
        ];
        if !self.attributes.is_empty() {
            lines.push(format!("attributes: {}", self.attributes.join(", ")));
        }
        if let Some(underlying) = &self.underlying {
            let flags = if self.flags { ", flags" } else { "" };
            lines.push(format!("underlying: {underlying}{flags}"));
        }
        if let Some(repr) = &self.representation {
            lines.push(format!("representation: {repr}"));
        }
        if let Some(template) = &self.template {
            lines.push(format!("template: {template}"));
        }
        for m in &self.members {
            let value = paint(&m.value.to_string(), value_style(), colors);
            lines.push(format!("  {} = {value}", m.name));
        }
        lines.join("\n")
    }
}

impl OutputFormatter for DeclarationReport {
    fn format_text(&self) -> String {
        self.render(false)
    }

    fn format_pretty(&self, colors: bool) -> String {
        self.render(colors)
    }
}

pub fn run(table: &SymbolTable, name: &str) -> anyhow::Result<DeclarationReport> {
    let decl = table.lookup(name)?;
    Ok(DeclarationReport::new(&decl))
}
