//! `importdecl list`: every registered declaration.

use importdecl_core::{Declaration, EnumRepr, Linkage, SymbolTable};
use importdecl_output::{OutputFormatter, paint, symbol_style};
use serde::Serialize;

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct DeclarationSummary {
    pub symbol: String,
    pub projected: String,
    pub kind: String,
    pub linkage: String,
    /// Enumeration representation, `None` for non-enumerations.
    pub representation: Option<String>,
    pub members: usize,
}

impl DeclarationSummary {
    pub fn new(decl: &Declaration) -> Self {
        let representation = decl.enum_shape().map(|_| {
            representation_name(decl.attributes().enum_repr).to_string()
        });
        Self {
            symbol: decl.qualified_name(),
            projected: decl.projected_name(),
            kind: decl.shape().kind().as_str().to_string(),
            linkage: linkage_name(decl.linkage()).to_string(),
            representation,
            members: decl.members().len(),
        }
    }
}

pub fn linkage_name(linkage: &Linkage) -> &'static str {
    match linkage {
        Linkage::Local(_) => "local",
        Linkage::External(_) => "external",
    }
}

pub fn representation_name(repr: Option<EnumRepr>) -> &'static str {
    match repr {
        Some(EnumRepr::Numeric) => "numeric",
        Some(EnumRepr::Name) => "name",
        Some(EnumRepr::LowerCaseName) => "lower-case-name",
        Some(EnumRepr::UpperCaseName) => "upper-case-name",
        None => "structured",
    }
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(transparent)]
pub struct ListReport {
    pub declarations: Vec<DeclarationSummary>,
}

impl ListReport {
    pub fn new(table: &SymbolTable) -> Self {
        Self {
            declarations: table
                .declarations()
                .iter()
                .map(|d| DeclarationSummary::new(d))
                .collect(),
        }
    }

    fn line(d: &DeclarationSummary, symbol: String) -> String {
        let mut tags = vec![d.kind.clone(), d.linkage.clone()];
        tags.extend(d.representation.clone());
        format!("{symbol} -> {} [{}]", d.projected, tags.join(", "))
    }
}

impl OutputFormatter for ListReport {
    fn format_text(&self) -> String {
        self.declarations
            .iter()
            .map(|d| Self::line(d, d.symbol.clone()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_pretty(&self, colors: bool) -> String {
        self.declarations
            .iter()
            .map(|d| Self::line(d, paint(&d.symbol, symbol_style(), colors)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
