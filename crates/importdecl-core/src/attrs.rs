//! Attribute tags attached to declarations.
//!
//! The tag vocabulary is closed: a declaration carries at most one of each tag
//! and at most one enumeration representation. Tags are validated once, when
//! the declaration is built, and never inspected reflectively afterwards.

use crate::error::DeclError;
use serde::{Deserialize, Serialize};

/// A single attribute tag as written by a declaration author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Attribute {
    /// No local implementation; references resolve against an external namespace.
    Imported,
    /// Project the bare identifier instead of the namespace-qualified name.
    IgnoreNamespace,
    /// Enumeration members are emitted as primitive numbers.
    NumericValues,
    /// Enumeration members are emitted as their declared name.
    NameValues,
    /// Enumeration members are emitted as their lower-cased name.
    LowerCaseNameValues,
    /// Enumeration members are emitted as their upper-cased name.
    UpperCaseNameValues,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Imported => "imported",
            Attribute::IgnoreNamespace => "ignore-namespace",
            Attribute::NumericValues => "numeric-values",
            Attribute::NameValues => "name-values",
            Attribute::LowerCaseNameValues => "lower-case-name-values",
            Attribute::UpperCaseNameValues => "upper-case-name-values",
        }
    }

    fn enum_repr(&self) -> Option<EnumRepr> {
        match self {
            Attribute::NumericValues => Some(EnumRepr::Numeric),
            Attribute::NameValues => Some(EnumRepr::Name),
            Attribute::LowerCaseNameValues => Some(EnumRepr::LowerCaseName),
            Attribute::UpperCaseNameValues => Some(EnumRepr::UpperCaseName),
            Attribute::Imported | Attribute::IgnoreNamespace => None,
        }
    }
}

/// How enumeration members are represented at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumRepr {
    Numeric,
    Name,
    LowerCaseName,
    UpperCaseName,
}

impl EnumRepr {
    /// Tag that selects this representation.
    pub fn attribute(&self) -> Attribute {
        match self {
            EnumRepr::Numeric => Attribute::NumericValues,
            EnumRepr::Name => Attribute::NameValues,
            EnumRepr::LowerCaseName => Attribute::LowerCaseNameValues,
            EnumRepr::UpperCaseName => Attribute::UpperCaseNameValues,
        }
    }
}

/// Validated set of attribute tags for one declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeSet {
    pub imported: bool,
    pub ignore_namespace: bool,
    /// `None` means members are emitted as structured (tagged) values.
    pub enum_repr: Option<EnumRepr>,
}

impl AttributeSet {
    /// Build a set from author-written tags, rejecting repeats and conflicting
    /// representations. `symbol` is only used for error reporting.
    pub fn from_tags(symbol: &str, tags: &[Attribute]) -> Result<Self, DeclError> {
        let invalid = |reason: String| DeclError::InvalidAttribute {
            name: symbol.to_string(),
            reason,
        };

        let mut set = AttributeSet::default();
        for (i, tag) in tags.iter().enumerate() {
            if tags[..i].contains(tag) {
                return Err(invalid(format!("`{}` given more than once", tag.as_str())));
            }
            match tag {
                Attribute::Imported => set.imported = true,
                Attribute::IgnoreNamespace => set.ignore_namespace = true,
                other => {
                    let repr = other.enum_repr();
                    if let Some(existing) = set.enum_repr {
                        return Err(invalid(format!(
                            "`{}` conflicts with `{}`",
                            other.as_str(),
                            existing.attribute().as_str()
                        )));
                    }
                    set.enum_repr = repr;
                }
            }
        }
        Ok(set)
    }

    /// Tags in canonical order.
    pub fn tags(&self) -> Vec<Attribute> {
        let mut tags = Vec::new();
        if self.imported {
            tags.push(Attribute::Imported);
        }
        if self.ignore_namespace {
            tags.push(Attribute::IgnoreNamespace);
        }
        if let Some(repr) = self.enum_repr {
            tags.push(repr.attribute());
        }
        tags
    }

    pub fn is_numeric(&self) -> bool {
        self.enum_repr == Some(EnumRepr::Numeric)
    }
}
