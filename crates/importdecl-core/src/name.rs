//! Qualified names (`Ns1.Ns2.Ident`).

use crate::error::DeclError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dotted, namespace-qualified type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName {
    namespace: Vec<String>,
    ident: String,
}

impl QualifiedName {
    /// Parse `A.B.Ident`. Every segment must be an identifier.
    pub fn parse(raw: &str) -> Result<Self, DeclError> {
        let invalid = |reason: &str| DeclError::InvalidName {
            name: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("empty name"));
        }

        let mut segments: Vec<String> = Vec::new();
        for segment in raw.split('.') {
            if segment.is_empty() {
                return Err(invalid("empty segment"));
            }
            if !is_identifier(segment) {
                return Err(invalid(&format!("`{segment}` is not an identifier")));
            }
            segments.push(segment.to_string());
        }

        // split always yields at least one segment
        let ident = segments.pop().unwrap_or_default();
        Ok(Self {
            namespace: segments,
            ident,
        })
    }

    /// Parse `raw`, placing it under `namespace` when it has no namespace of its own.
    pub fn parse_in(namespace: Option<&str>, raw: &str) -> Result<Self, DeclError> {
        match namespace {
            Some(ns) if !ns.is_empty() && !raw.contains('.') => {
                Self::parse(&format!("{ns}.{raw}"))
            }
            _ => Self::parse(raw),
        }
    }

    /// Bare identifier, without namespace.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Namespace segments, outermost first.
    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    pub fn is_qualified(&self) -> bool {
        !self.namespace.is_empty()
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ns in &self.namespace {
            write!(f, "{ns}.")?;
        }
        f.write_str(&self.ident)
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = DeclError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<QualifiedName> for String {
    fn from(value: QualifiedName) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified() {
        let name = QualifiedName::parse("Platform.Feeds.FeedXmlIncludeFlags").unwrap();
        assert_eq!(name.ident(), "FeedXmlIncludeFlags");
        assert_eq!(name.namespace(), &["Platform", "Feeds"]);
        assert_eq!(name.to_string(), "Platform.Feeds.FeedXmlIncludeFlags");
    }

    #[test]
    fn test_parse_bare() {
        let name = QualifiedName::parse("Flags").unwrap();
        assert!(!name.is_qualified());
        assert_eq!(name.to_string(), "Flags");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["", "A..B", ".A", "A.", "1A", "A.B-C"] {
            let err = QualifiedName::parse(raw).unwrap_err();
            assert!(
                matches!(err, DeclError::InvalidName { .. }),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_in_default_namespace() {
        let name = QualifiedName::parse_in(Some("Platform.Feeds"), "FeedSyncSetting").unwrap();
        assert_eq!(name.to_string(), "Platform.Feeds.FeedSyncSetting");

        // already qualified names keep their own namespace
        let name = QualifiedName::parse_in(Some("Platform.Feeds"), "Other.Thing").unwrap();
        assert_eq!(name.to_string(), "Other.Thing");

        let name = QualifiedName::parse_in(None, "Thing").unwrap();
        assert_eq!(name.to_string(), "Thing");
    }
}
