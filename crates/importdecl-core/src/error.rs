//! Build-time errors raised while declaring, registering, or consuming declarations.

/// Error raised by the declaration model.
///
/// Every variant names the offending declaration. None of them are transient:
/// they describe malformed declaration data, so callers abort generation for
/// the declaration instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclError {
    #[error("duplicate symbol `{name}`")]
    DuplicateSymbol { name: String },

    #[error("unknown symbol `{name}`")]
    UnknownSymbol { name: String },

    #[error("invalid value for member `{member}` of `{name}`: {reason}")]
    InvalidMemberValue {
        name: String,
        member: String,
        reason: String,
    },

    #[error("`{name}` is not tagged numeric-values; member `{member}` has no numeric encoding")]
    NotNumericEncodable { name: String, member: String },

    #[error("`{name}` has no member `{member}`")]
    UnknownMember { name: String, member: String },

    #[error("`{name}` is not a flags enumeration")]
    NotFlagsEnum { name: String },

    #[error("invalid attributes on `{name}`: {reason}")]
    InvalidAttribute { name: String, reason: String },

    #[error("invalid qualified name `{name}`: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("`{name}` projects to `{projected}`, already used by `{existing}`")]
    DuplicateProjection {
        name: String,
        projected: String,
        existing: String,
    },
}

impl DeclError {
    /// Qualified name of the declaration the error is about.
    pub fn symbol(&self) -> &str {
        match self {
            DeclError::DuplicateSymbol { name }
            | DeclError::UnknownSymbol { name }
            | DeclError::InvalidMemberValue { name, .. }
            | DeclError::NotNumericEncodable { name, .. }
            | DeclError::UnknownMember { name, .. }
            | DeclError::NotFlagsEnum { name }
            | DeclError::InvalidAttribute { name, .. }
            | DeclError::InvalidName { name, .. }
            | DeclError::DuplicateProjection { name, .. } => name,
        }
    }

    /// Offending member, for member-level errors.
    pub fn member(&self) -> Option<&str> {
        match self {
            DeclError::InvalidMemberValue { member, .. }
            | DeclError::NotNumericEncodable { member, .. }
            | DeclError::UnknownMember { member, .. } => Some(member),
            _ => None,
        }
    }
}
