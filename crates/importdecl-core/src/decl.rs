//! Declarations: authoring form, validated form, and member encoding.

use crate::attrs::{Attribute, AttributeSet, EnumRepr};
use crate::error::DeclError;
use crate::name::QualifiedName;
use serde::{Deserialize, Serialize};

// ============================================================================
// Authoring form
// ============================================================================

/// Kind of declared type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    #[default]
    Enum,
    Class,
    Interface,
    Struct,
    Delegate,
}

impl DeclKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Enum => "enum",
            DeclKind::Class => "class",
            DeclKind::Interface => "interface",
            DeclKind::Struct => "struct",
            DeclKind::Delegate => "delegate",
        }
    }
}

/// Integer type backing an enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Underlying {
    I8,
    U8,
    I16,
    U16,
    #[default]
    I32,
    U32,
    I64,
}

impl Underlying {
    pub fn as_str(&self) -> &'static str {
        match self {
            Underlying::I8 => "i8",
            Underlying::U8 => "u8",
            Underlying::I16 => "i16",
            Underlying::U16 => "u16",
            Underlying::I32 => "i32",
            Underlying::U32 => "u32",
            Underlying::I64 => "i64",
        }
    }

    /// Inclusive value range.
    pub fn range(&self) -> (i64, i64) {
        match self {
            Underlying::I8 => (i8::MIN.into(), i8::MAX.into()),
            Underlying::U8 => (0, u8::MAX.into()),
            Underlying::I16 => (i16::MIN.into(), i16::MAX.into()),
            Underlying::U16 => (0, u16::MAX.into()),
            Underlying::I32 => (i32::MIN.into(), i32::MAX.into()),
            Underlying::U32 => (0, u32::MAX.into()),
            Underlying::I64 => (i64::MIN, i64::MAX),
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        let (lo, hi) = self.range();
        (lo..=hi).contains(&value)
    }
}

/// An enumeration member as written; `value: None` takes the next unused value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct MemberSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl MemberSpec {
    pub fn new(name: impl Into<String>, value: Option<i64>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A declaration as written by its author, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct DeclarationSpec {
    /// Qualified (`Ns.Name`) or bare name.
    pub name: String,
    #[serde(default)]
    pub kind: DeclKind,
    /// Members are bit flags meant to be OR-ed together.
    #[serde(default)]
    pub flags: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying: Option<Underlying>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub members: Vec<MemberSpec>,
    /// Verbatim code emitted in place of a generated definition (local declarations only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

// ============================================================================
// Validated form
// ============================================================================

/// An enumeration member with its resolved value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Member {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumShape {
    pub flags: bool,
    pub underlying: Underlying,
    members: Vec<Member>,
}

impl EnumShape {
    /// Members in declaration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Shape of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Enum(EnumShape),
    Class,
    Interface,
    Struct,
    Delegate,
}

impl Shape {
    pub fn kind(&self) -> DeclKind {
        match self {
            Shape::Enum(_) => DeclKind::Enum,
            Shape::Class => DeclKind::Class,
            Shape::Interface => DeclKind::Interface,
            Shape::Struct => DeclKind::Struct,
            Shape::Delegate => DeclKind::Delegate,
        }
    }
}

/// Rule for deriving the name the consumer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NameProjection {
    /// Full namespace-qualified name.
    Qualified,
    /// Bare identifier; the namespace is ignored.
    Flattened,
}

/// Definition data for a declaration implemented in this unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalBody {
    pub projection: NameProjection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// Reference data for a declaration implemented elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalRef {
    pub projection: NameProjection,
}

/// Whether the consumer emits a definition or only references an external symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "linkage", rename_all = "lowercase")]
pub enum Linkage {
    Local(LocalBody),
    External(ExternalRef),
}

impl Linkage {
    pub fn projection(&self) -> NameProjection {
        match self {
            Linkage::Local(body) => body.projection,
            Linkage::External(ext) => ext.projection,
        }
    }
}

/// How one enumeration member appears in generated output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "repr", content = "value", rename_all = "lowercase")]
pub enum EmittedValue {
    Number(i64),
    Name(String),
    /// Tagged value the consumer builds from the projected type name and member.
    Structured { type_name: String, member: String },
}

/// Members whose bits are set in a flags value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagDecomposition {
    pub members: Vec<String>,
    /// Set bits not covered by any declared member.
    pub unknown_bits: i64,
}

/// A validated, immutable declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    name: QualifiedName,
    attributes: AttributeSet,
    shape: Shape,
    linkage: Linkage,
}

impl Declaration {
    /// Validate `spec`, placing bare names under `namespace`.
    pub fn from_spec(spec: DeclarationSpec, namespace: Option<&str>) -> Result<Self, DeclError> {
        let name = QualifiedName::parse_in(namespace, &spec.name)?;
        let symbol = name.to_string();
        let attributes = AttributeSet::from_tags(&symbol, &spec.attributes)?;

        let invalid_attr = |reason: &str| DeclError::InvalidAttribute {
            name: symbol.clone(),
            reason: reason.to_string(),
        };

        let shape = match spec.kind {
            DeclKind::Enum => Shape::Enum(resolve_members(
                &symbol,
                spec.flags,
                spec.underlying.unwrap_or_default(),
                &spec.members,
            )?),
            DeclKind::Class => {
                check_opaque(&symbol, &spec, &attributes)?;
                Shape::Class
            }
            DeclKind::Interface => {
                check_opaque(&symbol, &spec, &attributes)?;
                Shape::Interface
            }
            DeclKind::Struct => {
                check_opaque(&symbol, &spec, &attributes)?;
                Shape::Struct
            }
            DeclKind::Delegate => {
                check_opaque(&symbol, &spec, &attributes)?;
                Shape::Delegate
            }
        };

        let projection = if attributes.ignore_namespace {
            NameProjection::Flattened
        } else {
            NameProjection::Qualified
        };

        let linkage = if attributes.imported {
            if spec.template.is_some() {
                return Err(invalid_attr("imported declarations have no local template"));
            }
            Linkage::External(ExternalRef { projection })
        } else {
            Linkage::Local(LocalBody {
                projection,
                template: spec.template,
            })
        };

        Ok(Self {
            name,
            attributes,
            shape,
            linkage,
        })
    }

    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// Qualified name as a string, the symbol table key.
    pub fn qualified_name(&self) -> String {
        self.name.to_string()
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn linkage(&self) -> &Linkage {
        &self.linkage
    }

    pub fn is_imported(&self) -> bool {
        matches!(self.linkage, Linkage::External(_))
    }

    pub fn enum_shape(&self) -> Option<&EnumShape> {
        match &self.shape {
            Shape::Enum(shape) => Some(shape),
            _ => None,
        }
    }

    /// Enumeration members; empty for other shapes.
    pub fn members(&self) -> &[Member] {
        self.enum_shape().map(EnumShape::members).unwrap_or(&[])
    }

    /// Name the consumer emits when referencing this declaration.
    pub fn projected_name(&self) -> String {
        match self.linkage.projection() {
            NameProjection::Flattened => self.name.ident().to_string(),
            NameProjection::Qualified => self.name.to_string(),
        }
    }

    /// Integer encoding of `member`, returned exactly as declared.
    ///
    /// Only numeric-valued enumerations have one.
    pub fn encode_member(&self, member: &str) -> Result<i64, DeclError> {
        let shape = match self.enum_shape() {
            Some(shape) if self.attributes.is_numeric() => shape,
            _ => {
                return Err(DeclError::NotNumericEncodable {
                    name: self.qualified_name(),
                    member: member.to_string(),
                });
            }
        };
        shape
            .member(member)
            .map(|m| m.value)
            .ok_or_else(|| self.unknown_member(member))
    }

    /// Emit `member` according to the declaration's enumeration representation.
    pub fn emit_member(&self, member: &str) -> Result<EmittedValue, DeclError> {
        let found = self
            .enum_shape()
            .and_then(|shape| shape.member(member))
            .ok_or_else(|| self.unknown_member(member))?;

        Ok(match self.attributes.enum_repr {
            Some(EnumRepr::Numeric) => EmittedValue::Number(found.value),
            Some(EnumRepr::Name) => EmittedValue::Name(found.name.clone()),
            Some(EnumRepr::LowerCaseName) => EmittedValue::Name(found.name.to_lowercase()),
            Some(EnumRepr::UpperCaseName) => EmittedValue::Name(found.name.to_uppercase()),
            None => EmittedValue::Structured {
                type_name: self.projected_name(),
                member: found.name.clone(),
            },
        })
    }

    /// Bitwise OR of the numeric encodings of `members`.
    pub fn combine_flags(&self, members: &[&str]) -> Result<i64, DeclError> {
        self.require_flags()?;
        members
            .iter()
            .try_fold(0i64, |acc, m| Ok(acc | self.encode_member(m)?))
    }

    /// Split `value` into the declared members whose bits it sets.
    ///
    /// `0` maps to the zero-valued member if one is declared. Bits no member
    /// covers are reported, never named.
    pub fn decompose_flags(&self, value: i64) -> Result<FlagDecomposition, DeclError> {
        let shape = self.require_flags()?;

        if value == 0 {
            return Ok(FlagDecomposition {
                members: shape
                    .members()
                    .iter()
                    .filter(|m| m.value == 0)
                    .map(|m| m.name.clone())
                    .collect(),
                unknown_bits: 0,
            });
        }

        let mut covered = 0i64;
        let members = shape
            .members()
            .iter()
            .filter(|m| m.value != 0 && value & m.value == m.value)
            .map(|m| {
                covered |= m.value;
                m.name.clone()
            })
            .collect();

        Ok(FlagDecomposition {
            members,
            unknown_bits: value & !covered,
        })
    }

    /// Authoring form of this declaration, fully qualified.
    pub fn to_spec(&self) -> DeclarationSpec {
        let (flags, underlying, members) = match &self.shape {
            Shape::Enum(shape) => (
                shape.flags,
                Some(shape.underlying),
                shape
                    .members()
                    .iter()
                    .map(|m| MemberSpec::new(m.name.clone(), Some(m.value)))
                    .collect(),
            ),
            _ => (false, None, Vec::new()),
        };
        let template = match &self.linkage {
            Linkage::Local(body) => body.template.clone(),
            Linkage::External(_) => None,
        };
        DeclarationSpec {
            name: self.qualified_name(),
            kind: self.shape.kind(),
            flags,
            underlying,
            attributes: self.attributes.tags(),
            members,
            template,
        }
    }

    fn require_flags(&self) -> Result<&EnumShape, DeclError> {
        match self.enum_shape() {
            Some(shape) if shape.flags => Ok(shape),
            _ => Err(DeclError::NotFlagsEnum {
                name: self.qualified_name(),
            }),
        }
    }

    fn unknown_member(&self, member: &str) -> DeclError {
        DeclError::UnknownMember {
            name: self.qualified_name(),
            member: member.to_string(),
        }
    }
}

impl TryFrom<DeclarationSpec> for Declaration {
    type Error = DeclError;

    fn try_from(spec: DeclarationSpec) -> Result<Self, Self::Error> {
        Declaration::from_spec(spec, None)
    }
}

/// Non-enumeration declarations take no enumeration-only settings.
fn check_opaque(
    symbol: &str,
    spec: &DeclarationSpec,
    attributes: &AttributeSet,
) -> Result<(), DeclError> {
    let invalid_attr = |reason: String| DeclError::InvalidAttribute {
        name: symbol.to_string(),
        reason,
    };
    let kind = spec.kind.as_str();

    if let Some(repr) = attributes.enum_repr {
        return Err(invalid_attr(format!(
            "`{}` only applies to enumerations, not {kind}",
            repr.attribute().as_str()
        )));
    }
    if spec.flags {
        return Err(invalid_attr("`flags` only applies to enumerations".into()));
    }
    if spec.underlying.is_some() {
        return Err(invalid_attr("`underlying` only applies to enumerations".into()));
    }
    if let Some(member) = spec.members.first() {
        return Err(DeclError::InvalidMemberValue {
            name: symbol.to_string(),
            member: member.name.clone(),
            reason: format!("{kind} declarations have no members"),
        });
    }
    Ok(())
}

/// Assign values to members: explicit values are kept, an implicit one takes
/// the next value after the previous member (starting at 0) that no earlier
/// member uses. Names and explicit values must be unique and fit `underlying`.
fn resolve_members(
    symbol: &str,
    flags: bool,
    underlying: Underlying,
    specs: &[MemberSpec],
) -> Result<EnumShape, DeclError> {
    let invalid = |member: &str, reason: String| DeclError::InvalidMemberValue {
        name: symbol.to_string(),
        member: member.to_string(),
        reason,
    };

    let mut members: Vec<Member> = Vec::with_capacity(specs.len());
    // None once the implicit successor no longer fits
    let mut next = Some(0i64);

    for spec in specs {
        if members.iter().any(|m| m.name == spec.name) {
            return Err(invalid(&spec.name, "member declared more than once".into()));
        }

        let value = match spec.value {
            Some(v) => v,
            None => next_unused(next, underlying, &members).ok_or_else(|| {
                invalid(
                    &spec.name,
                    format!("no unused implicit value left in {}", underlying.as_str()),
                )
            })?,
        };

        if !underlying.contains(value) {
            return Err(invalid(
                &spec.name,
                format!("{value} is out of range for {}", underlying.as_str()),
            ));
        }

        if let Some(other) = members.iter().find(|m| m.value == value) {
            return Err(invalid(
                &spec.name,
                format!("value {value} is already used by `{}`", other.name),
            ));
        }

        next = value.checked_add(1).filter(|n| underlying.contains(*n));
        members.push(Member {
            name: spec.name.clone(),
            value,
        });
    }

    Ok(EnumShape {
        flags,
        underlying,
        members,
    })
}

/// First value from `start` upwards that no member holds, within `underlying`.
fn next_unused(start: Option<i64>, underlying: Underlying, members: &[Member]) -> Option<i64> {
    let mut candidate = start?;
    while members.iter().any(|m| m.value == candidate) {
        candidate = candidate.checked_add(1).filter(|n| underlying.contains(*n))?;
    }
    Some(candidate)
}
