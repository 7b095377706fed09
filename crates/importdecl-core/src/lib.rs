//! Imported-type declarations for code generators.
//!
//! A declaration describes a type a generator must not define itself (or, for
//! local declarations, must define from the given shape). It records:
//! - whether the type is implemented elsewhere ([`Linkage`]),
//! - the name the generator emits for it ([`Declaration::projected_name`]),
//! - how enumeration members are encoded ([`Declaration::encode_member`]).
//!
//! ```
//! use importdecl_core::{Attribute, Declaration, DeclarationSpec, MemberSpec, SymbolTable};
//!
//! let table = SymbolTable::new();
//! table.register(Declaration::from_spec(
//!     DeclarationSpec {
//!         name: "FeedXmlIncludeFlags".into(),
//!         flags: true,
//!         attributes: vec![
//!             Attribute::Imported,
//!             Attribute::IgnoreNamespace,
//!             Attribute::NumericValues,
//!         ],
//!         members: vec![
//!             MemberSpec::new("None", Some(0)),
//!             MemberSpec::new("CFExtensions", Some(1)),
//!         ],
//!         ..Default::default()
//!     },
//!     Some("Platform.Feeds"),
//! )?)?;
//!
//! let decl = table.resolve("Platform.Feeds.FeedXmlIncludeFlags")?;
//! assert_eq!(decl.projected_name(), "FeedXmlIncludeFlags");
//! assert_eq!(decl.encode_member("CFExtensions")?, 1);
//! # Ok::<(), importdecl_core::DeclError>(())
//! ```

mod attrs;
mod decl;
mod error;
mod name;
pub mod plan;
mod table;

pub use attrs::{Attribute, AttributeSet, EnumRepr};
pub use decl::{
    DeclKind, Declaration, DeclarationSpec, EmittedValue, EnumShape, ExternalRef,
    FlagDecomposition, LocalBody, Linkage, Member, MemberSpec, NameProjection, Shape, Underlying,
};
pub use error::DeclError;
pub use name::QualifiedName;
pub use plan::{Action, EmissionPlan, PlannedMember, UnitError, plan_declaration, plan_unit};
pub use table::SymbolTable;
