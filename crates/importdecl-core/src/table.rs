//! Symbol table of registered declarations.
//!
//! One table is built per generation run and passed by reference to every
//! stage that needs it. Registration is insert-if-absent under a single write
//! lock, so workers may register concurrently without breaking uniqueness of
//! either qualified or projected names.

use crate::decl::Declaration;
use crate::error::DeclError;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Default)]
struct Entries {
    /// Qualified name -> declaration.
    by_name: HashMap<String, Arc<Declaration>>,
    /// Projected name -> qualified name.
    by_projection: HashMap<String, String>,
}

/// Registered declarations, keyed by qualified name.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: RwLock<Entries>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `decl`, making it resolvable for the rest of the build.
    ///
    /// Fails with [`DeclError::DuplicateSymbol`] when the qualified name is
    /// taken and [`DeclError::DuplicateProjection`] when another declaration
    /// already projects to the same name. The existing entry is left untouched.
    pub fn register(&self, decl: Declaration) -> Result<Arc<Declaration>, DeclError> {
        let name = decl.qualified_name();
        let projected = decl.projected_name();

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if entries.by_name.contains_key(&name) {
            tracing::warn!(symbol = %name, "rejected duplicate declaration");
            return Err(DeclError::DuplicateSymbol { name });
        }
        if let Some(existing) = entries.by_projection.get(&projected) {
            tracing::warn!(symbol = %name, %projected, %existing, "rejected colliding projection");
            return Err(DeclError::DuplicateProjection {
                name,
                projected,
                existing: existing.clone(),
            });
        }

        let decl = Arc::new(decl);
        entries.by_projection.insert(projected.clone(), name.clone());
        entries.by_name.insert(name.clone(), Arc::clone(&decl));
        tracing::debug!(symbol = %name, %projected, imported = decl.is_imported(), "registered");
        Ok(decl)
    }

    /// Register every declaration, collecting all failures instead of stopping
    /// at the first. Valid declarations are registered either way.
    pub fn register_all<I>(&self, decls: I) -> Result<usize, Vec<DeclError>>
    where
        I: IntoIterator<Item = Declaration>,
    {
        let mut registered = 0;
        let mut errors = Vec::new();
        for decl in decls {
            match self.register(decl) {
                Ok(_) => registered += 1,
                Err(e) => errors.push(e),
            }
        }
        if errors.is_empty() {
            Ok(registered)
        } else {
            Err(errors)
        }
    }

    /// Look up a declaration by qualified name.
    pub fn resolve(&self, name: &str) -> Result<Arc<Declaration>, DeclError> {
        tracing::trace!(symbol = %name, "resolve");
        self.read()
            .by_name
            .get(name)
            .cloned()
            .ok_or_else(|| DeclError::UnknownSymbol {
                name: name.to_string(),
            })
    }

    /// Look up a declaration by the name the consumer emits for it.
    pub fn resolve_projected(&self, projected: &str) -> Result<Arc<Declaration>, DeclError> {
        tracing::trace!(%projected, "resolve projected");
        let entries = self.read();
        entries
            .by_projection
            .get(projected)
            .and_then(|name| entries.by_name.get(name))
            .cloned()
            .ok_or_else(|| DeclError::UnknownSymbol {
                name: projected.to_string(),
            })
    }

    /// Resolve by qualified name, falling back to projected name.
    pub fn lookup(&self, name: &str) -> Result<Arc<Declaration>, DeclError> {
        self.resolve(name).or_else(|_| self.resolve_projected(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.read().by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all declarations, sorted by qualified name.
    pub fn declarations(&self) -> Vec<Arc<Declaration>> {
        let mut decls: Vec<_> = self.read().by_name.values().cloned().collect();
        decls.sort_by_key(|d| d.qualified_name());
        decls
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::Attribute;
    use crate::decl::{DeclKind, DeclarationSpec, MemberSpec};

    fn flags_decl(name: &str, flatten: bool) -> Declaration {
        let mut attributes = vec![Attribute::Imported, Attribute::NumericValues];
        if flatten {
            attributes.push(Attribute::IgnoreNamespace);
        }
        Declaration::try_from(DeclarationSpec {
            name: name.into(),
            kind: DeclKind::Enum,
            flags: true,
            attributes,
            members: vec![
                MemberSpec::new("None", Some(0)),
                MemberSpec::new("CFExtensions", Some(1)),
            ],
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_register_and_resolve() {
        let table = SymbolTable::new();
        let registered = table
            .register(flags_decl("Platform.Feeds.FeedXmlIncludeFlags", true))
            .unwrap();

        let resolved = table.resolve("Platform.Feeds.FeedXmlIncludeFlags").unwrap();
        assert!(Arc::ptr_eq(&registered, &resolved));

        let by_projection = table.resolve_projected("FeedXmlIncludeFlags").unwrap();
        assert!(Arc::ptr_eq(&registered, &by_projection));

        assert_eq!(table.len(), 1);
        assert!(table.contains("Platform.Feeds.FeedXmlIncludeFlags"));
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let table = SymbolTable::new();
        let first = table.register(flags_decl("A.Flags", false)).unwrap();
        let err = table.register(flags_decl("A.Flags", false)).unwrap_err();
        assert_eq!(
            err,
            DeclError::DuplicateSymbol {
                name: "A.Flags".into()
            }
        );
        assert!(Arc::ptr_eq(&first, &table.resolve("A.Flags").unwrap()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_flattened_projection_collision() {
        let table = SymbolTable::new();
        table.register(flags_decl("A.Flags", true)).unwrap();
        let err = table.register(flags_decl("B.Flags", true)).unwrap_err();
        assert_eq!(
            err,
            DeclError::DuplicateProjection {
                name: "B.Flags".into(),
                projected: "Flags".into(),
                existing: "A.Flags".into(),
            }
        );
        assert!(!table.contains("B.Flags"));

        // qualified projections of the same ident do not collide
        table.register(flags_decl("C.Flags", false)).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unknown_symbol() {
        let table = SymbolTable::new();
        assert_eq!(
            table.resolve("Nope").unwrap_err(),
            DeclError::UnknownSymbol {
                name: "Nope".into()
            }
        );
        assert!(table.resolve_projected("Nope").is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_lookup_falls_back_to_projection() {
        let table = SymbolTable::new();
        table
            .register(flags_decl("Platform.Feeds.FeedXmlIncludeFlags", true))
            .unwrap();
        assert!(table.lookup("FeedXmlIncludeFlags").is_ok());
        assert!(table.lookup("Platform.Feeds.FeedXmlIncludeFlags").is_ok());
    }

    #[test]
    fn test_register_all_reports_every_failure() {
        let table = SymbolTable::new();
        let errors = table
            .register_all([
                flags_decl("A.Flags", false),
                flags_decl("A.Flags", false),
                flags_decl("B.Flags", false),
                flags_decl("B.Flags", false),
            ])
            .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].symbol(), "A.Flags");
        assert_eq!(errors[1].symbol(), "B.Flags");
        assert_eq!(table.len(), 2);

        let fresh = SymbolTable::new();
        assert_eq!(fresh.register_all([flags_decl("C.Flags", false)]), Ok(1));
    }

    #[test]
    fn test_declarations_sorted() {
        let table = SymbolTable::new();
        table.register(flags_decl("Z.Flags", false)).unwrap();
        table.register(flags_decl("A.Flags", false)).unwrap();
        let names: Vec<String> = table
            .declarations()
            .iter()
            .map(|d| d.qualified_name())
            .collect();
        assert_eq!(names, vec!["A.Flags", "Z.Flags"]);
    }
}
