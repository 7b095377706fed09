//! Loading manifests from disk into a symbol table.

use importdecl_core::{DeclError, SymbolTable};
use importdecl_manifest::{DEFAULT_EXTENSION, ManifestError, discover, load_file, load_into};
use std::fs;
use std::path::{Path, PathBuf};

fn write(dir: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

fn extensions() -> Vec<String> {
    vec![DEFAULT_EXTENSION.to_string()]
}

const SORT: &str = r#"
namespace = "Platform.Feeds"

[[declaration]]
name = "FeedXmlSortOrder"
attributes = ["imported", "ignore-namespace", "numeric-values"]
members = [
  { name = "None", value = 0 },
  { name = "Ascending", value = 1 },
  { name = "Descending", value = 2 },
]
"#;

const INCLUDE: &str = r#"
namespace = "Platform.Feeds"

[[declaration]]
name = "FeedXmlIncludeFlags"
flags = true
attributes = ["imported", "ignore-namespace", "numeric-values"]
members = [
  { name = "None", value = 0 },
  { name = "CFExtensions", value = 1 },
]
"#;

#[test]
fn discover_walks_directories_sorted() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b/sort.toml", SORT);
    write(dir.path(), "a/include.toml", INCLUDE);
    write(dir.path(), "a/notes.md", "# not a manifest");

    let files = discover(&[dir.path().to_path_buf()], &extensions()).unwrap();
    let rel: Vec<PathBuf> = files
        .iter()
        .map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        rel,
        vec![PathBuf::from("a/include.toml"), PathBuf::from("b/sort.toml")]
    );
}

#[test]
fn discover_missing_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = discover(&[dir.path().join("missing")], &extensions()).unwrap_err();
    assert!(matches!(err, ManifestError::Io { .. }));
}

#[test]
fn load_registers_every_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "sort.toml", SORT);
    write(dir.path(), "include.toml", INCLUDE);

    let table = SymbolTable::new();
    let report = load_into(&table, &[dir.path().to_path_buf()], &extensions()).unwrap();
    assert!(report.is_ok(), "{:?}", report.errors);
    assert_eq!(report.files, 2);
    assert_eq!(report.registered, 2);

    let flags = table.resolve_projected("FeedXmlIncludeFlags").unwrap();
    assert_eq!(flags.encode_member("CFExtensions").unwrap(), 1);
    assert_eq!(flags.encode_member("None").unwrap(), 0);

    let order = table.resolve("Platform.Feeds.FeedXmlSortOrder").unwrap();
    assert_eq!(order.encode_member("Descending").unwrap(), 2);
}

#[test]
fn duplicate_across_files_keeps_first_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = write(dir.path(), "1.toml", INCLUDE);
    let second = write(
        dir.path(),
        "2.toml",
        &INCLUDE.replace("value = 1", "value = 4"),
    );

    let table = SymbolTable::new();
    let report = load_into(&table, &[second, first.clone()], &extensions()).unwrap();
    assert_eq!(report.registered, 1);
    assert_eq!(report.errors.len(), 1);

    let err = &report.errors[0];
    assert!(err.path().ends_with("2.toml"));
    assert!(matches!(
        err.declaration_error(),
        Some(DeclError::DuplicateSymbol { .. })
    ));

    // the first file's value survives
    let decl = table.resolve("Platform.Feeds.FeedXmlIncludeFlags").unwrap();
    assert_eq!(decl.encode_member("CFExtensions").unwrap(), 1);
    assert!(first.exists());
}

#[test]
fn broken_file_does_not_hide_valid_ones() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "good.toml", SORT);
    write(dir.path(), "broken.toml", "[[declaration]\nname = ");

    let table = SymbolTable::new();
    let report = load_into(&table, &[dir.path().to_path_buf()], &extensions()).unwrap();
    assert_eq!(report.files, 2);
    assert_eq!(report.registered, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(matches!(report.errors[0], ManifestError::Parse { .. }));
    assert!(table.contains("Platform.Feeds.FeedXmlSortOrder"));
}

#[test]
fn load_file_is_strict() {
    let dir = tempfile::tempdir().unwrap();

    let good = write(dir.path(), "include.toml", INCLUDE);
    let decls = load_file(&good).unwrap();
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].projected_name(), "FeedXmlIncludeFlags");

    let errors = load_file(&dir.path().join("missing.toml")).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ManifestError::Io { .. }));

    let mixed = write(
        dir.path(),
        "mixed.toml",
        r#"
[[declaration]]
name = "App.Good"
members = [{ name = "X" }]

[[declaration]]
name = "App.Bad"
members = [{ name = "A", value = 1 }, { name = "B", value = 1 }]
"#,
    );
    let errors = load_file(&mixed).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].path().ends_with("mixed.toml"));
    assert!(matches!(
        errors[0].declaration_error(),
        Some(DeclError::InvalidMemberValue { member, .. }) if member == "B"
    ));
}
