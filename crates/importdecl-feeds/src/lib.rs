//! Imported declarations for the platform Feeds subsystem.
//!
//! The declarations live in `decls/feeds.toml` and are embedded at build
//! time. Two of them are flag sets; they also get typed mirrors here so Rust
//! callers can build values that match what generated code passes to the host.

use bitflags::bitflags;
use importdecl_core::{Declaration, SymbolTable};
use importdecl_manifest::{ManifestError, parse_manifest};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;

/// Namespace the Feeds declarations are declared under.
pub const NAMESPACE: &str = "Platform.Feeds";

/// The embedded manifest.
pub const MANIFEST: &str = include_str!("../decls/feeds.toml");

const MANIFEST_ORIGIN: &str = "<builtin>/feeds.toml";

/// Validated Feeds declarations.
pub fn declarations() -> Result<Vec<Declaration>, Vec<ManifestError>> {
    parse_manifest(MANIFEST, Path::new(MANIFEST_ORIGIN))
}

/// Register every Feeds declaration into `table`.
pub fn register(table: &SymbolTable) -> Result<usize, Vec<ManifestError>> {
    let decls = declarations()?;
    table.register_all(decls).map_err(|errors| {
        errors
            .into_iter()
            .map(|source| ManifestError::Declaration {
                path: MANIFEST_ORIGIN.into(),
                source,
            })
            .collect()
    })
}

/// A typed mirror of an imported flags declaration.
pub trait ImportedFlags: Sized {
    /// Qualified name of the mirrored declaration.
    const SYMBOL: &'static str;

    /// Flag for a declared member name. Unknown names give `None`.
    fn from_member(name: &str) -> Option<Self>;

    /// Value exactly as generated code passes it.
    fn encoded(&self) -> i64;
}

bitflags! {
    /// Extra content to include when a feed is rendered as XML.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FeedXmlIncludeFlags: i32 {
        const CF_EXTENSIONS = 1;
    }
}

impl ImportedFlags for FeedXmlIncludeFlags {
    const SYMBOL: &'static str = "Platform.Feeds.FeedXmlIncludeFlags";

    fn from_member(name: &str) -> Option<Self> {
        match name {
            "None" => Some(Self::empty()),
            "CFExtensions" => Some(Self::CF_EXTENSIONS),
            _ => None,
        }
    }

    fn encoded(&self) -> i64 {
        self.bits().into()
    }
}

bitflags! {
    /// Which change notifications a feed or folder subscription receives.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FeedEventsMask: i32 {
        const FOLDER_EVENTS = 1;
        const FEED_EVENTS = 1 << 1;
    }
}

impl ImportedFlags for FeedEventsMask {
    const SYMBOL: &'static str = "Platform.Feeds.FeedEventsMask";

    fn from_member(name: &str) -> Option<Self> {
        match name {
            "FolderEvents" => Some(Self::FOLDER_EVENTS),
            "FeedEvents" => Some(Self::FEED_EVENTS),
            _ => None,
        }
    }

    fn encoded(&self) -> i64 {
        self.bits().into()
    }
}

macro_rules! bits_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_i32(self.bits())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let bits = i32::deserialize(deserializer)?;
                Ok(Self::from_bits_retain(bits))
            }
        }
    };
}

bits_serde!(FeedXmlIncludeFlags);
bits_serde!(FeedEventsMask);
