//! Catalog tags and the document type produced by assemblers.

use std::fmt::{self, Display, Formatter};

/// Fully localized catalog tree as produced by an assembler.
pub type Document = serde_json::Value;

/// Catalogs published by the resource server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogType {
    /// Hardware boards and kits.
    Devices,
    /// Block extensions.
    Extensions,
}

impl CatalogType {
    /// Every catalog type; the index holds one cell per type and locale.
    pub const ALL: [Self; 2] = [Self::Devices, Self::Extensions];

    /// Stable tag used in request paths and as the on-disk directory name.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Devices => "devices",
            Self::Extensions => "extensions",
        }
    }

    /// Resolve a request path segment to a catalog type.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|catalog| catalog.tag() == tag)
    }
}

impl Display for CatalogType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.tag())
    }
}
