//! Resource kind discriminator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The `sys.type` of a delivery resource.
///
/// Decoded once when a resource is read; everything downstream dispatches on
/// this enum instead of inspecting raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Array,
    Asset,
    ContentType,
    DeletedAsset,
    DeletedEntry,
    Entry,
    Link,
    Space,
    /// Any `sys.type` this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl ResourceKind {
    /// Parse a wire name, mapping unrecognized names to [`ResourceKind::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Array" => Self::Array,
            "Asset" => Self::Asset,
            "ContentType" => Self::ContentType,
            "DeletedAsset" => Self::DeletedAsset,
            "DeletedEntry" => Self::DeletedEntry,
            "Entry" => Self::Entry,
            "Link" => Self::Link,
            "Space" => Self::Space,
            _ => Self::Unknown,
        }
    }

    /// Wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "Array",
            Self::Asset => "Asset",
            Self::ContentType => "ContentType",
            Self::DeletedAsset => "DeletedAsset",
            Self::DeletedEntry => "DeletedEntry",
            Self::Entry => "Entry",
            Self::Link => "Link",
            Self::Space => "Space",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether resources of this kind carry per-locale fields.
    pub fn is_localizable(&self) -> bool {
        matches!(self, Self::Asset | Self::Entry)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
