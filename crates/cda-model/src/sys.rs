//! System metadata (`sys`) carried by every resource.

use crate::kind::ResourceKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `sys` block of a delivery resource.
///
/// Only the keys the resolver cares about are typed; everything else is kept
/// verbatim in `extra` so it survives a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    /// Unique identifier within a space
    pub id: String,

    /// Resource kind
    #[serde(rename = "type")]
    pub kind: ResourceKind,

    /// Target kind, set on link placeholders only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<ResourceKind>,

    /// Locale the fields were delivered in (query responses only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Published revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,

    /// Creation timestamp (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last update timestamp (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Remaining keys (space, contentType, environment, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Sys {
    /// Create minimal metadata for a resource.
    pub fn new(id: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            kind,
            link_type: None,
            locale: None,
            revision: None,
            created_at: None,
            updated_at: None,
            extra: Map::new(),
        }
    }

    /// Builder: Set delivery locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Builder: Set revision.
    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = Some(revision);
        self
    }

    /// Content type id of an entry, read from `sys.contentType.sys.id`.
    pub fn content_type_id(&self) -> Option<&str> {
        self.extra
            .get("contentType")?
            .get("sys")?
            .get("id")?
            .as_str()
    }
}
