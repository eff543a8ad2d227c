//! The two batch shapes a resolution pass accepts.
//!
//! - [`SyncedSpace`] - a sync feed page. Items carry every locale in their
//!   raw fields and there is no separate includes section.
//! - [`Page`] - a query response. Items are already flat for one locale and
//!   linked resources arrive in an optional includes section.

use crate::error::{Error, Result};
use crate::kind::ResourceKind;
use crate::resource::{Resource, ResourceHandle};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A sync feed page.
#[derive(Debug, Clone, Default)]
pub struct SyncedSpace {
    /// Every resource in the feed page
    pub items: Vec<ResourceHandle>,

    /// URL for the next incremental sync, on the last page
    pub next_sync_url: Option<String>,

    /// URL for the next page, when more pages follow
    pub next_page_url: Option<String>,
}

impl SyncedSpace {
    /// Create a synced batch from resources.
    pub fn new(items: Vec<Resource>) -> Self {
        Self {
            items: items.into_iter().map(Resource::into_handle).collect(),
            next_sync_url: None,
            next_page_url: None,
        }
    }
}

/// Linked resources delivered alongside a query response.
#[derive(Debug, Clone, Default)]
pub struct Includes {
    pub assets: Vec<ResourceHandle>,
    pub entries: Vec<ResourceHandle>,
}

impl Includes {
    /// Create includes from resources.
    pub fn new(assets: Vec<Resource>, entries: Vec<Resource>) -> Self {
        Self {
            assets: assets.into_iter().map(Resource::into_handle).collect(),
            entries: entries.into_iter().map(Resource::into_handle).collect(),
        }
    }
}

/// A query response page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Root items
    pub items: Vec<ResourceHandle>,

    /// Linked resources, when the query asked for them
    pub includes: Option<Includes>,

    /// Total matches across all pages
    pub total: u64,

    /// Offset of this page
    pub skip: u64,

    /// Page size
    pub limit: u64,
}

impl Page {
    /// Create a page from root items.
    pub fn new(items: Vec<Resource>) -> Self {
        let total = items.len() as u64;
        Self {
            items: items.into_iter().map(Resource::into_handle).collect(),
            includes: None,
            total,
            skip: 0,
            limit: total,
        }
    }

    /// Builder: Set includes.
    pub fn with_includes(mut self, includes: Includes) -> Self {
        self.includes = Some(includes);
        self
    }

    /// Every resource in the page, includes first.
    pub fn resources(&self) -> Box<dyn Iterator<Item = &ResourceHandle> + '_> {
        let included = self
            .includes
            .iter()
            .flat_map(|includes| includes.assets.iter().chain(includes.entries.iter()));
        Box::new(included.chain(self.items.iter()))
    }
}

/// A batch handed to a resolution pass.
#[derive(Debug, Clone)]
pub enum Batch {
    Synced(SyncedSpace),
    Paginated(Page),
}

impl Batch {
    /// Classify and decode a delivery document.
    ///
    /// A document with `nextSyncUrl` or `nextPageUrl` is a sync feed page. A
    /// document whose `sys.type` is `Array` is a query response; its items
    /// and includes get their flat fields installed under their `sys.locale`,
    /// or under `default_locale` when the response does not say.
    pub fn from_json(value: Value, default_locale: &str) -> Result<Self> {
        let Value::Object(mut doc) = value else {
            return Err(Error::InvalidInput("batch is not a JSON object".to_string()));
        };

        if doc.contains_key("nextSyncUrl") || doc.contains_key("nextPageUrl") {
            return Ok(Self::Synced(SyncedSpace {
                items: take_resources(&mut doc, "items")?,
                next_sync_url: take_string(&doc, "nextSyncUrl"),
                next_page_url: take_string(&doc, "nextPageUrl"),
            }));
        }

        let is_array = doc
            .get("sys")
            .and_then(|sys| sys.get("type"))
            .and_then(Value::as_str)
            .map(ResourceKind::from_name)
            == Some(ResourceKind::Array);
        if !is_array {
            return Err(Error::InvalidInput(
                "batch is neither a sync feed page nor a query response".to_string(),
            ));
        }

        let items = take_resources(&mut doc, "items")?;
        let includes = match doc.remove("includes") {
            Some(Value::Object(mut section)) => Some(Includes {
                assets: take_resources(&mut section, "Asset")?,
                entries: take_resources(&mut section, "Entry")?,
            }),
            Some(Value::Null) | None => None,
            Some(_) => {
                return Err(Error::InvalidInput("includes is not an object".to_string()));
            }
        };

        let page = Page {
            total: take_u64(&doc, "total").unwrap_or(items.len() as u64),
            skip: take_u64(&doc, "skip").unwrap_or(0),
            limit: take_u64(&doc, "limit").unwrap_or(items.len() as u64),
            items,
            includes,
        };
        for handle in page.resources() {
            let mut resource = handle.write();
            let locale = resource
                .sys
                .locale
                .clone()
                .unwrap_or_else(|| default_locale.to_string());
            resource.install_flat_fields(&locale);
        }

        Ok(Self::Paginated(page))
    }

    /// Root items of the batch.
    pub fn items(&self) -> &[ResourceHandle] {
        match self {
            Self::Synced(space) => &space.items,
            Self::Paginated(page) => &page.items,
        }
    }

    /// Whether this is a sync feed page.
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced(_))
    }

    /// Every resource held by the batch, includes first.
    pub fn resources(&self) -> Box<dyn Iterator<Item = &ResourceHandle> + '_> {
        match self {
            Self::Synced(space) => Box::new(space.items.iter()),
            Self::Paginated(page) => page.resources(),
        }
    }
}

fn take_resources(doc: &mut Map<String, Value>, key: &str) -> Result<Vec<ResourceHandle>> {
    match doc.remove(key) {
        Some(Value::Array(values)) => values
            .into_iter()
            .map(|value| Resource::from_json(value).map(Resource::into_handle))
            .collect(),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(_) => Err(Error::InvalidInput(format!("`{key}` is not an array"))),
    }
}

fn take_string(doc: &Map<String, Value>, key: &str) -> Option<String> {
    doc.get(key).and_then(Value::as_str).map(str::to_string)
}

fn take_u64(doc: &Map<String, Value>, key: &str) -> Option<u64> {
    doc.get(key).and_then(Value::as_u64)
}

impl Serialize for Includes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("Asset", &Handles(&self.assets))?;
        map.serialize_entry("Entry", &Handles(&self.entries))?;
        map.end()
    }
}

struct Handles<'a>(&'a [ResourceHandle]);

impl Serialize for Handles<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for handle in self.0 {
            seq.serialize_element(&*handle.read())?;
        }
        seq.end()
    }
}

impl Serialize for Batch {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("sys", &serde_json::json!({"type": ResourceKind::Array}))?;
        match self {
            Self::Synced(space) => {
                map.serialize_entry("items", &Handles(&space.items))?;
                if let Some(url) = &space.next_sync_url {
                    map.serialize_entry("nextSyncUrl", url)?;
                }
                if let Some(url) = &space.next_page_url {
                    map.serialize_entry("nextPageUrl", url)?;
                }
            }
            Self::Paginated(page) => {
                map.serialize_entry("total", &page.total)?;
                map.serialize_entry("skip", &page.skip)?;
                map.serialize_entry("limit", &page.limit)?;
                map.serialize_entry("items", &Handles(&page.items))?;
                if let Some(includes) = &page.includes {
                    map.serialize_entry("includes", includes)?;
                }
            }
        }
        map.end()
    }
}
