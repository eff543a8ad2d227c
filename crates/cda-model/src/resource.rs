//! Delivery resources (entries, assets, and everything else an API returns).

use crate::error::{Error, Result};
use crate::kind::ResourceKind;
use crate::sys::Sys;
use crate::value::{FieldValue, Fields};
use parking_lot::RwLock;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared, mutable handle to a resource.
///
/// A batch owns its resources through these handles; resolution mutates
/// them in place and resolved links point back at them.
pub type ResourceHandle = Arc<RwLock<Resource>>;

/// A fetched resource.
///
/// `raw_fields` is the `fields` object as delivered. For synced content every
/// field maps locale codes to values (`{"title": {"en-US": "Hi"}}`); for query
/// responses the fields are already flat for a single locale.
///
/// `localized` maps a locale code to the flattened fields for that locale and
/// is what the link resolver walks.
#[derive(Debug, Clone)]
pub struct Resource {
    /// System metadata
    pub sys: Sys,

    /// Fields as delivered
    pub raw_fields: Map<String, Value>,

    /// Locale code to flattened fields
    pub localized: BTreeMap<String, Fields>,

    /// Other top-level keys (content type `name`, `displayField`, ...)
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct WireResource {
    sys: Sys,
    #[serde(default)]
    fields: Value,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Resource {
    /// Create a resource without fields.
    pub fn new(sys: Sys) -> Self {
        Self {
            sys,
            raw_fields: Map::new(),
            localized: BTreeMap::new(),
            extra: Map::new(),
        }
    }

    /// Builder: Add a raw field.
    pub fn with_raw_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.raw_fields.insert(name.into(), value);
        self
    }

    /// Builder: Add a localized field value.
    pub fn with_localized_field(
        mut self,
        locale: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.localized
            .entry(locale.into())
            .or_default()
            .insert(name.into(), value.into());
        self
    }

    /// Decode a resource from its delivery JSON (`{"sys": ..., "fields": ...}`).
    ///
    /// Only an object-valued `fields` becomes `raw_fields`; content types
    /// deliver `fields` as an array of definitions, which is kept in `extra`.
    pub fn from_json(value: Value) -> Result<Self> {
        let mut wire: WireResource = serde_json::from_value(value)?;
        if wire.sys.id.is_empty() {
            return Err(Error::InvalidInput("resource sys.id is empty".to_string()));
        }
        let raw_fields = match wire.fields {
            Value::Object(fields) => fields,
            Value::Null => Map::new(),
            other => {
                wire.extra.insert("fields".to_string(), other);
                Map::new()
            }
        };
        Ok(Self {
            sys: wire.sys,
            raw_fields,
            localized: BTreeMap::new(),
            extra: wire.extra,
        })
    }

    /// Wrap in a shared handle.
    pub fn into_handle(self) -> ResourceHandle {
        Arc::new(RwLock::new(self))
    }

    /// Resource id.
    pub fn id(&self) -> &str {
        &self.sys.id
    }

    /// Resource kind.
    pub fn kind(&self) -> ResourceKind {
        self.sys.kind
    }

    /// Flattened fields for `locale`, if localized for it.
    pub fn fields(&self, locale: &str) -> Option<&Fields> {
        self.localized.get(locale)
    }

    /// A single localized field.
    pub fn field(&self, locale: &str, name: &str) -> Option<&FieldValue> {
        self.localized.get(locale)?.get(name)
    }

    /// Install the raw fields, taken as already flat, as the mapping for
    /// `locale`. Used for query responses, which deliver one locale at a time.
    pub fn install_flat_fields(&mut self, locale: &str) {
        let fields = self
            .raw_fields
            .iter()
            .map(|(name, value)| (name.clone(), FieldValue::Json(value.clone())))
            .collect();
        self.localized.insert(locale.to_string(), fields);
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("sys", &self.sys)?;
        if !self.extra.contains_key("fields") {
            map.serialize_entry("fields", &self.raw_fields)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        if !self.localized.is_empty() {
            map.serialize_entry("localized", &self.localized)?;
        }
        map.end()
    }
}
