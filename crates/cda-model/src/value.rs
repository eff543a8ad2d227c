//! Field values and link placeholders.
//!
//! A field value starts out as plain JSON. Link placeholders are JSON objects
//! of the shape `{"sys": {"type": "Link", "linkType": "Asset", "id": "..."}}`;
//! once resolved they become [`FieldValue::Linked`], and sequences the
//! resolver has walked become [`FieldValue::List`].

use crate::kind::ResourceKind;
use crate::resource::{Resource, ResourceHandle};
use parking_lot::RwLock;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

/// Flattened field mapping for one locale: field name to value.
pub type Fields = BTreeMap<String, FieldValue>;

/// A single localized field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Untouched delivery data, including unresolved link placeholders.
    Json(Value),

    /// A link placeholder replaced by the resource it points at.
    Linked(ResourceLink),

    /// A sequence rebuilt by the resolver.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// The raw JSON, when this value has not been touched by the resolver.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The resolved reference, when this value is one.
    pub fn as_link(&self) -> Option<&ResourceLink> {
        match self {
            Self::Linked(link) => Some(link),
            _ => None,
        }
    }

    /// The rebuilt sequence, when this value is one.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this value is a link placeholder still waiting to be resolved.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Json(value) if is_link(value))
    }

    /// Render as JSON. Resolved links become `{"sys": {"type", "id"}}` of
    /// their target.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Linked(link) => link.to_json(),
            Self::List(items) => Value::Array(items.iter().map(FieldValue::to_json).collect()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Json(value) => value.serialize(serializer),
            Self::Linked(link) => link.serialize(serializer),
            Self::List(items) => items.serialize(serializer),
        }
    }
}

/// A resolved, non-owning reference to a resource in the same batch.
///
/// The batch owns every resource; links only hold a [`Weak`] handle, so
/// entries that link to each other (or to themselves) never form an
/// ownership cycle.
#[derive(Debug, Clone)]
pub struct ResourceLink {
    kind: ResourceKind,
    id: String,
    target: Weak<RwLock<Resource>>,
}

impl ResourceLink {
    /// Create a link to `target`, which must be of `kind` with `id`.
    pub fn new(kind: ResourceKind, id: impl Into<String>, target: &ResourceHandle) -> Self {
        Self {
            kind,
            id: id.into(),
            target: Arc::downgrade(target),
        }
    }

    /// Kind of the linked resource.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Id of the linked resource.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Live handle to the target, or `None` once its batch has been dropped.
    pub fn upgrade(&self) -> Option<ResourceHandle> {
        self.target.upgrade()
    }

    /// Whether this link points at exactly `handle`.
    pub fn points_to(&self, handle: &ResourceHandle) -> bool {
        std::ptr::eq(self.target.as_ptr(), Arc::as_ptr(handle))
    }

    fn to_json(&self) -> Value {
        json!({"sys": {"type": self.kind, "id": self.id}})
    }
}

impl PartialEq for ResourceLink {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.id == other.id && Weak::ptr_eq(&self.target, &other.target)
    }
}

impl Serialize for ResourceLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("sys", &json!({"type": self.kind, "id": self.id}))?;
        map.end()
    }
}

/// Target of a link placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub link_type: ResourceKind,
    pub id: String,
}

/// Whether `value` is a link placeholder: an object whose `sys.type` is `Link`.
pub fn is_link(value: &Value) -> bool {
    value
        .get("sys")
        .and_then(Value::as_object)
        .and_then(|sys| sys.get("type"))
        .and_then(Value::as_str)
        .map(|kind| ResourceKind::from_name(kind) == ResourceKind::Link)
        .unwrap_or(false)
}

/// Read the target of a link placeholder.
///
/// Returns `None` when `value` is not a placeholder or its `sys` lacks a
/// string `id`. An unrecognized `linkType` decodes to
/// [`ResourceKind::Unknown`].
pub fn link_target(value: &Value) -> Option<LinkTarget> {
    if !is_link(value) {
        return None;
    }
    let sys = value.get("sys")?;
    let id = sys.get("id")?.as_str()?;
    let link_type = sys
        .get("linkType")
        .and_then(Value::as_str)
        .map(ResourceKind::from_name)
        .unwrap_or(ResourceKind::Unknown);

    Some(LinkTarget {
        link_type,
        id: id.to_string(),
    })
}

/// Build a link placeholder, as the delivery API would send it.
pub fn link_placeholder(link_type: ResourceKind, id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": link_type, "id": id}})
}
