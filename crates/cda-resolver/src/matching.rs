//! Link matching: find the resource a placeholder points at.

use crate::partition::Partition;
use cda_model::{link_target, ResourceLink};
use serde_json::Value;

/// Resolve a link placeholder against the pass's mappings.
///
/// Asset links are looked up among assets, entry links among entries.
/// Returns `None` when the target is missing, the placeholder lacks an id, or
/// its `linkType` is neither `Asset` nor `Entry`.
pub fn match_link(placeholder: &Value, partition: &Partition) -> Option<ResourceLink> {
    let target = link_target(placeholder)?;
    let handle = partition.get(target.link_type, &target.id)?;
    Some(ResourceLink::new(target.link_type, target.id, handle))
}
