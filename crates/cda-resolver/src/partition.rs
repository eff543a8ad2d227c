//! Partitioner: splits a batch into id-keyed asset and entry mappings.

use cda_model::{Batch, ResourceHandle, ResourceKind};
use std::collections::HashMap;

/// Asset and entry lookup tables for one resolution pass.
///
/// Owned by the pass that built it and dropped when the pass ends.
#[derive(Debug, Default)]
pub struct Partition {
    assets: HashMap<String, ResourceHandle>,
    entries: HashMap<String, ResourceHandle>,
}

impl Partition {
    /// Look up an asset by id.
    pub fn asset(&self, id: &str) -> Option<&ResourceHandle> {
        self.assets.get(id)
    }

    /// Look up an entry by id.
    pub fn entry(&self, id: &str) -> Option<&ResourceHandle> {
        self.entries.get(id)
    }

    /// Look up a resource of `kind` by id. Only assets and entries are held.
    pub fn get(&self, kind: ResourceKind, id: &str) -> Option<&ResourceHandle> {
        match kind {
            ResourceKind::Asset => self.asset(id),
            ResourceKind::Entry => self.entry(id),
            _ => None,
        }
    }

    /// All entries.
    pub fn entries(&self) -> impl Iterator<Item = &ResourceHandle> {
        self.entries.values()
    }

    /// Number of distinct asset ids.
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Number of distinct entry ids.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn insert_asset(&mut self, handle: &ResourceHandle) {
        let id = handle.read().id().to_string();
        self.assets.insert(id, ResourceHandle::clone(handle));
    }

    fn insert_entry(&mut self, handle: &ResourceHandle) {
        let id = handle.read().id().to_string();
        self.entries.insert(id, ResourceHandle::clone(handle));
    }

    /// Insert by kind; anything that is neither asset nor entry is ignored.
    fn insert(&mut self, handle: &ResourceHandle) {
        let kind = handle.read().kind();
        match kind {
            ResourceKind::Asset => self.insert_asset(handle),
            ResourceKind::Entry => self.insert_entry(handle),
            _ => {}
        }
    }
}

/// Build the asset and entry mappings for `batch`.
///
/// Query responses seed both mappings from their includes first, then
/// overlay the root items, so a root item replaces an included resource with
/// the same id.
pub fn partition(batch: &Batch) -> Partition {
    let mut partition = Partition::default();

    match batch {
        Batch::Synced(space) => {
            for item in &space.items {
                partition.insert(item);
            }
        }
        Batch::Paginated(page) => {
            if let Some(includes) = &page.includes {
                for asset in &includes.assets {
                    partition.insert_asset(asset);
                }
                for entry in &includes.entries {
                    partition.insert_entry(entry);
                }
            }
            for item in &page.items {
                partition.insert(item);
            }
        }
    }

    partition
}
