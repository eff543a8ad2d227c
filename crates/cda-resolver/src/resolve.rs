//! Link resolver: replaces link placeholders in entry fields with the
//! resources they point at.
//!
//! For every locale of an entry:
//!
//! - a field holding a placeholder becomes [`FieldValue::Linked`] when the
//!   target is in the pass's mappings. Otherwise it is left as is, or removed
//!   when the nullify policy is on. Removals are collected first and applied
//!   after the walk over the locale's fields.
//! - a field holding a sequence is rebuilt element by element into a new
//!   [`FieldValue::List`] that replaces the old value once complete.
//!   Unresolved elements are kept or, under the nullify policy, skipped, so
//!   the remaining elements keep their relative order without gaps.
//!
//! Already resolved values are left untouched, so a second pass over a
//! resolved batch changes nothing.

use crate::matching::match_link;
use crate::partition::Partition;
use cda_model::{is_link, FieldValue, Fields, Resource};
use serde::Serialize;
use serde_json::Value;
use std::ops::AddAssign;
use tracing::trace;

/// Link counts gathered while resolving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolveStats {
    /// Entries walked
    pub entries: usize,
    /// Placeholders replaced by their target
    pub resolved: usize,
    /// Placeholders left in place
    pub unresolved: usize,
    /// Placeholders removed by the nullify policy
    pub nullified: usize,
}

impl ResolveStats {
    /// Placeholders encountered, whatever happened to them.
    pub fn links(&self) -> usize {
        self.resolved + self.unresolved + self.nullified
    }
}

impl AddAssign for ResolveStats {
    fn add_assign(&mut self, other: Self) {
        self.entries += other.entries;
        self.resolved += other.resolved;
        self.unresolved += other.unresolved;
        self.nullified += other.nullified;
    }
}

/// Walks entries of one pass and resolves their links.
pub struct LinkResolver<'a> {
    partition: &'a Partition,
    nullify_unresolved: bool,
    stats: ResolveStats,
}

impl<'a> LinkResolver<'a> {
    /// Create a resolver over `partition` with the given nullify policy.
    pub fn new(partition: &'a Partition, nullify_unresolved: bool) -> Self {
        Self {
            partition,
            nullify_unresolved,
            stats: ResolveStats::default(),
        }
    }

    /// Resolve every link in every locale of `entry`.
    pub fn resolve_entry(&mut self, entry: &mut Resource) {
        self.stats.entries += 1;
        let entry_id = entry.sys.id.clone();
        for (locale, fields) in entry.localized.iter_mut() {
            self.resolve_fields(&entry_id, locale, fields);
        }
    }

    /// Counts gathered so far.
    pub fn stats(&self) -> ResolveStats {
        self.stats
    }

    fn resolve_fields(&mut self, entry_id: &str, locale: &str, fields: &mut Fields) {
        let mut nullified: Vec<String> = Vec::new();

        for (name, value) in fields.iter_mut() {
            let replacement = match value {
                FieldValue::Json(json) if is_link(json) => {
                    match match_link(json, self.partition) {
                        Some(link) => {
                            self.stats.resolved += 1;
                            Some(FieldValue::Linked(link))
                        }
                        None => {
                            trace!(
                                entry = entry_id,
                                locale,
                                field = %name,
                                target = %json,
                                "unresolved link"
                            );
                            if self.nullify_unresolved {
                                self.stats.nullified += 1;
                                nullified.push(name.clone());
                            } else {
                                self.stats.unresolved += 1;
                            }
                            None
                        }
                    }
                }
                FieldValue::Json(Value::Array(items)) => {
                    let items = std::mem::take(items).into_iter().map(FieldValue::Json);
                    Some(FieldValue::List(self.resolve_sequence(entry_id, locale, name, items)))
                }
                FieldValue::List(items) => {
                    let items = std::mem::take(items).into_iter();
                    Some(FieldValue::List(self.resolve_sequence(entry_id, locale, name, items)))
                }
                _ => None,
            };

            if let Some(replacement) = replacement {
                *value = replacement;
            }
        }

        if !nullified.is_empty() {
            fields.retain(|name, _| !nullified.contains(name));
        }
    }

    fn resolve_sequence(
        &mut self,
        entry_id: &str,
        locale: &str,
        field: &str,
        items: impl Iterator<Item = FieldValue>,
    ) -> Vec<FieldValue> {
        let mut rebuilt = Vec::with_capacity(items.size_hint().0);

        for item in items {
            match item {
                FieldValue::Json(json) if is_link(&json) => {
                    match match_link(&json, self.partition) {
                        Some(link) => {
                            self.stats.resolved += 1;
                            rebuilt.push(FieldValue::Linked(link));
                        }
                        None => {
                            trace!(
                                entry = entry_id,
                                locale,
                                field,
                                target = %json,
                                "unresolved link in sequence"
                            );
                            if self.nullify_unresolved {
                                self.stats.nullified += 1;
                            } else {
                                self.stats.unresolved += 1;
                                rebuilt.push(FieldValue::Json(json));
                            }
                        }
                    }
                }
                other => rebuilt.push(other),
            }
        }

        rebuilt
    }
}

/// Resolve every link in `entry` against `partition`.
pub fn resolve_entry(
    entry: &mut Resource,
    partition: &Partition,
    nullify_unresolved: bool,
) -> ResolveStats {
    let mut resolver = LinkResolver::new(partition, nullify_unresolved);
    resolver.resolve_entry(entry);
    resolver.stats()
}
