//! Per-pass resolution context.

use cda_model::{Locale, SpaceContext};
use std::sync::Arc;

/// Everything a resolution pass reads besides the batch itself.
///
/// Cheap to clone: the space snapshot is shared, never copied, and never
/// mutated while passes run.
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// Space metadata snapshot
    pub space: Arc<SpaceContext>,

    /// Drop unresolvable links instead of leaving the placeholder in place
    pub nullify_unresolved: bool,
}

impl ResolveContext {
    /// Create a context that keeps unresolved placeholders.
    pub fn new(space: Arc<SpaceContext>) -> Self {
        Self {
            space,
            nullify_unresolved: false,
        }
    }

    /// Builder: Set the nullify-unresolved policy.
    pub fn with_nullify_unresolved(mut self, nullify: bool) -> Self {
        self.nullify_unresolved = nullify;
        self
    }

    /// Locales of the space, in order.
    pub fn locales(&self) -> &[Locale] {
        &self.space.locales
    }
}
