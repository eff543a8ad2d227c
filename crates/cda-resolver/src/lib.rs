//! CDA Resolver - Link Resolution for Content Delivery Batches
//!
//! Delivery APIs return entries whose link fields hold placeholders
//! (`{"sys": {"type": "Link", "linkType": "Asset", "id": "..."}}`) instead of
//! the linked resources. This crate rehydrates those placeholders into
//! references to resources already present in the batch.
//!
//! # Pipeline
//!
//! One pass runs three phases in order:
//!
//! 1. **Partition** ([`partition()`]) - id-keyed asset and entry mappings from
//!    the batch items and, for query responses, the includes.
//! 2. **Localize** ([`localize()`]) - sync feed pages only: per-locale field
//!    mappings built from the raw per-field, per-locale data.
//! 3. **Resolve** ([`resolve_entry`]) - every link in every locale of every entry is
//!    replaced by its target, kept, or dropped under the nullify policy.
//!
//! Nothing is fetched: links whose targets are not in the batch stay
//! unresolved.
//!
//! # Example
//!
//! ```no_run
//! use cda_model::Batch;
//! use cda_resolver::{resolve_batch, ResolverConfig};
//!
//! fn run(document: serde_json::Value) -> cda_resolver::Result<()> {
//!     let config = ResolverConfig::from_env();
//!     let mut batch = Batch::from_json(document, &config.default_locale)?;
//!     let stats = resolve_batch(&mut batch, &config.context())?;
//!     println!("resolved {} links", stats.resolved);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod localize;
pub mod matching;
pub mod partition;
pub mod pass;
pub mod resolve;

pub use config::ResolverConfig;
pub use context::ResolveContext;
pub use error::{Error, Result};
pub use localize::{localize, localize_all};
pub use matching::match_link;
pub use partition::{partition, Partition};
pub use pass::{resolve, resolve_batch, spawn_resolve, Resolved};
pub use resolve::{resolve_entry, LinkResolver, ResolveStats};
