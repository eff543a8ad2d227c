//! One resolution pass: partition, localize, resolve.
//!
//! A pass runs strictly in sequence because each phase reads mappings the
//! previous one finished building. Independent batches run as independent
//! passes, one task each, via [`spawn_resolve`].

use crate::context::ResolveContext;
use crate::error::Result;
use crate::localize::localize_all;
use crate::partition::partition;
use crate::resolve::{LinkResolver, ResolveStats};
use cda_model::Batch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// A batch after a completed pass.
#[derive(Debug)]
pub struct Resolved {
    pub batch: Batch,
    pub stats: ResolveStats,
}

/// Resolve every link in `batch`, mutating its resources in place.
///
/// Sync feed pages are localized first, using the context's locales; a
/// context without locales leaves existing localized fields as they are.
/// Query responses are expected to carry localized fields already.
///
/// Unresolved or malformed links never fail a pass.
#[instrument(skip_all, fields(synced = batch.is_synced(), items = batch.items().len()))]
pub fn resolve_batch(batch: &mut Batch, ctx: &ResolveContext) -> Result<ResolveStats> {
    let partition = partition(batch);
    debug!(
        assets = partition.asset_count(),
        entries = partition.entry_count(),
        "partitioned batch"
    );

    if let Batch::Synced(space) = batch {
        let localized = localize_all(space, ctx.locales());
        debug!(resources = localized, locales = ctx.locales().len(), "localized batch");
    }

    let mut resolver = LinkResolver::new(&partition, ctx.nullify_unresolved);
    for handle in partition.entries() {
        let mut entry = handle.write();
        resolver.resolve_entry(&mut entry);
    }
    let stats = resolver.stats();

    info!(
        entries = stats.entries,
        resolved = stats.resolved,
        unresolved = stats.unresolved,
        nullified = stats.nullified,
        "resolved batch"
    );

    Ok(stats)
}

/// Submit a pass over `batch` to the blocking worker pool.
///
/// The pass owns the batch and its mappings for its whole run; the resolved
/// batch is handed back through the join handle.
pub fn spawn_resolve(mut batch: Batch, ctx: ResolveContext) -> JoinHandle<Result<Resolved>> {
    tokio::task::spawn_blocking(move || {
        let stats = resolve_batch(&mut batch, &ctx)?;
        Ok(Resolved { batch, stats })
    })
}

/// Run a pass on the worker pool and wait for it.
pub async fn resolve(batch: Batch, ctx: ResolveContext) -> Result<Resolved> {
    spawn_resolve(batch, ctx).await?
}
