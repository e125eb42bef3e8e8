use std::sync::Arc;

use imgwrap_model::SourceId;

use crate::CachedResource;

/// Resolves source ids to shared cached resources.
///
/// `lookup` must be idempotent: asking twice for the same id returns the
/// same shared instance, so concurrent renders of one image share one fetch.
pub trait ResourceCache {
    /// Shared resource type handed out by this cache.
    type Resource: CachedResource;

    /// Resolve `source`, creating (and starting to load) the resource on
    /// first use.
    fn lookup(&self, source: &SourceId) -> Arc<Self::Resource>;
}

