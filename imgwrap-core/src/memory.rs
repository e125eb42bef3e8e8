//! In-process resource cache with no fetch pipeline of its own.
//!
//! Statuses are driven by whoever owns the cache (a loader task, a test),
//! through [`MemoryResource::set_status`]. The cache tracks every live
//! clone so embedders can see that leases are paired with releases.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use imgwrap_contracts::{CachedResource, ResourceCache};
use imgwrap_model::{AttributeName, AttributeSet, ResourceStatus, SourceId};
use parking_lot::Mutex;
use uuid::Uuid;

/// Render handle produced by a [`MemoryResource`].
///
/// Deliberately not `Clone`: one handle, one owner.
#[derive(Debug, PartialEq, Eq)]
pub struct MemoryClone {
    pub id: Uuid,
    pub source: SourceId,
}

/// Lifetime counters for one resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryResourceStats {
    pub created: u64,
    pub released: u64,
    pub live: usize,
}

#[derive(Debug)]
struct MemoryState {
    status: ResourceStatus,
    clones: HashMap<Uuid, AttributeSet>,
    created: u64,
    released: u64,
}

/// A shared image entry whose status is set from outside.
#[derive(Debug)]
pub struct MemoryResource {
    source: SourceId,
    state: Mutex<MemoryState>,
}

impl MemoryResource {
    pub fn new(source: SourceId) -> Self {
        Self {
            source,
            state: Mutex::new(MemoryState {
                status: ResourceStatus::Pending,
                clones: HashMap::new(),
                created: 0,
                released: 0,
            }),
        }
    }

    /// Returns the previous status.
    pub fn set_status(&self, status: ResourceStatus) -> ResourceStatus {
        let mut state = self.state.lock();
        let previous = std::mem::replace(&mut state.status, status);
        if previous != status {
            log::debug!("{} status {previous} -> {status}", self.source);
        }
        previous
    }

    pub fn live_clones(&self) -> usize {
        self.state.lock().clones.len()
    }

    /// Attributes currently applied to a live clone.
    pub fn clone_attributes(&self, clone: &MemoryClone) -> Option<AttributeSet> {
        self.clone_attributes_by_id(clone.id)
    }

    pub fn clone_attributes_by_id(&self, id: Uuid) -> Option<AttributeSet> {
        self.state.lock().clones.get(&id).cloned()
    }

    pub fn stats(&self) -> MemoryResourceStats {
        let state = self.state.lock();
        MemoryResourceStats {
            created: state.created,
            released: state.released,
            live: state.clones.len(),
        }
    }
}

impl CachedResource for MemoryResource {
    type Handle = MemoryClone;

    fn source(&self) -> &SourceId {
        &self.source
    }

    fn status(&self) -> ResourceStatus {
        self.state.lock().status
    }

    fn create_clone(&self, attributes: &AttributeSet) -> Option<MemoryClone> {
        let mut state = self.state.lock();
        if state.status != ResourceStatus::Ready {
            return None;
        }

        let id = Uuid::now_v7();
        state.clones.insert(id, attributes.clone());
        state.created += 1;
        log::trace!(
            "{} created clone {id} ({} live)",
            self.source,
            state.clones.len()
        );

        Some(MemoryClone {
            id,
            source: self.source.clone(),
        })
    }

    fn release_clone(&self, clone: MemoryClone) {
        debug_assert_eq!(
            clone.source, self.source,
            "clone released to a resource that did not create it"
        );

        let mut state = self.state.lock();
        if state.clones.remove(&clone.id).is_none() {
            log::warn!("{} asked to release unknown clone {}", self.source, clone.id);
            return;
        }
        state.released += 1;
        log::trace!(
            "{} released clone {} ({} live)",
            self.source,
            clone.id,
            state.clones.len()
        );
    }

    fn set_clone_attribute(
        &self,
        clone: &MemoryClone,
        name: AttributeName,
        value: &str,
    ) {
        if let Some(attributes) = self.state.lock().clones.get_mut(&clone.id) {
            attributes.set(name, value);
        }
    }

    fn remove_clone_attribute(&self, clone: &MemoryClone, name: AttributeName) {
        if let Some(attributes) = self.state.lock().clones.get_mut(&clone.id) {
            attributes.remove(name);
        }
    }
}

/// Deduplicating map from source id to shared [`MemoryResource`].
#[derive(Debug, Default)]
pub struct MemoryResourceCache {
    resources: DashMap<SourceId, Arc<MemoryResource>>,
}

impl MemoryResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resource for `source` if it has been looked up before.
    pub fn get(&self, source: &SourceId) -> Option<Arc<MemoryResource>> {
        self.resources.get(source).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Drop resources nobody references and no clone is leased from.
    /// Returns how many were evicted.
    pub fn evict_unused(&self) -> usize {
        let before = self.resources.len();
        self.resources.retain(|_, resource| {
            Arc::strong_count(resource) > 1 || resource.live_clones() > 0
        });
        let evicted = before - self.resources.len();
        if evicted > 0 {
            log::debug!("evicted {evicted} unused image resources");
        }
        evicted
    }
}

impl ResourceCache for MemoryResourceCache {
    type Resource = MemoryResource;

    fn lookup(&self, source: &SourceId) -> Arc<MemoryResource> {
        let entry = self.resources.entry(source.clone()).or_insert_with(|| {
            log::debug!("caching new image resource {source}");
            Arc::new(MemoryResource::new(source.clone()))
        });
        Arc::clone(entry.value())
    }
}
