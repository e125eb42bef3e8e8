//! Per-consumer bookkeeping of the clone currently leased from a resource.
//!
//! A [`LeaseRegistry`] holds at most one [`Lease`]. Every acquisition
//! releases the previous lease first, and dropping the registry releases
//! whatever is still held, so each clone handed out by a resource is given
//! back exactly once.

use std::fmt;
use std::sync::Arc;

use imgwrap_contracts::CachedResource;
use imgwrap_model::{AttributeName, AttributeSet};

/// The `(resource, clone)` pair a consumer currently holds.
pub struct Lease<R: CachedResource> {
    resource: Arc<R>,
    clone: R::Handle,
}

impl<R: CachedResource> Lease<R> {
    pub fn resource(&self) -> &Arc<R> {
        &self.resource
    }

    pub fn clone_handle(&self) -> &R::Handle {
        &self.clone
    }
}

impl<R: CachedResource> fmt::Debug for Lease<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lease")
            .field("source", self.resource.source())
            .finish_non_exhaustive()
    }
}

/// Exclusive lease slot plus the attribute values future clones start with.
pub struct LeaseRegistry<R: CachedResource> {
    lease: Option<Lease<R>>,
    attributes: AttributeSet,
}

impl<R: CachedResource> Default for LeaseRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CachedResource> LeaseRegistry<R> {
    pub fn new() -> Self {
        Self {
            lease: None,
            attributes: AttributeSet::new(),
        }
    }

    /// Lease a fresh clone from `resource`.
    ///
    /// Any held lease is released before the new clone is requested, even
    /// when the new request then fails. Returns `None` without touching the
    /// current lease when no resource is configured.
    pub fn acquire(&mut self, resource: Option<&Arc<R>>) -> Option<&R::Handle> {
        let resource = resource?;
        self.release();

        let Some(clone) = resource.create_clone(&self.attributes) else {
            log::debug!(
                "no clone available yet for {} ({})",
                resource.source(),
                resource.status()
            );
            return None;
        };

        log::debug!("leased clone of {}", resource.source());
        let lease = self.lease.insert(Lease {
            resource: Arc::clone(resource),
            clone,
        });
        Some(&lease.clone)
    }

    /// Give the held clone back to the resource that produced it.
    ///
    /// Safe to call at any time; returns whether a clone was released.
    pub fn release(&mut self) -> bool {
        let Some(Lease { resource, clone }) = self.lease.take() else {
            log::trace!("release with no active lease");
            return false;
        };
        resource.release_clone(clone);
        log::debug!("released clone of {}", resource.source());
        true
    }

    /// Store an attribute value and push it to the held clone, if any.
    pub fn set_attribute(&mut self, name: AttributeName, value: impl Into<String>) {
        let value = value.into();
        if let Some(lease) = &self.lease {
            log::trace!("forwarding {name}={value:?} to {}", lease.resource.source());
            lease
                .resource
                .set_clone_attribute(&lease.clone, name, &value);
        }
        self.attributes.set(name, value);
    }

    /// Clear an attribute value and remove it from the held clone, if any.
    pub fn remove_attribute(&mut self, name: AttributeName) {
        if self.attributes.remove(name).is_none() {
            return;
        }
        if let Some(lease) = &self.lease {
            log::trace!("clearing {name} on {}", lease.resource.source());
            lease.resource.remove_clone_attribute(&lease.clone, name);
        }
    }

    pub fn attribute(&self, name: AttributeName) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn lease(&self) -> Option<&Lease<R>> {
        self.lease.as_ref()
    }

    pub fn clone_handle(&self) -> Option<&R::Handle> {
        self.lease.as_ref().map(Lease::clone_handle)
    }

    pub fn is_leased(&self) -> bool {
        self.lease.is_some()
    }

    /// Whether the held clone came from this exact resource instance.
    pub fn holds(&self, resource: &Arc<R>) -> bool {
        self.lease
            .as_ref()
            .is_some_and(|lease| Arc::ptr_eq(&lease.resource, resource))
    }
}

impl<R: CachedResource> Drop for LeaseRegistry<R> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<R: CachedResource> fmt::Debug for LeaseRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeaseRegistry")
            .field("lease", &self.lease)
            .field("attributes", &self.attributes)
            .finish()
    }
}
