//! The on-screen image consumer.
//!
//! A consumer never owns pixels. It resolves its source id to a shared
//! resource, leases one clone from it while attached, and mirrors the
//! resource status into a presentation tag and `on_error`/`on_success`
//! notifications.
//!
//! Lifecycle: `Unattached -> Attached -> TornDown`. Teardown is terminal and
//! releases the lease exactly once, either through [`ImageConsumer::detach`]
//! or on drop.

use std::fmt;
use std::sync::Arc;

use imgwrap_contracts::{CachedResource, ResourceCache};
use imgwrap_model::{
    AttributeName, AttributeSet, PresentationConfig, PresentationOverrides,
    ResourceStatus, SourceId,
};

use crate::error::{ConsumerError, Result};
use crate::lease::LeaseRegistry;
use crate::status;

/// Clone handle type produced by the resources of cache `C`.
pub type HandleOf<C> =
    <<C as ResourceCache>::Resource as CachedResource>::Handle;

type InsertHook<C> = Box<dyn FnMut(&HandleOf<C>)>;
type StatusHook = Box<dyn FnMut(&SourceId)>;

/// Where a consumer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unattached,
    Attached,
    TornDown,
}

/// Binds one rendering slot to the shared resource for its source id.
pub struct ImageConsumer<C: ResourceCache> {
    cache: Arc<C>,
    defaults: Arc<PresentationConfig>,
    overrides: PresentationOverrides,
    presentation: PresentationConfig,
    source: Option<SourceId>,
    resource: Option<Arc<C::Resource>>,
    observed: Option<ResourceStatus>,
    tag: Option<String>,
    leases: LeaseRegistry<C::Resource>,
    phase: Phase,
    on_insert: Option<InsertHook<C>>,
    on_error: Option<StatusHook>,
    on_success: Option<StatusHook>,
}

impl<C: ResourceCache> ImageConsumer<C> {
    pub fn new(cache: Arc<C>, defaults: Arc<PresentationConfig>) -> Self {
        let presentation = (*defaults).clone();
        Self {
            cache,
            defaults,
            overrides: PresentationOverrides::default(),
            presentation,
            source: None,
            resource: None,
            observed: None,
            tag: None,
            leases: LeaseRegistry::new(),
            phase: Phase::Unattached,
            on_insert: None,
            on_error: None,
            on_success: None,
        }
    }

    /// Called with every clone leased while attached, for insertion into
    /// the presentation tree.
    pub fn on_insert(mut self, hook: impl FnMut(&HandleOf<C>) + 'static) -> Self {
        self.on_insert = Some(Box::new(hook));
        self
    }

    /// Called once each time the resource enters [`ResourceStatus::Error`].
    pub fn on_error(mut self, hook: impl FnMut(&SourceId) + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    /// Called once each time the resource enters [`ResourceStatus::Ready`].
    pub fn on_success(mut self, hook: impl FnMut(&SourceId) + 'static) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    /// Set the source after the hooks, or the first notification is missed.
    pub fn with_source(mut self, source: impl Into<SourceId>) -> Self {
        self.set_source(Some(source.into()));
        self
    }

    pub fn with_attribute(
        mut self,
        name: AttributeName,
        value: impl Into<String>,
    ) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Point the consumer at another image.
    ///
    /// Blank ids count as no source. While attached, the old clone is
    /// released before a clone of the new resource is requested. Ignored
    /// once the consumer is torn down.
    pub fn set_source(&mut self, source: Option<SourceId>) {
        if self.phase == Phase::TornDown {
            log::trace!("source change on torn down consumer ignored");
            return;
        }
        let source = source.filter(|source| !source.is_blank());
        if source == self.source {
            return;
        }

        log::debug!(
            "image source {} -> {}",
            display_source(self.source.as_ref()),
            display_source(source.as_ref())
        );
        self.resource = source.as_ref().map(|source| self.cache.lookup(source));
        self.source = source;
        self.observed = None;
        self.recompute_tag();

        if self.phase == Phase::Attached {
            self.insert_clone();
        }
        self.observe_status();
    }

    /// Enter the presentation tree and lease a clone.
    ///
    /// Attaching again while attached only re-acquires when no clone of the
    /// current resource is held.
    pub fn attach(&mut self) -> Result<()> {
        match self.phase {
            Phase::TornDown => {
                log::warn!(
                    "attach on torn down consumer for {}",
                    display_source(self.source.as_ref())
                );
                return Err(ConsumerError::TornDown {
                    image: self.source.as_ref().map(|s| s.to_string()),
                });
            }
            Phase::Unattached => {
                self.phase = Phase::Attached;
                self.insert_clone();
            }
            Phase::Attached => {
                let current = match &self.resource {
                    Some(resource) => self.leases.holds(resource),
                    None => !self.leases.is_leased(),
                };
                if !current {
                    self.insert_clone();
                }
            }
        }
        Ok(())
    }

    /// Leave the presentation tree for good and release the lease.
    ///
    /// Runs once; later calls are no-ops.
    pub fn detach(&mut self) {
        if self.phase == Phase::TornDown {
            log::trace!("detach on already torn down consumer");
            return;
        }
        self.phase = Phase::TornDown;
        self.leases.release();
        log::debug!(
            "image consumer for {} torn down",
            display_source(self.source.as_ref())
        );
    }

    /// React to a status change reported by the current resource.
    pub fn sync_status(&mut self) {
        if self.phase == Phase::TornDown {
            log::trace!("status sync on torn down consumer ignored");
            return;
        }
        self.observe_status();
    }

    pub fn set_attribute(&mut self, name: AttributeName, value: impl Into<String>) {
        self.leases.set_attribute(name, value);
    }

    pub fn remove_attribute(&mut self, name: AttributeName) {
        self.leases.remove_attribute(name);
    }

    pub fn attribute(&self, name: AttributeName) -> Option<&str> {
        self.leases.attribute(name)
    }

    pub fn attributes(&self) -> &AttributeSet {
        self.leases.attributes()
    }

    /// Override the tag for one status; `None` falls back to the defaults.
    pub fn set_presentation_tag(
        &mut self,
        status: ResourceStatus,
        tag: Option<String>,
    ) {
        if self.overrides.set(status, tag) {
            self.presentation = self.overrides.resolve_against(&self.defaults);
            self.recompute_tag();
        }
    }

    /// Replace the manager-level defaults the overrides are layered on.
    pub fn set_defaults(&mut self, defaults: Arc<PresentationConfig>) {
        self.defaults = defaults;
        self.presentation = self.overrides.resolve_against(&self.defaults);
        self.recompute_tag();
    }

    /// Effective status-to-tag bindings for this consumer.
    pub fn presentation(&self) -> &PresentationConfig {
        &self.presentation
    }

    pub fn presentation_tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Last status observed on the current resource.
    pub fn status(&self) -> Option<ResourceStatus> {
        self.observed
    }

    pub fn source(&self) -> Option<&SourceId> {
        self.source.as_ref()
    }

    pub fn resource(&self) -> Option<&Arc<C::Resource>> {
        self.resource.as_ref()
    }

    pub fn current_clone(&self) -> Option<&HandleOf<C>> {
        self.leases.clone_handle()
    }

    pub fn is_leased(&self) -> bool {
        self.leases.is_leased()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_attached(&self) -> bool {
        self.phase == Phase::Attached
    }

    pub fn is_torn_down(&self) -> bool {
        self.phase == Phase::TornDown
    }

    fn insert_clone(&mut self) {
        let Some(resource) = self.resource.as_ref() else {
            self.leases.release();
            return;
        };
        if let Some(clone) = self.leases.acquire(Some(resource))
            && let Some(hook) = self.on_insert.as_mut()
        {
            hook(clone);
        }
    }

    fn observe_status(&mut self) {
        let Some(resource) = self.resource.clone() else {
            return;
        };
        let status = resource.status();
        let previous = self.observed.replace(status);
        if previous == Some(status) {
            return;
        }

        log::debug!(
            "{} observed {} -> {status}",
            resource.source(),
            previous.map_or("none", ResourceStatus::as_str)
        );
        self.recompute_tag();

        // Retry a clone that could not be produced earlier. The first
        // observation follows an acquire that already ran.
        if previous.is_some()
            && self.phase == Phase::Attached
            && !self.leases.is_leased()
        {
            self.insert_clone();
        }

        if !status.is_settled() {
            return;
        }
        let hook = match status {
            ResourceStatus::Error => self.on_error.as_mut(),
            _ => self.on_success.as_mut(),
        };
        if let Some(hook) = hook {
            hook(resource.source());
        }
    }

    fn recompute_tag(&mut self) {
        self.tag = status::resolve(self.resource.as_deref(), &self.presentation)
            .map(str::to_owned);
    }
}

impl<C: ResourceCache> Drop for ImageConsumer<C> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<C: ResourceCache> fmt::Debug for ImageConsumer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageConsumer")
            .field("source", &self.source)
            .field("phase", &self.phase)
            .field("observed", &self.observed)
            .field("tag", &self.tag)
            .field("leases", &self.leases)
            .finish_non_exhaustive()
    }
}

fn display_source(source: Option<&SourceId>) -> &str {
    source.map_or("<none>", SourceId::as_str)
}
