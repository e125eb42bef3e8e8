use std::sync::Arc;

use imgwrap_contracts::ResourceCache;
use imgwrap_model::{PresentationConfig, SourceId};

use crate::consumer::ImageConsumer;

/// Shared entry point handing out consumers bound to one resource cache.
///
/// Every consumer built here resolves sources through the same cache and
/// inherits the same default presentation tags.
#[derive(Debug)]
pub struct ImageManager<C: ResourceCache> {
    cache: Arc<C>,
    defaults: Arc<PresentationConfig>,
}

impl<C: ResourceCache> Clone for ImageManager<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            defaults: Arc::clone(&self.defaults),
        }
    }
}

impl<C: ResourceCache> ImageManager<C> {
    pub fn new(cache: C, defaults: PresentationConfig) -> Self {
        Self::from_shared(Arc::new(cache), Arc::new(defaults))
    }

    pub fn from_shared(cache: Arc<C>, defaults: Arc<PresentationConfig>) -> Self {
        Self { cache, defaults }
    }

    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    pub fn defaults(&self) -> &Arc<PresentationConfig> {
        &self.defaults
    }

    /// Swap the defaults for consumers created from now on. Existing
    /// consumers pick them up through [`ImageConsumer::set_defaults`].
    pub fn set_defaults(&mut self, defaults: PresentationConfig) {
        self.defaults = Arc::new(defaults);
    }

    pub fn consumer(&self) -> ImageConsumer<C> {
        ImageConsumer::new(Arc::clone(&self.cache), Arc::clone(&self.defaults))
    }

    pub fn consumer_for(&self, source: impl Into<SourceId>) -> ImageConsumer<C> {
        self.consumer().with_source(source)
    }
}

impl<C: ResourceCache + Default> Default for ImageManager<C> {
    fn default() -> Self {
        Self::new(C::default(), PresentationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryResourceCache;

    #[test]
    fn consumers_share_one_cache() {
        let manager = ImageManager::<MemoryResourceCache>::default();
        let first = manager.consumer_for("a.png");
        let second = manager.consumer_for("a.png");

        let (Some(a), Some(b)) = (first.resource(), second.resource()) else {
            panic!("both consumers should resolve a resource");
        };
        assert!(Arc::ptr_eq(a, b));
        assert_eq!(manager.cache().len(), 1);
    }

    #[test]
    fn new_consumers_inherit_current_defaults() {
        let mut manager = ImageManager::<MemoryResourceCache>::default();
        manager.set_defaults(PresentationConfig {
            pending: "busy".into(),
            ..PresentationConfig::default()
        });
        let consumer = manager.consumer_for("a.png");
        assert_eq!(consumer.presentation_tag(), Some("busy"));
    }
}
