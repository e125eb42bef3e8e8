//! Trait surfaces describing the collaborators of the imgwrap core.
//!
//! The core never fetches or decodes pixels. It resolves a [`SourceId`]
//! through a [`ResourceCache`], then leases per-consumer clones from the
//! shared [`CachedResource`] it gets back.
//!
//! [`SourceId`]: imgwrap_model::SourceId

pub mod cache;
pub mod resource;

pub use cache::ResourceCache;
pub use resource::CachedResource;
