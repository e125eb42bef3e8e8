//! Clone-lease lifecycle for images rendered from a shared cache.
//!
//! Many on-screen consumers may render the same source. Instead of each one
//! fetching and decoding its own copy, every consumer resolves its source
//! through a [`ResourceCache`] and leases a disposable clone from the shared
//! resource:
//!
//! - [`lease::LeaseRegistry`] keeps at most one clone per consumer and
//!   returns each clone to its resource exactly once.
//! - [`status::resolve`] maps the resource status onto a presentation tag.
//! - [`consumer::ImageConsumer`] drives both from source changes,
//!   attach/detach and status updates.
//! - [`manager::ImageManager`] hands out consumers sharing one cache and one
//!   set of default tags.
//! - [`memory::MemoryResourceCache`] is an in-process cache whose statuses
//!   are set by the embedder.
//!
//! [`ResourceCache`]: imgwrap_contracts::ResourceCache
#![allow(missing_docs)]

pub mod consumer;
pub mod error;
pub mod lease;
pub mod manager;
pub mod memory;
pub mod status;

pub use consumer::{HandleOf, ImageConsumer, Phase};
pub use error::{ConsumerError, Result};
pub use lease::{Lease, LeaseRegistry};
pub use manager::ImageManager;
pub use memory::{MemoryClone, MemoryResource, MemoryResourceCache};

pub use imgwrap_contracts::{CachedResource, ResourceCache};
pub use imgwrap_model::{
    AttributeName, AttributeSet, PresentationConfig, PresentationOverrides,
    ResourceStatus, SourceId,
};
