//! Core data model definitions shared across imgwrap crates.
#![allow(missing_docs)]

pub mod attributes;
pub mod error;
pub mod presentation;
pub mod source;
pub mod status;

pub use attributes::{AttributeName, AttributeSet};
pub use error::ModelError;
pub use presentation::{PresentationConfig, PresentationOverrides};
pub use source::SourceId;
pub use status::ResourceStatus;
