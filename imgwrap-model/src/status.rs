use std::fmt::{self, Display};
use std::str::FromStr;

use crate::ModelError;

/// Load status of a shared cached resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResourceStatus {
    /// Fetch or decode still in flight.
    Pending,
    /// Loading failed; the resource has nothing to render.
    Error,
    /// Pixel data is available and clones can be produced.
    Ready,
}

impl ResourceStatus {
    pub const ALL: [ResourceStatus; 3] = [
        ResourceStatus::Pending,
        ResourceStatus::Error,
        ResourceStatus::Ready,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceStatus::Pending => "pending",
            ResourceStatus::Error => "error",
            ResourceStatus::Ready => "ready",
        }
    }

    /// Whether entering this status is announced to consumers.
    pub const fn is_settled(self) -> bool {
        matches!(self, ResourceStatus::Error | ResourceStatus::Ready)
    }
}

impl Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the canonical labels plus the `loading`/`success` spellings used
/// by older loaders. Anything else is a collaborator bug and is rejected.
impl FromStr for ResourceStatus {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" | "loading" => Ok(ResourceStatus::Pending),
            "error" => Ok(ResourceStatus::Error),
            "ready" | "success" => Ok(ResourceStatus::Ready),
            _ => Err(ModelError::UnknownStatus(raw.to_owned())),
        }
    }
}
