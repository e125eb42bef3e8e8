use crate::ResourceStatus;

pub const DEFAULT_PENDING_TAG: &str = "img-loading";
pub const DEFAULT_ERROR_TAG: &str = "img-error";
pub const DEFAULT_READY_TAG: &str = "img-success";

/// Presentation tag bound to each resource status.
///
/// Tags are opaque to imgwrap; the presentation layer typically uses them as
/// style classes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PresentationConfig {
    pub pending: String,
    pub error: String,
    pub ready: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            pending: DEFAULT_PENDING_TAG.to_owned(),
            error: DEFAULT_ERROR_TAG.to_owned(),
            ready: DEFAULT_READY_TAG.to_owned(),
        }
    }
}

impl PresentationConfig {
    pub fn tag_for(&self, status: ResourceStatus) -> &str {
        match status {
            ResourceStatus::Pending => &self.pending,
            ResourceStatus::Error => &self.error,
            ResourceStatus::Ready => &self.ready,
        }
    }

    pub fn tag_mut(&mut self, status: ResourceStatus) -> &mut String {
        match status {
            ResourceStatus::Pending => &mut self.pending,
            ResourceStatus::Error => &mut self.error,
            ResourceStatus::Ready => &mut self.ready,
        }
    }
}

/// Per-consumer tag overrides layered over the manager defaults.
///
/// An unset entry follows the defaults; a set entry wins and never flows
/// back into them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PresentationOverrides {
    pub pending: Option<String>,
    pub error: Option<String>,
    pub ready: Option<String>,
}

impl PresentationOverrides {
    pub fn get(&self, status: ResourceStatus) -> Option<&str> {
        match status {
            ResourceStatus::Pending => self.pending.as_deref(),
            ResourceStatus::Error => self.error.as_deref(),
            ResourceStatus::Ready => self.ready.as_deref(),
        }
    }

    /// Sets or clears the override, returning whether it changed.
    pub fn set(&mut self, status: ResourceStatus, tag: Option<String>) -> bool {
        let slot = match status {
            ResourceStatus::Pending => &mut self.pending,
            ResourceStatus::Error => &mut self.error,
            ResourceStatus::Ready => &mut self.ready,
        };
        if *slot == tag {
            return false;
        }
        *slot = tag;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none() && self.error.is_none() && self.ready.is_none()
    }

    pub fn resolve_against(
        &self,
        defaults: &PresentationConfig,
    ) -> PresentationConfig {
        let mut effective = defaults.clone();
        for status in ResourceStatus::ALL {
            if let Some(tag) = self.get(status) {
                *effective.tag_mut(status) = tag.to_owned();
            }
        }
        effective
    }
}
