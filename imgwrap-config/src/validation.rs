//! Guard rails for manager configuration values

use imgwrap_model::ResourceStatus;

use crate::models::ManagerConfig;

/// Configuration that cannot be used as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigGuardRailError {
    #[error("presentation tag for {status} is empty")]
    EmptyTag { status: ResourceStatus },

    #[error("presentation tag for {status} contains whitespace: {tag:?}")]
    WhitespaceInTag { status: ResourceStatus, tag: String },
}

/// Configuration that works but is probably not what was meant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    SharedTag {
        tag: String,
        first: ResourceStatus,
        second: ResourceStatus,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::SharedTag { tag, first, second } => write!(
                f,
                "{first} and {second} share the tag {tag:?}; the two states will look identical"
            ),
        }
    }
}

pub type ConfigWarnings = Vec<ConfigWarning>;

impl ManagerConfig {
    /// Check tags before building a manager. Errors block use, warnings are
    /// logged and returned.
    pub fn validate(&self) -> Result<ConfigWarnings, ConfigGuardRailError> {
        let presentation = &self.presentation;
        for status in ResourceStatus::ALL {
            let tag = presentation.tag_for(status);
            if tag.trim().is_empty() {
                return Err(ConfigGuardRailError::EmptyTag { status });
            }
            if tag.chars().any(char::is_whitespace) {
                return Err(ConfigGuardRailError::WhitespaceInTag {
                    status,
                    tag: tag.to_owned(),
                });
            }
        }

        let mut warnings = ConfigWarnings::new();
        for (index, first) in ResourceStatus::ALL.iter().enumerate() {
            for second in &ResourceStatus::ALL[index + 1..] {
                let tag = presentation.tag_for(*first);
                if tag == presentation.tag_for(*second) {
                    let warning = ConfigWarning::SharedTag {
                        tag: tag.to_owned(),
                        first: *first,
                        second: *second,
                    };
                    tracing::warn!("{warning}");
                    warnings.push(warning);
                }
            }
        }
        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgwrap_model::PresentationConfig;

    fn config(pending: &str, error: &str, ready: &str) -> ManagerConfig {
        ManagerConfig {
            presentation: PresentationConfig {
                pending: pending.into(),
                error: error.into(),
                ready: ready.into(),
            },
        }
    }

    #[test]
    fn defaults_are_clean() {
        assert_eq!(ManagerConfig::default().validate(), Ok(Vec::new()));
    }

    #[test]
    fn empty_tags_are_rejected() {
        assert_eq!(
            config("loading", " ", "ok").validate(),
            Err(ConfigGuardRailError::EmptyTag {
                status: ResourceStatus::Error
            })
        );
    }

    #[test]
    fn tags_must_be_single_tokens() {
        assert!(matches!(
            config("is loading", "err", "ok").validate(),
            Err(ConfigGuardRailError::WhitespaceInTag { .. })
        ));
    }

    #[test]
    fn shared_tags_warn() {
        let warnings = config("busy", "busy", "ok").validate().unwrap();
        assert_eq!(
            warnings,
            vec![ConfigWarning::SharedTag {
                tag: "busy".into(),
                first: ResourceStatus::Pending,
                second: ResourceStatus::Error,
            }]
        );
    }
}
