use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::ModelError;

/// The closed table of image attributes a consumer forwards to its clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AttributeName {
    Id,
    Title,
    Align,
    Alt,
    Border,
    Height,
    Hspace,
    Ismap,
    Longdesc,
    Name,
    Width,
    Usemap,
    Vspace,
}

impl AttributeName {
    pub const ALL: [AttributeName; 13] = [
        AttributeName::Id,
        AttributeName::Title,
        AttributeName::Align,
        AttributeName::Alt,
        AttributeName::Border,
        AttributeName::Height,
        AttributeName::Hspace,
        AttributeName::Ismap,
        AttributeName::Longdesc,
        AttributeName::Name,
        AttributeName::Width,
        AttributeName::Usemap,
        AttributeName::Vspace,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            AttributeName::Id => "id",
            AttributeName::Title => "title",
            AttributeName::Align => "align",
            AttributeName::Alt => "alt",
            AttributeName::Border => "border",
            AttributeName::Height => "height",
            AttributeName::Hspace => "hspace",
            AttributeName::Ismap => "ismap",
            AttributeName::Longdesc => "longdesc",
            AttributeName::Name => "name",
            AttributeName::Width => "width",
            AttributeName::Usemap => "usemap",
            AttributeName::Vspace => "vspace",
        }
    }
}

impl Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeName {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lowered = raw.trim().to_ascii_lowercase();
        AttributeName::ALL
            .into_iter()
            .find(|name| name.as_str() == lowered)
            .ok_or_else(|| ModelError::UnknownAttribute(raw.to_owned()))
    }
}

/// Attribute values supplied to a clone when it is created.
///
/// Iteration order follows [`AttributeName::ALL`], so the set renders the
/// same way regardless of write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AttributeSet {
    values: BTreeMap<AttributeName, String>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: AttributeName) -> Option<&str> {
        self.values.get(&name).map(String::as_str)
    }

    /// Stores `value`, returning the previous one.
    pub fn set(
        &mut self,
        name: AttributeName,
        value: impl Into<String>,
    ) -> Option<String> {
        self.values.insert(name, value.into())
    }

    pub fn remove(&mut self, name: AttributeName) -> Option<String> {
        self.values.remove(&name)
    }

    pub fn contains(&self, name: AttributeName) -> bool {
        self.values.contains_key(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeName, &str)> + '_ {
        self.values.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V: Into<String>> FromIterator<(AttributeName, V)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (AttributeName, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name, value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_labels() {
        for name in AttributeName::ALL {
            assert_eq!(name.as_str().parse::<AttributeName>(), Ok(name));
        }
        assert_eq!("LongDesc".parse(), Ok(AttributeName::Longdesc));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            "srcset".parse::<AttributeName>(),
            Err(ModelError::UnknownAttribute("srcset".into()))
        );
    }

    #[test]
    fn iteration_follows_table_order() {
        let mut set = AttributeSet::new();
        set.set(AttributeName::Width, "120");
        set.set(AttributeName::Alt, "logo");
        set.set(AttributeName::Id, "hero");

        let order: Vec<_> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(
            order,
            vec![AttributeName::Id, AttributeName::Alt, AttributeName::Width]
        );
    }

    #[test]
    fn set_returns_previous_value() {
        let mut set = AttributeSet::new();
        assert_eq!(set.set(AttributeName::Title, "a"), None);
        assert_eq!(set.set(AttributeName::Title, "b"), Some("a".into()));
        assert_eq!(set.get(AttributeName::Title), Some("b"));
        assert_eq!(set.remove(AttributeName::Title), Some("b".into()));
        assert!(set.is_empty());
    }
}
