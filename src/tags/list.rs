use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::types::{Color, InvalidTagError, Tag};

/// Ordered tags attached to one file
///
/// Order is kept for display but carries no weight when comparing lists; see
/// [`TagList::same_tags`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList(Vec<Tag>);

impl TagList {
    #[must_use]
    pub const fn new(tags: Vec<Tag>) -> Self {
        Self(tags)
    }

    /// Classify every raw token, in order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTagError` for the first token that is empty after trimming.
    pub fn from_raw<I, S>(tokens: I) -> Result<Self, InvalidTagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|t| Tag::classify(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Rendered strings in list order
    #[must_use]
    pub fn rendered(&self) -> Vec<&str> {
        self.0.iter().map(Tag::render).collect()
    }

    #[must_use]
    pub fn rendered_set(&self) -> HashSet<&str> {
        self.0.iter().map(Tag::render).collect()
    }

    /// Set equality on rendered strings: order and duplicates are ignored
    #[must_use]
    pub fn same_tags(&self, other: &Self) -> bool {
        self.rendered_set() == other.rendered_set()
    }

    /// The color the store would show: the last color in the list
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.0.iter().rev().find_map(|t| match t {
            Tag::Color(c) => Some(*c),
            Tag::Label(_) => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|t| match t {
            Tag::Label(l) => Some(l.as_str()),
            Tag::Color(_) => None,
        })
    }

    /// Collapse the list into what a store can hold.
    ///
    /// Duplicate labels keep their first position. Of several colors only the
    /// last one survives, at its own position.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let last_color = self.0.iter().rposition(Tag::is_color);
        let mut seen = HashSet::new();
        let tags = self
            .0
            .iter()
            .enumerate()
            .filter(|(i, tag)| !tag.is_color() || Some(*i) == last_color)
            .filter(|(_, tag)| seen.insert(tag.render().to_string()))
            .map(|(_, tag)| tag.clone())
            .collect();
        Self(tags)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Tag] {
        &self.0
    }
}

impl From<Vec<Tag>> for TagList {
    fn from(tags: Vec<Tag>) -> Self {
        Self(tags)
    }
}

impl FromIterator<Tag> for TagList {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders as `a, b, c`
impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered().join(", "))
    }
}
