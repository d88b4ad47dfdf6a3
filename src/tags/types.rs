use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Raised when a raw tag token is empty after trimming
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid tag: {0:?} is empty")]
pub struct InvalidTagError(pub String);

/// Finder color labels, in label-code order
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Clear,
    Gray,
    Green,
    Purple,
    Blue,
    Yellow,
    Red,
    Orange,
}

impl Color {
    pub const ALL: [Self; 8] = [
        Self::Clear,
        Self::Gray,
        Self::Green,
        Self::Purple,
        Self::Blue,
        Self::Yellow,
        Self::Red,
        Self::Orange,
    ];

    /// Proper-case display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Gray => "Gray",
            Self::Green => "Green",
            Self::Purple => "Purple",
            Self::Blue => "Blue",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
            Self::Orange => "Orange",
        }
    }

    /// Numeric label code understood by the tag store
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Case-insensitive lookup by name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single tag: free text or a color label
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Label(String),
    Color(Color),
}

impl Tag {
    /// Classify a raw token.
    ///
    /// The token is trimmed; if what remains names a color (ignoring case) the
    /// result is [`Tag::Color`], otherwise a [`Tag::Label`] holding the trimmed
    /// text with its case preserved.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTagError` if the token is empty after trimming.
    pub fn classify(raw: &str) -> Result<Self, InvalidTagError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidTagError(raw.to_string()));
        }
        Ok(Color::from_name(trimmed).map_or_else(|| Self::Label(trimmed.to_string()), Self::Color))
    }

    /// Canonical display string, also used as the identity for diffing
    #[must_use]
    pub fn render(&self) -> &str {
        match self {
            Self::Label(text) => text,
            Self::Color(color) => color.name(),
        }
    }

    #[must_use]
    pub const fn is_color(&self) -> bool {
        matches!(self, Self::Color(_))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_color_any_case() {
        assert_eq!(Tag::classify("red").unwrap(), Tag::Color(Color::Red));
        assert_eq!(Tag::classify("ORANGE").unwrap(), Tag::Color(Color::Orange));
        assert_eq!(Tag::classify("  gRaY ").unwrap(), Tag::Color(Color::Gray));
    }

    #[test]
    fn test_classify_label_preserves_case() {
        assert_eq!(Tag::classify(" Work ").unwrap(), Tag::Label("Work".into()));
        assert_eq!(Tag::classify("reddish").unwrap(), Tag::Label("reddish".into()));
    }

    #[test]
    fn test_classify_empty_fails() {
        assert!(Tag::classify("").is_err());
        let err = Tag::classify("   ").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_render_color_is_proper_case() {
        let tag = Tag::classify("purple").unwrap();
        assert_eq!(tag.render(), "Purple");
        assert_eq!(tag.to_string(), "Purple");
        assert!(tag.is_color());
    }

    #[test]
    fn test_color_codes() {
        assert_eq!(Color::Clear.code(), 0);
        assert_eq!(Color::Red.code(), 6);
        assert_eq!(Color::Orange.code(), 7);
        for color in Color::ALL {
            assert_eq!(Color::from_code(color.code()), Some(color));
        }
        assert_eq!(Color::from_code(8), None);
    }

    #[test]
    fn test_classification_is_stable() {
        for raw in ["Blue", "blue", "work", "Clear"] {
            assert_eq!(Tag::classify(raw).unwrap(), Tag::classify(raw).unwrap());
        }
    }
}
