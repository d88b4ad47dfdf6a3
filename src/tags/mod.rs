//! Tag model
//!
//! A tag attached to a file is either a free-text [`Tag::Label`] or one of the
//! closed set of Finder-style color labels ([`Tag::Color`]). Classification is a
//! pure function of the raw text: the same string always yields the same variant.
//!
//! # Examples
//!
//! ```
//! use tagedit::tags::{Color, Tag, TagList};
//!
//! assert_eq!(Tag::classify(" red ").unwrap(), Tag::Color(Color::Red));
//! assert_eq!(Tag::classify("work").unwrap(), Tag::Label("work".into()));
//!
//! let list = TagList::from_raw(["Blue", "work", "red"]).unwrap().normalized();
//! assert_eq!(list.to_string(), "work, Red");
//! ```

pub mod list;
pub mod types;

pub use list::TagList;
pub use types::{Color, InvalidTagError, Tag};
