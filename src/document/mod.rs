//! The editable document
//!
//! One line per path, `PATH [TAG, TAG, ...]`. This is both what the serializer
//! writes and what the parser reads back, so the two live together here.
//!
//! ```text
//! photos [Blue, travel]
//! photos/rome.jpg [travel, 2019]
//! notes.md []
//! ```
//!
//! Nothing is escaped: a path or tag containing `[`, `]` or a line break does
//! not survive the round trip.

pub mod parse;
pub mod serialize;

pub use parse::{EditLine, parse};
pub use serialize::{display_path, serialize};
