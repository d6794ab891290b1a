//! Ladle: cursor hydration for Rust.
//!
//! Walk forward-only cursors over one or more result sets and materialize
//! their records into typed objects and collections.
//!
//! ```rust
//! use ladle::{CursorExt, Hydrator, MemoryCursor, ResultSet};
//!
//! #[derive(Hydrator, Default, Debug, PartialEq)]
//! struct Tag {
//!     id: i64,
//!     name: String,
//! }
//!
//! let mut cursor = MemoryCursor::new([ResultSet::new(["id", "name"])
//!     .with_row([1.into(), "rust".into()])
//!     .with_row([2.into(), "sql".into()])]);
//! let tags = cursor.fill_collection::<Tag>(true).unwrap();
//! assert_eq!(tags.len(), 2);
//! assert_eq!(tags[1].name, "sql");
//! ```
pub use ladle_core::*;
pub use ladle_macros::*;
