#![warn(missing_docs)]
//! Persistent Text - Immutable, Structurally-Shared Text Buffers
//!
//! # Overview
//!
//! `persistent-text` is the text-representation core of an editor: an immutable buffer value
//! where every edit derives a new buffer that shares unmodified regions with its predecessor
//! instead of copying the whole string. The edit history is simply the chain of these values,
//! which makes undo/redo storage-free.
//!
//! # Core Features
//!
//! - **Structural Sharing**: edits splice segment references, never characters
//! - **Storage-Free Undo**: earlier versions stay alive as plain values
//! - **Bounded Edit Cost**: splicing is proportional to affected segments, not text length
//! - **Cross-Buffer Safety**: cursor arithmetic between unrelated buffers fails loudly
//! - **Unicode Correct**: all indices are character (Unicode scalar value) offsets over UTF-8 storage
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  History (undo/redo as version navigation)  │  ← Usage Pattern
//! ├─────────────────────────────────────────────┤
//! │  Cursor (random access + identity checks)   │  ← Traversal
//! ├─────────────────────────────────────────────┤
//! │  TextBuffer (literal / replacement values)  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  SegmentMap (splicing, shared Arc<str>)     │  ← Representation
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Editing by replacement
//!
//! ```rust
//! use persistent_text::TextBuffer;
//!
//! let base = TextBuffer::literal("hello world");
//! let patch = TextBuffer::literal("there");
//!
//! // Replace [6, 11) of the base with [0, 5) of the patch.
//! let edited = base.replace(6, 11, &patch, 0, 5).unwrap();
//! assert_eq!(edited.to_string(), "hello there");
//!
//! // The base is a value; it did not change.
//! assert_eq!(base.to_string(), "hello world");
//! ```
//!
//! ## Undo/redo as navigation
//!
//! ```rust
//! use persistent_text::{History, TextBuffer};
//!
//! let mut history = History::new(TextBuffer::literal("hello world"));
//! let edited = history.current().splice_str(6, 11, "there").unwrap();
//! history.push(edited);
//!
//! assert_eq!(history.current().to_string(), "hello there");
//! assert_eq!(history.undo().unwrap().to_string(), "hello world");
//! assert_eq!(history.redo().unwrap().to_string(), "hello there");
//! ```
//!
//! # Concurrency
//!
//! Buffers are immutable after construction and all state sits behind `Arc`, so any number of
//! threads may read the same buffer, and new buffers may be derived concurrently from shared
//! ancestors without synchronization.
//!
//! # Module Description
//!
//! - [`segment`] - Segment map representation and the splicing algorithm
//! - [`buffer`] - Literal and replacement buffer values
//! - [`cursor`] - Random-access cursor with cross-buffer identity checks
//! - [`history`] - Undo/redo as navigation over buffer versions
//! - [`error`] - Error types

pub mod buffer;
pub mod cursor;
pub mod error;
pub mod history;
pub mod segment;

pub use buffer::TextBuffer;
pub use cursor::Cursor;
pub use error::{Result, TextError};
pub use history::History;
pub use segment::{Segment, SegmentMap};
