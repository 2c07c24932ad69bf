//! Immutable text buffer values.
//!
//! A [`TextBuffer`] is a cheaply clonable handle to one immutable text
//! value. Editing never mutates: [`TextBuffer::replace`] derives a new
//! buffer whose segment map splices together shares of the base and patch
//! maps, so unmodified regions are referenced, not copied. Because every
//! buffer stays valid forever, an undo history is just a list of handles.
//!
//! Exactly two producers exist: a *literal* buffer wrapping one owned
//! storage block, and a *replacement* buffer expressing "base with a range
//! replaced by part of a patch". The representation is a closed enum;
//! splicing relies on knowing both.

use std::fmt;
use std::sync::Arc;

use crate::cursor::Cursor;
use crate::error::{Result, TextError};
use crate::segment::SegmentMap;

/// An immutable text value at one point in an edit history.
///
/// Cloning copies a reference-counted handle, not the text. Two handles are
/// *the same buffer* only if they originate from the same construction; see
/// [`TextBuffer::same_buffer`]. Content equality is a separate, O(length)
/// question.
#[derive(Clone)]
pub struct TextBuffer {
    inner: Arc<BufferInner>,
}

struct BufferInner {
    /// Total character count, fixed at construction.
    char_count: usize,
    /// The spliced segment map, computed once at construction.
    segments: SegmentMap,
    repr: Repr,
}

/// Closed set of buffer producers.
enum Repr {
    /// Owns one contiguous storage block.
    Literal { storage: Arc<str> },
    /// Base with `[cut_from, cut_to)` replaced by `patch[patch_from,
    /// patch_to)`. The handles keep both ancestors alive; the ancestry
    /// graph is a DAG pointing from newer buffers to older ones.
    Replacement {
        base: TextBuffer,
        patch: TextBuffer,
        cut_from: usize,
        cut_to: usize,
        patch_from: usize,
        patch_to: usize,
    },
}

impl TextBuffer {
    /// Create a buffer owning one contiguous block of storage.
    pub fn literal(text: &str) -> TextBuffer {
        let storage: Arc<str> = Arc::from(text);
        let char_count = text.chars().count();
        let segments = SegmentMap::from_storage(&storage);
        TextBuffer {
            inner: Arc::new(BufferInner {
                char_count,
                segments,
                repr: Repr::Literal { storage },
            }),
        }
    }

    /// Derive the buffer "self with `[cut_from, cut_to)` replaced by
    /// `patch[patch_from, patch_to)`".
    ///
    /// Fails with [`TextError::Range`] if either range is inverted or
    /// exceeds its buffer's length. On success the result's length is
    /// `self.len() - (cut_to - cut_from) + (patch_to - patch_from)` and its
    /// segment map shares every untouched segment with the ancestors; cost
    /// is proportional to the segments involved, not to text length.
    pub fn replace(
        &self,
        cut_from: usize,
        cut_to: usize,
        patch: &TextBuffer,
        patch_from: usize,
        patch_to: usize,
    ) -> Result<TextBuffer> {
        if cut_from > cut_to
            || cut_to > self.len()
            || patch_from > patch_to
            || patch_to > patch.len()
        {
            return Err(TextError::Range {
                cut_from,
                cut_to,
                base_len: self.len(),
                patch_from,
                patch_to,
                patch_len: patch.len(),
            });
        }

        let segments = SegmentMap::splice(
            self.segments(),
            cut_from,
            cut_to,
            patch.segments(),
            patch_from,
            patch_to,
        );
        let char_count = self.len() - (cut_to - cut_from) + (patch_to - patch_from);
        debug_assert_eq!(segments.len_chars(), char_count);

        Ok(TextBuffer {
            inner: Arc::new(BufferInner {
                char_count,
                segments,
                repr: Repr::Replacement {
                    base: self.clone(),
                    patch: patch.clone(),
                    cut_from,
                    cut_to,
                    patch_from,
                    patch_to,
                },
            }),
        })
    }

    /// Derive a buffer with `text` inserted at `offset`.
    pub fn insert(&self, offset: usize, text: &str) -> Result<TextBuffer> {
        let patch = TextBuffer::literal(text);
        let patch_len = patch.len();
        self.replace(offset, offset, &patch, 0, patch_len)
    }

    /// Derive a buffer with `[from, to)` deleted.
    pub fn delete(&self, from: usize, to: usize) -> Result<TextBuffer> {
        // An empty patch range contributes nothing; reuse self as the patch
        // to avoid allocating an empty literal.
        self.replace(from, to, self, 0, 0)
    }

    /// Derive a buffer with `[from, to)` replaced by `text`.
    pub fn splice_str(&self, from: usize, to: usize, text: &str) -> Result<TextBuffer> {
        let patch = TextBuffer::literal(text);
        let patch_len = patch.len();
        self.replace(from, to, &patch, 0, patch_len)
    }

    /// Derive a buffer holding only `[from, to)` of this buffer's content,
    /// still sharing the underlying storage.
    pub fn slice(&self, from: usize, to: usize) -> Result<TextBuffer> {
        TextBuffer::literal("").replace(0, 0, self, from, to)
    }

    /// Character count.
    pub fn len(&self) -> usize {
        self.inner.char_count
    }

    /// Whether the buffer holds no characters.
    pub fn is_empty(&self) -> bool {
        self.inner.char_count == 0
    }

    /// Character at `index`; fails with [`TextError::OutOfRange`] outside
    /// `[0, len)`. Resolution is a segment-map lookup, O(log segments) plus
    /// a scan within the located segment.
    pub fn char_at(&self, index: usize) -> Result<char> {
        self.inner
            .segments
            .char_at(index)
            .ok_or(TextError::OutOfRange {
                index: index as isize,
                length: self.len(),
            })
    }

    /// The buffer's segment map.
    pub fn segments(&self) -> &SegmentMap {
        &self.inner.segments
    }

    /// Number of segments backing this buffer. Grows with edit history;
    /// callers with long-lived documents can watch it and [`flatten`]
    /// when it gets large.
    ///
    /// [`flatten`]: TextBuffer::flatten
    pub fn segment_count(&self) -> usize {
        self.inner.segments.segment_count()
    }

    /// Iterate the buffer's characters in order. O(length) overall.
    pub fn chars(&self) -> impl Iterator<Item = char> {
        self.inner.segments.segments().flat_map(|s| s.text().chars())
    }

    /// Materialize as a fresh literal buffer with a single segment.
    ///
    /// Content-equal but not identity-equal to `self`: cursors tied to
    /// `self` do not transfer. Flattening bounds segment-map growth after
    /// long edit chains and releases the ancestors this buffer was keeping
    /// alive.
    pub fn flatten(&self) -> TextBuffer {
        let mut text = String::new();
        self.inner.segments.write_to(&mut text);
        TextBuffer::literal(&text)
    }

    /// Whether two handles denote the same buffer construction.
    ///
    /// Identity, not content: two buffers spelling the same text are still
    /// distinct targets for cursor arithmetic.
    pub fn same_buffer(a: &TextBuffer, b: &TextBuffer) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Cursor at index 0 (coincides with [`end`] on an empty buffer).
    ///
    /// [`end`]: TextBuffer::end
    pub fn begin(&self) -> Cursor {
        Cursor::new(self.clone(), 0)
    }

    /// Past-the-end cursor at index `len`.
    pub fn end(&self) -> Cursor {
        Cursor::new(self.clone(), self.len() as isize)
    }

    /// Cursor at an arbitrary index in `[-1, len]`; the sentinels `-1` and
    /// `len` are valid positions but not dereferenceable.
    pub fn cursor_at(&self, index: isize) -> Result<Cursor> {
        if index < -1 || index > self.len() as isize {
            return Err(TextError::OutOfRange {
                index,
                length: self.len(),
            });
        }
        Ok(Cursor::new(self.clone(), index))
    }

    /// Resolve `index` by offset arithmetic over the replacement zones
    /// (base prefix, patch middle, base postfix), recursing into ancestors
    /// and never consulting the cached segment map. Must agree with
    /// [`char_at`] everywhere; unit tests hold the two strategies to that.
    ///
    /// [`char_at`]: TextBuffer::char_at
    #[cfg_attr(not(test), allow(dead_code))]
    fn resolve_unspliced(&self, index: usize) -> Option<char> {
        match &self.inner.repr {
            Repr::Literal { storage } => storage.chars().nth(index),
            Repr::Replacement {
                base,
                patch,
                cut_from,
                cut_to,
                patch_from,
                patch_to,
            } => {
                let patch_len = patch_to - patch_from;
                if index < *cut_from {
                    base.resolve_unspliced(index)
                } else if index < cut_from + patch_len {
                    patch.resolve_unspliced(patch_from + (index - cut_from))
                } else {
                    base.resolve_unspliced(index - cut_from - patch_len + cut_to)
                }
            }
        }
    }
}

impl fmt::Display for TextBuffer {
    /// Linearize the buffer by walking its segments; the only place a flat
    /// rendition of the text is ever produced.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.inner.segments.segments() {
            f.write_str(segment.text())?;
        }
        Ok(())
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.inner.repr {
            Repr::Literal { .. } => "Literal",
            Repr::Replacement { .. } => "Replacement",
        };
        f.debug_struct("TextBuffer")
            .field("kind", &kind)
            .field("len", &self.len())
            .field("segments", &self.segment_count())
            .finish()
    }
}
