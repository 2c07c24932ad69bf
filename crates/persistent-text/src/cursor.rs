//! Random-access cursor over a text buffer.
//!
//! A [`Cursor`] is a (buffer handle, index) pair and nothing more. All
//! comparison and distance logic is plain integer arithmetic guarded by a
//! buffer-identity check: cursors from two distinct buffer values are never
//! comparable, even when the buffers happen to spell the same text. That
//! check catches the natural bug of comparing a cursor taken from a
//! pre-edit buffer against one taken from its successor.

use std::cmp::Ordering;
use std::fmt;

use crate::buffer::TextBuffer;
use crate::error::{Result, TextError};

/// A random-access position over one specific buffer value.
///
/// The index ranges over `[-1, len]`: `-1` is the reverse-end sentinel and
/// `len` the forward-end sentinel; both are valid positions but cannot be
/// dereferenced. The cursor holds a handle to its buffer, so the buffer
/// outlives it by construction.
#[derive(Clone)]
pub struct Cursor {
    buffer: TextBuffer,
    index: isize,
}

impl Cursor {
    pub(crate) fn new(buffer: TextBuffer, index: isize) -> Self {
        debug_assert!(index >= -1 && index <= buffer.len() as isize);
        Self { buffer, index }
    }

    /// The buffer this cursor is tied to.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The current index, possibly a sentinel.
    pub fn index(&self) -> isize {
        self.index
    }

    /// Whether the cursor sits at index 0.
    pub fn is_begin(&self) -> bool {
        self.index == 0
    }

    /// Whether the cursor sits at the forward-end sentinel.
    pub fn is_end(&self) -> bool {
        self.index == self.buffer.len() as isize
    }

    /// The character under the cursor; fails with
    /// [`TextError::OutOfRange`] at either sentinel.
    pub fn get(&self) -> Result<char> {
        if self.index < 0 || self.index >= self.buffer.len() as isize {
            return Err(TextError::OutOfRange {
                index: self.index,
                length: self.buffer.len(),
            });
        }
        self.buffer.char_at(self.index as usize)
    }

    /// Move by `delta`. Fails, leaving the cursor unchanged, if the target
    /// index would leave `[-1, len]`.
    pub fn advance(&mut self, delta: isize) -> Result<()> {
        let target = self.index.saturating_add(delta);
        if target < -1 || target > self.buffer.len() as isize {
            return Err(TextError::OutOfRange {
                index: target,
                length: self.buffer.len(),
            });
        }
        self.index = target;
        Ok(())
    }

    /// Move one position forward.
    pub fn step_forward(&mut self) -> Result<()> {
        self.advance(1)
    }

    /// Move one position backward.
    pub fn step_back(&mut self) -> Result<()> {
        self.advance(-1)
    }

    /// Consuming variant of [`advance`], convenient for chaining.
    ///
    /// [`advance`]: Cursor::advance
    pub fn seek(mut self, delta: isize) -> Result<Cursor> {
        self.advance(delta)?;
        Ok(self)
    }

    fn check_same_buffer(&self, other: &Cursor) -> Result<()> {
        if TextBuffer::same_buffer(&self.buffer, &other.buffer) {
            Ok(())
        } else {
            Err(TextError::CrossBufferMismatch)
        }
    }

    /// Signed distance `self.index() - other.index()`; fails with
    /// [`TextError::CrossBufferMismatch`] when the cursors target distinct
    /// buffers.
    pub fn distance(&self, other: &Cursor) -> Result<isize> {
        self.check_same_buffer(other)?;
        Ok(self.index - other.index)
    }

    /// Full ordering against another cursor on the same buffer; fails with
    /// [`TextError::CrossBufferMismatch`] otherwise.
    pub fn try_cmp(&self, other: &Cursor) -> Result<Ordering> {
        self.check_same_buffer(other)?;
        Ok(self.index.cmp(&other.index))
    }

    /// Equality against another cursor on the same buffer: equal iff same
    /// index. Fails with [`TextError::CrossBufferMismatch`] across buffers.
    pub fn try_eq(&self, other: &Cursor) -> Result<bool> {
        Ok(self.try_cmp(other)? == Ordering::Equal)
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("buffer_len", &self.buffer.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deref_and_stepping() {
        let buf = TextBuffer::literal("abc");
        let mut cursor = buf.begin();
        assert!(cursor.is_begin());
        assert_eq!(cursor.get().unwrap(), 'a');

        cursor.step_forward().unwrap();
        assert_eq!(cursor.get().unwrap(), 'b');
        cursor.advance(2).unwrap();
        assert!(cursor.is_end());
        assert!(matches!(cursor.get(), Err(TextError::OutOfRange { .. })));
    }

    #[test]
    fn test_sentinels_are_reachable_but_not_dereferenceable() {
        let buf = TextBuffer::literal("ab");
        let mut cursor = buf.begin();

        cursor.step_back().unwrap();
        assert_eq!(cursor.index(), -1);
        assert_eq!(
            cursor.get(),
            Err(TextError::OutOfRange {
                index: -1,
                length: 2
            })
        );
        // Past the reverse sentinel is an error and the cursor stays put.
        assert!(cursor.step_back().is_err());
        assert_eq!(cursor.index(), -1);

        let end = buf.end();
        assert!(end.is_end());
        assert!(end.get().is_err());
        assert!(end.clone().seek(1).is_err());
    }

    #[test]
    fn test_distance_and_ordering() {
        let buf = TextBuffer::literal("hello");
        let begin = buf.begin();
        let end = buf.end();

        assert_eq!(end.distance(&begin).unwrap(), 5);
        assert_eq!(begin.distance(&end).unwrap(), -5);
        assert_eq!(begin.try_cmp(&end).unwrap(), Ordering::Less);

        let mid = buf.cursor_at(2).unwrap();
        assert_eq!(mid.try_cmp(&begin.clone().seek(2).unwrap()).unwrap(), Ordering::Equal);
        assert!(mid.try_eq(&mid).unwrap());
    }

    #[test]
    fn test_cross_buffer_comparison_fails() {
        // Same length, same content, still distinct buffer values.
        let a = TextBuffer::literal("same");
        let b = TextBuffer::literal("same");

        assert_eq!(
            a.begin().try_cmp(&b.begin()),
            Err(TextError::CrossBufferMismatch)
        );
        assert_eq!(
            a.end().distance(&b.end()),
            Err(TextError::CrossBufferMismatch)
        );
        assert_eq!(
            a.begin().try_eq(&b.begin()),
            Err(TextError::CrossBufferMismatch)
        );

        // Clones of the same handle are the same buffer.
        let a2 = a.clone();
        assert!(a.begin().try_eq(&a2.begin()).unwrap());
    }

    #[test]
    fn test_cursor_over_replacement_agrees_with_char_at() {
        let base = TextBuffer::literal("hello world");
        let patch = TextBuffer::literal("there");
        let buf = base.replace(6, 11, &patch, 0, 5).unwrap();

        let mut cursor = buf.begin();
        let mut collected = String::new();
        while !cursor.is_end() {
            collected.push(cursor.get().unwrap());
            cursor.step_forward().unwrap();
        }
        assert_eq!(collected, "hello there");
    }

    #[test]
    fn test_cursor_at_bounds() {
        let buf = TextBuffer::literal("xy");
        assert!(buf.cursor_at(-1).is_ok());
        assert!(buf.cursor_at(2).is_ok());
        assert!(buf.cursor_at(-2).is_err());
        assert!(buf.cursor_at(3).is_err());
    }
}
