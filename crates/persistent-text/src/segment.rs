//! Segment map: the ordered collection of shared storage slices that is a
//! buffer's sole persisted representation.
//!
//! A buffer never materializes its text. It holds a [`SegmentMap`]: an
//! ordered mapping from *cumulative character end-offset* to [`Segment`],
//! where each segment is a non-empty slice of some immutable storage block
//! introduced by a literal buffer. Splicing builds a new map from pieces of
//! existing ones by copying segment references (cheap `Arc` clones), never
//! characters.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

/// A non-empty, half-open slice of an immutable storage block.
///
/// The block itself is shared: every segment carved out of it holds a
/// reference count, so storage lives exactly as long as some buffer still
/// references part of it. Extents are kept in bytes with a cached character
/// count, so sub-slicing only scans the characters of the segment being
/// trimmed.
#[derive(Debug, Clone)]
pub struct Segment {
    storage: Arc<str>,
    /// Byte offset of the slice start within `storage`.
    start: usize,
    /// Byte length of the slice.
    byte_len: usize,
    /// Character count of the slice, always > 0.
    char_len: usize,
}

impl Segment {
    fn new(storage: Arc<str>, start: usize, byte_len: usize, char_len: usize) -> Self {
        debug_assert!(char_len > 0, "empty segments are never stored");
        debug_assert!(start + byte_len <= storage.len());
        Self {
            storage,
            start,
            byte_len,
            char_len,
        }
    }

    /// Wrap a whole non-empty storage block.
    fn whole(storage: Arc<str>) -> Self {
        let byte_len = storage.len();
        let char_len = storage.chars().count();
        Self::new(storage, 0, byte_len, char_len)
    }

    /// Character count of the slice.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Byte length of the slice.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// The referenced text.
    pub fn text(&self) -> &str {
        &self.storage[self.start..self.start + self.byte_len]
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.text().chars().nth(offset)
    }

    /// Byte offset of character `offset` within this segment.
    fn byte_offset_of(&self, offset: usize) -> usize {
        if offset == self.char_len {
            return self.byte_len;
        }
        self.text()
            .char_indices()
            .nth(offset)
            .map(|(i, _)| i)
            .unwrap_or(self.byte_len)
    }

    /// Sub-slice covering `[from, to)` in segment-local character offsets.
    /// Callers guarantee `from < to <= char_len`, so the result is non-empty.
    fn slice_chars(&self, from: usize, to: usize) -> Segment {
        debug_assert!(from < to && to <= self.char_len);
        let begin = self.byte_offset_of(from);
        let end = self.byte_offset_of(to);
        Segment::new(self.storage.clone(), self.start + begin, end - begin, to - from)
    }
}

/// Ordered mapping from cumulative character end-offset to [`Segment`].
///
/// For a buffer of length `L`, the entries read in increasing key order
/// cover `[0, L)` exactly once with no gaps or overlaps; the last key equals
/// `L`; an empty buffer has an empty map. Keys are strictly increasing
/// because no stored segment is empty.
#[derive(Debug, Clone, Default)]
pub struct SegmentMap {
    entries: BTreeMap<usize, Segment>,
    len_chars: usize,
}

impl SegmentMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map over a single whole storage block; empty storage yields an empty
    /// map.
    pub(crate) fn from_storage(storage: &Arc<str>) -> Self {
        let mut map = Self::new();
        if !storage.is_empty() {
            map.push(Segment::whole(storage.clone()));
        }
        map
    }

    /// Append a segment at the tail. The entry's key is the running total
    /// plus the segment's character count, so cumulative keys are maintained
    /// by construction.
    fn push(&mut self, segment: Segment) {
        debug_assert!(segment.char_len() > 0);
        self.len_chars += segment.char_len();
        self.entries.insert(self.len_chars, segment);
    }

    /// Total character count covered by the map.
    pub fn len_chars(&self) -> usize {
        self.len_chars
    }

    /// Whether the map covers no characters.
    pub fn is_empty(&self) -> bool {
        self.len_chars == 0
    }

    /// Number of segments in the map.
    pub fn segment_count(&self) -> usize {
        self.entries.len()
    }

    /// Locate the segment covering `index`, returning it together with the
    /// character offset inside it. O(log segments).
    pub fn locate(&self, index: usize) -> Option<(&Segment, usize)> {
        if index >= self.len_chars {
            return None;
        }
        // First entry whose end-offset is strictly greater than `index`.
        let (&end, segment) = self
            .entries
            .range((Bound::Excluded(index), Bound::Unbounded))
            .next()?;
        let start = end - segment.char_len();
        Some((segment, index - start))
    }

    /// Character at `index`, or `None` outside `[0, len_chars)`.
    pub fn char_at(&self, index: usize) -> Option<char> {
        let (segment, offset) = self.locate(index)?;
        segment.char_at(offset)
    }

    /// Iterate `(end_offset, segment)` pairs in increasing end-offset order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Segment)> {
        self.entries.iter().map(|(&end, segment)| (end, segment))
    }

    /// Iterate segments in coverage order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.entries.values()
    }

    /// Append every segment's text to `out` in coverage order.
    pub(crate) fn write_to(&self, out: &mut String) {
        for segment in self.entries.values() {
            out.push_str(segment.text());
        }
    }

    /// Entries whose coverage extends past `index`, in order: the first
    /// yielded entry is the one containing `index` (or starting at it).
    fn range_from(&self, index: usize) -> impl Iterator<Item = (usize, &Segment)> {
        self.entries
            .range((Bound::Excluded(index), Bound::Unbounded))
            .map(|(&end, segment)| (end, segment))
    }

    /// Build the map for "base with `[cut_from, cut_to)` replaced by
    /// `patch[patch_from, patch_to)`".
    ///
    /// Three runs are concatenated: the base prefix up to `cut_from`, the
    /// covered middle of the patch, and the base postfix from `cut_to`.
    /// Segments straddling a boundary are trimmed to it; a trimmed
    /// sub-segment that becomes empty contributes no entry. Re-keying into
    /// the new buffer's index space falls out of `push`'s running total.
    ///
    /// Cost is proportional to the number of segments carried over, never to
    /// the character counts of base or patch, and no characters are copied.
    pub(crate) fn splice(
        base: &SegmentMap,
        cut_from: usize,
        cut_to: usize,
        patch: &SegmentMap,
        patch_from: usize,
        patch_to: usize,
    ) -> SegmentMap {
        debug_assert!(cut_from <= cut_to && cut_to <= base.len_chars);
        debug_assert!(patch_from <= patch_to && patch_to <= patch.len_chars);

        let mut out = SegmentMap::new();

        // Base prefix: whole segments ending at or before the cut, then a
        // tail-trimmed boundary segment if the cut starts mid-segment.
        for (end, segment) in base.iter() {
            if end <= cut_from {
                out.push(segment.clone());
            } else {
                let start = end - segment.char_len();
                if start < cut_from {
                    out.push(segment.slice_chars(0, cut_from - start));
                }
                break;
            }
        }

        // Patch middle: segments covering [patch_from, patch_to), trimmed at
        // both boundaries. An empty patch range contributes nothing.
        if patch_from < patch_to {
            for (end, segment) in patch.range_from(patch_from) {
                let start = end - segment.char_len();
                if start >= patch_to {
                    break;
                }
                let from = patch_from.max(start) - start;
                let to = patch_to.min(end) - start;
                out.push(segment.slice_chars(from, to));
            }
        }

        // Base postfix: segments from the cut end onward, head-trimmed at
        // the boundary.
        for (end, segment) in base.range_from(cut_to) {
            let start = end - segment.char_len();
            if start < cut_to {
                out.push(segment.slice_chars(cut_to - start, segment.char_len()));
            } else {
                out.push(segment.clone());
            }
        }

        debug_assert_eq!(
            out.len_chars,
            base.len_chars - (cut_to - cut_from) + (patch_to - patch_from)
        );
        out
    }
}
