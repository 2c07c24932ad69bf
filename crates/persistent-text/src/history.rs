//! Edit history as a chain of immutable buffer values.
//!
//! Persistence is structural: every edit produces a new [`TextBuffer`] that
//! keeps its ancestors alive through shared ownership, so an undo stack
//! needs no snapshots or diffs. [`History`] is the thin wrapper that makes
//! the pattern explicit: a list of versions and a current position; undo
//! and redo only move the position.

use crate::buffer::TextBuffer;

/// A linear chain of buffer versions with an undo/redo position.
///
/// Recording an edit while undone discards the abandoned redo tail, the
/// usual editor behavior. The discarded buffers stay valid for anyone still
/// holding a handle; only this chain forgets them.
#[derive(Debug, Clone)]
pub struct History {
    versions: Vec<TextBuffer>,
    current: usize,
}

impl History {
    /// Start a history at an initial buffer version.
    pub fn new(initial: TextBuffer) -> Self {
        Self {
            versions: vec![initial],
            current: 0,
        }
    }

    /// The buffer at the current position.
    pub fn current(&self) -> &TextBuffer {
        &self.versions[self.current]
    }

    /// Record a new version after the current position, discarding any redo
    /// tail.
    pub fn push(&mut self, buffer: TextBuffer) {
        self.versions.truncate(self.current + 1);
        self.versions.push(buffer);
        self.current += 1;
    }

    /// Step back one version; `None` at the oldest version.
    pub fn undo(&mut self) -> Option<&TextBuffer> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        Some(&self.versions[self.current])
    }

    /// Step forward one version; `None` at the newest version.
    pub fn redo(&mut self) -> Option<&TextBuffer> {
        if self.current + 1 >= self.versions.len() {
            return None;
        }
        self.current += 1;
        Some(&self.versions[self.current])
    }

    /// Whether an older version exists.
    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    /// Whether a newer version exists.
    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.versions.len()
    }

    /// Number of versions currently navigable, including the initial one.
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Index of the current version, 0 being the initial buffer.
    pub fn position(&self) -> usize {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_navigation() {
        let v0 = TextBuffer::literal("hello world");
        let mut history = History::new(v0.clone());

        let patch = TextBuffer::literal("there");
        let v1 = history.current().replace(6, 11, &patch, 0, 5).unwrap();
        history.push(v1);
        assert_eq!(history.current().to_string(), "hello there");

        // Undo repoints; the earlier value is unchanged, not reconstructed.
        let undone = history.undo().unwrap();
        assert_eq!(undone.to_string(), "hello world");
        assert!(TextBuffer::same_buffer(undone, &v0));

        let redone = history.redo().unwrap();
        assert_eq!(redone.to_string(), "hello there");
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_discards_redo_tail() {
        let mut history = History::new(TextBuffer::literal("a"));
        let v1 = history.current().insert(1, "b").unwrap();
        history.push(v1);
        let v2 = history.current().insert(2, "c").unwrap();
        history.push(v2);

        history.undo().unwrap();
        assert!(history.can_redo());

        let divergent = history.current().insert(0, "z").unwrap();
        history.push(divergent);
        assert!(!history.can_redo());
        assert_eq!(history.current().to_string(), "zab");
        assert_eq!(history.version_count(), 3);
    }

    #[test]
    fn test_undo_at_oldest_and_redo_at_newest() {
        let mut history = History::new(TextBuffer::literal("x"));
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(!history.can_undo());
        assert_eq!(history.position(), 0);
    }

    #[test]
    fn test_hello_world_session() {
        let mut history = History::new(TextBuffer::literal("hello world"));

        let patch = TextBuffer::literal("there");
        let v1 = history.current().replace(6, 11, &patch, 0, 5).unwrap();
        history.push(v1);
        assert_eq!(history.current().to_string(), "hello there");

        let say = TextBuffer::literal("Say ");
        let v2 = history.current().replace(0, 0, &say, 0, 4).unwrap();
        history.push(v2);
        assert_eq!(history.current().to_string(), "Say hello there");
        assert_eq!(history.current().len(), 15);

        history.undo().unwrap();
        history.undo().unwrap();
        assert_eq!(history.current().to_string(), "hello world");
    }
}
