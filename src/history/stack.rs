//! Navigable history stack.

/// Visited route paths with a cursor at the current entry.
///
/// Pushing discards every entry after the cursor, like a browser does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStack {
    entries: Vec<String>,
    cursor: usize,
}

impl HistoryStack {
    /// Create a stack holding a single entry.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.into());
        self.cursor += 1;
    }

    pub fn replace(&mut self, path: impl Into<String>) {
        self.entries[self.cursor] = path.into();
    }

    /// Move the cursor by `delta` entries.
    ///
    /// Returns the new current entry, or `None` (cursor unchanged) when the
    /// move would leave the stack or `delta` is zero.
    pub fn go(&mut self, delta: isize) -> Option<&str> {
        if delta == 0 {
            return None;
        }
        let target = self.cursor.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }
        self.cursor = target;
        Some(self.current())
    }

    pub fn back(&mut self) -> Option<&str> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Option<&str> {
        self.go(1)
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; the stack holds at least its initial entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_traverse() {
        let mut stack = HistoryStack::new("/");
        stack.push("/session");
        stack.push("/users/1/stream");
        assert_eq!(stack.len(), 3);

        assert_eq!(stack.back(), Some("/session"));
        assert_eq!(stack.back(), Some("/"));
        assert_eq!(stack.back(), None);
        assert_eq!(stack.current(), "/");

        assert_eq!(stack.go(2), Some("/users/1/stream"));
        assert_eq!(stack.forward(), None);
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut stack = HistoryStack::new("/");
        stack.push("/a");
        stack.push("/b");
        stack.back();
        stack.push("/c");

        assert_eq!(stack.entries(), ["/", "/a", "/c"]);
        assert!(!stack.can_go_forward());
        assert!(stack.can_go_back());
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut stack = HistoryStack::new("/");
        stack.push("/a");
        stack.replace("/b");
        assert_eq!(stack.entries(), ["/", "/b"]);
    }

    #[test]
    fn test_go_out_of_range() {
        let mut stack = HistoryStack::new("/");
        assert_eq!(stack.go(0), None);
        assert_eq!(stack.go(-5), None);
        assert_eq!(stack.go(5), None);
        assert_eq!(stack.current(), "/");
    }
}
