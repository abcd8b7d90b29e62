//! In-memory buffer of formatted log entries awaiting flush

/// Ordered, append-only buffer of fully formatted log lines
#[derive(Debug, Default)]
pub struct PendingBuffer {
    entries: Vec<String>,
}

impl PendingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a formatted entry (already line-terminated)
    pub fn push(&mut self, entry: String) {
        self.entries.push(entry);
    }

    /// Get the number of buffered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Concatenate all entries into the data written on flush
    pub fn contents(&self) -> String {
        self.entries.concat()
    }

    /// Drop all entries (after they have been written)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_buffer_keeps_order() {
        let mut buffer = PendingBuffer::new();
        buffer.push("first\n".to_string());
        buffer.push("second\n".to_string());
        buffer.push("third\n".to_string());

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.contents(), "first\nsecond\nthird\n");
    }

    #[test]
    fn test_pending_buffer_clear() {
        let mut buffer = PendingBuffer::new();
        buffer.push("entry\n".to_string());
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.contents(), "");
    }
}
