//! Output buffer with tail-limited prompt search.
//!
//! Prompt patterns anchor at the end of output, so only the last
//! `search_depth` bytes are searched. Command output from a switch can be
//! large (full interface tables); searching the whole buffer on every
//! received chunk would be quadratic.

use regex::bytes::Regex;

/// Buffer accumulating device output, searched from the tail for prompts.
#[derive(Debug)]
pub struct PatternBuffer {
    buffer: Vec<u8>,

    /// How many bytes from the end to search for prompt patterns.
    search_depth: usize,
}

impl PatternBuffer {
    pub fn new(search_depth: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            search_depth,
        }
    }

    /// Append received data, stripping ANSI escape sequences first.
    pub fn extend(&mut self, data: &[u8]) {
        let cleaned = strip_ansi_escapes::strip(data);
        self.buffer.extend_from_slice(&cleaned);
    }

    /// Check whether the pattern matches within the last `search_depth` bytes.
    pub fn tail_matches(&self, pattern: &Regex) -> bool {
        let start = self.buffer.len().saturating_sub(self.search_depth);
        pattern.is_match(&self.buffer[start..])
    }

    /// Take ownership of the accumulated output and reset the buffer.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_and_take() {
        let mut buffer = PatternBuffer::new(100);
        buffer.extend(b"sw-access-01#");
        assert_eq!(buffer.take(), b"sw-access-01#");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_ansi_stripping() {
        let mut buffer = PatternBuffer::new(100);
        buffer.extend(b"\x1b[32mconnected\x1b[0m");
        assert_eq!(buffer.take(), b"connected");
    }

    #[test]
    fn test_tail_match() {
        let mut buffer = PatternBuffer::new(20);
        buffer.extend(&[b'x'; 200]);
        buffer.extend(b"\nsw-access-01#");

        let pattern = Regex::new(r"#\s?$").unwrap();
        assert!(buffer.tail_matches(&pattern));
    }

    #[test]
    fn test_prompt_outside_search_depth() {
        let mut buffer = PatternBuffer::new(10);
        buffer.extend(b"sw-access-01#\n");
        buffer.extend(&[b'x'; 200]);

        // The prompt scrolled past the search window.
        let pattern = Regex::new(r"#\s?$").unwrap();
        assert!(!buffer.tail_matches(&pattern));
    }
}
