//! Bounded text buffer the user types into.

use core::fmt;

use heapless::String;

use crate::config::{INPUT_CAPACITY, INPUT_CAPACITY_BYTES};

/// Append-only character buffer with remove-last, bounded in characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputBuffer {
    text: String<INPUT_CAPACITY_BYTES>,
    /// Length in characters.
    len: usize,
    max_len: usize,
}

impl InputBuffer {
    /// Empty buffer holding at most `max_len` characters
    /// (clamped to `1..=INPUT_CAPACITY`).
    pub fn new(max_len: usize) -> Self {
        Self {
            text: String::new(),
            len: 0,
            max_len: max_len.clamp(1, INPUT_CAPACITY),
        }
    }

    /// Append one character. Fails on a full buffer or the `'\0'` sentinel.
    pub fn append(&mut self, c: char) -> bool {
        if self.is_full() || c == '\0' {
            return false;
        }
        if self.text.push(c).is_err() {
            return false;
        }
        self.len += 1;
        true
    }

    /// Drop the final character. Fails on an empty buffer.
    pub fn remove_last(&mut self) -> bool {
        match self.text.pop() {
            Some(_) => {
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Replace the contents with `s`, truncated to the maximum length.
    pub fn set_text(&mut self, s: &str) {
        self.text.clear();
        self.len = 0;
        for c in s.chars().take(self.max_len) {
            if c == '\0' || self.text.push(c).is_err() {
                break;
            }
            self.len += 1;
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.len = 0;
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.max_len
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl fmt::Display for InputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InputBuffer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_until_full_then_reject() {
        let mut buf = InputBuffer::new(3);
        assert!(buf.append('a'));
        assert!(buf.append('b'));
        assert!(buf.append('c'));
        assert!(buf.is_full());
        assert!(!buf.append('d'));
        assert_eq!(buf.as_str(), "abc");
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn append_rejects_nul_sentinel() {
        let mut buf = InputBuffer::new(4);
        assert!(!buf.append('\0'));
        assert!(buf.is_empty());
    }

    #[test]
    fn remove_last_on_empty_fails() {
        let mut buf = InputBuffer::new(4);
        assert!(!buf.remove_last());
        assert_eq!(buf.len(), 0);

        buf.append('x');
        assert!(buf.remove_last());
        assert!(!buf.remove_last());
        assert!(buf.is_empty());
    }

    #[test]
    fn multibyte_characters_count_once() {
        let mut buf = InputBuffer::new(2);
        assert!(buf.append('¢'));
        assert!(buf.append('½'));
        assert!(!buf.append('a'));
        assert_eq!(buf.len(), 2);
        assert!(buf.remove_last());
        assert_eq!(buf.as_str(), "¢");
    }

    #[test]
    fn set_text_truncates_to_max_length() {
        let mut buf = InputBuffer::new(5);
        buf.set_text("hello world");
        assert_eq!(buf.as_str(), "hello");
        assert_eq!(buf.len(), 5);

        buf.set_text("hi");
        assert_eq!(buf.as_str(), "hi");
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn set_text_stops_at_sentinel() {
        let mut buf = InputBuffer::new(10);
        buf.set_text("ab\0cd");
        assert_eq!(buf.as_str(), "ab");
        assert_eq!(buf.len(), buf.as_str().chars().count());
    }

    #[test]
    fn set_text_round_trips_at_capacity() {
        let text: std::string::String = "x".repeat(INPUT_CAPACITY);
        let mut buf = InputBuffer::new(INPUT_CAPACITY);
        buf.set_text(&text);
        assert_eq!(buf.as_str(), text);
        assert_eq!(buf.len(), INPUT_CAPACITY);
    }

    #[test]
    fn max_length_is_clamped() {
        assert_eq!(InputBuffer::new(0).max_len(), 1);
        assert_eq!(InputBuffer::new(10_000).max_len(), INPUT_CAPACITY);
    }

    #[test]
    fn full_width_capacity_fits_four_byte_chars() {
        let mut buf = InputBuffer::new(INPUT_CAPACITY);
        for _ in 0..INPUT_CAPACITY {
            assert!(buf.append('😀'));
        }
        assert!(!buf.append('😀'));
        assert_eq!(buf.len(), INPUT_CAPACITY);
    }
}
