//! Byte cursor for traversing Alda source.
//!
//! Alda's grammar dispatches entirely on ASCII bytes (see the music- and
//! lisp-mode token tables), so the cursor indexes by byte rather than by
//! `char`. Column is measured in bytes from the start of the current line,
//! matching the scanner's position-tracking rule.

/// A cursor over source bytes with line/column bookkeeping.
pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    /// Byte index of the character immediately after the most recent `\n`.
    line_start: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// The byte at the current position, or `None` at end of input.
    #[inline]
    pub fn current(&self) -> Option<u8> {
        self.peek(0)
    }

    /// The byte `offset` bytes ahead of the current position.
    #[inline]
    pub fn peek(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.position + offset).copied()
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Consumes and returns the current byte, advancing line/column state.
    pub fn advance(&mut self) -> Option<u8> {
        let b = self.current()?;
        self.position += 1;
        if b == b'\n' {
            self.line += 1;
            self.line_start = self.position;
        }
        Some(b)
    }

    /// Consumes the current byte if it equals `expected`.
    pub fn match_byte(&mut self, expected: u8) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column: byte offset from the start of the current line, plus one.
    pub fn column(&self) -> u32 {
        (self.position - self.line_start) as u32 + 1
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
            line_start: self.line_start,
        }
    }

    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.line_start = snapshot.line_start;
    }
}

/// A snapshot of cursor state that can be restored later.
#[derive(Clone, Copy, Debug)]
pub struct CursorSnapshot {
    pub position: usize,
    pub line: u32,
    pub line_start: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cursor_starts_at_one_one() {
        let cursor = Cursor::new("abc");
        assert_eq!(cursor.current(), Some(b'a'));
        assert_eq!(cursor.line(), 1);
        assert_eq!(cursor.column(), 1);
    }

    #[test]
    fn advance_walks_bytes() {
        let mut cursor = Cursor::new("abc");
        assert_eq!(cursor.advance(), Some(b'a'));
        assert_eq!(cursor.current(), Some(b'b'));
        assert_eq!(cursor.advance(), Some(b'b'));
        assert_eq!(cursor.advance(), Some(b'c'));
        assert_eq!(cursor.advance(), None);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn line_and_column_track_newlines() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.column(), 3);
        cursor.advance(); // consumes '\n'
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.column(), 1);
        cursor.advance();
        assert_eq!(cursor.column(), 2);
    }

    #[test]
    fn column_is_byte_based_not_char_based() {
        // "é" is two UTF-8 bytes; column should advance by two.
        let mut cursor = Cursor::new("é1");
        cursor.advance();
        assert_eq!(cursor.column(), 3);
    }

    #[test]
    fn match_byte_consumes_only_on_match() {
        let mut cursor = Cursor::new("ab");
        assert!(!cursor.match_byte(b'b'));
        assert!(cursor.match_byte(b'a'));
        assert!(cursor.match_byte(b'b'));
        assert!(cursor.is_at_end());
    }

    #[test]
    fn slice_from_and_remaining() {
        let mut cursor = Cursor::new("hello world");
        let start = cursor.position();
        cursor.advance();
        cursor.advance();
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.slice_from(start), "hello");
        assert_eq!(cursor.remaining(), " world");
    }

    #[test]
    fn snapshot_and_restore() {
        let mut cursor = Cursor::new("ab\ncd");
        let snap = cursor.snapshot();
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.line(), 2);
        cursor.restore(snap);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.line(), 1);
        assert_eq!(cursor.column(), 1);
    }

    #[test]
    fn empty_source_is_at_end() {
        let cursor = Cursor::new("");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.current(), None);
    }
}
