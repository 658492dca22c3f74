//! Character cursor with line/column tracking.
//!
//! [`CharReader`] walks UTF-8 source text one character at a time, keeping
//! byte offsets for slicing and one-based lines / zero-based columns for
//! token ranges. It is `Copy`, and [`Snapshot`]s are plain values, so
//! speculative matching can save and restore without aliasing.

use tessera_core::Position;

/// A saved reader position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot(Position);

impl Snapshot {
    /// Returns the saved position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.0
    }
}

/// A cursor over source text.
///
/// Line breaks: `\n` and `\r` each start a new line, except that a `\n`
/// directly after `\r` belongs to the same break.
///
/// # Example
///
/// ```
/// use tessera::CharReader;
///
/// let mut reader = CharReader::new("a\r\nb");
/// reader.advance();
/// assert_eq!(reader.advance(), Some('\r'));
/// assert_eq!(reader.peek(), Some('b'));
/// assert_eq!(reader.position().line, 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CharReader<'a> {
    text: &'a str,
    pos: Position,
}

impl<'a> CharReader<'a> {
    /// Creates a reader at the start of `text`.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: Position::start(),
        }
    }

    /// Returns the whole source text.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Returns the current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.pos
    }

    /// Returns the current byte offset.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.pos.offset
    }

    /// Returns `true` once every character has been consumed.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.pos.offset >= self.text.len()
    }

    /// Returns the unconsumed remainder of the text.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        self.text.get(self.pos.offset..).unwrap_or_default()
    }

    /// Returns the next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns the character `k` places ahead (`0` is the next one).
    #[must_use]
    pub fn peek_at(&self, k: usize) -> Option<char> {
        self.rest().chars().nth(k)
    }

    /// Returns up to `n` upcoming characters as a slice.
    #[must_use]
    pub fn peek_string(&self, n: usize) -> &'a str {
        let rest = self.rest();
        let end = rest.char_indices().nth(n).map_or(rest.len(), |(idx, _)| idx);
        rest.get(..end).unwrap_or(rest)
    }

    /// Returns the character just before the current position.
    #[must_use]
    pub fn peek_behind(&self) -> Option<char> {
        self.text.get(..self.pos.offset)?.chars().next_back()
    }

    /// Returns `true` if the remainder starts with `s`.
    #[must_use]
    pub fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Returns the text between `offset` and the current position.
    #[must_use]
    pub fn slice_from(&self, offset: usize) -> &'a str {
        self.text.get(offset..self.pos.offset).unwrap_or_default()
    }

    /// Consumes one character and returns it. A `\r` followed by `\n` is
    /// consumed together as a single line break, and `'\r'` is returned.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.step(ch);
        if ch == '\r' && self.peek() == Some('\n') {
            self.step('\n');
        }
        Some(ch)
    }

    /// Consumes up to `n` characters (CRLF counting as one) and returns how
    /// many were consumed.
    pub fn advance_n(&mut self, n: usize) -> usize {
        let mut consumed = 0;
        while consumed < n && self.advance().is_some() {
            consumed += 1;
        }
        consumed
    }

    /// Consumes exactly `len` bytes (clamped to the end of the text).
    ///
    /// Unlike [`advance`](Self::advance) this never overshoots, so a token
    /// may end between the two bytes of a CRLF pair without skewing the
    /// line count.
    pub fn advance_bytes(&mut self, len: usize) {
        let target = self.pos.offset.saturating_add(len).min(self.text.len());
        while self.pos.offset < target {
            let Some(ch) = self.peek() else { break };
            self.step(ch);
        }
    }

    /// Saves the current position.
    #[must_use]
    pub const fn save(&self) -> Snapshot {
        Snapshot(self.pos)
    }

    /// Returns to a saved position.
    pub const fn restore(&mut self, snapshot: Snapshot) {
        self.pos = snapshot.0;
    }

    fn step(&mut self, ch: char) {
        let after_cr = self.peek_behind() == Some('\r');
        self.pos.offset += ch.len_utf8();
        match ch {
            '\n' if after_cr => {}
            '\n' | '\r' => {
                self.pos.line = self.pos.line.saturating_add(1);
                self.pos.column = 0;
            }
            _ => self.pos.column = self.pos.column.saturating_add(1),
        }
    }
}
