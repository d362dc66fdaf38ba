//! Sequential line cursor over a CAM job file.

/// Reads a fixed list of lines one at a time.
///
/// The cursor never looks ahead: [`peek`](Self::peek) shows the current
/// line and [`advance`](Self::advance) consumes it.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// Creates a cursor positioned on the first line of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    /// Returns the current line with trailing whitespace removed, or `None`
    /// once every line has been consumed.
    #[must_use]
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).map(|line| line.trim_end())
    }

    /// Consumes the current line.
    pub fn advance(&mut self) {
        if self.pos < self.lines.len() {
            self.pos += 1;
        }
    }

    /// Returns `true` once every line has been consumed.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Returns `true` if the current line is blank.
    #[must_use]
    pub fn at_blank(&self) -> bool {
        self.peek().is_some_and(str::is_empty)
    }

    /// Returns `true` if only blank lines remain.
    #[must_use]
    pub fn only_blank_remaining(&self) -> bool {
        self.lines[self.pos.min(self.lines.len())..]
            .iter()
            .all(|line| line.trim_end().is_empty())
    }

    /// Number of lines in the file.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the file has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// One-based number of the current line.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.pos + 1
    }

    /// Applies `matcher` to the current line, consuming it on a match.
    pub fn take<T>(&mut self, matcher: impl FnOnce(&'a str) -> Option<T>) -> Option<T> {
        let value = matcher(self.peek()?)?;
        self.advance();
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_strips_trailing_whitespace() {
        let cursor = LineCursor::new("Device=EXCELLON  \r\nOutput=%N.drd\n");
        assert_eq!(cursor.peek(), Some("Device=EXCELLON"));
        assert_eq!(cursor.len(), 2);
    }

    #[test]
    fn advance_until_exhausted() {
        let mut cursor = LineCursor::new("a\nb");
        cursor.advance();
        assert_eq!(cursor.peek(), Some("b"));
        assert!(!cursor.at_end());
        cursor.advance();
        assert_eq!(cursor.peek(), None);
        assert!(cursor.at_end());
        cursor.advance();
        assert!(cursor.at_end());
    }

    #[test]
    fn take_consumes_only_on_match() {
        let mut cursor = LineCursor::new("one\ntwo");
        assert_eq!(cursor.take(|l| (l == "two").then_some(2)), None);
        assert_eq!(cursor.line_number(), 1);
        assert_eq!(cursor.take(|l| (l == "one").then_some(1)), Some(1));
        assert_eq!(cursor.line_number(), 2);
    }

    #[test]
    fn byte_order_mark_ignored() {
        let cursor = LineCursor::new("\u{feff}[CAM Processor Job]");
        assert_eq!(cursor.peek(), Some("[CAM Processor Job]"));
    }

    #[test]
    fn blank_lines() {
        let mut cursor = LineCursor::new("x\n   \n\n");
        assert!(!cursor.at_blank());
        assert!(!cursor.only_blank_remaining());
        cursor.advance();
        assert!(cursor.at_blank());
        assert!(cursor.only_blank_remaining());
    }

    #[test]
    fn empty_text() {
        let cursor = LineCursor::new("");
        assert!(cursor.is_empty());
        assert!(cursor.at_end());
        assert!(cursor.only_blank_remaining());
    }
}
