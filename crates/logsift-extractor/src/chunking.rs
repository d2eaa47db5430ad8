//! Splitting raw log text into logical entries
//!
//! A chunk normally ends at a newline. It continues onto the next line when
//! that line starts with whitespace (indented detail, stack frames) or when
//! the line being ended finishes with a backslash or a colon. A newline that
//! is the last character of the input always ends the chunk.

use logsift_domain::Chunk;

/// Split log text into chunks, lazily
///
/// The iterator is pure: running it twice over the same text yields the same
/// chunks, and the chunk texts concatenate to the input.
///
/// # Examples
///
/// ```
/// use logsift_extractor::chunk_log;
///
/// let chunks: Vec<_> = chunk_log("a\n  b\nc\n").map(|c| (c.start_line, c.text)).collect();
/// assert_eq!(chunks, vec![(0, "a\n  b\n"), (2, "c\n")]);
/// ```
pub fn chunk_log(text: &str) -> Chunks<'_> {
    Chunks {
        text,
        pos: 0,
        next_line: 0,
        unterminated_tail: false,
    }
}

/// Whether the chunk being accumulated continues past the newline at byte
/// offset `newline`
pub fn continues_past(text: &str, newline: usize) -> bool {
    let Some(next) = text[newline + 1..].chars().next() else {
        return false;
    };
    if next.is_whitespace() {
        return true;
    }
    matches!(
        newline.checked_sub(1).map(|i| text.as_bytes()[i]),
        Some(b'\\') | Some(b':')
    )
}

/// Iterator over the chunks of a log, see [`chunk_log`]
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    text: &'a str,
    pos: usize,
    next_line: usize,
    unterminated_tail: bool,
}

impl Chunks<'_> {
    /// Lines consumed so far, counting an unterminated final line
    pub fn lines_seen(&self) -> usize {
        self.next_line + usize::from(self.unterminated_tail)
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }

        let start = self.pos;
        let start_line = self.next_line;
        let mut cursor = start;

        let end = loop {
            match self.text[cursor..].find('\n') {
                Some(offset) => {
                    let newline = cursor + offset;
                    self.next_line += 1;
                    if !continues_past(self.text, newline) {
                        break newline + 1;
                    }
                    cursor = newline + 1;
                }
                None => {
                    self.unterminated_tail = true;
                    break self.text.len();
                }
            }
        };

        self.pos = end;
        Some(Chunk::new(start_line, &self.text[start..end]))
    }
}

impl std::iter::FusedIterator for Chunks<'_> {}
