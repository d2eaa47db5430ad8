//! Chunk module - one logical log entry

/// A logical log entry: one physical line plus any continuation lines merged
/// into it.
///
/// `text` borrows from the original input and keeps every byte, including the
/// trailing newline, so that concatenating the chunks of a document restores
/// it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// 0-indexed line number of the first line of this chunk
    pub start_line: usize,

    /// Untrimmed chunk text
    pub text: &'a str,
}

impl<'a> Chunk<'a> {
    /// Create a new chunk
    pub fn new(start_line: usize, text: &'a str) -> Self {
        Self { start_line, text }
    }

    /// Number of newline characters contained in this chunk
    pub fn newline_count(&self) -> usize {
        self.text.bytes().filter(|b| *b == b'\n').count()
    }

    /// Length in characters (Unicode scalar values) of the untrimmed text
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newline_count() {
        let chunk = Chunk::new(3, "status:\nrunning\n");
        assert_eq!(chunk.newline_count(), 2);
        assert_eq!(Chunk::new(0, "tail").newline_count(), 0);
    }

    #[test]
    fn test_char_len_counts_scalars_not_bytes() {
        let chunk = Chunk::new(0, "héllo\n");
        assert_eq!(chunk.char_len(), 6);
        assert_eq!(chunk.text.len(), 7);
    }
}
