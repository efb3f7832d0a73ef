//! Line-number resolution for character offsets.
//!
//! Entity mentions arrive with character spans; source anchors need line
//! numbers. The index precomputes newline offsets once per document and
//! answers each lookup with a binary search, so resolving every mention in a
//! heavily-tagged document stays cheap.

/// Precomputed newline index over one document.
///
/// Offsets are character positions, matching the spans the NER engine
/// reports.
#[derive(Debug)]
pub struct LineIndex {
    /// Character offsets of every `\n` in the text, ascending.
    newline_offsets: Vec<usize>,
    /// Total text length in characters.
    len: usize,
}

impl LineIndex {
    /// Scan the text once and record newline positions.
    pub fn new(text: &str) -> Self {
        let mut newline_offsets = Vec::new();
        let mut len = 0;
        for (i, c) in text.chars().enumerate() {
            if c == '\n' {
                newline_offsets.push(i);
            }
            len = i + 1;
        }
        Self {
            newline_offsets,
            len,
        }
    }

    /// Map a character offset to a 1-indexed line number.
    ///
    /// Negative offsets clamp to line 1; offsets at or beyond the text length
    /// clamp to the last line. Monotonic non-decreasing in `offset`.
    pub fn line_of(&self, offset: i64) -> u32 {
        if offset < 0 {
            return 1;
        }
        let offset = offset as usize;
        if offset >= self.len {
            return self.last_line();
        }
        // Number of newlines strictly before the offset
        let newlines = self.newline_offsets.partition_point(|&pos| pos < offset);
        newlines as u32 + 1
    }

    /// The 1-indexed number of the last line.
    pub fn last_line(&self) -> u32 {
        self.newline_offsets.len() as u32 + 1
    }
}
