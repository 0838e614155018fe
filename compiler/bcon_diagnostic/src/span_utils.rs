//! Line and column lookup for byte offsets.

/// Byte offsets of every line start, for O(log L) offset lookups.
///
/// ```
/// use bcon_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "use 1 as a;\nexport a;";
/// let table = LineOffsetTable::build(source);
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 12), (2, 1));
/// assert_eq!(table.offset_to_line_col(source, 19), (2, 8));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    offsets: Vec<usize>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0];
        offsets.extend(memchr::memchr_iter(b'\n', source.as_bytes()).map(|i| i + 1));
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    pub fn line_from_offset(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(insert) => insert,
        }
    }

    /// Byte offset where 1-based `line` starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1).and_then(|i| self.offsets.get(i).copied())
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }

    /// 1-based line and column; columns count characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: usize) -> (usize, usize) {
        let line = self.line_from_offset(offset);
        let start = self.line_start(line).unwrap_or(0);
        let end = offset.min(source.len());
        let column = source
            .get(start..end)
            .map_or(end.saturating_sub(start), |s| s.chars().count());
        (line, column + 1)
    }

    /// Text of 1-based `line`, without its newline.
    pub fn line_text<'a>(&self, source: &'a str, line: usize) -> Option<&'a str> {
        let start = self.line_start(line)?;
        let end = self
            .line_start(line + 1)
            .map_or(source.len(), |next| next - 1);
        source.get(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_count_characters() {
        let source = "\"żółw\" x";
        let table = LineOffsetTable::build(source);
        let x = source.find('x').unwrap_or_default();
        assert_eq!(table.offset_to_line_col(source, x), (1, 8));
    }

    #[test]
    fn line_text_strips_newline() {
        let source = "a;\nbb;\n";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_text(source, 2), Some("bb;"));
        assert_eq!(table.line_count(), 3);
    }
}
