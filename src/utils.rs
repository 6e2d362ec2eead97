//! Common utility functions shared across the codebase.

use std::path::Path;

/// Byte offsets where each line of a text starts.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
/// Lookups are O(log n) via binary search.
#[derive(Debug, Clone)]
pub struct LineIndex {
    offsets: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut offsets = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                offsets.push(i + 1);
            }
        }
        Self { offsets }
    }

    /// 1-based line number containing byte `offset`.
    pub fn line(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// 1-based line number and 0-based column (in chars) of byte `offset`.
    pub fn position(&self, content: &str, offset: usize) -> (usize, usize) {
        let line = self.line(offset);
        let start = self.offsets[line - 1];
        let column = content[start..offset].chars().count();
        (line, column)
    }

    /// Full text of a 1-based line, without the trailing newline.
    pub fn line_text<'a>(&self, content: &'a str, line: usize) -> &'a str {
        let start = self.offsets[line - 1];
        let end = self
            .offsets
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(content.len());
        content[start..end].trim_end_matches('\r')
    }
}

/// Render `path` relative to `base` with forward slashes, falling back to the
/// full path when it is not under `base`.
///
/// ```
/// use std::path::Path;
/// use glossa::utils::display_path;
///
/// assert_eq!(display_path(Path::new("/p/src/app.js"), Path::new("/p")), "src/app.js");
/// assert_eq!(display_path(Path::new("/other/x.js"), Path::new("/p")), "/other/x.js");
/// ```
pub fn display_path(path: &Path, base: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
        .replacen("//", "/", 1)
}

#[cfg(test)]
mod tests {
    use crate::utils::*;

    #[test]
    fn test_line_index() {
        let content = "line1\nline2\nline3";
        let index = LineIndex::new(content);

        assert_eq!(index.offsets, vec![0, 6, 12]);
        assert_eq!(index.line(0), 1);
        assert_eq!(index.line(3), 1);
        assert_eq!(index.line(6), 2);
        assert_eq!(index.line(8), 2);
        assert_eq!(index.line(12), 3);
    }

    #[test]
    fn test_position_counts_chars() {
        let content = "héllo\n  wörld";
        let index = LineIndex::new(content);
        let offset = content.find("rld").unwrap();
        assert_eq!(index.position(content, offset), (2, 4));
    }

    #[test]
    fn test_line_text() {
        let content = "first\r\nsecond\nthird";
        let index = LineIndex::new(content);
        assert_eq!(index.line_text(content, 1), "first");
        assert_eq!(index.line_text(content, 2), "second");
        assert_eq!(index.line_text(content, 3), "third");
    }
}
