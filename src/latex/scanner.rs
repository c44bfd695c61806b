//! Byte-level cursor over LaTeX source.
//!
//! Every marker the flashcard parser cares about is ASCII, so positions are
//! byte offsets. UTF-8 continuation bytes never compare equal to an ASCII
//! byte, which keeps every offset we slice at on a char boundary.

use super::ParseError;

pub(super) struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
}

impl<'a> Scanner<'a> {
    pub(super) fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.bytes.len()
    }

    pub(super) fn byte(&self, pos: usize) -> Option<u8> {
        self.bytes.get(pos).copied()
    }

    pub(super) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.src[start..end]
    }

    /// 1-based line number of the byte at `pos`.
    pub(super) fn line_at(&self, pos: usize) -> usize {
        let end = pos.min(self.bytes.len());
        1 + self.bytes[..end].iter().filter(|&&b| b == b'\n').count()
    }

    /// Position just past the comment starting at `pos` (the `%`), including its newline.
    pub(super) fn skip_comment(&self, pos: usize) -> usize {
        match self.bytes[pos..].iter().position(|&b| b == b'\n') {
            Some(offset) => pos + offset + 1,
            None => self.len(),
        }
    }

    /// Skips whitespace and comments, the only things LaTeX allows between a
    /// command and its arguments.
    pub(super) fn skip_blank(&self, mut pos: usize) -> usize {
        while let Some(b) = self.byte(pos) {
            match b {
                b' ' | b'\t' | b'\r' | b'\n' => pos += 1,
                b'%' => pos = self.skip_comment(pos),
                _ => break,
            }
        }
        pos
    }

    /// Reads the control sequence whose backslash sits at `pos`.
    ///
    /// Returns the command name and the position after it. Control symbols
    /// such as `\%` or `\{` yield an empty name and consume both bytes.
    pub(super) fn control_word(&self, pos: usize) -> (&'a str, usize) {
        let start = pos + 1;
        let mut end = start;
        while self.byte(end).is_some_and(|b| b.is_ascii_alphabetic()) {
            end += 1;
        }
        if end == start {
            return ("", (pos + 2).min(self.len()));
        }
        (self.slice(start, end), end)
    }

    /// Reads the balanced `{...}` group opening at `pos`.
    ///
    /// Returns `(inner_start, inner_end, after)`. Escaped braces do not count
    /// and braces inside comments are ignored.
    pub(super) fn group(&self, pos: usize) -> Result<(usize, usize, usize), ParseError> {
        debug_assert_eq!(self.byte(pos), Some(b'{'));
        let mut depth = 0usize;
        let mut i = pos;
        while let Some(b) = self.byte(i) {
            match b {
                b'\\' => {
                    i += 2;
                    continue;
                }
                b'%' => {
                    i = self.skip_comment(i);
                    continue;
                }
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok((pos + 1, i, i + 1));
                    }
                }
                _ => {}
            }
            i += 1;
        }
        Err(ParseError::UnbalancedBraces {
            line: self.line_at(pos),
        })
    }

    /// Skips a `[...]` optional argument at `pos`, if one is present.
    pub(super) fn skip_optional(&self, pos: usize) -> Result<usize, ParseError> {
        if self.byte(pos) != Some(b'[') {
            return Ok(pos);
        }
        let mut i = pos + 1;
        while let Some(b) = self.byte(i) {
            match b {
                b']' => return Ok(i + 1),
                b'{' => i = self.group(i)?.2,
                b'\\' => i += 2,
                b'%' => i = self.skip_comment(i),
                _ => i += 1,
            }
        }
        Err(ParseError::UnbalancedBraces {
            line: self.line_at(pos),
        })
    }

    /// For a `\begin`/`\end` whose name ends at `pos`, reads the environment
    /// name argument. Returns `None` when no `{` follows.
    pub(super) fn environment_name(
        &self,
        pos: usize,
    ) -> Result<Option<(&'a str, usize)>, ParseError> {
        let pos = self.skip_blank(pos);
        if self.byte(pos) != Some(b'{') {
            return Ok(None);
        }
        let (start, end, after) = self.group(pos)?;
        Ok(Some((self.slice(start, end).trim(), after)))
    }
}
