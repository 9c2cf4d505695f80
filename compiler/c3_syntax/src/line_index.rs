//! Byte offset ↔ line/column conversion.
//!
//! Model positions use byte columns. Editors speak UTF-16 columns, so the
//! index can also translate between the two for a given line.

use c3_ir::Position;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineIndex {
            line_starts,
            len: text.len(),
        }
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of a byte offset. Offsets past the end clamp to the end.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        Position::new(
            to_u32(line),
            to_u32(offset - self.line_starts[line]),
        )
    }

    /// Byte offset of `pos`, or `None` if the line does not exist.
    /// Columns past the end of the line clamp to the line end.
    pub fn offset(&self, pos: Position) -> Option<usize> {
        let line = pos.line as usize;
        let start = *self.line_starts.get(line)?;
        let line_end = self
            .line_starts
            .get(line + 1)
            .map_or(self.len, |next| next - 1);
        Some((start + pos.column as usize).min(line_end))
    }

    /// Position at the very end of the text.
    pub fn end_position(&self) -> Position {
        self.position(self.len)
    }

    /// Convert a byte-column position to a UTF-16-column position.
    pub fn to_utf16(&self, text: &str, pos: Position) -> Position {
        let Some(line) = self.line_text(text, pos.line) else {
            return pos;
        };
        let column = pos.column as usize;
        let prefix = line.get(..column.min(line.len())).unwrap_or(line);
        Position::new(pos.line, to_u32(prefix.encode_utf16().count()))
    }

    /// Convert a UTF-16-column position to a byte-column position.
    pub fn from_utf16(&self, text: &str, pos: Position) -> Position {
        let Some(line) = self.line_text(text, pos.line) else {
            return pos;
        };
        let mut units = 0usize;
        for (byte, ch) in line.char_indices() {
            if units >= pos.column as usize {
                return Position::new(pos.line, to_u32(byte));
            }
            units += ch.len_utf16();
        }
        Position::new(pos.line, to_u32(line.len()))
    }

    fn line_text<'s>(&self, text: &'s str, line: u32) -> Option<&'s str> {
        let start = *self.line_starts.get(line as usize)?;
        let end = self
            .line_starts
            .get(line as usize + 1)
            .map_or(text.len(), |next| next - 1);
        text.get(start..end.max(start))
    }
}

#[inline]
fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests;
