use ropey::Rope;
use tower_lsp::lsp_types::{Position, Range, TextEdit};

use crate::rewrite::Splice;

/// LSP position (UTF-16 column) → byte offset.
pub fn position_to_offset(source: &str, pos: Position) -> Option<usize> {
    let rope = Rope::from_str(source);
    let line_idx = pos.line as usize;
    if line_idx >= rope.len_lines() {
        return None;
    }

    let line_byte_start = rope.line_to_byte(line_idx);
    let line_slice = rope.line(line_idx);

    let mut utf16_units = 0usize;
    let mut byte_offset = 0usize;

    for ch in line_slice.chars() {
        if utf16_units >= pos.character as usize {
            break;
        }
        utf16_units += ch.len_utf16();
        byte_offset += ch.len_utf8();
    }

    Some(line_byte_start + byte_offset)
}

/// Byte offset → LSP position (UTF-16 column).
pub fn offset_to_position(source: &str, offset: usize) -> Position {
    let rope = Rope::from_str(source);
    let offset = offset.min(rope.len_bytes());
    let line_idx = rope.byte_to_line(offset);
    let line_byte_start = rope.line_to_byte(line_idx);
    let character: usize = source[line_byte_start..offset]
        .chars()
        .map(|c| c.len_utf16())
        .sum();
    Position {
        line: line_idx as u32,
        character: character as u32,
    }
}

/// A splice is a pure insertion, so the edit range is empty.
pub fn splice_to_text_edit(source: &str, splice: &Splice) -> TextEdit {
    let at = offset_to_position(source, splice.at);
    TextEdit {
        range: Range { start: at, end: at },
        new_text: splice.text.clone(),
    }
}
