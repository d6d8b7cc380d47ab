//! Text field editing primitives.
//!
//! Cursor positions are counted in characters, not bytes, so multi-byte
//! input edits cleanly.

/// Helper for the common edits of a single-line input buffer.
pub struct TextField;

impl TextField {
    /// Byte offset of the character at `cursor` (or the end of the buffer)
    fn byte_index(input: &str, cursor: usize) -> usize {
        input
            .char_indices()
            .nth(cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(input.len())
    }

    pub fn char_len(input: &str) -> usize {
        input.chars().count()
    }

    /// Handle backspace key - delete character before cursor
    #[inline]
    pub fn backspace(input: &mut String, cursor: &mut usize) {
        if *cursor > 0 && *cursor <= Self::char_len(input) {
            let idx = Self::byte_index(input, *cursor - 1);
            input.remove(idx);
            *cursor -= 1;
        }
    }

    /// Handle delete key - delete character at cursor
    #[inline]
    pub fn delete(input: &mut String, cursor: usize) {
        if cursor < Self::char_len(input) {
            let idx = Self::byte_index(input, cursor);
            input.remove(idx);
        }
    }

    #[inline]
    pub fn left(cursor: &mut usize) {
        *cursor = cursor.saturating_sub(1);
    }

    #[inline]
    pub fn right(input: &str, cursor: &mut usize) {
        if *cursor < Self::char_len(input) {
            *cursor += 1;
        }
    }

    #[inline]
    pub fn home(cursor: &mut usize) {
        *cursor = 0;
    }

    #[inline]
    pub fn end(input: &str, cursor: &mut usize) {
        *cursor = Self::char_len(input);
    }

    /// Handle character input - insert at cursor
    #[inline]
    pub fn insert_char(input: &mut String, cursor: &mut usize, c: char) {
        let idx = Self::byte_index(input, *cursor);
        input.insert(idx, c);
        *cursor += 1;
    }
}
