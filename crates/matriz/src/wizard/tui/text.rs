//! Char-indexed editing of the answer buffer.
//!
//! The cursor counts characters, not bytes, so accented input never lands
//! inside a UTF-8 sequence.

/// Byte offset of the `cursor`-th character (or the end of the text)
fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Insert `c` at the cursor. Returns the new text and cursor.
pub fn insert(text: &str, cursor: usize, c: char) -> (String, usize) {
    let cursor = cursor.min(char_len(text));
    let mut out = text.to_string();
    out.insert(byte_index(text, cursor), c);
    (out, cursor + 1)
}

/// Delete the character before the cursor (Backspace)
pub fn delete_before(text: &str, cursor: usize) -> (String, usize) {
    let cursor = cursor.min(char_len(text));
    if cursor == 0 {
        return (text.to_string(), 0);
    }
    let mut out = text.to_string();
    out.remove(byte_index(text, cursor - 1));
    (out, cursor - 1)
}

/// Delete the character under the cursor (Delete)
pub fn delete_at(text: &str, cursor: usize) -> (String, usize) {
    let cursor = cursor.min(char_len(text));
    let mut out = text.to_string();
    if cursor < char_len(text) {
        out.remove(byte_index(text, cursor));
    }
    (out, cursor)
}

/// Cursor at the start of its line
pub fn line_start(text: &str, cursor: usize) -> usize {
    let before: Vec<char> = text.chars().take(cursor).collect();
    before
        .iter()
        .rposition(|&c| c == '\n')
        .map(|i| i + 1)
        .unwrap_or(0)
}

/// Cursor at the end of its line
pub fn line_end(text: &str, cursor: usize) -> usize {
    let rest = text.chars().skip(cursor).take_while(|&c| c != '\n').count();
    (cursor + rest).min(char_len(text))
}

/// Zero-based line the cursor sits on
pub fn cursor_line(text: &str, cursor: usize) -> usize {
    text.chars().take(cursor).filter(|&c| c == '\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_after_accented_chars() {
        let (text, cursor) = insert("Percepcin", 8, 'ó');
        assert_eq!(text, "Percepción");
        assert_eq!(cursor, 9);

        let (text, cursor) = insert("año", 3, '?');
        assert_eq!(text, "año?");
        assert_eq!(cursor, 4);
    }

    #[test]
    fn test_backspace_removes_whole_char() {
        let (text, cursor) = delete_before("¿Qué?", 4);
        assert_eq!(text, "¿Qu?");
        assert_eq!(cursor, 3);
        assert_eq!(delete_before("abc", 0), ("abc".to_string(), 0));
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        assert_eq!(delete_at("ñu", 2), ("ñu".to_string(), 2));
        assert_eq!(delete_at("ñu", 0), ("u".to_string(), 0));
    }

    #[test]
    fn test_cursor_past_end_is_clamped() {
        let (text, cursor) = insert("ab", 10, 'c');
        assert_eq!(text, "abc");
        assert_eq!(cursor, 3);
    }

    #[test]
    fn test_line_navigation() {
        let text = "uno\ndós\ntres";
        assert_eq!(line_start(text, 6), 4);
        assert_eq!(line_end(text, 5), 7);
        assert_eq!(line_start(text, 2), 0);
        assert_eq!(line_end(text, 9), 12);
        assert_eq!(cursor_line(text, 9), 2);
    }
}
