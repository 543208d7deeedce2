//! Character classification for word navigation and line handling

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | '='
            | '+'
            | '*'
            | '&'
            | '|'
            | '!'
            | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '~'
            | '`'
            | '\\'
            | '?'
    ) || (!ch.is_ascii() && is_unicode_punctuation(ch))
}

/// Common non-ASCII punctuation, including the CJK forms an IME produces
fn is_unicode_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '\u{2010}'..='\u{2027}'
            | '\u{3001}'..='\u{3003}'
            | '\u{3008}'..='\u{3011}'
            | '\u{FF01}'..='\u{FF0F}'
            | '\u{FF1A}'..='\u{FF1F}'
            | '\u{00A1}'
            | '\u{00AB}'
            | '\u{00BB}'
            | '\u{00BF}'
    )
}

/// Character type for word navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    /// Whitespace characters (line terminators included)
    Whitespace,
    /// Alphanumeric characters (word characters)
    WordChar,
    /// Punctuation and symbols
    Punctuation,
}

/// Get the character type for word navigation
pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}

/// Check if a character is a word boundary (symbol or whitespace)
pub fn is_word_boundary(ch: char) -> bool {
    ch.is_whitespace() || is_punctuation(ch)
}

/// The only line terminator the buffer recognises
pub const LINE_TERMINATOR: char = '\n';

#[inline]
pub fn is_line_terminator(ch: char) -> bool {
    ch == LINE_TERMINATOR
}

/// Rewrite `\r\n` and lone `\r` as `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
