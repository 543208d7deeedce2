//! Utility modules

pub mod text;

pub use text::{
    char_type, is_line_terminator, is_punctuation, is_word_boundary, normalize_line_endings,
    CharType, LINE_TERMINATOR,
};
