use serde::{Deserialize, Serialize};
use std::fmt;

/// Escape character that introduces a code in a token stream.
/// Written twice, it stands for itself.
pub const MARKER: char = '\u{1A}';
pub(crate) const MARKER_STR: &str = "\u{1A}";

/// A one-byte token code. The full code space is 256 entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Code(pub u8);

impl Code {
    /// Dictionary-listing form, e.g. `T1F`.
    pub fn label(self) -> String {
        format!("T{:02X}", self.0)
    }

    /// Parse the dictionary-listing form.
    pub fn from_label(label: &str) -> Option<Self> {
        let hex = label.strip_prefix('T')?;
        if hex.len() != 2 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u8::from_str_radix(hex, 16).ok().map(Code)
    }

    /// Token-stream form: marker followed by two hex digits.
    pub fn token(self) -> String {
        let mut s = String::with_capacity(3);
        self.push_token(&mut s);
        s
    }

    pub(crate) fn push_token(self, out: &mut String) {
        use std::fmt::Write;
        out.push(MARKER);
        let _ = write!(out, "{:02X}", self.0);
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{:02X}", self.0)
    }
}

/// A code bound to the literal substring it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub code: Code,
    pub pattern: String,
}

impl TokenEntry {
    pub fn new(code: Code, pattern: impl Into<String>) -> Self {
        Self { code, pattern: pattern.into() }
    }
}
