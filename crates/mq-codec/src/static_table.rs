//! Static token table: structural markdown substrings shared by every document.

use std::sync::LazyLock;

use crate::types::{Code, TokenEntry};

/// Highest code reserved for static tokens.
pub const STATIC_CODE_END: u8 = 0x0E;

const STATIC_TOKENS: &[(u8, &str)] = &[
    (0x00, "# "),
    (0x01, "## "),
    (0x02, "### "),
    (0x03, "#### "),
    (0x04, "```"),
    (0x05, "```\n"),
    (0x06, "- "),
    (0x07, "* "),
    (0x08, "1. "),
    (0x09, "> "),
    (0x0A, "**"),
    (0x0B, "*"),
    (0x0C, "---"),
    (0x0D, "\n\n"),
    (0x0E, "| "),
];

static STATIC_TABLE: LazyLock<Vec<TokenEntry>> = LazyLock::new(|| {
    STATIC_TOKENS
        .iter()
        .map(|(code, pattern)| TokenEntry::new(Code(*code), *pattern))
        .collect()
});

/// The static table, in code order.
pub fn static_table() -> &'static [TokenEntry] {
    &STATIC_TABLE
}

/// Non-overlapping occurrence count of every static pattern present in `text`.
pub fn analyze_static(text: &str) -> Vec<(Code, usize)> {
    static_table()
        .iter()
        .filter_map(|entry| {
            let count = text.matches(entry.pattern.as_str()).count();
            (count > 0).then_some((entry.code, count))
        })
        .collect()
}
