//! Forward and inverse token substitution.
//!
//! Encoding is one left-to-right, leftmost-longest scan over every
//! pattern at once, so a code is never rescanned and a shorter pattern
//! cannot split a longer one. Literal marker characters in the input are
//! doubled; decoding is the mirror single scan.

use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::HashSet;

use crate::dictionary::DynamicDictionary;
use crate::error::{CodecError, Result};
use crate::static_table::static_table;
use crate::types::{Code, TokenEntry, MARKER, MARKER_STR};

/// Combined static and dynamic code table for one document.
pub struct SymbolTable {
    by_code: Vec<Option<String>>,
    /// Pattern id -> code; the last automaton pattern is the bare marker.
    codes: Vec<Code>,
    matcher: AhoCorasick,
}

impl SymbolTable {
    pub fn new(dynamic: &DynamicDictionary) -> Result<Self> {
        Self::from_entries(static_table().iter().chain(dynamic.entries()))
    }

    /// Build from arbitrary entries, checking that codes and patterns are unique
    /// and that no pattern contains the marker.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a TokenEntry>) -> Result<Self> {
        let mut by_code: Vec<Option<String>> = vec![None; 256];
        let mut codes = Vec::new();
        let mut patterns: Vec<&str> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for entry in entries {
            let pattern = entry.pattern.as_str();
            if pattern.is_empty() {
                return Err(CodecError::InvalidTable(format!("{} has an empty pattern", entry.code)));
            }
            if pattern.contains(MARKER) {
                return Err(CodecError::InvalidTable(format!(
                    "{} pattern contains the code marker",
                    entry.code
                )));
            }
            let slot = &mut by_code[entry.code.0 as usize];
            if slot.is_some() {
                return Err(CodecError::InvalidTable(format!("{} assigned twice", entry.code)));
            }
            if !seen.insert(pattern) {
                return Err(CodecError::InvalidTable(format!("pattern {pattern:?} assigned twice")));
            }
            *slot = Some(pattern.to_string());
            codes.push(entry.code);
            patterns.push(pattern);
        }

        patterns.push(MARKER_STR);

        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| CodecError::InvalidTable(e.to_string()))?;

        Ok(Self { by_code, codes, matcher })
    }

    pub fn pattern(&self, code: Code) -> Option<&str> {
        self.by_code[code.0 as usize].as_deref()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Replace every pattern occurrence in `text` with its code.
pub fn encode(text: &str, table: &SymbolTable) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in table.matcher.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        match table.codes.get(m.pattern().as_usize()) {
            Some(code) => code.push_token(&mut out),
            None => {
                out.push(MARKER);
                out.push(MARKER);
            }
        }
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// Expand every code in `stream` back into its pattern.
pub fn decode(stream: &str, table: &SymbolTable) -> Result<String> {
    let mut out = String::with_capacity(stream.len() * 2);
    let mut rest = stream;

    while let Some(pos) = rest.find(MARKER) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + MARKER.len_utf8()..];
        if let Some(tail) = after.strip_prefix(MARKER) {
            out.push(MARKER);
            rest = tail;
            continue;
        }
        let digits = after
            .get(..2)
            .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| CodecError::decode(format!("malformed code at byte {}", stream.len() - rest.len() + pos)))?;
        let code = u8::from_str_radix(digits, 16)
            .map(Code)
            .map_err(|e| CodecError::decode(e.to_string()))?;
        let pattern = table
            .pattern(code)
            .ok_or_else(|| CodecError::decode(format!("unknown code {code}")))?;
        out.push_str(pattern);
        rest = &after[2..];
    }
    out.push_str(rest);
    Ok(out)
}
