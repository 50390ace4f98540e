//! Per-document dynamic dictionary.

use std::collections::HashSet;
use tracing::warn;

use crate::analyzer::Candidate;
use crate::error::{CodecError, Result};
use crate::static_table::STATIC_CODE_END;
use crate::types::{Code, TokenEntry, MARKER};

/// Codes assigned to one document, in assignment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicDictionary {
    entries: Vec<TokenEntry>,
    /// Eligible candidates were left over when the code space ran out.
    pub truncated: bool,
}

impl DynamicDictionary {
    /// Rebuild a dictionary from a container listing.
    pub fn from_entries(entries: Vec<TokenEntry>) -> Result<Self> {
        let mut codes = HashSet::new();
        let mut patterns = HashSet::new();
        for entry in &entries {
            if entry.code.0 <= STATIC_CODE_END {
                return Err(CodecError::parse(format!(
                    "dictionary code {} is in the static range",
                    entry.code
                )));
            }
            if entry.pattern.is_empty() {
                return Err(CodecError::parse(format!("empty pattern for {}", entry.code)));
            }
            if entry.pattern.contains(MARKER) {
                return Err(CodecError::parse(format!(
                    "pattern for {} contains the code marker",
                    entry.code
                )));
            }
            if !codes.insert(entry.code) {
                return Err(CodecError::parse(format!("duplicate code {}", entry.code)));
            }
            if !patterns.insert(entry.pattern.as_str()) {
                return Err(CodecError::parse(format!(
                    "duplicate pattern {:?}",
                    entry.pattern
                )));
            }
        }
        Ok(Self { entries, truncated: false })
    }

    pub fn entries(&self) -> &[TokenEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assign codes `start..=max` to candidates seen at least `min_frequency` times.
///
/// Candidates are taken by descending count; equal counts keep the order
/// the analyzer produced them in. Running out of codes truncates the
/// dictionary instead of failing.
pub fn build(candidates: &[Candidate], start: u8, max: u8, min_frequency: usize) -> DynamicDictionary {
    let mut eligible: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| c.count >= min_frequency)
        .collect();
    // stable: ties stay in first-occurrence order
    eligible.sort_by(|a, b| b.count.cmp(&a.count));

    let budget = if start > max { 0 } else { (max - start) as usize + 1 };
    let truncated = eligible.len() > budget;
    if truncated {
        warn!(
            eligible = eligible.len(),
            budget,
            "dynamic code space exhausted, dropping lower-frequency candidates"
        );
    }

    let entries = eligible
        .into_iter()
        .zip(start..=max)
        .map(|(c, code)| TokenEntry::new(Code(code), c.word.clone()))
        .collect();

    DynamicDictionary { entries, truncated }
}
