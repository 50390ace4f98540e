//! Frequency analysis of word-like runs.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static RE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").unwrap());

/// A word-like run and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub word: String,
    pub count: usize,
}

/// Count maximal word runs of at least `min_chars` characters.
///
/// Results come back in first-occurrence order, which the dictionary
/// builder relies on to break frequency ties.
pub fn analyze(text: &str, min_chars: usize) -> Vec<Candidate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut candidates: Vec<Candidate> = Vec::new();

    for m in RE_WORD.find_iter(text) {
        let word = m.as_str();
        if word.chars().count() < min_chars {
            continue;
        }
        match index.get(word) {
            Some(&i) => candidates[i].count += 1,
            None => {
                index.insert(word, candidates.len());
                candidates.push(Candidate { word: word.to_string(), count: 1 });
            }
        }
    }
    candidates
}
