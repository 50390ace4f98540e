//! Markqant — reversible dictionary codec for persona and session-context text.
//!
//! Stages:
//! 1. Static token table — structural markdown substrings
//! 2. Frequency analysis — word runs worth a code
//! 3. Dynamic dictionary — per-document codes, bounded code space
//! 4. Substitution — single-pass leftmost-longest tokenizer
//! 5. Secondary compression — zlib when it pays off
//! 6. Container — versioned text format carrying its own dictionary

pub mod analyzer;
pub mod codec;
pub mod config;
pub mod container;
pub mod dictionary;
pub mod error;
pub mod secondary;
pub mod snapshot;
pub mod static_table;
pub mod substitution;
pub mod types;

pub use codec::{compress, decompress, MarkqantCodec};
pub use config::CodecConfig;
pub use container::{Container, DecodedDocument, Flag, Header, Payload};
pub use dictionary::DynamicDictionary;
pub use error::{CodecError, Result};
pub use types::{Code, TokenEntry, MARKER};
