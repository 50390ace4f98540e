//! Compress/decompress facade tying the stages together.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::analyzer;
use crate::config::CodecConfig;
use crate::container::{Container, DecodedDocument};
use crate::dictionary;
use crate::error::{CodecError, Result};
use crate::secondary;
use crate::substitution::{self, SymbolTable};

/// Stateless codec. Holds policy only; every call builds its own dictionary.
#[derive(Debug, Clone, Default)]
pub struct MarkqantCodec {
    config: CodecConfig,
}

impl MarkqantCodec {
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress `text` into a serialized container stamped with the current time.
    pub fn compress(&self, text: &str) -> Result<String> {
        self.compress_at(text, Utc::now())
    }

    /// Compress with an explicit timestamp; identical inputs give identical output.
    pub fn compress_at(&self, text: &str, timestamp: DateTime<Utc>) -> Result<String> {
        Ok(self.encode_container(text, timestamp)?.serialize())
    }

    pub fn encode_container(&self, text: &str, timestamp: DateTime<Utc>) -> Result<Container> {
        let cfg = &self.config;
        let candidates = analyzer::analyze(text, cfg.min_candidate_chars);
        let dynamic = dictionary::build(
            &candidates,
            cfg.dynamic_code_start,
            cfg.max_code,
            cfg.min_frequency,
        );
        let table = SymbolTable::new(&dynamic)?;
        let stream = substitution::encode(text, &table);

        if cfg.verify_round_trip && substitution::decode(&stream, &table)? != text {
            return Err(CodecError::decode("token stream does not reproduce the input"));
        }

        debug!(
            original = text.len(),
            stream = stream.len(),
            candidates = candidates.len(),
            dynamic = dynamic.len(),
            truncated = dynamic.truncated,
            "token stream built"
        );

        let packed = secondary::maybe_compress(&stream, cfg.secondary_threshold);
        Ok(Container::new(text.len(), stream, dynamic, packed, timestamp))
    }

    pub fn decompress(&self, input: &str) -> Result<DecodedDocument> {
        decompress(input)
    }
}

/// Compress with the default policy.
pub fn compress(text: &str) -> Result<String> {
    MarkqantCodec::default().compress(text)
}

/// Parse and decode a container. Needs no codec state.
pub fn decompress(input: &str) -> Result<DecodedDocument> {
    Container::parse(input)?.decode()
}
