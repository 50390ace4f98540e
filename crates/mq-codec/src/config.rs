//! Codec policy constants, configurable per codec instance.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::static_table::STATIC_CODE_END;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Minimum length, in characters, of a dynamic-token candidate.
    pub min_candidate_chars: usize,
    /// Minimum occurrence count for a candidate to receive a code.
    pub min_frequency: usize,
    /// First dynamic code.
    pub dynamic_code_start: u8,
    /// Last usable dynamic code (inclusive).
    pub max_code: u8,
    /// Token streams at or below this many bytes are never zlib-compressed.
    pub secondary_threshold: usize,
    /// Decode the token stream after encoding and compare with the input.
    pub verify_round_trip: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            min_candidate_chars: 6,
            min_frequency: 3,
            dynamic_code_start: 0x10,
            max_code: 0xFF,
            secondary_threshold: 1000,
            verify_round_trip: true,
        }
    }
}

impl CodecConfig {
    /// Number of dynamic codes available per document.
    pub fn dynamic_budget(&self) -> usize {
        if self.dynamic_code_start > self.max_code {
            return 0;
        }
        (self.max_code - self.dynamic_code_start) as usize + 1
    }

    pub fn validate(&self) -> Result<()> {
        if self.dynamic_code_start <= STATIC_CODE_END {
            return Err(CodecError::InvalidTable(format!(
                "dynamic range starts at {:#04x}, inside the static range",
                self.dynamic_code_start
            )));
        }
        if self.dynamic_code_start > self.max_code {
            return Err(CodecError::InvalidTable(format!(
                "dynamic range is empty: start {:#04x} > max {:#04x}",
                self.dynamic_code_start, self.max_code
            )));
        }
        if self.min_candidate_chars == 0 || self.min_frequency == 0 {
            return Err(CodecError::InvalidTable(
                "candidate length and frequency thresholds must be positive".into(),
            ));
        }
        Ok(())
    }
}
