//! Session-context snapshots: any serializable value stored as a container.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{self, MarkqantCodec};
use crate::error::Result;

/// Pretty-print `value` as JSON and compress it.
pub fn snapshot<T: Serialize>(codec: &MarkqantCodec, value: &T) -> Result<String> {
    let text = serde_json::to_string_pretty(value)?;
    codec.compress(&text)
}

/// Decompress a snapshot container and deserialize its JSON body.
pub fn restore<T: DeserializeOwned>(input: &str) -> Result<T> {
    let doc = codec::decompress(input)?;
    Ok(serde_json::from_str(&doc.text)?)
}
