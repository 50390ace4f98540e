//! Self-describing container: header line, dictionary listing, separator, payload.
//!
//! ```text
//! MARKQANT_V1 <timestamp> <orig-bytes> <stream-bytes> [-zlib]
//! T10=pattern
//! ---
//! <token stream, or hex of its zlib form>
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::LazyLock;
use tracing::debug;

use crate::dictionary::DynamicDictionary;
use crate::error::{CodecError, Result};
use crate::secondary::{self, SecondaryOutput};
use crate::substitution::{self, SymbolTable};
use crate::types::{Code, TokenEntry};

pub const FORMAT_TAG: &str = "MARKQANT";
pub const FORMAT_VERSION: u32 = 1;
pub const SEPARATOR: &str = "---";
/// Name reported when the document has no `# <Name> Persona` heading.
pub const UNKNOWN_NAME: &str = "Unknown";

static RE_PERSONA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\s+(.+)\s+Persona").unwrap());

/// Header flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flag {
    /// Payload is the hex-encoded zlib form of the token stream.
    Zlib,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zlib => "-zlib",
        }
    }

    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "-zlib" => Some(Self::Zlib),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    /// Byte length of the original text.
    pub original_size: usize,
    /// Byte length of the token stream before any zlib pass.
    pub payload_size: usize,
    pub flags: Vec<Flag>,
}

impl Header {
    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }

    fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(CodecError::parse(format!(
                "header has {} fields, expected at least 4",
                fields.len()
            )));
        }

        let version = fields[0]
            .strip_prefix(FORMAT_TAG)
            .and_then(|rest| rest.strip_prefix("_V"))
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(|| CodecError::parse(format!("unrecognized format tag {:?}", fields[0])))?;
        if version != FORMAT_VERSION {
            return Err(CodecError::parse(format!("unsupported format version {version}")));
        }

        let timestamp = DateTime::parse_from_rfc3339(fields[1])
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| CodecError::parse(format!("bad timestamp {:?}: {e}", fields[1])))?;
        let original_size = parse_size(fields[2], "original size")?;
        let payload_size = parse_size(fields[3], "payload size")?;

        let mut flags = Vec::new();
        for field in &fields[4..] {
            let flag = Flag::from_field(field)
                .ok_or_else(|| CodecError::parse(format!("unknown flag {field:?}")))?;
            if !flags.contains(&flag) {
                flags.push(flag);
            }
        }

        Ok(Self { version, timestamp, original_size, payload_size, flags })
    }

    fn write_to(&self, out: &mut String) {
        let _ = write!(
            out,
            "{FORMAT_TAG}_V{} {} {} {}",
            self.version,
            self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            self.original_size,
            self.payload_size,
        );
        for flag in &self.flags {
            out.push(' ');
            out.push_str(flag.as_str());
        }
        out.push('\n');
    }
}

fn parse_size(field: &str, what: &str) -> Result<usize> {
    field
        .parse()
        .map_err(|_| CodecError::parse(format!("bad {what} {field:?}")))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Tokens(String),
    Zlib(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub header: Header,
    pub dictionary: DynamicDictionary,
    pub payload: Payload,
}

/// Everything recovered from a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDocument {
    pub name: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub original_size: usize,
    pub payload_size: usize,
    pub flags: Vec<Flag>,
    pub dictionary: DynamicDictionary,
}

impl Container {
    pub fn new(
        original_size: usize,
        token_stream: String,
        dictionary: DynamicDictionary,
        secondary: SecondaryOutput,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let payload_size = token_stream.len();
        let (payload, flags) = if secondary.applied {
            (Payload::Zlib(secondary.payload), vec![Flag::Zlib])
        } else {
            (Payload::Tokens(token_stream), Vec::new())
        };
        Self {
            header: Header {
                version: FORMAT_VERSION,
                timestamp,
                original_size,
                payload_size,
                flags,
            },
            dictionary,
            payload,
        }
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.header.write_to(&mut out);
        for entry in self.dictionary.entries() {
            let _ = writeln!(out, "{}={}", entry.code, entry.pattern);
        }
        out.push_str(SEPARATOR);
        out.push('\n');
        match &self.payload {
            Payload::Tokens(stream) => out.push_str(stream),
            Payload::Zlib(bytes) => out.push_str(&hex::encode(bytes)),
        }
        out
    }

    pub fn parse(input: &str) -> Result<Self> {
        let (header_line, mut rest) = input
            .split_once('\n')
            .ok_or_else(|| CodecError::parse("missing separator line"))?;
        let header = Header::parse(header_line.trim_end_matches('\r'))?;

        let mut entries = Vec::new();
        let body = loop {
            let (line, tail) = match rest.split_once('\n') {
                Some(split) => split,
                None if rest.trim_end_matches('\r') == SEPARATOR => break "",
                None => return Err(CodecError::parse("missing separator line")),
            };
            let line = line.trim_end_matches('\r');
            if line == SEPARATOR {
                break tail;
            }
            entries.push(parse_entry(line)?);
            rest = tail;
        };
        let dictionary = DynamicDictionary::from_entries(entries)?;

        let payload = if header.has_flag(Flag::Zlib) {
            let bytes = hex::decode(body.trim_end())
                .map_err(|e| CodecError::decode(format!("payload is not valid hex: {e}")))?;
            Payload::Zlib(bytes)
        } else {
            Payload::Tokens(body.to_string())
        };

        Ok(Self { header, dictionary, payload })
    }

    /// The token stream, inflated if needed.
    pub fn token_stream(&self) -> Result<String> {
        let stream = match &self.payload {
            Payload::Tokens(stream) => stream.clone(),
            Payload::Zlib(bytes) => String::from_utf8(secondary::inflate(bytes)?)
                .map_err(|e| CodecError::decode(format!("token stream is not UTF-8: {e}")))?,
        };
        if stream.len() != self.header.payload_size {
            return Err(CodecError::decode(format!(
                "token stream is {} bytes, header says {}",
                stream.len(),
                self.header.payload_size
            )));
        }
        Ok(stream)
    }

    pub fn decode(&self) -> Result<DecodedDocument> {
        let stream = self.token_stream()?;
        let table = SymbolTable::new(&self.dictionary)?;
        let text = substitution::decode(&stream, &table)?;
        if text.len() != self.header.original_size {
            return Err(CodecError::decode(format!(
                "decoded {} bytes, header says {}",
                text.len(),
                self.header.original_size
            )));
        }
        debug!(bytes = text.len(), dynamic = self.dictionary.len(), "container decoded");

        Ok(DecodedDocument {
            name: recover_name(&text),
            text,
            timestamp: self.header.timestamp,
            original_size: self.header.original_size,
            payload_size: self.header.payload_size,
            flags: self.header.flags.clone(),
            dictionary: self.dictionary.clone(),
        })
    }

    /// Serialized size over original size.
    pub fn ratio(&self) -> f64 {
        if self.header.original_size == 0 {
            return 1.0;
        }
        self.serialize().len() as f64 / self.header.original_size as f64
    }
}

fn parse_entry(line: &str) -> Result<TokenEntry> {
    let (label, pattern) = line
        .split_once('=')
        .ok_or_else(|| CodecError::parse(format!("malformed dictionary line {line:?}")))?;
    let code = Code::from_label(label)
        .ok_or_else(|| CodecError::parse(format!("malformed code {label:?}")))?;
    Ok(TokenEntry::new(code, pattern))
}

/// Name from a leading `# <Name> Persona` heading, or [`UNKNOWN_NAME`].
pub fn recover_name(text: &str) -> String {
    RE_PERSONA
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}
