//! Text encoding detection and byte-exact round-tripping.
//!
//! Resource scripts are 16-bit text and assembly metadata is 8-bit text;
//! both must be rewritten in exactly the encoding they were read in, byte-
//! order mark included.

use serde::Deserialize;

/// Text encoding of a synchronization target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// 8-bit encoding (default).
    #[default]
    Utf8,
    /// 16-bit little-endian code units.
    Utf16Le,
    /// 16-bit big-endian code units.
    Utf16Be,
}

/// A concrete file encoding: the code-unit scheme plus whether the file
/// opens with a byte-order mark.
///
/// `encode(decode(bytes))` reproduces the original bytes exactly for any
/// well-formed input, so content outside the rewritten fields survives a
/// round trip untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileEncoding {
    pub encoding: TextEncoding,
    pub bom: bool,
}

/// Errors produced when decoding a target file.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("invalid UTF-16: {0}")]
    InvalidUtf16(String),

    #[error("UTF-16 content has an odd number of bytes")]
    OddLength,
}

impl FileEncoding {
    /// Detect the encoding of a file from its byte-order mark, assuming
    /// `fallback` (without a mark) when none is present.
    pub fn detect(bytes: &[u8], fallback: TextEncoding) -> Self {
        if bytes.starts_with(&[0xFF, 0xFE]) {
            return Self {
                encoding: TextEncoding::Utf16Le,
                bom: true,
            };
        }
        if bytes.starts_with(&[0xFE, 0xFF]) {
            return Self {
                encoding: TextEncoding::Utf16Be,
                bom: true,
            };
        }
        if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            return Self {
                encoding: TextEncoding::Utf8,
                bom: true,
            };
        }
        Self {
            encoding: fallback,
            bom: false,
        }
    }

    /// Decode file bytes, skipping the byte-order mark when present.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        let content = bytes.get(self.bom_bytes().len()..).unwrap_or(&[]);
        match self.encoding {
            TextEncoding::Utf8 => String::from_utf8(content.to_vec())
                .map_err(|e| DecodeError::InvalidUtf8(e.to_string())),
            TextEncoding::Utf16Le => decode_utf16(content, u16::from_le_bytes),
            TextEncoding::Utf16Be => decode_utf16(content, u16::from_be_bytes),
        }
    }

    /// Encode content back to bytes, re-emitting the byte-order mark the
    /// file was read with.
    pub fn encode(&self, content: &str) -> Vec<u8> {
        let mut bytes = self.bom_bytes().to_vec();
        match self.encoding {
            TextEncoding::Utf8 => bytes.extend_from_slice(content.as_bytes()),
            TextEncoding::Utf16Le => {
                bytes.extend(content.encode_utf16().flat_map(|unit| unit.to_le_bytes()))
            }
            TextEncoding::Utf16Be => {
                bytes.extend(content.encode_utf16().flat_map(|unit| unit.to_be_bytes()))
            }
        }
        bytes
    }

    fn bom_bytes(&self) -> &'static [u8] {
        if !self.bom {
            return &[];
        }
        match self.encoding {
            TextEncoding::Utf8 => &[0xEF, 0xBB, 0xBF],
            TextEncoding::Utf16Le => &[0xFF, 0xFE],
            TextEncoding::Utf16Be => &[0xFE, 0xFF],
        }
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String, DecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::OddLength);
    }
    let units = bytes
        .chunks_exact(2)
        .map(|chunk| to_unit([chunk[0], chunk[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|e| DecodeError::InvalidUtf16(e.to_string()))
}
