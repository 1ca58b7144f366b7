//! Text encodings for index input and output.
//!
//! The rendered index is always written as UTF-16LE with a byte order mark.
//! Input files may be UTF-8 (with or without BOM) or UTF-16 with a BOM, which
//! is what the page extraction scripts produce on some platforms.

use crate::error::{IndexError, Result};
use std::io::{self, Write};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Encode text as UTF-16LE, prefixed with a BOM
pub fn encode_utf16le(text: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + text.len() * 2);
    buf.extend_from_slice(UTF16LE_BOM);
    for unit in text.encode_utf16() {
        buf.extend_from_slice(&unit.to_le_bytes());
    }
    buf
}

/// Write text to `writer` as UTF-16LE with a BOM
pub fn write_utf16le<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    writer.write_all(&encode_utf16le(text))?;
    writer.flush()
}

/// Decode input bytes, honouring a UTF-8 or UTF-16 byte order mark
pub fn decode_input(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(UTF16LE_BOM) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16BE_BOM) {
        return decode_utf16(rest, u16::from_be_bytes);
    }

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8(body.to_vec())
        .map_err(|e| IndexError::input("input is not valid UTF-8 text").with_source(e))
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(IndexError::input("UTF-16 input has an odd number of bytes"));
    }

    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| IndexError::input("input is not valid UTF-16 text").with_source(e))
}
