// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Charset label resolution

use encoding_rs::{Encoding, REPLACEMENT, UTF_16BE, UTF_16LE};

use crate::error::{Error, Result};

/// Resolve a charset label (`utf-8`, `ISO-8859-1`, `windows-1252`, ...)
pub fn lookup(label: &str) -> Result<&'static Encoding> {
    let label = label.trim();
    if label.is_empty() {
        return Err(Error::invalid_argument("Null/Empty charset"));
    }

    match Encoding::for_label(label.as_bytes()) {
        Some(encoding) if encoding != REPLACEMENT => Ok(encoding),
        _ => Err(Error::UnsupportedCharset(label.to_string())),
    }
}

/// Encode `text` with `encoding`. Unmappable characters become numeric
/// character references, matching what browsers submit.
///
/// encoding_rs has no UTF-16 encoder, so those two are written here without
/// a byte order mark. The bare `utf-16` label resolves to little endian.
pub fn encode(encoding: &'static Encoding, text: &str) -> Vec<u8> {
    if encoding == UTF_16LE {
        return text.encode_utf16().flat_map(u16::to_le_bytes).collect();
    }
    if encoding == UTF_16BE {
        return text.encode_utf16().flat_map(u16::to_be_bytes).collect();
    }

    let (bytes, _, _) = encoding.encode(text);
    bytes.into_owned()
}
