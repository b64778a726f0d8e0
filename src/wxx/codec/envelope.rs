//! The outer layers of a `.wxx` file: gzip around big-endian UTF-16 text.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ gzip                                 │
//! │  ┌────────┬─────────────────────────┐│
//! │  │ FE FF  │ UTF-16BE code units     ││
//! │  └────────┴─────────────────────────┘│
//! └──────────────────────────────────────┘
//! ```

use std::io::{Read, Write};

use byteorder::{BigEndian, WriteBytesExt};
use encoding_rs::UTF_16BE;
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use log::{debug, trace, warn};

use crate::wxx::types::error::{Result, WxxError};

/// Big-endian byte order mark.
pub const BOM_BE: [u8; 2] = [0xFE, 0xFF];

/// Little-endian byte order mark, rejected on input.
pub const BOM_LE: [u8; 2] = [0xFF, 0xFE];

/// Unwraps a `.wxx` payload into UTF-8 text.
///
/// # Errors
/// Any failure of [`gzip_decode`] or [`utf16_to_utf8`].
pub fn decode(data: &[u8]) -> Result<String> {
    let utf16 = gzip_decode(data)?;
    utf16_to_utf8(&utf16)
}

/// Wraps UTF-8 text into a `.wxx` payload.
///
/// # Errors
/// Any failure of [`utf8_to_utf16`] or [`gzip_encode`].
pub fn encode(text: &[u8]) -> Result<Vec<u8>> {
    let utf16 = utf8_to_utf16(text)?;
    gzip_encode(&utf16)
}

/// Inflates a gzip stream. Concatenated members are read in sequence.
///
/// # Errors
/// Returns `DecompressionError` for empty input or a corrupt stream.
pub fn gzip_decode(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(WxxError::DecompressionError("gzip: empty input".to_string()));
    }
    trace!("Inflating {} gzip bytes", data.len());
    let mut decoder = MultiGzDecoder::new(data);
    let mut output = Vec::with_capacity(data.len() * 4);
    decoder
        .read_to_end(&mut output)
        .map_err(|e| WxxError::DecompressionError(format!("gzip: {}", e)))?;
    debug!("Inflated {} bytes to {} bytes", data.len(), output.len());
    Ok(output)
}

/// Deflates bytes into a single gzip member at the default level.
///
/// # Errors
/// Returns `CompressionError` if the encoder fails.
pub fn gzip_encode(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| WxxError::CompressionError(format!("gzip: {}", e)))?;
    let output = encoder
        .finish()
        .map_err(|e| WxxError::CompressionError(format!("gzip: {}", e)))?;
    debug!("Deflated {} bytes to {} bytes", data.len(), output.len());
    Ok(output)
}

/// Decodes BOM-prefixed big-endian UTF-16 into UTF-8.
///
/// Unpaired surrogates are replaced with U+FFFD.
///
/// # Errors
/// - `MissingFinalByte` when the byte count is odd
/// - `NotBigEndian` when the data starts with `FF FE`
/// - `MissingBom` when the data starts with anything else
pub fn utf16_to_utf8(data: &[u8]) -> Result<String> {
    if data.len() % 2 != 0 {
        return Err(WxxError::MissingFinalByte(data.len()));
    }
    if data.starts_with(&BOM_LE) {
        return Err(WxxError::NotBigEndian);
    }
    if !data.starts_with(&BOM_BE) {
        return Err(WxxError::MissingBom);
    }

    let (text, had_errors) = UTF_16BE.decode_without_bom_handling(&data[BOM_BE.len()..]);
    if had_errors {
        warn!("UTF-16 payload contains unpaired surrogates; replaced with U+FFFD");
    }
    trace!("Decoded {} UTF-16 bytes to {} UTF-8 bytes", data.len(), text.len());
    Ok(text.into_owned())
}

/// Encodes UTF-8 as BOM-prefixed big-endian UTF-16.
///
/// # Errors
/// Returns `InvalidUtf8` if `data` is not valid UTF-8.
pub fn utf8_to_utf16(data: &[u8]) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(data)?;
    let mut output = Vec::with_capacity(BOM_BE.len() + text.len() * 2);
    output.extend_from_slice(&BOM_BE);
    for unit in text.encode_utf16() {
        output.write_u16::<BigEndian>(unit)?;
    }
    trace!("Encoded {} UTF-8 bytes to {} UTF-16 bytes", data.len(), output.len());
    Ok(output)
}
