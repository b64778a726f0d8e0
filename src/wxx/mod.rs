//! Core `.wxx` conversion module.
//!
//! Import runs the layers outside-in, export runs them inside-out:
//!
//! ```text
//! bytes ─gzip─▶ UTF-16BE ─BOM─▶ UTF-8 XML ─version─▶ wire structs ─translate─▶ Map
//! ```

pub mod codec;
pub mod format;
pub mod types;

use log::info;

use codec::envelope;
use format::v173::V173;
use format::version;
pub use types::error::{ColorError, ColorErrorKind, Result, TileError, WxxError};
use types::models::Map;
use types::schema::WireSchema;

/// Reads a `.wxx` file image into the canonical model.
///
/// # Errors
/// Returns an error if:
/// - the gzip stream is corrupt
/// - the payload is not BOM-prefixed big-endian UTF-16
/// - the XML header line is missing
/// - the schema version is missing or unsupported
/// - any field fails to decode
pub fn import(data: &[u8]) -> Result<Map> {
    info!("Importing {} byte map file", data.len());
    let text = envelope::decode(data)?;
    import_xml(&text)
}

/// Decodes the UTF-8 XML stage of a `.wxx` file, header line included.
pub fn import_xml(text: &str) -> Result<Map> {
    version::decode(text)
}

/// Writes the canonical model as a `.wxx` file image using schema 1.73.
///
/// # Errors
/// Returns an error if a tile resource is out of range or compression fails.
pub fn export(map: &Map) -> Result<Vec<u8>> {
    let text = export_xml(map)?;
    let data = envelope::encode(text.as_bytes())?;
    info!("Exported map file: {} bytes", data.len());
    Ok(data)
}

/// Renders the canonical model as UTF-8 XML text, header line included.
pub fn export_xml(map: &Map) -> Result<String> {
    V173::encode(map)
}
