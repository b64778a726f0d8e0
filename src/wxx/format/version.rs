//! Header validation and schema version dispatch.

use log::{debug, info};

use crate::wxx::format::v173::V173;
use crate::wxx::format::xml::root_attribute;
use crate::wxx::types::error::{Result, WxxError};
use crate::wxx::types::models::Map;
use crate::wxx::types::schema::WireSchema;

/// The exact first line of every document the editor writes.
pub const XML_HEADER: &str = "<?xml version='1.0' encoding='utf-16'?>\n";

/// Strips [`XML_HEADER`] from the decoded text.
///
/// # Errors
/// Returns `MissingXmlHeader` if the text does not start with it.
pub fn strip_header(text: &str) -> Result<&str> {
    text.strip_prefix(XML_HEADER).ok_or(WxxError::MissingXmlHeader)
}

/// Reads the `version` attribute of the root element.
///
/// # Errors
/// - `Xml` if no root element can be read
/// - `MissingVersion` if the root has no `version` attribute
pub fn sniff_version(xml: &str) -> Result<String> {
    root_attribute(xml, "version")?.ok_or(WxxError::MissingVersion)
}

/// Validates the header, detects the schema version and decodes with the matching schema.
///
/// # Errors
/// - `MissingXmlHeader`, `MissingVersion`, `UnsupportedVersion`
/// - any error from the selected schema's decoder
pub fn decode(text: &str) -> Result<Map> {
    let xml = strip_header(text)?;
    let version = sniff_version(xml)?;
    debug!("Document declares schema version {:?}", version);

    if version == V173::VERSION {
        info!("Decoding map with schema {}", V173::VERSION);
        return V173::decode(xml);
    }
    Err(WxxError::UnsupportedVersion(version))
}
