//! Versioned wire schemas.

use super::error::Result;
use super::models::Map;

/// A Worldographer XML schema revision the crate can read and write.
///
/// Implementors are zero-sized markers; the dispatcher picks one by comparing
/// the root element's `version` attribute against [`WireSchema::VERSION`].
pub trait WireSchema {
    /// The exact `version` attribute value this schema handles.
    const VERSION: &'static str;

    /// Translates an XML document (header line already removed) into the canonical model.
    fn decode(xml: &str) -> Result<Map>;

    /// Renders the canonical model as a complete XML document, header line included.
    fn encode(map: &Map) -> Result<String>;
}
