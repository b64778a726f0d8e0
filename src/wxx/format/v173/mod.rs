//! Worldographer schema 1.73.
//!
//! ```text
//! XML text ──xml::parse_document──▶ Element ──WireMap::from_element──▶ WireMap
//!     ▲                                                                   │
//!  writer::render                                            decode::wire_to_canonical
//!     │                                                                   ▼
//! WireMap ◀────────────────── encode::canonical_to_wire ───────────────  Map
//! ```

pub mod decode;
pub mod encode;
pub mod wire;
pub mod writer;

use log::info;

use crate::wxx::format::xml::parse_document;
use crate::wxx::types::error::Result;
use crate::wxx::types::models::Map;
use crate::wxx::types::schema::WireSchema;
use wire::WireMap;

pub(crate) const V173_VERSION: &str = "1.73";

/// Zero-cost marker for schema 1.73.
#[derive(Debug)]
pub struct V173;

impl WireSchema for V173 {
    const VERSION: &'static str = V173_VERSION;

    fn decode(xml: &str) -> Result<Map> {
        let root = parse_document(xml)?;
        let wire = WireMap::from_element(&root)?;
        decode::wire_to_canonical(&wire)
    }

    fn encode(map: &Map) -> Result<String> {
        let wire = encode::canonical_to_wire(map)?;
        let text = writer::render(&wire);
        info!("Rendered schema {} document: {} bytes", Self::VERSION, text.len());
        Ok(text)
    }
}
