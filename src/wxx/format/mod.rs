//! Document layer: everything between the UTF-8 text and the canonical model.
//!
//! - [`version`]: header check and schema dispatch
//! - [`xml`]: element tree reader and escaping helpers
//! - [`tiles`]: per-tile line grammar of `<tilerow>` text
//! - [`terrain`]: the `<terrainmap>` palette string
//! - [`v173`]: the 1.73 wire schema and its translators

pub mod terrain;
pub mod tiles;
pub mod v173;
pub mod version;
pub mod xml;
