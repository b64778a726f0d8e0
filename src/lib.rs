//! # wxx-codec
//!
//! Reader and writer for Worldographer `.wxx` map files.
//! A `.wxx` file is gzip-compressed, BOM-prefixed UTF-16BE XML; this crate converts
//! it to and from a typed [`Map`] while keeping the number and color formatting the
//! editor expects. Schema version 1.73 is supported.
pub mod wxx;

// Re-export the main types for convenience
pub use wxx::{
    export,
    export_xml,
    import,
    import_xml,
    Result,
    WxxError,
    types::models::{
        Map,
        Rgba,
        Tile,
        Resources,
        TerrainMap,
    },
};
