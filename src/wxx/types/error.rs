//! Error types for the wxx-codec crate.

use thiserror::Error;

use super::models::Rgba;

/// The primary error type for every conversion in this crate.
#[derive(Debug, Error)]
pub enum WxxError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The gzip layer could not be inflated.
    #[error("Decompression failed: {0}")]
    DecompressionError(String),

    /// The gzip layer could not be written.
    #[error("Compression failed: {0}")]
    CompressionError(String),

    /// The UTF-16 payload has an odd number of bytes.
    #[error("missing final byte: UTF-16 payload has odd length {0}")]
    MissingFinalByte(usize),

    /// The payload starts with a little-endian byte order mark.
    #[error("not big-endian UTF-16: found FF FE byte order mark")]
    NotBigEndian,

    /// The payload does not start with the FE FF byte order mark.
    #[error("missing byte order mark")]
    MissingBom,

    /// Text handed to the encoder is not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The decoded text does not start with the expected XML declaration line.
    #[error("missing xml header")]
    MissingXmlHeader,

    /// The root element carries no `version` attribute.
    #[error("map element has no version attribute")]
    MissingVersion,

    /// The root element names a schema version this build cannot translate.
    #[error("unsupported map version: {0:?}")]
    UnsupportedVersion(String),

    /// The XML document is malformed or has the wrong shape.
    #[error("Invalid XML: {0}")]
    Xml(String),

    /// A scalar attribute could not be parsed.
    #[error("{field}: invalid {expected} {value:?}")]
    InvalidValue {
        field: String,
        value: String,
        expected: &'static str,
    },

    /// A color attribute could not be decoded.
    #[error("{field}: {source}")]
    Color {
        field: String,
        #[source]
        source: ColorError,
    },

    /// The terrain table has a label without an index.
    #[error("terrainmap: expected even number of fields, got {0}")]
    OddTerrainTokens(usize),

    /// A terrain index is not an integer.
    #[error("terrainmap: {label:?}: invalid index {value:?}")]
    InvalidTerrainIndex { label: String, value: String },

    /// A tile line failed to decode or encode.
    #[error("tiles: row {row}, column {column}: {source}")]
    Tile {
        row: usize,
        column: usize,
        #[source]
        source: TileError,
    },

    /// A tile row holds more tiles than the grid is high.
    #[error("tiles: row {row} has more than {tiles_high} tiles")]
    TileRowOverflow { row: usize, tiles_high: usize },

    /// The requested operation or format is not available in this build.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// A JSON document could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a color attribute was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorErrorKind {
    #[error("expected 4 channels, got {0}")]
    ChannelCount(usize),

    #[error("channel {channel}: invalid number {value:?}")]
    InvalidChannel { channel: &'static str, value: String },
}

/// A color decode failure.
///
/// `partial` holds the channels that parsed before the failure, the rest are zero.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid color {text:?}: {kind}")]
pub struct ColorError {
    pub text: String,
    pub kind: ColorErrorKind,
    pub partial: Rgba,
}

/// A tile line failure, naming the field that broke.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TileError {
    #[error("values: expected 6/7/11/12, got {0}")]
    FieldCount(usize),

    #[error("{field}: invalid integer {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("elevation: invalid number {0:?}")]
    InvalidElevation(String),

    #[error("{field}: expected \"0\" or \"1\", got {value:?}")]
    InvalidFlag { field: &'static str, value: String },

    #[error("{field}: {value} is outside 0..=100")]
    OutOfRange { field: &'static str, value: i32 },

    #[error("resources: expected \"Z\", got {0:?}")]
    InvalidSentinel(String),

    #[error("customBackgroundColor: {0}")]
    Color(#[from] ColorError),
}

/// A convenience `Result` type alias using the crate's `WxxError` type.
pub type Result<T> = std::result::Result<T, WxxError>;
