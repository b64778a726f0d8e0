//! Value-level codecs shared by every schema version.
//!
//! - [`envelope`]: gzip and UTF-16 framing of the whole file
//! - [`number`]: real number rendering
//! - [`color`]: RGBA attribute variants

pub mod color;
pub mod envelope;
pub mod number;
