//! RGBA attribute codec.
//!
//! Colors travel as `"R,G,B,A"` text. The editor uses two sentinels for "no color":
//! the word `null` and the default literal `0.0,0.0,0.0,1.0`. Which sentinels a field
//! collapses depends on the field, so the codec comes in several variants.

use crate::wxx::codec::number::format_real;
use crate::wxx::types::error::{ColorError, ColorErrorKind};
use crate::wxx::types::models::Rgba;

/// The text written for opaque black.
pub const DEFAULT_LITERAL: &str = "0.0,0.0,0.0,1.0";

/// The text written for an absent color in nullable fields.
pub const NULL_LITERAL: &str = "null";

const CHANNELS: [&str; 4] = ["red", "green", "blue", "alpha"];

/// Renders a present color as `R,G,B,A`.
pub fn encode_present(color: &Rgba) -> String {
    format!(
        "{},{},{},{}",
        format_real(color.r),
        format_real(color.g),
        format_real(color.b),
        format_real(color.a)
    )
}

/// Absent colors are written as the default literal.
pub fn encode_default(color: Option<&Rgba>) -> String {
    match color {
        Some(color) => encode_present(color),
        None => DEFAULT_LITERAL.to_string(),
    }
}

/// Like [`encode_default`], but anything that renders as the default literal becomes `null`.
pub fn encode_nullable(color: Option<&Rgba>) -> String {
    let text = encode_default(color);
    if text == DEFAULT_LITERAL {
        NULL_LITERAL.to_string()
    } else {
        text
    }
}

/// Absent colors are written as `null`; present colors, default included, are literal.
pub fn encode_zeroable(color: Option<&Rgba>) -> String {
    match color {
        Some(color) => encode_present(color),
        None => NULL_LITERAL.to_string(),
    }
}

/// Decodes a color where the default value means "absent".
///
/// `""`, `null`, the default literal, and any text that parses to exactly `(0,0,0,1)`
/// all decode to `None`.
///
/// # Errors
/// Returns a [`ColorError`] if the text does not have four numeric channels.
pub fn decode_default(text: &str) -> Result<Option<Rgba>, ColorError> {
    if text.is_empty() || text == NULL_LITERAL || text == DEFAULT_LITERAL {
        return Ok(None);
    }
    let color = parse_channels(text)?;
    if color.is_default() {
        return Ok(None);
    }
    Ok(Some(color))
}

/// Decodes a color where an explicit default value is kept.
///
/// Only `""` and `null` decode to `None`.
///
/// # Errors
/// Returns a [`ColorError`] if the text does not have four numeric channels.
pub fn decode_zeroable(text: &str) -> Result<Option<Rgba>, ColorError> {
    if text.is_empty() || text == NULL_LITERAL {
        return Ok(None);
    }
    parse_channels(text).map(Some)
}

fn parse_channels(text: &str) -> Result<Rgba, ColorError> {
    let fields: Vec<&str> = text.split(',').collect();
    if fields.len() != CHANNELS.len() {
        return Err(ColorError {
            text: text.to_string(),
            kind: ColorErrorKind::ChannelCount(fields.len()),
            partial: Rgba::default(),
        });
    }

    let mut values = [0.0f64; 4];
    for (i, field) in fields.iter().enumerate() {
        match field.parse::<f64>() {
            Ok(value) => values[i] = value,
            Err(_) => {
                return Err(ColorError {
                    text: text.to_string(),
                    kind: ColorErrorKind::InvalidChannel {
                        channel: CHANNELS[i],
                        value: field.to_string(),
                    },
                    partial: Rgba::new(values[0], values[1], values[2], values[3]),
                });
            }
        }
    }
    Ok(Rgba::new(values[0], values[1], values[2], values[3]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_value_keeps_parsed_channels() {
        let err = decode_default("0.5,0.25,oops,1.0").unwrap_err();
        assert_eq!(err.partial, Rgba::new(0.5, 0.25, 0.0, 0.0));
        assert_eq!(
            err.kind,
            ColorErrorKind::InvalidChannel { channel: "blue", value: "oops".to_string() }
        );
    }

    #[test]
    fn spelled_out_default_collapses_only_in_default_variant() {
        assert_eq!(decode_default("0,0,0,1").unwrap(), None);
        assert_eq!(decode_zeroable("0,0,0,1").unwrap(), Some(Rgba::DEFAULT));
    }
}
