//! The tab-delimited tile grammar used inside `<tilerow>` elements.
//!
//! A row is a run of lines, one tile per line:
//!
//! ```text
//! terrain \t elevation \t icy \t gmOnly \t animal \t resources [\t color]
//! ```
//!
//! `resources` is either the single token `Z` (all zero) or six integers
//! (brick, crops, gems, lumber, metals, rock). The field count selects the shape:
//!
//! | fields | resources | color |
//! |--------|-----------|-------|
//! | 6      | `Z`       | no    |
//! | 7      | `Z`       | yes   |
//! | 11     | six ints  | no    |
//! | 12     | six ints  | yes   |

use log::trace;

use crate::wxx::codec::color;
use crate::wxx::codec::number::format_real_bare;
use crate::wxx::types::error::{Result, TileError, WxxError};
use crate::wxx::types::models::{Resources, Tile};

/// Token standing for "no resources besides animals".
pub const BARE_RESOURCES: &str = "Z";

/// Terrain index forced by [`positional_terrain_override`].
pub const OVERRIDE_TERRAIN: i32 = 1;

const RESOURCE_NAMES: [&str; 6] = ["brick", "crops", "gems", "lumber", "metals", "rock"];

/// Which optional parts a line carries, derived from its field count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineShape {
    detailed: bool,
    colored: bool,
}

impl LineShape {
    fn from_field_count(count: usize) -> std::result::Result<Self, TileError> {
        match count {
            6 => Ok(Self { detailed: false, colored: false }),
            7 => Ok(Self { detailed: false, colored: true }),
            11 => Ok(Self { detailed: true, colored: false }),
            12 => Ok(Self { detailed: true, colored: true }),
            n => Err(TileError::FieldCount(n)),
        }
    }
}

/// Terrain the importer stamps over a tile because of its grid position.
///
/// Every tile of the first row in the file, and every tile on the diagonal
/// (`row == column`), reads back as terrain [`OVERRIDE_TERRAIN`] whatever the
/// line says. Returns `None` when the decoded value stands.
pub fn positional_terrain_override(is_first_row: bool, row: usize, column: usize) -> Option<i32> {
    if is_first_row || row == column {
        Some(OVERRIDE_TERRAIN)
    } else {
        None
    }
}

/// Decodes a single tile line. `row` and `column` of the result are left at zero.
///
/// # Errors
/// Returns a [`TileError`] naming the first field that is malformed or out of range.
pub fn decode_line(line: &str) -> std::result::Result<Tile, TileError> {
    let fields: Vec<&str> = line.split('\t').collect();
    let shape = LineShape::from_field_count(fields.len())?;

    let terrain = parse_int("terrain", fields[0])?;
    let elevation = fields[1]
        .parse::<f64>()
        .map_err(|_| TileError::InvalidElevation(fields[1].to_string()))?;
    let is_icy = parse_flag("isIcy", fields[2])?;
    let is_gm_only = parse_flag("isGMOnly", fields[3])?;

    let mut resources = Resources {
        animal: parse_resource("animal", fields[4])?,
        ..Resources::default()
    };

    let color_field = if shape.detailed {
        let mut values = [0i32; 6];
        for (slot, (name, field)) in values.iter_mut().zip(RESOURCE_NAMES.iter().zip(&fields[5..11])) {
            *slot = parse_resource(*name, field)?;
        }
        let [brick, crops, gems, lumber, metals, rock] = values;
        resources.brick = brick;
        resources.crops = crops;
        resources.gems = gems;
        resources.lumber = lumber;
        resources.metals = metals;
        resources.rock = rock;
        11
    } else {
        if fields[5] != BARE_RESOURCES {
            return Err(TileError::InvalidSentinel(fields[5].to_string()));
        }
        6
    };

    let custom_background_color = if shape.colored {
        color::decode_default(fields[color_field])?
    } else {
        None
    };

    Ok(Tile {
        row: 0,
        column: 0,
        terrain,
        elevation,
        is_icy,
        is_gm_only,
        resources,
        custom_background_color,
    })
}

/// Encodes a tile as one newline-terminated line.
///
/// # Errors
/// Returns [`TileError::OutOfRange`] if a resource lies outside `0..=100`.
pub fn encode_line(tile: &Tile) -> std::result::Result<String, TileError> {
    let r = &tile.resources;
    check_range("animal", r.animal)?;
    let detail = [r.brick, r.crops, r.gems, r.lumber, r.metals, r.rock];
    for (name, value) in RESOURCE_NAMES.iter().zip(detail) {
        check_range(*name, value)?;
    }

    let mut line = format!(
        "{}\t{}\t{}\t{}\t{}\t",
        tile.terrain,
        format_real_bare(tile.elevation),
        flag_text(tile.is_icy),
        flag_text(tile.is_gm_only),
        r.animal
    );
    if r.is_bare() {
        line.push_str(BARE_RESOURCES);
    } else {
        let detail: Vec<String> = detail.iter().map(|v| v.to_string()).collect();
        line.push_str(&detail.join("\t"));
    }
    if let Some(c) = &tile.custom_background_color {
        line.push('\t');
        line.push_str(&color::encode_present(c));
    }
    line.push('\n');
    Ok(line)
}

/// Decodes the text of one `<tilerow>`, applying [`positional_terrain_override`].
///
/// Blank lines are skipped.
///
/// # Errors
/// - `Tile` for a malformed line, with its grid position
/// - `TileRowOverflow` when the row holds more than `tiles_high` tiles
pub fn decode_row(row: usize, text: &str, is_first_row: bool, tiles_high: usize) -> Result<Vec<Tile>> {
    // Sized by the lines present; `tiles_high` comes from the document and only bounds the row.
    let lines: Vec<&str> = text.split('\n').filter(|line| !line.is_empty()).collect();
    let mut tiles = Vec::with_capacity(lines.len().min(tiles_high));
    for line in lines {
        let column = tiles.len();
        if column >= tiles_high {
            return Err(WxxError::TileRowOverflow { row, tiles_high });
        }
        let mut tile = decode_line(line).map_err(|source| WxxError::Tile { row, column, source })?;
        tile.row = row;
        tile.column = column;
        if let Some(terrain) = positional_terrain_override(is_first_row, row, column) {
            tile.terrain = terrain;
        }
        tiles.push(tile);
    }
    trace!("Decoded tile row {}: {} tiles", row, tiles.len());
    Ok(tiles)
}

/// Encodes the tiles of one row, in order, as the text of a `<tilerow>`.
///
/// # Errors
/// Returns `Tile` with the grid position of the first tile that fails [`encode_line`].
pub fn encode_row(row: usize, tiles: &[Tile]) -> Result<String> {
    let mut text = String::with_capacity(tiles.len() * 16);
    for (column, tile) in tiles.iter().enumerate() {
        let line = encode_line(tile).map_err(|source| WxxError::Tile { row, column, source })?;
        text.push_str(&line);
    }
    Ok(text)
}

fn parse_int(field: &'static str, text: &str) -> std::result::Result<i32, TileError> {
    text.parse::<i32>().map_err(|_| TileError::InvalidInteger {
        field,
        value: text.to_string(),
    })
}

fn parse_resource(field: &'static str, text: &str) -> std::result::Result<i32, TileError> {
    let value = parse_int(field, text)?;
    check_range(field, value)?;
    Ok(value)
}

fn check_range(field: &'static str, value: i32) -> std::result::Result<(), TileError> {
    if (0..=100).contains(&value) {
        Ok(())
    } else {
        Err(TileError::OutOfRange { field, value })
    }
}

fn parse_flag(field: &'static str, text: &str) -> std::result::Result<bool, TileError> {
    match text {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(TileError::InvalidFlag { field, value: text.to_string() }),
    }
}

fn flag_text(flag: bool) -> &'static str {
    if flag { "1" } else { "0" }
}
