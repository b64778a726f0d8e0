//! The `<terrainmap>` palette: `label \t index \t label \t index ...`.

use crate::wxx::types::error::{Result, WxxError};
use crate::wxx::types::models::TerrainMap;

/// Parses the palette string, keeping file order.
///
/// Empty text is an empty palette.
///
/// # Errors
/// - `OddTerrainTokens` when a label has no index
/// - `InvalidTerrainIndex` when an index is not an integer
pub fn decode(text: &str) -> Result<TerrainMap> {
    let mut map = TerrainMap::default();
    if text.is_empty() {
        return Ok(map);
    }

    let tokens: Vec<&str> = text.split('\t').collect();
    if tokens.len() % 2 != 0 {
        return Err(WxxError::OddTerrainTokens(tokens.len()));
    }
    for pair in tokens.chunks_exact(2) {
        let (label, value) = (pair[0], pair[1]);
        let index = value.parse::<i32>().map_err(|_| WxxError::InvalidTerrainIndex {
            label: label.to_string(),
            value: value.to_string(),
        })?;
        map.push(label, index);
    }
    Ok(map)
}

/// Joins the palette back into a single string in list order.
pub fn encode(map: &TerrainMap) -> String {
    map.list
        .iter()
        .map(|t| format!("{}\t{}", t.label, t.index))
        .collect::<Vec<_>>()
        .join("\t")
}
