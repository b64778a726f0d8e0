//! Canonical map model.
//!
//! Every conversion builds a fresh [`Map`] and hands ownership to the caller.
//! Field names serialize the same way the JSON interchange format names them.

use serde::{Deserialize, Serialize};

/// A four channel color, each channel normally in `[0, 1]`.
///
/// Fields holding a color are `Option<Rgba>`: `None` means "use the editor default",
/// which is not the same as an explicit `Some(Rgba::DEFAULT)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Opaque black, the value the editor substitutes for a missing color.
    pub const DEFAULT: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

/// A Worldographer map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Map {
    #[serde(rename = "type")]
    pub map_type: String,
    pub version: String,
    pub last_view_level: String,
    pub continent_factor: i32,
    pub kingdom_factor: i32,
    pub province_factor: i32,
    pub world_to_continent_h_offset: f64,
    pub continent_to_kingdom_h_offset: f64,
    pub kingdom_to_province_h_offset: f64,
    pub world_to_continent_v_offset: f64,
    pub continent_to_kingdom_v_offset: f64,
    pub kingdom_to_province_v_offset: f64,
    pub hex_width: f64,
    pub hex_height: f64,
    pub hex_orientation: String,
    pub map_projection: String,
    pub show_notes: bool,
    #[serde(rename = "showGMOnly")]
    pub show_gm_only: bool,
    #[serde(rename = "showGMOnlyGlow")]
    pub show_gm_only_glow: bool,
    pub show_feature_labels: bool,
    pub show_grid: bool,
    pub show_grid_numbers: bool,
    pub show_shadows: bool,
    pub triangle_size: i32,

    pub grid_and_numbering: GridAndNumbering,
    pub terrain_map: TerrainMap,
    #[serde(rename = "mapLayer")]
    pub map_layers: Vec<MapLayer>,
    pub tiles: Tiles,
    pub map_key: MapKey,
    pub features: Vec<Feature>,
    pub labels: Vec<Label>,
    pub shapes: Vec<Shape>,
    pub notes: Vec<Note>,
    pub informations: Informations,
    pub configuration: Configuration,
}

/// Grid line and hex numbering settings.
///
/// The `color*` and `number_color` fields are the editor's hex strings (`0x00000040`)
/// and are carried verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridAndNumbering {
    pub color0: String,
    pub color1: String,
    pub color2: String,
    pub color3: String,
    pub color4: String,
    pub width0: f64,
    pub width1: f64,
    pub width2: f64,
    pub width3: f64,
    pub width4: f64,
    pub grid_offset_continent_kingdom_x: f64,
    pub grid_offset_continent_kingdom_y: f64,
    pub grid_offset_world_continent_x: f64,
    pub grid_offset_world_continent_y: f64,
    pub grid_offset_world_kingdom_x: f64,
    pub grid_offset_world_kingdom_y: f64,
    pub grid_square: i32,
    pub grid_square_height: f64,
    pub grid_square_width: f64,
    pub grid_offset_x: f64,
    pub grid_offset_y: f64,
    pub number_font: String,
    pub number_color: String,
    pub number_size: i32,
    pub number_style: String,
    pub number_first_col: i32,
    pub number_first_row: i32,
    pub number_order: String,
    pub number_position: String,
    pub number_pre_pad: String,
    pub number_separator: String,
}

/// One entry of the terrain palette.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    pub index: i32,
    pub label: String,
}

/// The terrain palette in file order.
///
/// Indices are neither sorted nor guaranteed unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainMap {
    pub list: Vec<Terrain>,
}

impl TerrainMap {
    /// Looks up a terrain index by label. A repeated label resolves to its last entry.
    pub fn index_of(&self, label: &str) -> Option<i32> {
        self.list.iter().rev().find(|t| t.label == label).map(|t| t.index)
    }

    pub fn push(&mut self, label: impl Into<String>, index: i32) {
        self.list.push(Terrain { index, label: label.into() });
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapLayer {
    pub name: String,
    pub is_visible: bool,
}

/// The hex grid. `tile_rows[row][column]`, each row holding at most `tiles_high` tiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tiles {
    pub view_level: String,
    pub tiles_wide: i32,
    pub tiles_high: i32,
    #[serde(rename = "tilerow")]
    pub tile_rows: Vec<Vec<Tile>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Tile {
    pub row: usize,
    pub column: usize,
    pub terrain: i32,
    pub elevation: f64,
    pub is_icy: bool,
    #[serde(rename = "IsGMOnly")]
    pub is_gm_only: bool,
    pub resources: Resources,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_background_color: Option<Rgba>,
}

/// Resource quantities of a tile, each in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Resources {
    pub animal: i32,
    pub brick: i32,
    pub crops: i32,
    pub gems: i32,
    pub lumber: i32,
    pub metals: i32,
    pub rock: i32,
}

impl Resources {
    /// True when every resource other than `animal` is zero.
    pub fn is_bare(&self) -> bool {
        self.brick == 0
            && self.crops == 0
            && self.gems == 0
            && self.lumber == 0
            && self.metals == 0
            && self.rock == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapKey {
    #[serde(rename = "positionx")]
    pub position_x: f64,
    #[serde(rename = "positiony")]
    pub position_y: f64,
    #[serde(rename = "viewlevel")]
    pub view_level: String,
    pub height: f64,
    #[serde(rename = "backgroundcolor", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Rgba>,
    #[serde(rename = "backgroundopacity")]
    pub background_opacity: f64,
    pub title_text: String,
    pub title_font_face: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_font_color: Option<Rgba>,
    pub title_font_bold: bool,
    pub title_font_italic: bool,
    pub title_scale: f64,
    pub scale_text: String,
    pub scale_font_face: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_font_color: Option<Rgba>,
    pub scale_font_bold: bool,
    pub scale_font_italic: bool,
    pub scale_scale: f64,
    pub entry_font_face: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_font_color: Option<Rgba>,
    pub entry_font_bold: bool,
    pub entry_font_italic: bool,
    pub entry_scale: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub rotate: f64,
    pub uuid: String,
    pub map_layer: String,
    pub is_flip_horizontal: bool,
    pub is_flip_vertical: bool,
    pub scale: f64,
    pub scale_ht: f64,
    pub tags: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
    #[serde(rename = "ringcolor", skip_serializing_if = "Option::is_none")]
    pub ring_color: Option<Rgba>,
    #[serde(rename = "isGMOnly")]
    pub is_gm_only: bool,
    pub is_place_freely: bool,
    pub label_position: String,
    pub label_distance: f64,
    pub is_world: bool,
    pub is_continent: bool,
    pub is_kingdom: bool,
    pub is_province: bool,
    pub is_fill_hex_bottom: bool,
    pub is_hide_terrain_icon: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<FeatureLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureLocation {
    pub view_level: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Label {
    pub map_layer: String,
    pub style: String,
    pub font_face: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<Rgba>,
    pub outline_size: f64,
    pub rotate: f64,
    pub is_bold: bool,
    pub is_italic: bool,
    pub is_world: bool,
    pub is_continent: bool,
    pub is_kingdom: bool,
    pub is_province: bool,
    #[serde(rename = "isGMOnly")]
    pub is_gm_only: bool,
    pub tags: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LabelLocation>,
    pub inner_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelLocation {
    pub view_level: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Shape {
    pub bb_height: f64,
    pub bb_iterations: i32,
    pub bb_width: f64,
    pub creation_type: String,
    pub current_shape_view_level: String,
    pub ds_color: String,
    pub ds_offset_x: f64,
    pub ds_offset_y: f64,
    pub ds_radius: f64,
    pub ds_spread: f64,
    pub fill_rule: String,
    pub fill_texture: String,
    pub highest_view_level: String,
    pub ins_choke: f64,
    pub ins_color: String,
    pub ins_offset_x: f64,
    pub ins_offset_y: f64,
    pub ins_radius: f64,
    pub is_box_blur: bool,
    pub is_continent: bool,
    pub is_curve: bool,
    pub is_drop_shadow: bool,
    #[serde(rename = "isGMOnly")]
    pub is_gm_only: bool,
    pub is_inner_shadow: bool,
    pub is_kingdom: bool,
    pub is_match_tile_borders: bool,
    pub is_province: bool,
    pub is_snap_vertices: bool,
    pub is_world: bool,
    pub line_cap: String,
    pub line_join: String,
    pub map_layer: String,
    pub opacity: f64,
    pub stroke_color: String,
    pub stroke_texture: String,
    pub stroke_type: String,
    pub stroke_width: f64,
    pub tags: String,
    #[serde(rename = "type")]
    pub shape_type: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Point {
    #[serde(rename = "type")]
    pub point_type: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Note {
    pub inner_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Informations {
    pub informations: Vec<Information>,
    pub inner_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Information {
    pub uuid: String,
    #[serde(rename = "type")]
    pub info_type: String,
    pub title: String,
    pub rulers: String,
    pub government: String,
    pub cultures: String,
    pub language: String,
    pub religion_type: String,
    pub culture: String,
    pub holy_symbol: String,
    pub domains: String,
    pub details: Vec<InformationDetail>,
    pub inner_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InformationDetail {
    pub uuid: String,
    #[serde(rename = "type")]
    pub info_type: String,
    pub title: String,
    pub rulers: String,
    pub government: String,
    pub cultures: String,
    pub language: String,
    pub religion_type: String,
    pub culture: String,
    pub holy_symbol: String,
    pub domains: String,
    pub inner_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    #[serde(rename = "terrain-config")]
    pub terrain_config: Vec<OpaqueConfig>,
    #[serde(rename = "feature-config")]
    pub feature_config: Vec<OpaqueConfig>,
    #[serde(rename = "texture-config")]
    pub texture_config: Vec<OpaqueConfig>,
    #[serde(rename = "text-config")]
    pub text_config: TextConfig,
    #[serde(rename = "shape-config")]
    pub shape_config: ShapeConfig,
    #[serde(rename = "InnerText")]
    pub inner_text: String,
}

/// A configuration block the editor owns; its text is carried verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpaqueConfig {
    pub inner_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextConfig {
    pub label_styles: Vec<LabelStyle>,
    pub inner_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelStyle {
    pub name: String,
    pub font_face: String,
    pub scale: f64,
    pub is_bold: bool,
    pub is_italic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Rgba>,
    pub outline_size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<Rgba>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeConfig {
    pub shape_styles: Vec<ShapeStyle>,
    pub inner_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeStyle {
    pub name: String,
    pub stroke_type: String,
    pub is_fractal: bool,
    pub stroke_width: f64,
    pub opacity: f64,
    pub snap_vertices: bool,
    pub tags: String,
    pub drop_shadow: bool,
    pub inner_shadow: bool,
    pub box_blur: bool,
    pub ds_spread: f64,
    pub ds_radius: f64,
    pub ds_offset_x: f64,
    pub ds_offset_y: f64,
    pub ins_choke: f64,
    pub ins_radius: f64,
    pub ins_offset_x: f64,
    pub ins_offset_y: f64,
    pub bb_width: f64,
    pub bb_height: f64,
    pub bb_iterations: i32,
    pub fill_texture: String,
    pub stroke_texture: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_paint: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_paint: Option<Rgba>,
    #[serde(rename = "dscolor", skip_serializing_if = "Option::is_none")]
    pub ds_color: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ins_color: Option<Rgba>,
}
