//! Wire structures of schema 1.73.
//!
//! Every attribute is held as the raw text found in (or destined for) the file.
//! Typed conversion happens in `decode`/`encode`, so this layer only knows element
//! names, attribute names and the order in which the editor writes them.

use crate::wxx::format::xml::Element;
use crate::wxx::types::error::{Result, WxxError};

/// Declares an attribute set. Field order is the order attributes are written in.
macro_rules! attribute_set {
    ($(#[$meta:meta])* $name:ident { $($field:ident => $attr:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(pub $field: String,)+
        }

        impl $name {
            pub fn from_element(element: &Element) -> Self {
                Self {
                    $($field: element.attr($attr).to_string(),)+
                }
            }

            pub fn attributes(&self) -> Vec<(&'static str, &str)> {
                vec![$(($attr, self.$field.as_str()),)+]
            }
        }
    };
}

attribute_set!(
    /// Attributes of the root `<map>` element.
    MapAttrs {
        map_type => "type",
        version => "version",
        last_view_level => "lastViewLevel",
        continent_factor => "continentFactor",
        kingdom_factor => "kingdomFactor",
        province_factor => "provinceFactor",
        world_to_continent_h_offset => "worldToContinentHOffset",
        continent_to_kingdom_h_offset => "continentToKingdomHOffset",
        kingdom_to_province_h_offset => "kingdomToProvinceHOffset",
        world_to_continent_v_offset => "worldToContinentVOffset",
        continent_to_kingdom_v_offset => "continentToKingdomVOffset",
        kingdom_to_province_v_offset => "kingdomToProvinceVOffset",
        hex_width => "hexWidth",
        hex_height => "hexHeight",
        hex_orientation => "hexOrientation",
        map_projection => "mapProjection",
        show_notes => "showNotes",
        show_gm_only => "showGMOnly",
        show_gm_only_glow => "showGMOnlyGlow",
        show_feature_labels => "showFeatureLabels",
        show_grid => "showGrid",
        show_grid_numbers => "showGridNumbers",
        show_shadows => "showShadows",
        triangle_size => "triangleSize",
    }
);

attribute_set!(
    GridAndNumberingAttrs {
        color0 => "color0",
        color1 => "color1",
        color2 => "color2",
        color3 => "color3",
        color4 => "color4",
        width0 => "width0",
        width1 => "width1",
        width2 => "width2",
        width3 => "width3",
        width4 => "width4",
        grid_offset_continent_kingdom_x => "gridOffsetContinentKingdomX",
        grid_offset_continent_kingdom_y => "gridOffsetContinentKingdomY",
        grid_offset_world_continent_x => "gridOffsetWorldContinentX",
        grid_offset_world_continent_y => "gridOffsetWorldContinentY",
        grid_offset_world_kingdom_x => "gridOffsetWorldKingdomX",
        grid_offset_world_kingdom_y => "gridOffsetWorldKingdomY",
        grid_square => "gridSquare",
        grid_square_height => "gridSquareHeight",
        grid_square_width => "gridSquareWidth",
        grid_offset_x => "gridOffsetX",
        grid_offset_y => "gridOffsetY",
        number_font => "numberFont",
        number_color => "numberColor",
        number_size => "numberSize",
        number_style => "numberStyle",
        number_first_col => "numberFirstCol",
        number_first_row => "numberFirstRow",
        number_order => "numberOrder",
        number_position => "numberPosition",
        number_pre_pad => "numberPrePad",
        number_separator => "numberSeparator",
    }
);

attribute_set!(MapLayerAttrs { name => "name", is_visible => "isVisible" });

attribute_set!(TilesAttrs { view_level => "viewLevel", tiles_wide => "tilesWide", tiles_high => "tilesHigh" });

attribute_set!(
    MapKeyAttrs {
        position_x => "positionx",
        position_y => "positiony",
        view_level => "viewlevel",
        height => "height",
        background_color => "backgroundcolor",
        background_opacity => "backgroundopacity",
        title_text => "titleText",
        title_font_face => "titleFontFace",
        title_font_color => "titleFontColor",
        title_font_bold => "titleFontBold",
        title_font_italic => "titleFontItalic",
        title_scale => "titleScale",
        scale_text => "scaleText",
        scale_font_face => "scaleFontFace",
        scale_font_color => "scaleFontColor",
        scale_font_bold => "scaleFontBold",
        scale_font_italic => "scaleFontItalic",
        scale_scale => "scaleScale",
        entry_font_face => "entryFontFace",
        entry_font_color => "entryFontColor",
        entry_font_bold => "entryFontBold",
        entry_font_italic => "entryFontItalic",
        entry_scale => "entryScale",
    }
);

attribute_set!(
    FeatureAttrs {
        feature_type => "type",
        rotate => "rotate",
        uuid => "uuid",
        map_layer => "mapLayer",
        is_flip_horizontal => "isFlipHorizontal",
        is_flip_vertical => "isFlipVertical",
        scale => "scale",
        scale_ht => "scaleHt",
        tags => "tags",
        color => "color",
        ring_color => "ringcolor",
        is_gm_only => "isGMOnly",
        is_place_freely => "isPlaceFreely",
        label_position => "labelPosition",
        label_distance => "labelDistance",
        is_world => "isWorld",
        is_continent => "isContinent",
        is_kingdom => "isKingdom",
        is_province => "isProvince",
        is_fill_hex_bottom => "isFillHexBottom",
        is_hide_terrain_icon => "isHideTerrainIcon",
    }
);

attribute_set!(FeatureLocationAttrs { view_level => "viewLevel", x => "x", y => "y" });

attribute_set!(
    LabelAttrs {
        map_layer => "mapLayer",
        style => "style",
        font_face => "fontFace",
        color => "color",
        outline_color => "outlineColor",
        outline_size => "outlineSize",
        rotate => "rotate",
        is_bold => "isBold",
        is_italic => "isItalic",
        is_world => "isWorld",
        is_continent => "isContinent",
        is_kingdom => "isKingdom",
        is_province => "isProvince",
        is_gm_only => "isGMOnly",
        tags => "tags",
        background_color => "backgroundColor",
    }
);

attribute_set!(LabelLocationAttrs { view_level => "viewLevel", x => "x", y => "y", scale => "scale" });

attribute_set!(
    ShapeAttrs {
        shape_type => "type",
        is_curve => "isCurve",
        is_gm_only => "isGMOnly",
        is_snap_vertices => "isSnapVertices",
        is_match_tile_borders => "isMatchTileBorders",
        tags => "tags",
        creation_type => "creationType",
        is_drop_shadow => "isDropShadow",
        is_inner_shadow => "isInnerShadow",
        is_box_blur => "isBoxBlur",
        is_world => "isWorld",
        is_continent => "isContinent",
        is_kingdom => "isKingdom",
        is_province => "isProvince",
        ds_spread => "dsSpread",
        ds_radius => "dsRadius",
        ds_offset_x => "dsOffsetX",
        ds_offset_y => "dsOffsetY",
        ins_choke => "insChoke",
        ins_radius => "insRadius",
        ins_offset_x => "insOffsetX",
        ins_offset_y => "insOffsetY",
        ds_color => "dsColor",
        ins_color => "insColor",
        bb_width => "bbWidth",
        bb_height => "bbHeight",
        bb_iterations => "bbIterations",
        map_layer => "mapLayer",
        fill_texture => "fillTexture",
        stroke_texture => "strokeTexture",
        stroke_type => "strokeType",
        highest_view_level => "highestViewLevel",
        current_shape_view_level => "currentShapeViewLevel",
        line_cap => "lineCap",
        line_join => "lineJoin",
        opacity => "opacity",
        fill_rule => "fillRule",
        stroke_color => "strokeColor",
        stroke_width => "strokeWidth",
    }
);

attribute_set!(PointAttrs { point_type => "type", x => "x", y => "y" });

attribute_set!(
    /// Shared by top-level `<information>` elements and their nested details.
    InformationAttrs {
        uuid => "uuid",
        info_type => "type",
        title => "title",
        rulers => "rulers",
        government => "government",
        cultures => "cultures",
        language => "language",
        religion_type => "religionType",
        culture => "culture",
        holy_symbol => "holySymbol",
        domains => "domains",
    }
);

attribute_set!(
    LabelStyleAttrs {
        name => "name",
        font_face => "fontFace",
        scale => "scale",
        is_bold => "isBold",
        is_italic => "isItalic",
        color => "color",
        background_color => "backgroundColor",
        outline_size => "outlineSize",
        outline_color => "outlineColor",
    }
);

attribute_set!(
    ShapeStyleAttrs {
        name => "name",
        stroke_type => "strokeType",
        is_fractal => "isFractal",
        stroke_width => "strokeWidth",
        opacity => "opacity",
        snap_vertices => "snapVertices",
        tags => "tags",
        drop_shadow => "dropShadow",
        inner_shadow => "innerShadow",
        box_blur => "boxBlur",
        ds_spread => "dsSpread",
        ds_radius => "dsRadius",
        ds_offset_x => "dsOffsetX",
        ds_offset_y => "dsOffsetY",
        ins_choke => "insChoke",
        ins_radius => "insRadius",
        ins_offset_x => "insOffsetX",
        ins_offset_y => "insOffsetY",
        bb_width => "bbWidth",
        bb_height => "bbHeight",
        bb_iterations => "bbIterations",
        fill_texture => "fillTexture",
        stroke_texture => "strokeTexture",
        stroke_paint => "strokePaint",
        fill_paint => "fillPaint",
        ds_color => "dscolor",
        ins_color => "insColor",
    }
);

/// A whole 1.73 document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireMap {
    pub attrs: MapAttrs,
    pub grid_and_numbering: GridAndNumberingAttrs,
    pub terrain_map: String,
    pub map_layers: Vec<MapLayerAttrs>,
    pub tiles: WireTiles,
    pub map_key: MapKeyAttrs,
    pub features: Vec<WireFeature>,
    pub labels: Vec<WireLabel>,
    pub shapes: Vec<WireShape>,
    pub notes: Vec<String>,
    pub informations: WireInformations,
    pub configuration: WireConfiguration,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireTiles {
    pub attrs: TilesAttrs,
    /// Raw text of each `<tilerow>`.
    pub rows: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireFeature {
    pub attrs: FeatureAttrs,
    pub location: Option<FeatureLocationAttrs>,
    pub label: Option<WireLabel>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireLabel {
    pub attrs: LabelAttrs,
    pub location: Option<LabelLocationAttrs>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireShape {
    pub attrs: ShapeAttrs,
    pub points: Vec<PointAttrs>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireInformations {
    pub entries: Vec<WireInformation>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireInformation {
    pub attrs: InformationAttrs,
    pub details: Vec<WireInformationDetail>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireInformationDetail {
    pub attrs: InformationAttrs,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireConfiguration {
    pub terrain_config: Vec<String>,
    pub feature_config: Vec<String>,
    pub texture_config: Vec<String>,
    pub text_config: Vec<WireTextConfig>,
    pub shape_config: Vec<WireShapeConfig>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireTextConfig {
    pub label_styles: Vec<LabelStyleAttrs>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireShapeConfig {
    pub shape_styles: Vec<ShapeStyleAttrs>,
    pub text: String,
}

/// Element names as the editor spells them.
pub mod names {
    pub const MAP: &str = "map";
    pub const GRID_AND_NUMBERING: &str = "gridandnumbering";
    pub const TERRAIN_MAP: &str = "terrainmap";
    pub const MAP_LAYER: &str = "maplayer";
    pub const TILES: &str = "tiles";
    pub const TILE_ROW: &str = "tilerow";
    pub const MAP_KEY: &str = "mapkey";
    pub const FEATURES: &str = "features";
    pub const FEATURE: &str = "feature";
    pub const LOCATION: &str = "location";
    pub const LABELS: &str = "labels";
    pub const LABEL: &str = "label";
    pub const SHAPES: &str = "shapes";
    pub const SHAPE: &str = "shape";
    pub const POINT: &str = "p";
    pub const NOTES: &str = "notes";
    pub const NOTE: &str = "note";
    pub const INFORMATIONS: &str = "informations";
    pub const INFORMATION: &str = "information";
    pub const CONFIGURATION: &str = "configuration";
    pub const TERRAIN_CONFIG: &str = "terrain-config";
    pub const FEATURE_CONFIG: &str = "feature-config";
    pub const TEXTURE_CONFIG: &str = "texture-config";
    pub const TEXT_CONFIG: &str = "text-config";
    pub const LABEL_STYLE: &str = "labelstyle";
    pub const SHAPE_CONFIG: &str = "shape-config";
    pub const SHAPE_STYLE: &str = "shapestyle";
}

impl WireMap {
    /// Collects a parsed `<map>` element into wire structures.
    ///
    /// Missing child elements yield empty collections. Nested `<information>`
    /// elements deeper than one level below an entry are not part of the schema
    /// and are skipped.
    ///
    /// # Errors
    /// Returns `Xml` if the root element is not `<map>`.
    pub fn from_element(root: &Element) -> Result<Self> {
        if root.name != names::MAP {
            return Err(WxxError::Xml(format!(
                "expected root element <{}>, found <{}>",
                names::MAP,
                root.name
            )));
        }

        let tiles = root
            .child(names::TILES)
            .map(|tiles| WireTiles {
                attrs: TilesAttrs::from_element(tiles),
                rows: tiles.children_named(names::TILE_ROW).map(|r| r.text.clone()).collect(),
            })
            .unwrap_or_default();

        let features = root
            .child(names::FEATURES)
            .map(|features| features.children_named(names::FEATURE).map(WireFeature::from_element).collect())
            .unwrap_or_default();

        let labels = root
            .child(names::LABELS)
            .map(|labels| labels.children_named(names::LABEL).map(WireLabel::from_element).collect())
            .unwrap_or_default();

        let shapes = root
            .child(names::SHAPES)
            .map(|shapes| {
                shapes
                    .children_named(names::SHAPE)
                    .map(|shape| WireShape {
                        attrs: ShapeAttrs::from_element(shape),
                        points: shape.children_named(names::POINT).map(PointAttrs::from_element).collect(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let notes = root
            .child(names::NOTES)
            .map(|notes| notes.children_named(names::NOTE).map(|n| n.text.clone()).collect())
            .unwrap_or_default();

        let informations = root
            .child(names::INFORMATIONS)
            .map(|infos| WireInformations {
                entries: infos
                    .children_named(names::INFORMATION)
                    .map(WireInformation::from_element)
                    .collect(),
                text: infos.text.clone(),
            })
            .unwrap_or_default();

        let configuration = root
            .child(names::CONFIGURATION)
            .map(WireConfiguration::from_element)
            .unwrap_or_default();

        Ok(Self {
            attrs: MapAttrs::from_element(root),
            grid_and_numbering: root
                .child(names::GRID_AND_NUMBERING)
                .map(GridAndNumberingAttrs::from_element)
                .unwrap_or_default(),
            terrain_map: root.child(names::TERRAIN_MAP).map(|t| t.text.clone()).unwrap_or_default(),
            map_layers: root.children_named(names::MAP_LAYER).map(MapLayerAttrs::from_element).collect(),
            tiles,
            map_key: root.child(names::MAP_KEY).map(MapKeyAttrs::from_element).unwrap_or_default(),
            features,
            labels,
            shapes,
            notes,
            informations,
            configuration,
        })
    }
}

impl WireFeature {
    fn from_element(element: &Element) -> Self {
        Self {
            attrs: FeatureAttrs::from_element(element),
            location: element.child(names::LOCATION).map(FeatureLocationAttrs::from_element),
            label: element.child(names::LABEL).map(WireLabel::from_element),
        }
    }
}

impl WireLabel {
    fn from_element(element: &Element) -> Self {
        Self {
            attrs: LabelAttrs::from_element(element),
            location: element.child(names::LOCATION).map(LabelLocationAttrs::from_element),
            text: element.text.clone(),
        }
    }
}

impl WireInformation {
    fn from_element(element: &Element) -> Self {
        Self {
            attrs: InformationAttrs::from_element(element),
            details: element
                .children_named(names::INFORMATION)
                .map(|detail| WireInformationDetail {
                    attrs: InformationAttrs::from_element(detail),
                    text: detail.text.clone(),
                })
                .collect(),
            text: element.text.clone(),
        }
    }
}

impl WireConfiguration {
    fn from_element(element: &Element) -> Self {
        let texts = |name: &str| -> Vec<String> {
            element.children_named(name).map(|c| c.text.clone()).collect()
        };
        Self {
            terrain_config: texts(names::TERRAIN_CONFIG),
            feature_config: texts(names::FEATURE_CONFIG),
            texture_config: texts(names::TEXTURE_CONFIG),
            text_config: element
                .children_named(names::TEXT_CONFIG)
                .map(|c| WireTextConfig {
                    label_styles: c.children_named(names::LABEL_STYLE).map(LabelStyleAttrs::from_element).collect(),
                    text: c.text.clone(),
                })
                .collect(),
            shape_config: element
                .children_named(names::SHAPE_CONFIG)
                .map(|c| WireShapeConfig {
                    shape_styles: c.children_named(names::SHAPE_STYLE).map(ShapeStyleAttrs::from_element).collect(),
                    text: c.text.clone(),
                })
                .collect(),
            text: element.text.clone(),
        }
    }
}
