//! Schema 1.73 wire structures to the canonical model.

use log::{debug, info, warn};

use super::wire::*;
use crate::wxx::codec::color;
use crate::wxx::format::{terrain, tiles};
use crate::wxx::types::error::{ColorError, Result, WxxError};
use crate::wxx::types::models::*;

/// Hex orientation the editor writes for column-major grids.
const COLUMNS: &str = "COLUMNS";

/// Translates a parsed document into a canonical [`Map`].
///
/// # Errors
/// Returns the first field that fails to parse, named by its path in the document.
pub fn wire_to_canonical(wire: &WireMap) -> Result<Map> {
    let a = &wire.attrs;
    if a.hex_orientation != COLUMNS {
        warn!("hexOrientation is {:?}, expected {:?}", a.hex_orientation, COLUMNS);
    }

    let map = Map {
        map_type: a.map_type.clone(),
        version: a.version.clone(),
        last_view_level: a.last_view_level.clone(),
        continent_factor: int("map.continentFactor", &a.continent_factor)?,
        kingdom_factor: int("map.kingdomFactor", &a.kingdom_factor)?,
        province_factor: int("map.provinceFactor", &a.province_factor)?,
        world_to_continent_h_offset: real("map.worldToContinentHOffset", &a.world_to_continent_h_offset)?,
        continent_to_kingdom_h_offset: real("map.continentToKingdomHOffset", &a.continent_to_kingdom_h_offset)?,
        kingdom_to_province_h_offset: real("map.kingdomToProvinceHOffset", &a.kingdom_to_province_h_offset)?,
        world_to_continent_v_offset: real("map.worldToContinentVOffset", &a.world_to_continent_v_offset)?,
        continent_to_kingdom_v_offset: real("map.continentToKingdomVOffset", &a.continent_to_kingdom_v_offset)?,
        kingdom_to_province_v_offset: real("map.kingdomToProvinceVOffset", &a.kingdom_to_province_v_offset)?,
        hex_width: real("map.hexWidth", &a.hex_width)?,
        hex_height: real("map.hexHeight", &a.hex_height)?,
        hex_orientation: a.hex_orientation.clone(),
        map_projection: a.map_projection.clone(),
        show_notes: flag("map.showNotes", &a.show_notes)?,
        show_gm_only: flag("map.showGMOnly", &a.show_gm_only)?,
        show_gm_only_glow: flag("map.showGMOnlyGlow", &a.show_gm_only_glow)?,
        show_feature_labels: flag("map.showFeatureLabels", &a.show_feature_labels)?,
        show_grid: flag("map.showGrid", &a.show_grid)?,
        show_grid_numbers: flag("map.showGridNumbers", &a.show_grid_numbers)?,
        show_shadows: flag("map.showShadows", &a.show_shadows)?,
        triangle_size: int("map.triangleSize", &a.triangle_size)?,
        grid_and_numbering: grid_and_numbering(&wire.grid_and_numbering)?,
        terrain_map: terrain::decode(&wire.terrain_map)?,
        map_layers: wire
            .map_layers
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                Ok(MapLayer {
                    name: layer.name.clone(),
                    is_visible: flag(&format!("maplayer[{}].isVisible", i), &layer.is_visible)?,
                })
            })
            .collect::<Result<_>>()?,
        tiles: tile_grid(&wire.tiles)?,
        map_key: map_key(&wire.map_key)?,
        features: wire
            .features
            .iter()
            .enumerate()
            .map(|(i, f)| feature(&format!("features[{}]", i), f))
            .collect::<Result<_>>()?,
        labels: wire
            .labels
            .iter()
            .enumerate()
            .map(|(i, l)| label(&format!("labels[{}]", i), l))
            .collect::<Result<_>>()?,
        shapes: wire
            .shapes
            .iter()
            .enumerate()
            .map(|(i, s)| shape(&format!("shapes[{}]", i), s))
            .collect::<Result<_>>()?,
        notes: wire.notes.iter().map(|text| Note { inner_text: text.clone() }).collect(),
        informations: Informations {
            informations: wire.informations.entries.iter().map(information).collect(),
            inner_text: wire.informations.text.clone(),
        },
        configuration: configuration(&wire.configuration)?,
    };

    info!(
        "Decoded map: {} terrains, {} tile rows, {} features, {} labels, {} shapes",
        map.terrain_map.len(),
        map.tiles.tile_rows.len(),
        map.features.len(),
        map.labels.len(),
        map.shapes.len()
    );
    Ok(map)
}

fn grid_and_numbering(g: &GridAndNumberingAttrs) -> Result<GridAndNumbering> {
    Ok(GridAndNumbering {
        color0: g.color0.clone(),
        color1: g.color1.clone(),
        color2: g.color2.clone(),
        color3: g.color3.clone(),
        color4: g.color4.clone(),
        width0: real("gridandnumbering.width0", &g.width0)?,
        width1: real("gridandnumbering.width1", &g.width1)?,
        width2: real("gridandnumbering.width2", &g.width2)?,
        width3: real("gridandnumbering.width3", &g.width3)?,
        width4: real("gridandnumbering.width4", &g.width4)?,
        grid_offset_continent_kingdom_x: real(
            "gridandnumbering.gridOffsetContinentKingdomX",
            &g.grid_offset_continent_kingdom_x,
        )?,
        grid_offset_continent_kingdom_y: real(
            "gridandnumbering.gridOffsetContinentKingdomY",
            &g.grid_offset_continent_kingdom_y,
        )?,
        grid_offset_world_continent_x: real(
            "gridandnumbering.gridOffsetWorldContinentX",
            &g.grid_offset_world_continent_x,
        )?,
        grid_offset_world_continent_y: real(
            "gridandnumbering.gridOffsetWorldContinentY",
            &g.grid_offset_world_continent_y,
        )?,
        grid_offset_world_kingdom_x: real("gridandnumbering.gridOffsetWorldKingdomX", &g.grid_offset_world_kingdom_x)?,
        grid_offset_world_kingdom_y: real("gridandnumbering.gridOffsetWorldKingdomY", &g.grid_offset_world_kingdom_y)?,
        grid_square: int("gridandnumbering.gridSquare", &g.grid_square)?,
        grid_square_height: real("gridandnumbering.gridSquareHeight", &g.grid_square_height)?,
        grid_square_width: real("gridandnumbering.gridSquareWidth", &g.grid_square_width)?,
        grid_offset_x: real("gridandnumbering.gridOffsetX", &g.grid_offset_x)?,
        grid_offset_y: real("gridandnumbering.gridOffsetY", &g.grid_offset_y)?,
        number_font: g.number_font.clone(),
        number_color: g.number_color.clone(),
        number_size: int("gridandnumbering.numberSize", &g.number_size)?,
        number_style: g.number_style.clone(),
        number_first_col: int("gridandnumbering.numberFirstCol", &g.number_first_col)?,
        number_first_row: int("gridandnumbering.numberFirstRow", &g.number_first_row)?,
        number_order: g.number_order.clone(),
        number_position: g.number_position.clone(),
        number_pre_pad: g.number_pre_pad.clone(),
        number_separator: g.number_separator.clone(),
    })
}

fn tile_grid(t: &WireTiles) -> Result<Tiles> {
    let tiles_high = int("tiles.tilesHigh", &t.attrs.tiles_high)?;
    let capacity = usize::try_from(tiles_high).unwrap_or(0);
    let mut tile_rows = Vec::with_capacity(t.rows.len());
    for (row, text) in t.rows.iter().enumerate() {
        tile_rows.push(tiles::decode_row(row, text, row == 0, capacity)?);
    }
    debug!("Decoded {} tile rows of at most {} tiles", tile_rows.len(), capacity);
    Ok(Tiles {
        view_level: t.attrs.view_level.clone(),
        tiles_wide: int("tiles.tilesWide", &t.attrs.tiles_wide)?,
        tiles_high,
        tile_rows,
    })
}

fn map_key(k: &MapKeyAttrs) -> Result<MapKey> {
    Ok(MapKey {
        position_x: real("mapkey.positionx", &k.position_x)?,
        position_y: real("mapkey.positiony", &k.position_y)?,
        view_level: k.view_level.clone(),
        height: real("mapkey.height", &k.height)?,
        background_color: default_color("mapkey.backgroundcolor", &k.background_color)?,
        background_opacity: real("mapkey.backgroundopacity", &k.background_opacity)?,
        title_text: k.title_text.clone(),
        title_font_face: k.title_font_face.clone(),
        title_font_color: default_color("mapkey.titleFontColor", &k.title_font_color)?,
        title_font_bold: flag("mapkey.titleFontBold", &k.title_font_bold)?,
        title_font_italic: flag("mapkey.titleFontItalic", &k.title_font_italic)?,
        title_scale: real("mapkey.titleScale", &k.title_scale)?,
        scale_text: k.scale_text.clone(),
        scale_font_face: k.scale_font_face.clone(),
        scale_font_color: default_color("mapkey.scaleFontColor", &k.scale_font_color)?,
        scale_font_bold: flag("mapkey.scaleFontBold", &k.scale_font_bold)?,
        scale_font_italic: flag("mapkey.scaleFontItalic", &k.scale_font_italic)?,
        scale_scale: real("mapkey.scaleScale", &k.scale_scale)?,
        entry_font_face: k.entry_font_face.clone(),
        entry_font_color: default_color("mapkey.entryFontColor", &k.entry_font_color)?,
        entry_font_bold: flag("mapkey.entryFontBold", &k.entry_font_bold)?,
        entry_font_italic: flag("mapkey.entryFontItalic", &k.entry_font_italic)?,
        entry_scale: real("mapkey.entryScale", &k.entry_scale)?,
    })
}

fn feature(path: &str, f: &WireFeature) -> Result<Feature> {
    let a = &f.attrs;
    let field = |name: &str| format!("{}.{}", path, name);

    let location = match &f.location {
        Some(loc) => Some(FeatureLocation {
            view_level: loc.view_level.clone(),
            x: real(&field("location.x"), &loc.x)?,
            y: real(&field("location.y"), &loc.y)?,
        }),
        None => None,
    };
    let label = match &f.label {
        Some(l) => Some(feature_label(&field("label"), l)?),
        None => None,
    };

    Ok(Feature {
        feature_type: a.feature_type.clone(),
        rotate: real(&field("rotate"), &a.rotate)?,
        uuid: a.uuid.clone(),
        map_layer: a.map_layer.clone(),
        is_flip_horizontal: flag(&field("isFlipHorizontal"), &a.is_flip_horizontal)?,
        is_flip_vertical: flag(&field("isFlipVertical"), &a.is_flip_vertical)?,
        scale: real(&field("scale"), &a.scale)?,
        scale_ht: real(&field("scaleHt"), &a.scale_ht)?,
        tags: a.tags.clone(),
        color: default_color(&field("color"), &a.color)?,
        ring_color: default_color(&field("ringcolor"), &a.ring_color)?,
        is_gm_only: flag(&field("isGMOnly"), &a.is_gm_only)?,
        is_place_freely: flag(&field("isPlaceFreely"), &a.is_place_freely)?,
        label_position: a.label_position.clone(),
        label_distance: real(&field("labelDistance"), &a.label_distance)?,
        is_world: flag(&field("isWorld"), &a.is_world)?,
        is_continent: flag(&field("isContinent"), &a.is_continent)?,
        is_kingdom: flag(&field("isKingdom"), &a.is_kingdom)?,
        is_province: flag(&field("isProvince"), &a.is_province)?,
        is_fill_hex_bottom: flag(&field("isFillHexBottom"), &a.is_fill_hex_bottom)?,
        is_hide_terrain_icon: flag(&field("isHideTerrainIcon"), &a.is_hide_terrain_icon)?,
        location,
        label,
    })
}

/// A feature's own label keeps a default background as "absent".
fn feature_label(path: &str, l: &WireLabel) -> Result<Label> {
    let background_color = default_color(&format!("{}.backgroundColor", path), &l.attrs.background_color)?;
    Ok(Label { background_color, ..label_common(path, l)? })
}

/// A free-standing label keeps an explicit default background.
fn label(path: &str, l: &WireLabel) -> Result<Label> {
    let background_color = zeroable_color(&format!("{}.backgroundColor", path), &l.attrs.background_color)?;
    Ok(Label { background_color, ..label_common(path, l)? })
}

fn label_common(path: &str, l: &WireLabel) -> Result<Label> {
    let a = &l.attrs;
    let field = |name: &str| format!("{}.{}", path, name);

    let location = match &l.location {
        Some(loc) => Some(LabelLocation {
            view_level: loc.view_level.clone(),
            x: real(&field("location.x"), &loc.x)?,
            y: real(&field("location.y"), &loc.y)?,
            scale: real(&field("location.scale"), &loc.scale)?,
        }),
        None => None,
    };

    Ok(Label {
        map_layer: a.map_layer.clone(),
        style: a.style.clone(),
        font_face: a.font_face.clone(),
        color: default_color(&field("color"), &a.color)?,
        outline_color: default_color(&field("outlineColor"), &a.outline_color)?,
        outline_size: real(&field("outlineSize"), &a.outline_size)?,
        rotate: real(&field("rotate"), &a.rotate)?,
        is_bold: flag(&field("isBold"), &a.is_bold)?,
        is_italic: flag(&field("isItalic"), &a.is_italic)?,
        is_world: flag(&field("isWorld"), &a.is_world)?,
        is_continent: flag(&field("isContinent"), &a.is_continent)?,
        is_kingdom: flag(&field("isKingdom"), &a.is_kingdom)?,
        is_province: flag(&field("isProvince"), &a.is_province)?,
        is_gm_only: flag(&field("isGMOnly"), &a.is_gm_only)?,
        tags: a.tags.clone(),
        background_color: None,
        location,
        inner_text: l.text.clone(),
    })
}

fn shape(path: &str, s: &WireShape) -> Result<Shape> {
    let a = &s.attrs;
    let field = |name: &str| format!("{}.{}", path, name);

    let points = s
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Ok(Point {
                point_type: p.point_type.clone(),
                x: real(&field(&format!("p[{}].x", i)), &p.x)?,
                y: real(&field(&format!("p[{}].y", i)), &p.y)?,
            })
        })
        .collect::<Result<_>>()?;

    Ok(Shape {
        bb_height: real(&field("bbHeight"), &a.bb_height)?,
        bb_iterations: int(&field("bbIterations"), &a.bb_iterations)?,
        bb_width: real(&field("bbWidth"), &a.bb_width)?,
        creation_type: a.creation_type.clone(),
        current_shape_view_level: a.current_shape_view_level.clone(),
        ds_color: a.ds_color.clone(),
        ds_offset_x: real(&field("dsOffsetX"), &a.ds_offset_x)?,
        ds_offset_y: real(&field("dsOffsetY"), &a.ds_offset_y)?,
        ds_radius: real(&field("dsRadius"), &a.ds_radius)?,
        ds_spread: real(&field("dsSpread"), &a.ds_spread)?,
        fill_rule: a.fill_rule.clone(),
        fill_texture: a.fill_texture.clone(),
        highest_view_level: a.highest_view_level.clone(),
        ins_choke: real(&field("insChoke"), &a.ins_choke)?,
        ins_color: a.ins_color.clone(),
        ins_offset_x: real(&field("insOffsetX"), &a.ins_offset_x)?,
        ins_offset_y: real(&field("insOffsetY"), &a.ins_offset_y)?,
        ins_radius: real(&field("insRadius"), &a.ins_radius)?,
        is_box_blur: flag(&field("isBoxBlur"), &a.is_box_blur)?,
        is_continent: flag(&field("isContinent"), &a.is_continent)?,
        is_curve: flag(&field("isCurve"), &a.is_curve)?,
        is_drop_shadow: flag(&field("isDropShadow"), &a.is_drop_shadow)?,
        is_gm_only: flag(&field("isGMOnly"), &a.is_gm_only)?,
        is_inner_shadow: flag(&field("isInnerShadow"), &a.is_inner_shadow)?,
        is_kingdom: flag(&field("isKingdom"), &a.is_kingdom)?,
        is_match_tile_borders: flag(&field("isMatchTileBorders"), &a.is_match_tile_borders)?,
        is_province: flag(&field("isProvince"), &a.is_province)?,
        is_snap_vertices: flag(&field("isSnapVertices"), &a.is_snap_vertices)?,
        is_world: flag(&field("isWorld"), &a.is_world)?,
        line_cap: a.line_cap.clone(),
        line_join: a.line_join.clone(),
        map_layer: a.map_layer.clone(),
        opacity: real(&field("opacity"), &a.opacity)?,
        stroke_color: a.stroke_color.clone(),
        stroke_texture: a.stroke_texture.clone(),
        stroke_type: a.stroke_type.clone(),
        stroke_width: real(&field("strokeWidth"), &a.stroke_width)?,
        tags: a.tags.clone(),
        shape_type: a.shape_type.clone(),
        points,
    })
}

fn information(info: &WireInformation) -> Information {
    let a = &info.attrs;
    Information {
        uuid: a.uuid.clone(),
        info_type: a.info_type.clone(),
        title: a.title.clone(),
        rulers: a.rulers.clone(),
        government: a.government.clone(),
        cultures: a.cultures.clone(),
        language: a.language.clone(),
        religion_type: a.religion_type.clone(),
        culture: a.culture.clone(),
        holy_symbol: a.holy_symbol.clone(),
        domains: a.domains.clone(),
        details: info
            .details
            .iter()
            .map(|d| {
                let a = &d.attrs;
                InformationDetail {
                    uuid: a.uuid.clone(),
                    info_type: a.info_type.clone(),
                    title: a.title.clone(),
                    rulers: a.rulers.clone(),
                    government: a.government.clone(),
                    cultures: a.cultures.clone(),
                    language: a.language.clone(),
                    religion_type: a.religion_type.clone(),
                    culture: a.culture.clone(),
                    holy_symbol: a.holy_symbol.clone(),
                    domains: a.domains.clone(),
                    inner_text: d.text.clone(),
                }
            })
            .collect(),
        inner_text: info.text.clone(),
    }
}

fn configuration(c: &WireConfiguration) -> Result<Configuration> {
    let opaque = |texts: &[String]| -> Vec<OpaqueConfig> {
        texts.iter().map(|t| OpaqueConfig { inner_text: t.clone() }).collect()
    };

    // Every <text-config> and <shape-config> block is folded into one.
    let mut text_config = TextConfig::default();
    for block in &c.text_config {
        for style in &block.label_styles {
            let path = format!("labelStyle[{}]", text_config.label_styles.len());
            text_config.label_styles.push(label_style(&path, style)?);
        }
        text_config.inner_text.push_str(&block.text);
    }

    let mut shape_config = ShapeConfig::default();
    for block in &c.shape_config {
        for style in &block.shape_styles {
            let path = format!("shapeStyle[{}]", shape_config.shape_styles.len());
            shape_config.shape_styles.push(shape_style(&path, style)?);
        }
        shape_config.inner_text.push_str(&block.text);
    }

    Ok(Configuration {
        terrain_config: opaque(&c.terrain_config),
        feature_config: opaque(&c.feature_config),
        texture_config: opaque(&c.texture_config),
        text_config,
        shape_config,
        inner_text: c.text.clone(),
    })
}

fn label_style(path: &str, s: &LabelStyleAttrs) -> Result<LabelStyle> {
    let field = |name: &str| format!("{}.{}", path, name);
    Ok(LabelStyle {
        name: s.name.clone(),
        font_face: s.font_face.clone(),
        scale: real(&field("scale"), &s.scale)?,
        is_bold: flag(&field("isBold"), &s.is_bold)?,
        is_italic: flag(&field("isItalic"), &s.is_italic)?,
        color: default_color(&field("color"), &s.color)?,
        background_color: default_color(&field("backgroundColor"), &s.background_color)?,
        outline_size: real(&field("outlineSize"), &s.outline_size)?,
        outline_color: zeroable_color(&field("outlineColor"), &s.outline_color)?,
    })
}

fn shape_style(path: &str, s: &ShapeStyleAttrs) -> Result<ShapeStyle> {
    let field = |name: &str| format!("{}.{}", path, name);
    Ok(ShapeStyle {
        name: s.name.clone(),
        stroke_type: s.stroke_type.clone(),
        is_fractal: flag(&field("isFractal"), &s.is_fractal)?,
        stroke_width: real(&field("strokeWidth"), &s.stroke_width)?,
        opacity: real(&field("opacity"), &s.opacity)?,
        snap_vertices: flag(&field("snapVertices"), &s.snap_vertices)?,
        tags: s.tags.clone(),
        drop_shadow: flag(&field("dropShadow"), &s.drop_shadow)?,
        inner_shadow: flag(&field("innerShadow"), &s.inner_shadow)?,
        box_blur: flag(&field("boxBlur"), &s.box_blur)?,
        ds_spread: real(&field("dsSpread"), &s.ds_spread)?,
        ds_radius: real(&field("dsRadius"), &s.ds_radius)?,
        ds_offset_x: real(&field("dsOffsetX"), &s.ds_offset_x)?,
        ds_offset_y: real(&field("dsOffsetY"), &s.ds_offset_y)?,
        ins_choke: real(&field("insChoke"), &s.ins_choke)?,
        ins_radius: real(&field("insRadius"), &s.ins_radius)?,
        ins_offset_x: real(&field("insOffsetX"), &s.ins_offset_x)?,
        ins_offset_y: real(&field("insOffsetY"), &s.ins_offset_y)?,
        bb_width: real(&field("bbWidth"), &s.bb_width)?,
        bb_height: real(&field("bbHeight"), &s.bb_height)?,
        bb_iterations: int(&field("bbIterations"), &s.bb_iterations)?,
        fill_texture: s.fill_texture.clone(),
        stroke_texture: s.stroke_texture.clone(),
        stroke_paint: default_color(&field("strokePaint"), &s.stroke_paint)?,
        fill_paint: default_color(&field("fillPaint"), &s.fill_paint)?,
        ds_color: default_color(&field("dscolor"), &s.ds_color)?,
        ins_color: default_color(&field("insColor"), &s.ins_color)?,
    })
}

fn invalid(field: &str, value: &str, expected: &'static str) -> WxxError {
    WxxError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
}

/// An absent or empty attribute reads as zero.
fn real(field: &str, text: &str) -> Result<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    text.parse::<f64>().map_err(|_| invalid(field, text, "number"))
}

fn int(field: &str, text: &str) -> Result<i32> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<i32>().map_err(|_| invalid(field, text, "integer"))
}

fn flag(field: &str, text: &str) -> Result<bool> {
    match text.trim() {
        "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        other => Err(invalid(field, other, "boolean")),
    }
}

fn color_error(field: &str, source: ColorError) -> WxxError {
    WxxError::Color { field: field.to_string(), source }
}

fn default_color(field: &str, text: &str) -> Result<Option<Rgba>> {
    color::decode_default(text).map_err(|e| color_error(field, e))
}

fn zeroable_color(field: &str, text: &str) -> Result<Option<Rgba>> {
    color::decode_zeroable(text).map_err(|e| color_error(field, e))
}
