//! Canonical model to schema 1.73 wire structures.

use log::debug;

use super::wire::*;
use super::V173_VERSION;
use crate::wxx::codec::color;
use crate::wxx::codec::number::{format_real, format_real_bare};
use crate::wxx::format::{terrain, tiles};
use crate::wxx::types::error::Result;
use crate::wxx::types::models::*;

/// Translates a canonical [`Map`] into wire structures ready for the writer.
///
/// The document always declares schema 1.73, whatever `map.version` says.
///
/// # Errors
/// Returns `Tile` if a tile carries a resource outside `0..=100`.
pub fn canonical_to_wire(map: &Map) -> Result<WireMap> {
    let tile_rows = map
        .tiles
        .tile_rows
        .iter()
        .enumerate()
        .map(|(row, tiles)| tiles::encode_row(row, tiles))
        .collect::<Result<Vec<_>>>()?;
    debug!("Encoded {} tile rows", tile_rows.len());

    Ok(WireMap {
        attrs: MapAttrs {
            map_type: map.map_type.clone(),
            version: V173_VERSION.to_string(),
            last_view_level: map.last_view_level.clone(),
            continent_factor: map.continent_factor.to_string(),
            kingdom_factor: map.kingdom_factor.to_string(),
            province_factor: map.province_factor.to_string(),
            world_to_continent_h_offset: format_real(map.world_to_continent_h_offset),
            continent_to_kingdom_h_offset: format_real(map.continent_to_kingdom_h_offset),
            kingdom_to_province_h_offset: format_real(map.kingdom_to_province_h_offset),
            world_to_continent_v_offset: format_real(map.world_to_continent_v_offset),
            continent_to_kingdom_v_offset: format_real(map.continent_to_kingdom_v_offset),
            kingdom_to_province_v_offset: format_real(map.kingdom_to_province_v_offset),
            hex_width: format_real(map.hex_width),
            hex_height: format_real(map.hex_height),
            hex_orientation: map.hex_orientation.clone(),
            map_projection: map.map_projection.clone(),
            show_notes: flag(map.show_notes),
            show_gm_only: flag(map.show_gm_only),
            show_gm_only_glow: flag(map.show_gm_only_glow),
            show_feature_labels: flag(map.show_feature_labels),
            show_grid: flag(map.show_grid),
            show_grid_numbers: flag(map.show_grid_numbers),
            show_shadows: flag(map.show_shadows),
            triangle_size: map.triangle_size.to_string(),
        },
        grid_and_numbering: grid_and_numbering(&map.grid_and_numbering),
        terrain_map: terrain::encode(&map.terrain_map),
        map_layers: map
            .map_layers
            .iter()
            .map(|layer| MapLayerAttrs {
                name: layer.name.clone(),
                is_visible: flag(layer.is_visible),
            })
            .collect(),
        tiles: WireTiles {
            attrs: TilesAttrs {
                view_level: map.tiles.view_level.clone(),
                tiles_wide: map.tiles.tiles_wide.to_string(),
                tiles_high: map.tiles.tiles_high.to_string(),
            },
            rows: tile_rows,
        },
        map_key: map_key(&map.map_key),
        features: map.features.iter().map(feature).collect(),
        labels: map.labels.iter().map(label).collect(),
        shapes: map.shapes.iter().map(shape).collect(),
        notes: map.notes.iter().map(|n| n.inner_text.clone()).collect(),
        informations: WireInformations {
            entries: map.informations.informations.iter().map(information).collect(),
            text: map.informations.inner_text.clone(),
        },
        configuration: configuration(&map.configuration),
    })
}

fn flag(value: bool) -> String {
    value.to_string()
}

fn grid_and_numbering(g: &GridAndNumbering) -> GridAndNumberingAttrs {
    GridAndNumberingAttrs {
        color0: g.color0.clone(),
        color1: g.color1.clone(),
        color2: g.color2.clone(),
        color3: g.color3.clone(),
        color4: g.color4.clone(),
        width0: format_real(g.width0),
        width1: format_real(g.width1),
        width2: format_real(g.width2),
        width3: format_real(g.width3),
        width4: format_real(g.width4),
        grid_offset_continent_kingdom_x: format_real(g.grid_offset_continent_kingdom_x),
        grid_offset_continent_kingdom_y: format_real(g.grid_offset_continent_kingdom_y),
        grid_offset_world_continent_x: format_real(g.grid_offset_world_continent_x),
        grid_offset_world_continent_y: format_real(g.grid_offset_world_continent_y),
        grid_offset_world_kingdom_x: format_real(g.grid_offset_world_kingdom_x),
        grid_offset_world_kingdom_y: format_real(g.grid_offset_world_kingdom_y),
        grid_square: g.grid_square.to_string(),
        grid_square_height: format_real(g.grid_square_height),
        grid_square_width: format_real(g.grid_square_width),
        grid_offset_x: format_real(g.grid_offset_x),
        grid_offset_y: format_real(g.grid_offset_y),
        number_font: g.number_font.clone(),
        number_color: g.number_color.clone(),
        number_size: g.number_size.to_string(),
        number_style: g.number_style.clone(),
        number_first_col: g.number_first_col.to_string(),
        number_first_row: g.number_first_row.to_string(),
        number_order: g.number_order.clone(),
        number_position: g.number_position.clone(),
        number_pre_pad: g.number_pre_pad.clone(),
        number_separator: g.number_separator.clone(),
    }
}

fn map_key(k: &MapKey) -> MapKeyAttrs {
    MapKeyAttrs {
        position_x: format_real(k.position_x),
        position_y: format_real(k.position_y),
        view_level: k.view_level.clone(),
        height: format_real_bare(k.height),
        background_color: color::encode_default(k.background_color.as_ref()),
        background_opacity: format_real_bare(k.background_opacity),
        title_text: k.title_text.clone(),
        title_font_face: k.title_font_face.clone(),
        title_font_color: color::encode_default(k.title_font_color.as_ref()),
        title_font_bold: flag(k.title_font_bold),
        title_font_italic: flag(k.title_font_italic),
        title_scale: format_real_bare(k.title_scale),
        scale_text: k.scale_text.clone(),
        scale_font_face: k.scale_font_face.clone(),
        scale_font_color: color::encode_default(k.scale_font_color.as_ref()),
        scale_font_bold: flag(k.scale_font_bold),
        scale_font_italic: flag(k.scale_font_italic),
        scale_scale: format_real_bare(k.scale_scale),
        entry_font_face: k.entry_font_face.clone(),
        entry_font_color: color::encode_default(k.entry_font_color.as_ref()),
        entry_font_bold: flag(k.entry_font_bold),
        entry_font_italic: flag(k.entry_font_italic),
        entry_scale: format_real_bare(k.entry_scale),
    }
}

fn feature(f: &Feature) -> WireFeature {
    WireFeature {
        attrs: FeatureAttrs {
            feature_type: f.feature_type.clone(),
            rotate: format_real(f.rotate),
            uuid: f.uuid.clone(),
            map_layer: f.map_layer.clone(),
            is_flip_horizontal: flag(f.is_flip_horizontal),
            is_flip_vertical: flag(f.is_flip_vertical),
            scale: format_real(f.scale),
            scale_ht: format_real(f.scale_ht),
            tags: f.tags.clone(),
            color: color::encode_nullable(f.color.as_ref()),
            ring_color: color::encode_nullable(f.ring_color.as_ref()),
            is_gm_only: flag(f.is_gm_only),
            is_place_freely: flag(f.is_place_freely),
            label_position: f.label_position.clone(),
            label_distance: format_real_bare(f.label_distance),
            is_world: flag(f.is_world),
            is_continent: flag(f.is_continent),
            is_kingdom: flag(f.is_kingdom),
            is_province: flag(f.is_province),
            is_fill_hex_bottom: flag(f.is_fill_hex_bottom),
            is_hide_terrain_icon: flag(f.is_hide_terrain_icon),
        },
        location: f.location.as_ref().map(|loc| FeatureLocationAttrs {
            view_level: loc.view_level.clone(),
            x: format_real(loc.x),
            y: format_real(loc.y),
        }),
        label: f.label.as_ref().map(|l| {
            let mut wire = label(l);
            wire.attrs.background_color = color::encode_default(l.background_color.as_ref());
            wire
        }),
    }
}

/// A free-standing label only writes `backgroundColor` when it has one.
fn label(l: &Label) -> WireLabel {
    WireLabel {
        attrs: LabelAttrs {
            map_layer: l.map_layer.clone(),
            style: l.style.clone(),
            font_face: l.font_face.clone(),
            color: color::encode_default(l.color.as_ref()),
            outline_color: color::encode_default(l.outline_color.as_ref()),
            outline_size: format_real(l.outline_size),
            rotate: format_real(l.rotate),
            is_bold: flag(l.is_bold),
            is_italic: flag(l.is_italic),
            is_world: flag(l.is_world),
            is_continent: flag(l.is_continent),
            is_kingdom: flag(l.is_kingdom),
            is_province: flag(l.is_province),
            is_gm_only: flag(l.is_gm_only),
            tags: l.tags.clone(),
            background_color: l.background_color.as_ref().map(color::encode_present).unwrap_or_default(),
        },
        location: l.location.as_ref().map(|loc| LabelLocationAttrs {
            view_level: loc.view_level.clone(),
            x: format_real(loc.x),
            y: format_real(loc.y),
            scale: format_real(loc.scale),
        }),
        text: l.inner_text.clone(),
    }
}

fn shape(s: &Shape) -> WireShape {
    WireShape {
        attrs: ShapeAttrs {
            shape_type: s.shape_type.clone(),
            is_curve: flag(s.is_curve),
            is_gm_only: flag(s.is_gm_only),
            is_snap_vertices: flag(s.is_snap_vertices),
            is_match_tile_borders: flag(s.is_match_tile_borders),
            tags: s.tags.clone(),
            creation_type: s.creation_type.clone(),
            is_drop_shadow: flag(s.is_drop_shadow),
            is_inner_shadow: flag(s.is_inner_shadow),
            is_box_blur: flag(s.is_box_blur),
            is_world: flag(s.is_world),
            is_continent: flag(s.is_continent),
            is_kingdom: flag(s.is_kingdom),
            is_province: flag(s.is_province),
            ds_spread: format_real(s.ds_spread),
            ds_radius: format_real(s.ds_radius),
            ds_offset_x: format_real(s.ds_offset_x),
            ds_offset_y: format_real(s.ds_offset_y),
            ins_choke: format_real(s.ins_choke),
            ins_radius: format_real(s.ins_radius),
            ins_offset_x: format_real(s.ins_offset_x),
            ins_offset_y: format_real(s.ins_offset_y),
            ds_color: s.ds_color.clone(),
            ins_color: s.ins_color.clone(),
            bb_width: format_real(s.bb_width),
            bb_height: format_real(s.bb_height),
            bb_iterations: s.bb_iterations.to_string(),
            map_layer: s.map_layer.clone(),
            fill_texture: s.fill_texture.clone(),
            stroke_texture: s.stroke_texture.clone(),
            stroke_type: s.stroke_type.clone(),
            highest_view_level: s.highest_view_level.clone(),
            current_shape_view_level: s.current_shape_view_level.clone(),
            line_cap: s.line_cap.clone(),
            line_join: s.line_join.clone(),
            opacity: format_real(s.opacity),
            fill_rule: s.fill_rule.clone(),
            stroke_color: s.stroke_color.clone(),
            stroke_width: format_real(s.stroke_width),
        },
        points: s
            .points
            .iter()
            .map(|p| PointAttrs {
                point_type: p.point_type.clone(),
                x: format_real(p.x),
                y: format_real(p.y),
            })
            .collect(),
    }
}

fn information(info: &Information) -> WireInformation {
    WireInformation {
        attrs: InformationAttrs {
            uuid: info.uuid.clone(),
            info_type: info.info_type.clone(),
            title: info.title.clone(),
            rulers: info.rulers.clone(),
            government: info.government.clone(),
            cultures: info.cultures.clone(),
            language: info.language.clone(),
            religion_type: info.religion_type.clone(),
            culture: info.culture.clone(),
            holy_symbol: info.holy_symbol.clone(),
            domains: info.domains.clone(),
        },
        details: info
            .details
            .iter()
            .map(|d| WireInformationDetail {
                attrs: InformationAttrs {
                    uuid: d.uuid.clone(),
                    info_type: d.info_type.clone(),
                    title: d.title.clone(),
                    rulers: d.rulers.clone(),
                    government: d.government.clone(),
                    cultures: d.cultures.clone(),
                    language: d.language.clone(),
                    religion_type: d.religion_type.clone(),
                    culture: d.culture.clone(),
                    holy_symbol: d.holy_symbol.clone(),
                    domains: d.domains.clone(),
                },
                text: d.inner_text.trim().to_string(),
            })
            .collect(),
        text: info.inner_text.trim().to_string(),
    }
}

fn configuration(c: &Configuration) -> WireConfiguration {
    let opaque = |blocks: &[OpaqueConfig]| -> Vec<String> { blocks.iter().map(|b| b.inner_text.clone()).collect() };
    WireConfiguration {
        terrain_config: opaque(&c.terrain_config),
        feature_config: opaque(&c.feature_config),
        texture_config: opaque(&c.texture_config),
        text_config: vec![WireTextConfig {
            label_styles: c.text_config.label_styles.iter().map(label_style).collect(),
            text: c.text_config.inner_text.clone(),
        }],
        shape_config: vec![WireShapeConfig {
            shape_styles: c.shape_config.shape_styles.iter().map(shape_style).collect(),
            text: c.shape_config.inner_text.clone(),
        }],
        text: c.inner_text.clone(),
    }
}

fn label_style(s: &LabelStyle) -> LabelStyleAttrs {
    LabelStyleAttrs {
        name: s.name.clone(),
        font_face: s.font_face.clone(),
        scale: format_real(s.scale),
        is_bold: flag(s.is_bold),
        is_italic: flag(s.is_italic),
        color: color::encode_default(s.color.as_ref()),
        background_color: color::encode_nullable(s.background_color.as_ref()),
        outline_size: format_real(s.outline_size),
        outline_color: color::encode_zeroable(s.outline_color.as_ref()),
    }
}

fn shape_style(s: &ShapeStyle) -> ShapeStyleAttrs {
    ShapeStyleAttrs {
        name: s.name.clone(),
        stroke_type: s.stroke_type.clone(),
        is_fractal: flag(s.is_fractal),
        stroke_width: format_real(s.stroke_width),
        opacity: format_real(s.opacity),
        snap_vertices: flag(s.snap_vertices),
        tags: s.tags.clone(),
        drop_shadow: flag(s.drop_shadow),
        inner_shadow: flag(s.inner_shadow),
        box_blur: flag(s.box_blur),
        ds_spread: format_real(s.ds_spread),
        ds_radius: format_real(s.ds_radius),
        ds_offset_x: format_real(s.ds_offset_x),
        ds_offset_y: format_real(s.ds_offset_y),
        ins_choke: format_real(s.ins_choke),
        ins_radius: format_real(s.ins_radius),
        ins_offset_x: format_real(s.ins_offset_x),
        ins_offset_y: format_real(s.ins_offset_y),
        bb_width: format_real(s.bb_width),
        bb_height: format_real(s.bb_height),
        bb_iterations: s.bb_iterations.to_string(),
        fill_texture: s.fill_texture.clone(),
        stroke_texture: s.stroke_texture.clone(),
        stroke_paint: color::encode_default(s.stroke_paint.as_ref()),
        fill_paint: color::encode_nullable(s.fill_paint.as_ref()),
        ds_color: color::encode_nullable(s.ds_color.as_ref()),
        ins_color: color::encode_nullable(s.ins_color.as_ref()),
    }
}
