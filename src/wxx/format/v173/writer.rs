//! Renders schema 1.73 wire structures as XML text.
//!
//! Layout follows what the editor writes: one element per line for attribute-only
//! elements, and no added whitespace inside elements whose text the model keeps.

use std::borrow::Cow;

use super::wire::*;
use crate::wxx::format::version::XML_HEADER;
use crate::wxx::format::xml::{escape_attribute, escape_text};

/// `<information>` attributes written even when empty.
const INFORMATION_REQUIRED: [&str; 3] = ["uuid", "type", "title"];

/// Renders a complete document, starting with the XML header line.
pub fn render(map: &WireMap) -> String {
    let mut out = String::with_capacity(estimate_size(map));
    out.push_str(XML_HEADER);

    open(&mut out, names::MAP, &map.attrs.attributes());
    out.push('\n');

    empty(&mut out, names::GRID_AND_NUMBERING, &map.grid_and_numbering.attributes());
    text_element(&mut out, names::TERRAIN_MAP, &map.terrain_map);
    for layer in &map.map_layers {
        empty(&mut out, names::MAP_LAYER, &layer.attributes());
    }

    open(&mut out, names::TILES, &map.tiles.attrs.attributes());
    out.push('\n');
    for row in &map.tiles.rows {
        out.push_str("<tilerow>\n");
        out.push_str(&escape_text(row));
        out.push_str("</tilerow>\n");
    }
    close(&mut out, names::TILES);

    open(&mut out, names::MAP_KEY, &map.map_key.attributes());
    out.push('\n');
    close(&mut out, names::MAP_KEY);

    open_bare(&mut out, names::FEATURES);
    for feature in &map.features {
        open(&mut out, names::FEATURE, &feature.attrs.attributes());
        out.push('\n');
        if let Some(location) = &feature.location {
            empty(&mut out, names::LOCATION, &location.attributes());
        }
        if let Some(label) = &feature.label {
            write_label(&mut out, label, escape_text(&label.text));
        }
        close(&mut out, names::FEATURE);
    }
    close(&mut out, names::FEATURES);

    open_bare(&mut out, names::LABELS);
    // Free labels write line breaks as character references.
    for label in &map.labels {
        write_label(&mut out, label, escape_text(&label.text).replace('\n', "&#10;").into());
    }
    close(&mut out, names::LABELS);

    open_bare(&mut out, names::SHAPES);
    for shape in &map.shapes {
        open(&mut out, names::SHAPE, &shape.attrs.attributes());
        out.push('\n');
        for point in &shape.points {
            out.push(' ');
            empty(&mut out, names::POINT, &point.attributes());
        }
        close(&mut out, names::SHAPE);
    }
    close(&mut out, names::SHAPES);

    open_bare(&mut out, names::NOTES);
    for note in &map.notes {
        text_element(&mut out, names::NOTE, note);
    }
    close(&mut out, names::NOTES);

    write_informations(&mut out, &map.informations);
    write_configuration(&mut out, &map.configuration);

    close(&mut out, names::MAP);
    out
}

/// `text` is the already escaped character data.
fn write_label(out: &mut String, label: &WireLabel, text: Cow<'_, str>) {
    let attributes: Vec<_> = label
        .attrs
        .attributes()
        .into_iter()
        .filter(|(name, value)| *name != "backgroundColor" || !value.is_empty())
        .collect();
    open(out, names::LABEL, &attributes);
    if let Some(location) = &label.location {
        empty_inline(out, names::LOCATION, &location.attributes());
    }
    out.push_str(&text);
    close(out, names::LABEL);
}

fn write_informations(out: &mut String, infos: &WireInformations) {
    out.push('<');
    out.push_str(names::INFORMATIONS);
    out.push('>');
    out.push_str(&escape_text(&infos.text));
    for info in &infos.entries {
        open(out, names::INFORMATION, &information_attributes(&info.attrs));
        out.push_str(&escape_text(&info.text));
        for detail in &info.details {
            open(out, names::INFORMATION, &information_attributes(&detail.attrs));
            out.push_str(&escape_text(&detail.text));
            close_inline(out, names::INFORMATION);
        }
        close_inline(out, names::INFORMATION);
    }
    close(out, names::INFORMATIONS);
}

fn information_attributes(attrs: &InformationAttrs) -> Vec<(&'static str, &str)> {
    attrs
        .attributes()
        .into_iter()
        .filter(|(name, value)| INFORMATION_REQUIRED.contains(name) || !value.is_empty())
        .collect()
}

fn write_configuration(out: &mut String, config: &WireConfiguration) {
    out.push('<');
    out.push_str(names::CONFIGURATION);
    out.push('>');
    out.push_str(&escape_text(&config.text));
    for text in &config.terrain_config {
        inline_text_element(out, names::TERRAIN_CONFIG, text);
    }
    for text in &config.feature_config {
        inline_text_element(out, names::FEATURE_CONFIG, text);
    }
    for text in &config.texture_config {
        inline_text_element(out, names::TEXTURE_CONFIG, text);
    }
    for block in &config.text_config {
        out.push_str("<text-config>");
        out.push_str(&escape_text(&block.text));
        for style in &block.label_styles {
            empty_inline(out, names::LABEL_STYLE, &style.attributes());
        }
        close_inline(out, names::TEXT_CONFIG);
    }
    for block in &config.shape_config {
        out.push_str("<shape-config>");
        out.push_str(&escape_text(&block.text));
        for style in &block.shape_styles {
            empty_inline(out, names::SHAPE_STYLE, &style.attributes());
        }
        close_inline(out, names::SHAPE_CONFIG);
    }
    close(out, names::CONFIGURATION);
}

fn push_attributes(out: &mut String, attributes: &[(&'static str, &str)]) {
    for (name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }
}

/// `<name attrs>` with no trailing newline.
fn open(out: &mut String, name: &str, attributes: &[(&'static str, &str)]) {
    out.push('<');
    out.push_str(name);
    push_attributes(out, attributes);
    out.push('>');
}

/// `<name>` followed by a newline.
fn open_bare(out: &mut String, name: &str) {
    out.push('<');
    out.push_str(name);
    out.push_str(">\n");
}

/// `</name>` followed by a newline.
fn close(out: &mut String, name: &str) {
    close_inline(out, name);
    out.push('\n');
}

fn close_inline(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// `<name attrs/>` followed by a newline.
fn empty(out: &mut String, name: &str, attributes: &[(&'static str, &str)]) {
    empty_inline(out, name, attributes);
    out.push('\n');
}

fn empty_inline(out: &mut String, name: &str, attributes: &[(&'static str, &str)]) {
    out.push('<');
    out.push_str(name);
    push_attributes(out, attributes);
    out.push_str("/>");
}

/// `<name>text</name>` followed by a newline.
fn text_element(out: &mut String, name: &str, text: &str) {
    inline_text_element(out, name, text);
    out.push('\n');
}

fn inline_text_element(out: &mut String, name: &str, text: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&escape_text(text));
    close_inline(out, name);
}

fn estimate_size(map: &WireMap) -> usize {
    let tiles: usize = map.tiles.rows.iter().map(String::len).sum();
    4096 + tiles + map.terrain_map.len() + 512 * (map.features.len() + map.labels.len() + map.shapes.len())
}
