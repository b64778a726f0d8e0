use wxx_codec::wxx::codec::envelope;
use wxx_codec::wxx::types::models::*;
use wxx_codec::{export, export_xml, import, import_xml, WxxError};

const HEADER: &str = "<?xml version='1.0' encoding='utf-16'?>\n";

fn sample_tile(row: usize, column: usize) -> Tile {
    // First row and diagonal always read back as terrain 1.
    let terrain = if row == 0 || row == column { 1 } else { (row * 10 + column) as i32 };
    Tile {
        row,
        column,
        terrain,
        elevation: (row as f64) * 12.5 - 3.0,
        is_icy: column % 2 == 1,
        is_gm_only: row == 2,
        resources: if column == 2 {
            Resources { animal: 4, brick: 1, crops: 2, gems: 3, lumber: 4, metals: 5, rock: 100 }
        } else {
            Resources { animal: column as i32, ..Resources::default() }
        },
        custom_background_color: if row == 1 && column == 0 {
            Some(Rgba::new(0.25, 0.5, 0.75, 1.0))
        } else {
            None
        },
    }
}

fn sample_map() -> Map {
    let mut terrain_map = TerrainMap::default();
    terrain_map.push("Blank", 0);
    terrain_map.push("Water Sea", 3);
    terrain_map.push("Flat Grassland", 1);

    Map {
        map_type: "WORLD".to_string(),
        version: "1.73".to_string(),
        last_view_level: "WORLD".to_string(),
        continent_factor: -1,
        kingdom_factor: -1,
        province_factor: -1,
        world_to_continent_h_offset: 0.0,
        hex_width: 120.97791408032022,
        hex_height: 104.78814558711076,
        hex_orientation: "COLUMNS".to_string(),
        map_projection: "FLAT".to_string(),
        show_notes: true,
        show_feature_labels: true,
        show_grid: true,
        show_shadows: true,
        triangle_size: 12,
        grid_and_numbering: GridAndNumbering {
            color0: "0x00000040".to_string(),
            width0: 1.0,
            width1: 2.0,
            grid_square_height: -1.0,
            grid_square_width: -1.0,
            number_font: "Arial".to_string(),
            number_color: "0x000000ff".to_string(),
            number_size: 20,
            number_style: "PLAIN".to_string(),
            number_order: "COL_ROW".to_string(),
            number_position: "BOTTOM".to_string(),
            number_pre_pad: "DOUBLE_ZERO".to_string(),
            number_separator: ".".to_string(),
            ..GridAndNumbering::default()
        },
        terrain_map,
        map_layers: vec![
            MapLayer { name: "Labels".to_string(), is_visible: true },
            MapLayer { name: "Above Terrain".to_string(), is_visible: false },
        ],
        tiles: Tiles {
            view_level: "WORLD".to_string(),
            tiles_wide: 3,
            tiles_high: 3,
            tile_rows: (0..3).map(|r| (0..3).map(|c| sample_tile(r, c)).collect()).collect(),
        },
        map_key: MapKey {
            view_level: "WORLD".to_string(),
            height: -1.0,
            background_color: Some(Rgba::new(0.9803921580314636, 0.9215686321258545, 0.843137264251709, 1.0)),
            background_opacity: 50.0,
            title_text: "Map Key".to_string(),
            title_font_face: "Arial".to_string(),
            title_font_bold: true,
            title_scale: 80.0,
            scale_text: "1 Hex = ? units".to_string(),
            scale_scale: 65.0,
            entry_scale: 45.0,
            ..MapKey::default()
        },
        features: vec![
            Feature {
                feature_type: "Settlement City".to_string(),
                uuid: "6f1c7a0e".to_string(),
                map_layer: "Above Terrain".to_string(),
                scale: -1.0,
                scale_ht: -1.0,
                ring_color: Some(Rgba::new(1.0, 0.0, 0.0, 1.0)),
                label_position: "6:00".to_string(),
                label_distance: 0.0,
                is_world: true,
                location: Some(FeatureLocation { view_level: "WORLD".to_string(), x: 418.5, y: 733.25 }),
                label: Some(Label {
                    map_layer: "Labels".to_string(),
                    style: "null".to_string(),
                    font_face: "null".to_string(),
                    outline_color: Some(Rgba::new(1.0, 1.0, 1.0, 1.0)),
                    is_world: true,
                    location: Some(LabelLocation { view_level: "WORLD".to_string(), x: 418.5, y: 780.0, scale: 12.5 }),
                    inner_text: "Port Royal".to_string(),
                    ..Label::default()
                }),
                ..Feature::default()
            },
            Feature { feature_type: "Tree".to_string(), ..Feature::default() },
        ],
        labels: vec![Label {
            map_layer: "Labels".to_string(),
            style: "Ocean".to_string(),
            font_face: "Serif".to_string(),
            color: Some(Rgba::new(0.0, 0.2, 0.6, 1.0)),
            rotate: 15.5,
            is_italic: true,
            tags: "sea,big".to_string(),
            background_color: Some(Rgba::DEFAULT),
            location: Some(LabelLocation { view_level: "WORLD".to_string(), x: 10.0, y: 20.0, scale: 25.0 }),
            inner_text: "The Great\nSouthern Sea & Shoals".to_string(),
            ..Label::default()
        }],
        shapes: vec![Shape {
            shape_type: "Polygon".to_string(),
            creation_type: "BASIC".to_string(),
            ds_color: "null".to_string(),
            ins_color: "null".to_string(),
            stroke_color: "0.0,0.0,0.0,1.0".to_string(),
            stroke_width: 0.05,
            bb_iterations: 3,
            bb_width: 10.0,
            opacity: 1.0,
            is_box_blur: true,
            map_layer: "Above Terrain".to_string(),
            points: vec![
                Point { point_type: "m".to_string(), x: 1.5, y: 2.5 },
                Point { point_type: "l".to_string(), x: 100.0, y: -2.0 },
            ],
            ..Shape::default()
        }],
        notes: vec![Note { inner_text: "Remember the <ruins>".to_string() }],
        informations: Informations {
            informations: vec![Information {
                uuid: "i-1".to_string(),
                info_type: "Nation".to_string(),
                title: "Kingdom of Ash".to_string(),
                rulers: "Queen Mab".to_string(),
                details: vec![InformationDetail {
                    uuid: "i-1-a".to_string(),
                    info_type: "Note".to_string(),
                    title: "History".to_string(),
                    inner_text: "Founded long ago.".to_string(),
                    ..InformationDetail::default()
                }],
                inner_text: "A cold land.".to_string(),
                ..Information::default()
            }],
            inner_text: String::new(),
        },
        configuration: Configuration {
            terrain_config: vec![OpaqueConfig { inner_text: "terrain-block".to_string() }],
            feature_config: vec![OpaqueConfig::default()],
            texture_config: vec![],
            text_config: TextConfig {
                label_styles: vec![LabelStyle {
                    name: "Ocean".to_string(),
                    font_face: "Serif".to_string(),
                    scale: 25.0,
                    color: Some(Rgba::new(0.0, 0.2, 0.6, 1.0)),
                    background_color: None,
                    outline_size: 0.0,
                    outline_color: Some(Rgba::DEFAULT),
                    ..LabelStyle::default()
                }],
                inner_text: String::new(),
            },
            shape_config: ShapeConfig {
                shape_styles: vec![ShapeStyle {
                    name: "Coast".to_string(),
                    stroke_type: "SIMPLE".to_string(),
                    stroke_width: 0.05,
                    opacity: 1.0,
                    snap_vertices: true,
                    bb_iterations: 3,
                    stroke_paint: Some(Rgba::new(0.1, 0.1, 0.1, 1.0)),
                    fill_paint: Some(Rgba::new(0.2, 0.4, 0.8, 0.5)),
                    ..ShapeStyle::default()
                }],
                inner_text: String::new(),
            },
            inner_text: String::new(),
        },
        ..Map::default()
    }
}

#[test]
fn binary_round_trip_reproduces_model() {
    let original = sample_map();
    let bytes = export(&original).expect("export");
    let decoded = import(&bytes).expect("import");
    assert_eq!(decoded, original);
}

#[test]
fn second_export_is_byte_identical() {
    let first = export_xml(&sample_map()).unwrap();
    let second = export_xml(&import_xml(&first).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn export_writes_header_and_root_attributes_in_order() {
    let xml = export_xml(&sample_map()).unwrap();
    assert!(xml.starts_with(HEADER));
    assert!(xml[HEADER.len()..].starts_with(
        "<map type=\"WORLD\" version=\"1.73\" lastViewLevel=\"WORLD\" continentFactor=\"-1\" \
         kingdomFactor=\"-1\" provinceFactor=\"-1\" worldToContinentHOffset=\"0.0\""
    ));
    assert!(xml.contains("hexWidth=\"120.97791408032022\""));
    assert!(xml.contains("showGMOnly=\"false\""));
    assert!(xml.ends_with("</map>\n"));
}

#[test]
fn export_uses_field_specific_number_and_color_forms() {
    let xml = export_xml(&sample_map()).unwrap();

    // map key scales are bare integers, positions keep ".0"
    assert!(xml.contains("positionx=\"0.0\""));
    assert!(xml.contains(" height=\"-1\""));
    assert!(xml.contains("backgroundopacity=\"50\""));
    assert!(xml.contains("titleScale=\"80\""));
    assert!(xml.contains("titleFontColor=\"0.0,0.0,0.0,1.0\""));

    // absent feature colors become null, the label's default background is literal
    assert!(xml.contains("color=\"null\" ringcolor=\"1.0,0.0,0.0,1.0\""));
    assert!(xml.contains("labelDistance=\"0\""));
    assert!(xml.contains("tags=\"\" backgroundColor=\"0.0,0.0,0.0,1.0\"><location"));

    // label style outline kept literal, absent background nullable
    assert!(xml.contains("backgroundColor=\"null\" outlineSize=\"0.0\" outlineColor=\"0.0,0.0,0.0,1.0\""));
    assert!(xml.contains("strokePaint=\"0.1,0.1,0.1,1.0\" fillPaint=\"0.2,0.4,0.8,0.5\" dscolor=\"null\" insColor=\"null\""));

    // label text newlines are written as character references
    assert!(xml.contains(">The Great&#10;Southern Sea &amp; Shoals</label>"));
    assert!(xml.contains("<note>Remember the &lt;ruins&gt;</note>"));
}

#[test]
fn feature_label_text_and_notes_keep_raw_characters() {
    let mut map = sample_map();
    if let Some(label) = map.features[0].label.as_mut() {
        label.inner_text = "Port\nRoyal".to_string();
    }
    map.notes = vec![Note { inner_text: "King's \"road\"".to_string() }];

    let xml = export_xml(&map).unwrap();
    assert!(xml.contains("/>Port\nRoyal</label>"));
    assert!(xml.contains("<note>King's \"road\"</note>"));
    assert!(xml.contains(">The Great&#10;Southern Sea &amp; Shoals</label>"));

    let back = import_xml(&xml).unwrap();
    assert_eq!(back.features[0].label.as_ref().unwrap().inner_text, "Port\nRoyal");
    assert_eq!(back.notes[0].inner_text, "King's \"road\"");
}

#[test]
fn export_writes_tile_rows() {
    let xml = export_xml(&sample_map()).unwrap();
    assert!(xml.contains("<tiles viewLevel=\"WORLD\" tilesWide=\"3\" tilesHigh=\"3\">"));
    assert!(xml.contains(
        "<tilerow>\n1\t-3\t0\t0\t0\tZ\n1\t-3\t1\t0\t1\tZ\n1\t-3\t0\t0\t4\t1\t2\t3\t4\t5\t100\n</tilerow>"
    ));
    assert!(xml.contains("10\t9.5\t0\t0\t0\tZ\t0.25,0.5,0.75,1.0\n"));
    assert!(xml.contains("<terrainmap>Blank\t0\tWater Sea\t3\tFlat Grassland\t1</terrainmap>"));
}

#[test]
fn import_overrides_terrain_by_position() {
    let xml = format!(
        "{}<map type=\"WORLD\" version=\"1.73\" hexOrientation=\"COLUMNS\">\n\
         <terrainmap>Blank\t0</terrainmap>\n\
         <tiles viewLevel=\"WORLD\" tilesWide=\"2\" tilesHigh=\"2\">\n\
         <tilerow>\n3\t10.0\t0\t0\t5\tZ\n4\t0\t0\t0\t0\tZ\n</tilerow>\n\
         <tilerow>\n6\t0\t0\t0\t0\tZ\n8\t0\t0\t0\t0\tZ\n</tilerow>\n\
         </tiles>\n</map>\n",
        HEADER
    );
    let map = import_xml(&xml).unwrap();
    let rows: Vec<Vec<i32>> = map
        .tiles
        .tile_rows
        .iter()
        .map(|row| row.iter().map(|t| t.terrain).collect())
        .collect();
    assert_eq!(rows, vec![vec![1, 1], vec![6, 1]]);
    assert_eq!(map.tiles.tile_rows[0][0].elevation, 10.0);
    assert_eq!(map.tiles.tile_rows[0][0].resources.animal, 5);
}

#[test]
fn import_survives_huge_declared_height() {
    let xml = format!(
        "{}<map version=\"1.73\"><tiles viewLevel=\"WORLD\" tilesWide=\"1\" tilesHigh=\"2000000000\">\
         <tilerow>\n1\t0\t0\t0\t0\tZ\n</tilerow></tiles></map>",
        HEADER
    );
    let map = import_xml(&xml).unwrap();
    assert_eq!(map.tiles.tiles_high, 2_000_000_000);
    assert_eq!(map.tiles.tile_rows.len(), 1);
    assert_eq!(map.tiles.tile_rows[0].len(), 1);
}

#[test]
fn explicit_defaults_collapse_once_then_stay_stable() {
    let mut map = sample_map();
    if let Some(label) = map.features[0].label.as_mut() {
        label.color = Some(Rgba::DEFAULT);
    }
    map.map_key.title_font_color = Some(Rgba::DEFAULT);
    map.configuration.shape_config.shape_styles[0].stroke_paint = Some(Rgba::DEFAULT);
    map.tiles.tile_rows[2][0].custom_background_color = Some(Rgba::DEFAULT);

    let first = import(&export(&map).unwrap()).unwrap();
    assert_eq!(first.features[0].label.as_ref().unwrap().color, None);
    assert_eq!(first.map_key.title_font_color, None);
    assert_eq!(first.configuration.shape_config.shape_styles[0].stroke_paint, None);
    assert_eq!(first.tiles.tile_rows[2][0].custom_background_color, None);

    let mut expected = map.clone();
    if let Some(label) = expected.features[0].label.as_mut() {
        label.color = None;
    }
    expected.map_key.title_font_color = None;
    expected.configuration.shape_config.shape_styles[0].stroke_paint = None;
    expected.tiles.tile_rows[2][0].custom_background_color = None;
    assert_eq!(first, expected);

    let second = import(&export(&first).unwrap()).unwrap();
    assert_eq!(second, first);
}

#[test]
fn import_decodes_color_variants_per_field() {
    let xml = format!(
        "{}<map version=\"1.73\">\n\
         <features>\n\
         <feature type=\"Tree\" color=\"null\" ringcolor=\"0.0,0.0,0.0,1.0\"></feature>\n\
         </features>\n\
         <labels>\n\
         <label color=\"0.0,0.0,0.0,1.0\" backgroundColor=\"0.0,0.0,0.0,1.0\">Text</label>\n\
         <label color=\"0.5,0.5,0.5,1.0\">Two</label>\n\
         </labels>\n\
         <configuration><text-config><labelstyle name=\"a\" outlineColor=\"0.0,0.0,0.0,1.0\" backgroundColor=\"null\"/></text-config></configuration>\n\
         </map>\n",
        HEADER
    );
    let map = import_xml(&xml).unwrap();

    let feature = &map.features[0];
    assert_eq!(feature.color, None);
    assert_eq!(feature.ring_color, None);
    assert!(feature.location.is_none());
    assert!(feature.label.is_none());

    assert_eq!(map.labels[0].color, None);
    assert_eq!(map.labels[0].background_color, Some(Rgba::DEFAULT));
    assert_eq!(map.labels[0].inner_text, "Text");
    assert!(map.labels[0].location.is_none());
    assert_eq!(map.labels[1].color, Some(Rgba::new(0.5, 0.5, 0.5, 1.0)));
    assert_eq!(map.labels[1].background_color, None);

    let style = &map.configuration.text_config.label_styles[0];
    assert_eq!(style.outline_color, Some(Rgba::DEFAULT));
    assert_eq!(style.background_color, None);
}

#[test]
fn import_reports_field_paths() {
    let xml = format!(
        "{}<map version=\"1.73\"><features><feature type=\"Tree\"/><feature color=\"1,2,3\"/></features></map>",
        HEADER
    );
    match import_xml(&xml) {
        Err(WxxError::Color { field, .. }) => assert_eq!(field, "features[1].color"),
        other => panic!("unexpected: {:?}", other),
    }

    let xml = format!("{}<map version=\"1.73\" hexWidth=\"wide\"/>", HEADER);
    match import_xml(&xml) {
        Err(e @ WxxError::InvalidValue { .. }) => assert!(e.to_string().starts_with("map.hexWidth")),
        other => panic!("unexpected: {:?}", other),
    }

    let xml = format!("{}<map version=\"1.73\"><terrainmap>Blank</terrainmap></map>", HEADER);
    assert!(matches!(import_xml(&xml), Err(WxxError::OddTerrainTokens(1))));
}

#[test]
fn dispatcher_errors_are_distinct() {
    assert!(matches!(import_xml("<map version=\"1.73\"/>"), Err(WxxError::MissingXmlHeader)));
    assert!(matches!(
        import_xml("<?xml version=\"1.0\" encoding=\"utf-16\"?>\n<map version=\"1.73\"/>"),
        Err(WxxError::MissingXmlHeader)
    ));

    let missing = format!("{}<map type=\"WORLD\"/>", HEADER);
    assert!(matches!(import_xml(&missing), Err(WxxError::MissingVersion)));

    let unsupported = format!("{}<map version=\"1.74\"/>", HEADER);
    match import_xml(&unsupported) {
        Err(WxxError::UnsupportedVersion(v)) => assert_eq!(v, "1.74"),
        other => panic!("unexpected: {:?}", other),
    }

    let empty = HEADER.to_string();
    assert!(matches!(import_xml(&empty), Err(WxxError::Xml(_))));

    let wrong_root = format!("{}<world version=\"1.73\"/>", HEADER);
    assert!(matches!(import_xml(&wrong_root), Err(WxxError::Xml(_))));

    let broken = format!("{}<map version=\"1.73\"><tiles></map>", HEADER);
    assert!(matches!(import_xml(&broken), Err(WxxError::Xml(_))));
}

#[test]
fn import_rejects_envelope_errors_before_parsing() {
    let utf16_le = envelope::gzip_encode(&[0xFF, 0xFE, b'<', 0x00]).unwrap();
    assert!(matches!(import(&utf16_le), Err(WxxError::NotBigEndian)));

    let no_header = envelope::encode(b"<map version=\"1.73\"/>").unwrap();
    assert!(matches!(import(&no_header), Err(WxxError::MissingXmlHeader)));
}

#[test]
fn export_rejects_out_of_range_tile() {
    let mut map = sample_map();
    map.tiles.tile_rows[1][2].resources.gems = 101;
    assert!(matches!(export(&map), Err(WxxError::Tile { row: 1, column: 2, .. })));
}

#[test]
fn json_interchange_uses_editor_field_names() {
    let map = sample_map();
    let json = serde_json::to_value(&map).unwrap();
    assert_eq!(json["type"], "WORLD");
    assert_eq!(json["showGMOnly"], false);
    assert_eq!(json["mapKey"]["backgroundopacity"], 50.0);
    assert_eq!(json["tiles"]["tilerow"][1][0]["CustomBackgroundColor"]["B"], 0.75);
    assert_eq!(json["features"][0]["ringcolor"]["R"], 1.0);
    assert!(json["features"][0].get("color").is_none());
    assert_eq!(json["configuration"]["text-config"]["labelStyles"][0]["name"], "Ocean");

    let back: Map = serde_json::from_value(json).unwrap();
    assert_eq!(back.terrain_map, map.terrain_map);
    assert_eq!(back.tiles, map.tiles);
    assert_eq!(back.features, map.features);
    assert_eq!(back.labels, map.labels);
    assert_eq!(back.shapes, map.shapes);
    assert_eq!(back.informations, map.informations);
    assert_eq!(back.configuration, map.configuration);
}
