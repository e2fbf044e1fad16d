use serde_json::json;

use super::*;
use crate::{
    foundation::core::{Extent, GridRect},
    scene::model::NamedStyle,
};

fn grid() -> GridLayout {
    GridLayout::new(3, 3, Extent::new(300, 300).unwrap()).unwrap()
}

fn styles() -> StyleTable {
    let named = |name: &str, props: serde_json::Value| NamedStyle {
        name: name.into(),
        properties: serde_json::from_value(props).unwrap(),
    };
    StyleTable::new(&[
        named("title", json!({ "font_size": 32, "font_color": "white" })),
        named("big", json!({ "width": "80%", "font_size": 48 })),
    ])
}

fn build(desc: &ComponentDesc) -> Construction {
    build_component(0, desc, &grid(), &styles())
}

fn kinds(c: &Construction) -> Vec<DiagnosticKind> {
    c.diagnostics.iter().map(|d| d.kind.clone()).collect()
}

#[test]
fn text_component_gets_cell_rect_and_merged_style() {
    let desc = ComponentDesc::new("text", 4)
        .with_id("title")
        .with_style("title")
        .with_style("big")
        .with_prop("text", json!("Hello"));
    let c = build(&desc);
    assert!(c.diagnostics.is_empty(), "{:?}", c.diagnostics);

    let node = c.node.unwrap();
    assert_eq!(node.id(), Some("title"));
    assert_eq!(node.label(), "title");
    assert_eq!(node.cell(), 4);
    // width comes from the "big" style: 80% of a 100px cell, centred
    assert_eq!(node.rect(), GridRect::new(110, 100, 80, 100));
    assert_eq!(node.resolved_style().get_f64("font_size"), Some(48.0));
    assert_eq!(node.resolved_style().get_str("font_color"), Some("white"));
    let Widget::Text(text) = node.widget() else {
        panic!("expected text widget");
    };
    assert_eq!(text.text, "Hello");
    assert_eq!(text.font.size, 48.0);
}

#[test]
fn anonymous_components_are_labelled_by_index() {
    let desc = ComponentDesc::new("text", 0).with_id("_");
    let c = build_component(7, &desc, &grid(), &styles());
    let node = c.node.unwrap();
    assert_eq!(node.id(), None);
    assert_eq!(node.label(), "#7");
}

#[test]
fn unknown_type_is_dropped() {
    let c = build(&ComponentDesc::new("slider", 0));
    assert!(c.node.is_none());
    assert_eq!(
        kinds(&c),
        [DiagnosticKind::UnknownComponentType {
            kind: "slider".into()
        }]
    );
}

#[test]
fn out_of_range_cell_is_dropped() {
    let c = build(&ComponentDesc::new("text", 99).with_id("lost"));
    assert!(c.node.is_none());
    assert_eq!(c.diagnostics[0].component, "lost");
    assert_eq!(
        c.diagnostics[0].kind,
        DiagnosticKind::InvalidCellIndex { index: 99, cells: 9 }
    );
}

#[test]
fn unknown_style_is_reported_but_component_survives() {
    let desc = ComponentDesc::new("text", 0)
        .with_style("nope")
        .with_style("title");
    let c = build(&desc);
    assert_eq!(
        kinds(&c),
        [DiagnosticKind::UnknownStyleReference {
            name: "nope".into()
        }]
    );
    let node = c.node.unwrap();
    assert_eq!(node.resolved_style().get_f64("font_size"), Some(32.0));
}

#[test]
fn bad_dimension_is_ignored() {
    let desc = ComponentDesc::new("text", 0)
        .with_size(DimensionSpec::Text("wide".into()), DimensionSpec::Units(50.0));
    let c = build(&desc);
    assert_eq!(
        kinds(&c),
        [DiagnosticKind::InvalidDimension {
            property: "width".into(),
            value: "wide".into()
        }]
    );
    assert_eq!(c.node.unwrap().rect(), GridRect::new(0, 25, 100, 50));
}

#[test]
fn paragraph_line_height_defaults_from_font_size() {
    let desc = ComponentDesc::new("paragraph", 0)
        .with_prop("lines", json!(["a", "b"]))
        .with_prop("font_size", json!(20));
    let node = build(&desc).node.unwrap();
    let Widget::Paragraph(p) = node.widget() else {
        panic!("expected paragraph");
    };
    assert_eq!(p.lines, ["a", "b"]);
    assert_eq!(p.line_height, 15.0);
}

#[test]
fn input_reads_hint_limit_and_enabled() {
    let desc = ComponentDesc::new("input", 0)
        .with_prop("hint", json!("Name"))
        .with_prop("max_length", json!(8))
        .with_prop("enabled", json!(false));
    let node = build(&desc).node.unwrap();
    let Widget::Input(input) = node.widget() else {
        panic!("expected input");
    };
    assert_eq!(input.hint.as_deref(), Some("Name"));
    assert_eq!(input.max_length, Some(8));
    assert!(!input.enabled);
    assert!(node.as_focusable().is_some());
}

#[test]
fn text_button_is_text_only_button() {
    let node = build(&ComponentDesc::new("text-button", 0).with_prop("text", json!("Quit")))
        .node
        .unwrap();
    let Widget::Button(b) = node.widget() else {
        panic!("expected button");
    };
    assert_eq!(b.face, ButtonFace::TextOnly);
    assert_eq!(b.text, "Quit");
}

#[test]
fn image_without_path_is_dropped() {
    let c = build(&ComponentDesc::new("image", 0));
    assert!(c.node.is_none());
    assert_eq!(
        kinds(&c),
        [DiagnosticKind::MissingAttribute {
            attr: "path".into()
        }]
    );
}

#[test]
fn animation_with_bad_delay_stays_static() {
    let desc = ComponentDesc::new("animation", 0)
        .with_prop("images", json!(["a.png", "b.png"]))
        .with_prop("delay", json!(0))
        .with_prop("colorkey", json!([255, 0, 255]));
    let c = build(&desc);
    assert_eq!(kinds(&c), [DiagnosticKind::InvalidAnimationDelay { delay: 0.0 }]);
    let node = c.node.unwrap();
    let anim = node.as_animatable().unwrap().animation();
    assert!(anim.is_static());
    assert_eq!(anim.colorkey(), Some(Rgba8::rgb(255, 0, 255)));
}

#[test]
fn empty_animation_is_kept_but_reported() {
    let desc = ComponentDesc::new("animation", 0)
        .with_prop("images", json!([]))
        .with_prop("delay", json!(100));
    let c = build(&desc);
    assert_eq!(kinds(&c), [DiagnosticKind::EmptyAnimationSequence]);
    let node = c.node.unwrap();
    assert!(!node.as_animatable().unwrap().animation().is_pending());
}

#[test]
fn invalid_colorkey_is_reported_and_skipped() {
    let desc = ComponentDesc::new("animation", 0)
        .with_prop("images", json!(["a.png"]))
        .with_prop("delay", json!(100))
        .with_prop("colorkey", json!("not-a-color"));
    let c = build(&desc);
    assert_eq!(
        kinds(&c),
        [DiagnosticKind::InvalidColor {
            property: "colorkey".into(),
            value: "not-a-color".into()
        }]
    );
    assert_eq!(
        c.node.unwrap().as_animatable().unwrap().animation().colorkey(),
        None
    );
}

#[test]
fn spritesheet_with_non_positive_sprite_renders_nothing() {
    let desc = ComponentDesc::new("spritesheet-animation", 0)
        .with_prop("spritesheet", json!("sheet.png"))
        .with_prop("sprite_width", json!(0))
        .with_prop("sprite_height", json!(16))
        .with_prop("delay", json!(100));
    let c = build(&desc);
    assert!(matches!(
        kinds(&c).as_slice(),
        [DiagnosticKind::InvalidSpritesheetGeometry { sprite_width, .. }] if *sprite_width == 0.0
    ));
    let node = c.node.unwrap();
    let anim = node.as_animatable().unwrap().animation();
    assert!(!anim.is_pending());
    assert_eq!(anim.frame_count(), 0);
}

#[test]
fn fractional_sprite_size_is_rejected_as_declared() {
    let desc = ComponentDesc::new("spritesheet-animation", 0)
        .with_prop("spritesheet", json!("sheet.png"))
        .with_prop("sprite_width", json!(16.9))
        .with_prop("sprite_height", json!(0.5))
        .with_prop("delay", json!(100));
    let c = build(&desc);
    assert_eq!(
        kinds(&c),
        [DiagnosticKind::InvalidSpritesheetGeometry {
            sprite_width: 16.9,
            sprite_height: 0.5,
            sheet_width: 0,
            sheet_height: 0,
        }]
    );
    assert!(!c.node.unwrap().as_animatable().unwrap().animation().is_pending());
}

#[test]
fn spritesheet_source_comes_from_style_attributes() {
    let desc = ComponentDesc::new("spritesheet-animation", 0)
        .with_prop("spritesheet", json!("sheet.png"))
        .with_prop("sprite_width", json!(16))
        .with_prop("sprite_height", json!("16"))
        .with_prop("delay", json!(80));
    let c = build(&desc);
    assert!(c.diagnostics.is_empty());
    let node = c.node.unwrap();
    let anim = node.as_animatable().unwrap().animation();
    assert_eq!(
        anim.source(),
        &FrameSource::Spritesheet {
            key: "sheet.png".into(),
            geometry: SpriteGeometry::new(16, 16).unwrap(),
        }
    );
    assert_eq!(anim.delay(), Some(80.0));
}
