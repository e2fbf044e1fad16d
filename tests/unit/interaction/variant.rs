use serde_json::json;

use super::*;
use crate::scene::model::PropertyMap;

fn style(pairs: &[(&str, serde_json::Value)]) -> ResolvedStyle {
    let map: PropertyMap = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect();
    ResolvedStyle::from_map(map)
}

fn input_style() -> ResolvedStyle {
    style(&[
        ("bg_color", json!("#ffffff")),
        ("bg_focus_color", json!("#eeeeee")),
        ("border_focus_color", json!("blue")),
        ("border_radius", json!(6)),
    ])
}

#[test]
fn idle_uses_base_background() {
    let v = StyleVariant::select(&input_style(), FocusState::Idle);
    assert_eq!(v.background, Some(ColorValue::from("#ffffff")));
    assert_eq!(v.border, None);
    assert_eq!(v.border_radius, 6.0);
}

#[test]
fn hover_swaps_background_without_border() {
    let v = StyleVariant::select(&input_style(), FocusState::Hovered);
    assert_eq!(v.background, Some(ColorValue::from("#eeeeee")));
    assert_eq!(v.border, None);
}

#[test]
fn focus_adds_two_pixel_border() {
    let v = StyleVariant::select(&input_style(), FocusState::Focused);
    assert_eq!(v.background, Some(ColorValue::from("#eeeeee")));
    assert_eq!(v.border, Some((ColorValue::from("blue"), 2.0)));
}

#[test]
fn missing_focus_keys_fall_back_to_base() {
    let s = style(&[("bg_color", json!("red")), ("font_color", json!("white"))]);
    let v = StyleVariant::select(&s, FocusState::Pressed);
    assert_eq!(v.background, Some(ColorValue::from("red")));
    assert_eq!(v.font_color, Some(ColorValue::from("white")));
    assert_eq!(v.border, None);
}

#[test]
fn text_button_focus_color_replaces_font_color() {
    let s = style(&[("font_color", json!("black")), ("focus_color", json!("#ff8800"))]);
    assert_eq!(
        StyleVariant::select(&s, FocusState::Idle).font_color,
        Some(ColorValue::from("black"))
    );
    assert_eq!(
        StyleVariant::select(&s, FocusState::Hovered).font_color,
        Some(ColorValue::from("#ff8800"))
    );
}

#[test]
fn plain_border_uses_declared_width() {
    let s = style(&[("border_color", json!("gray")), ("border_width", json!(3))]);
    let v = StyleVariant::select(&s, FocusState::Idle);
    assert_eq!(v.border, Some((ColorValue::from("gray"), 3.0)));
}
