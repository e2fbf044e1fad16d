//! Turns one [`ComponentDesc`] into a [`ComponentNode`], collecting diagnostics on the way.

use serde_json::Value;

use crate::{
    animation::{
        spritesheet::SpriteGeometry,
        state::{AnimationState, FrameSource},
    },
    component::{
        draw::FontSpec,
        kind::ComponentKind,
        node::{ComponentNode, Widget},
        widgets::{
            AnimationWidget, ButtonFace, ButtonWidget, ImageSlot, ImageWidget, InputWidget,
            ParagraphWidget, TextWidget,
        },
    },
    foundation::{
        color::Rgba8,
        error::{Diagnostic, DiagnosticKind},
    },
    layout::grid::GridLayout,
    scene::model::{ComponentDesc, Dimension, DimensionSpec},
    style::{ResolvedStyle, StyleTable},
};

/// Paragraph line height as a fraction of the font size when none is declared.
const DEFAULT_LINE_HEIGHT_RATIO: f64 = 0.75;

/// Result of constructing one component. `node` is `None` when the component was rejected.
#[derive(Clone, Debug)]
pub struct Construction {
    pub node: Option<ComponentNode>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve cell, style and size, then build the widget for `desc`.
///
/// `index` is the declaration index, used to label anonymous components.
pub fn build_component(
    index: usize,
    desc: &ComponentDesc,
    grid: &GridLayout,
    styles: &StyleTable,
) -> Construction {
    let label = desc
        .lookup_id()
        .map_or_else(|| format!("#{index}"), str::to_owned);
    let mut kinds = Vec::new();
    let node = construct(desc, grid, styles, &label, &mut kinds);
    Construction {
        node,
        diagnostics: kinds
            .into_iter()
            .map(|kind| Diagnostic::new(label.as_str(), kind))
            .collect(),
    }
}

fn construct(
    desc: &ComponentDesc,
    grid: &GridLayout,
    styles: &StyleTable,
    label: &str,
    diags: &mut Vec<DiagnosticKind>,
) -> Option<ComponentNode> {
    let kind = desc
        .kind
        .parse::<ComponentKind>()
        .map_err(|e| diags.push(e))
        .ok()?;
    let addr = grid
        .address(desc.grid_cell)
        .map_err(|e| diags.push(e))
        .ok()?;

    let resolution = styles.resolve(&desc.style, &desc.properties);
    diags.extend(
        resolution
            .unknown
            .into_iter()
            .map(|name| DiagnosticKind::UnknownStyleReference { name }),
    );
    let style = resolution.style;

    let width = dimension("width", desc.width.as_ref(), &style, diags);
    let height = dimension("height", desc.height.as_ref(), &style, diags);
    let rect = grid
        .component_rect(desc.grid_cell, width, height)
        .map_err(|e| diags.push(e))
        .ok()?;

    let widget = build_widget(kind, &style, diags)?;
    Some(ComponentNode::new(
        desc.lookup_id().map(str::to_owned),
        label.to_owned(),
        kind,
        addr.index,
        rect,
        style,
        widget,
    ))
}

fn build_widget(
    kind: ComponentKind,
    style: &ResolvedStyle,
    diags: &mut Vec<DiagnosticKind>,
) -> Option<Widget> {
    let font = FontSpec::from_style(style);
    let enabled = style.get_bool("enabled").unwrap_or(true);

    let widget = match kind {
        ComponentKind::Text => Widget::Text(TextWidget {
            text: text_attr(style, "text"),
            font,
        }),
        ComponentKind::Paragraph => {
            let line_height = style
                .get_f64("line_height")
                .filter(|h| h.is_finite() && *h > 0.0)
                .unwrap_or(font.size * DEFAULT_LINE_HEIGHT_RATIO);
            Widget::Paragraph(ParagraphWidget {
                lines: style.get_strings("lines").unwrap_or_default(),
                line_height,
                font,
            })
        }
        ComponentKind::Button | ComponentKind::TextButton => {
            let face = if kind == ComponentKind::Button {
                ButtonFace::Framed
            } else {
                ButtonFace::TextOnly
            };
            let mut button = ButtonWidget::new(face, text_attr(style, "text"), font, enabled);
            if let Some(key) = style.get_str("bg_image") {
                button = button.with_bg_image(ImageSlot::new(key, None));
            }
            Widget::Button(button)
        }
        ComponentKind::Input => {
            let mut input = InputWidget::new(text_attr(style, "text"), font);
            input.hint = style.get_str("hint").map(str::to_owned);
            input.max_length = style.get_u32("max_length").map(|n| n as usize);
            input.enabled = enabled;
            Widget::Input(input)
        }
        ComponentKind::Image => {
            let key = required_str(style, "path", diags)?;
            let colorkey = read_colorkey(style, diags);
            Widget::Image(ImageWidget {
                slot: ImageSlot::new(key, colorkey),
            })
        }
        ComponentKind::Animation => {
            let keys = style.get_strings("images").unwrap_or_default();
            if keys.is_empty() {
                diags.push(DiagnosticKind::EmptyAnimationSequence);
            }
            let delay = read_delay(style, diags);
            let colorkey = read_colorkey(style, diags);
            Widget::Animation(AnimationWidget {
                state: AnimationState::new(FrameSource::Images { keys }, delay, colorkey),
            })
        }
        ComponentKind::SpritesheetAnimation => {
            let key = required_str(style, "spritesheet", diags)?;
            let sprite_width = required_f64(style, "sprite_width", diags)?;
            let sprite_height = required_f64(style, "sprite_height", diags)?;
            let delay = read_delay(style, diags);
            let colorkey = read_colorkey(style, diags);
            let state = match SpriteGeometry::from_declared(sprite_width, sprite_height) {
                Ok(geometry) => AnimationState::new(
                    FrameSource::Spritesheet { key, geometry },
                    delay,
                    colorkey,
                ),
                Err(e) => {
                    diags.push(e);
                    AnimationState::inert()
                }
            };
            Widget::Animation(AnimationWidget { state })
        }
    };
    Some(widget)
}

/// `width`/`height` from the component itself, else from its resolved style. An unparseable
/// value is reported and ignored.
fn dimension(
    property: &str,
    declared: Option<&DimensionSpec>,
    style: &ResolvedStyle,
    diags: &mut Vec<DiagnosticKind>,
) -> Option<Dimension> {
    let spec = match declared {
        Some(spec) => spec.clone(),
        None => match style.get(property)? {
            Value::Number(n) => DimensionSpec::Units(n.as_f64()?),
            Value::String(s) => DimensionSpec::Text(s.clone()),
            other => DimensionSpec::Text(other.to_string()),
        },
    };
    let parsed = spec.parse();
    if parsed.is_none() {
        diags.push(DiagnosticKind::InvalidDimension {
            property: property.to_owned(),
            value: spec.to_string(),
        });
    }
    parsed
}

/// Missing delay and non-positive delay both leave the animation on frame 0.
fn read_delay(style: &ResolvedStyle, diags: &mut Vec<DiagnosticKind>) -> Option<f64> {
    if !style.contains("delay") {
        diags.push(DiagnosticKind::MissingAttribute {
            attr: "delay".into(),
        });
        return None;
    }
    match style.get_f64("delay") {
        Some(d) if d.is_finite() && d > 0.0 => Some(d),
        other => {
            diags.push(DiagnosticKind::InvalidAnimationDelay {
                delay: other.unwrap_or(f64::NAN),
            });
            None
        }
    }
}

/// `"#RRGGBB"`, a colour name, or an `[r, g, b]` triple. Only RGB takes part in matching.
fn read_colorkey(style: &ResolvedStyle, diags: &mut Vec<DiagnosticKind>) -> Option<Rgba8> {
    let value = style.get("colorkey")?;
    let parsed = match value {
        Value::String(s) => Rgba8::parse(s),
        Value::Array(items) if items.len() == 3 => {
            let channel = |v: &Value| v.as_u64().and_then(|c| u8::try_from(c).ok());
            match (channel(&items[0]), channel(&items[1]), channel(&items[2])) {
                (Some(r), Some(g), Some(b)) => Some(Rgba8::rgb(r, g, b)),
                _ => None,
            }
        }
        _ => None,
    };
    if parsed.is_none() {
        diags.push(DiagnosticKind::InvalidColor {
            property: "colorkey".into(),
            value: match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        });
    }
    parsed
}

fn text_attr(style: &ResolvedStyle, key: &str) -> String {
    match style.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn required_str(
    style: &ResolvedStyle,
    key: &str,
    diags: &mut Vec<DiagnosticKind>,
) -> Option<String> {
    let value = style.get_str(key).filter(|s| !s.is_empty());
    if value.is_none() {
        diags.push(DiagnosticKind::MissingAttribute { attr: key.into() });
    }
    value.map(str::to_owned)
}

fn required_f64(style: &ResolvedStyle, key: &str, diags: &mut Vec<DiagnosticKind>) -> Option<f64> {
    let value = style.get_f64(key);
    if value.is_none() {
        diags.push(DiagnosticKind::MissingAttribute { attr: key.into() });
    }
    value
}

#[cfg(test)]
#[path = "../../tests/unit/component/factory.rs"]
mod tests;
