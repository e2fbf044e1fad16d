use crate::{foundation::color::ColorValue, interaction::focus::FocusState, style::ResolvedStyle};

/// Width of the outline drawn around an active component.
pub const FOCUS_BORDER_WIDTH: f64 = 2.0;

/// Colour choices for one focus state, picked from the resolved style's declared keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleVariant {
    pub background: Option<ColorValue>,
    /// Outline colour and stroke width.
    pub border: Option<(ColorValue, f64)>,
    pub font_color: Option<ColorValue>,
    pub border_radius: f64,
}

impl StyleVariant {
    /// `bg_focus_color` and `focus_color` replace `bg_color` and `font_color` while highlighted;
    /// `border_focus_color` is drawn only while active. Undeclared variants fall back to the base
    /// key.
    pub fn select(style: &ResolvedStyle, state: FocusState) -> Self {
        let pick = |focus_key: &str, base_key: &str| {
            state
                .is_highlighted()
                .then(|| style.get_color(focus_key))
                .flatten()
                .or_else(|| style.get_color(base_key))
        };

        let focus_border = state
            .is_active()
            .then(|| style.get_color("border_focus_color"))
            .flatten()
            .map(|c| (c, FOCUS_BORDER_WIDTH));
        let border = focus_border.or_else(|| {
            style
                .get_color("border_color")
                .map(|c| (c, style.get_f64("border_width").unwrap_or(1.0)))
        });

        Self {
            background: pick("bg_focus_color", "bg_color"),
            border,
            font_color: pick("focus_color", "font_color"),
            border_radius: style.get_f64("border_radius").unwrap_or(0.0).max(0.0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/variant.rs"]
mod tests;
