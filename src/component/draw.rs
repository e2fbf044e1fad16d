//! Back-end-agnostic draw commands.
//!
//! A [`DrawList`] is the only thing a renderer needs per frame: ops are painted in order, each
//! carrying its own rect and colours. Colours stay as written in the description; resolving them
//! to pixels is the back end's job.

use crate::{
    assets::store::FrameImage,
    foundation::{color::ColorValue, core::GridRect},
    style::ResolvedStyle,
};

pub const DEFAULT_FONT_SIZE: f64 = 18.0;
pub const DEFAULT_FONT_COLOR: &str = "#000000";
/// Left inset of text inside an input box.
pub const INPUT_TEXT_INSET: f64 = 15.0;

#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// Family name or font asset key; `None` is the back end's default face.
    pub family: Option<String>,
    pub size: f64,
    pub color: ColorValue,
    pub bold: bool,
    pub italic: bool,
    pub antialias: bool,
}

impl FontSpec {
    pub fn from_style(style: &ResolvedStyle) -> Self {
        Self {
            family: style.get_str("font").map(str::to_owned),
            size: style
                .get_f64("font_size")
                .filter(|s| s.is_finite() && *s > 0.0)
                .unwrap_or(DEFAULT_FONT_SIZE),
            color: style
                .get_color("font_color")
                .unwrap_or_else(|| ColorValue::from(DEFAULT_FONT_COLOR)),
            bold: style.get_bool("bold").unwrap_or(false),
            italic: style.get_bool("italic").unwrap_or(false),
            antialias: style.get_bool("antialias").unwrap_or(true),
        }
    }

    pub fn with_color(mut self, color: ColorValue) -> Self {
        self.color = color;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextAlign {
    /// Centred in the rect on both axes.
    Center,
    /// Vertically centred, starting `inset` pixels from the left edge. Text wider than the rect
    /// is shifted so its end stays visible.
    Start { inset: f64 },
}

#[derive(Clone, Debug)]
pub enum DrawOp {
    Fill {
        rect: GridRect,
        color: ColorValue,
        radius: f64,
    },
    Outline {
        rect: GridRect,
        color: ColorValue,
        width: f64,
        radius: f64,
    },
    Text {
        rect: GridRect,
        text: String,
        font: FontSpec,
        align: TextAlign,
    },
    Paragraph {
        rect: GridRect,
        lines: Vec<String>,
        line_height: f64,
        font: FontSpec,
    },
    /// Pixels scaled to fill `rect`. Colorkeyed pixels already carry alpha 0.
    Image { rect: GridRect, image: FrameImage },
}

impl DrawOp {
    pub fn rect(&self) -> GridRect {
        match self {
            Self::Fill { rect, .. }
            | Self::Outline { rect, .. }
            | Self::Text { rect, .. }
            | Self::Paragraph { rect, .. }
            | Self::Image { rect, .. } => *rect,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fill { .. } => "fill",
            Self::Outline { .. } => "outline",
            Self::Text { .. } => "text",
            Self::Paragraph { .. } => "paragraph",
            Self::Image { .. } => "image",
        }
    }
}

/// Ordered draw commands for one frame.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawOp> {
        self.ops.iter()
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawOp;
    type IntoIter = std::slice::Iter<'a, DrawOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
