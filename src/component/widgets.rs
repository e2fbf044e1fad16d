use crate::{
    animation::{frames::FrameCache, state::AnimationState},
    assets::store::{AssetLoader, AssetPoll, FrameImage},
    component::{
        Animatable, DrawContext, Drawable, Focusable, InteractionKind,
        draw::{DrawList, DrawOp, FontSpec, INPUT_TEXT_INSET, TextAlign},
    },
    foundation::{color::Rgba8, error::DiagnosticKind},
    interaction::{
        focus::{FocusState, InputEvent, Key, Stimulus},
        variant::StyleVariant,
    },
};

/// One asset-backed image, polled until the loader delivers it.
#[derive(Clone, Debug)]
pub struct ImageSlot {
    key: String,
    colorkey: Option<Rgba8>,
    image: Option<FrameImage>,
    failure_reported: bool,
}

impl ImageSlot {
    pub fn new(key: impl Into<String>, colorkey: Option<Rgba8>) -> Self {
        Self {
            key: key.into(),
            colorkey,
            image: None,
            failure_reported: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn image(&self) -> Option<&FrameImage> {
        self.image.as_ref()
    }

    /// No-op once loaded. A failure is reported on the first miss only.
    pub fn poll(
        &mut self,
        loader: &dyn AssetLoader,
        cache: &mut FrameCache,
    ) -> Option<DiagnosticKind> {
        if self.image.is_some() {
            return None;
        }
        match cache.image(loader, &self.key, self.colorkey) {
            AssetPoll::Ready(img) => {
                self.image = Some(img);
                None
            }
            AssetPoll::Pending => None,
            AssetPoll::Failed(reason) if !self.failure_reported => {
                self.failure_reported = true;
                Some(DiagnosticKind::AssetUnavailable {
                    key: self.key.clone(),
                    reason,
                })
            }
            AssetPoll::Failed(_) => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TextWidget {
    pub text: String,
    pub font: FontSpec,
}

impl Drawable for TextWidget {
    fn draw(&self, ctx: &DrawContext<'_>, out: &mut DrawList) {
        if self.text.is_empty() {
            return;
        }
        out.push(DrawOp::Text {
            rect: ctx.rect,
            text: self.text.clone(),
            font: self.font.clone(),
            align: TextAlign::Center,
        });
    }
}

#[derive(Clone, Debug)]
pub struct ParagraphWidget {
    pub lines: Vec<String>,
    pub line_height: f64,
    pub font: FontSpec,
}

impl Drawable for ParagraphWidget {
    fn draw(&self, ctx: &DrawContext<'_>, out: &mut DrawList) {
        if self.lines.is_empty() {
            return;
        }
        out.push(DrawOp::Paragraph {
            rect: ctx.rect,
            lines: self.lines.clone(),
            line_height: self.line_height,
            font: self.font.clone(),
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonFace {
    /// Background, optional background image, border and label.
    Framed,
    /// Label only; hover swaps the font colour.
    TextOnly,
}

#[derive(Clone, Debug)]
pub struct ButtonWidget {
    pub face: ButtonFace,
    pub text: String,
    pub font: FontSpec,
    pub bg_image: Option<ImageSlot>,
    pub enabled: bool,
    focus: FocusState,
}

impl ButtonWidget {
    pub fn new(face: ButtonFace, text: String, font: FontSpec, enabled: bool) -> Self {
        Self {
            face,
            text,
            font,
            bg_image: None,
            enabled,
            focus: FocusState::Idle,
        }
    }

    pub fn with_bg_image(mut self, slot: ImageSlot) -> Self {
        self.bg_image = Some(slot);
        self
    }

    /// Disabling drops any hover or focus.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.focus = FocusState::Idle;
        }
    }
}

impl Drawable for ButtonWidget {
    fn draw(&self, ctx: &DrawContext<'_>, out: &mut DrawList) {
        let variant = StyleVariant::select(ctx.style, self.focus);
        if self.face == ButtonFace::Framed {
            draw_frame(ctx, &variant, out);
            if let Some(img) = self.bg_image.as_ref().and_then(ImageSlot::image) {
                out.push(DrawOp::Image {
                    rect: ctx.rect,
                    image: img.clone(),
                });
            }
            draw_border(ctx, &variant, out);
        }
        if !self.text.is_empty() {
            out.push(DrawOp::Text {
                rect: ctx.rect,
                text: self.text.clone(),
                font: label_font(&self.font, &variant),
                align: TextAlign::Center,
            });
        }
    }
}

impl Focusable for ButtonWidget {
    fn focus_state(&self) -> FocusState {
        self.focus
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn handle_event(&mut self, event: &InputEvent, inside: bool) -> Vec<InteractionKind> {
        let mut out = Vec::new();
        if !self.enabled {
            return out;
        }
        if let Some(stimulus) = event.stimulus(inside)
            && apply(&mut self.focus, stimulus, &mut out)
        {
            out.push(InteractionKind::Activated);
        }
        out
    }
}

/// Single-line editable text box.
#[derive(Clone, Debug)]
pub struct InputWidget {
    text: String,
    pub hint: Option<String>,
    /// Cap in characters.
    pub max_length: Option<usize>,
    pub font: FontSpec,
    pub enabled: bool,
    focus: FocusState,
}

impl InputWidget {
    pub fn new(text: String, font: FontSpec) -> Self {
        Self {
            text,
            hint: None,
            max_length: None,
            font,
            enabled: true,
            focus: FocusState::Idle,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the content, under the same `max_length` and control-character rules as typing.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.insert(text);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.focus = FocusState::Idle;
        }
    }

    fn insert(&mut self, s: &str) -> bool {
        let room = match self.max_length {
            Some(max) => max.saturating_sub(self.text.chars().count()),
            None => usize::MAX,
        };
        let before = self.text.len();
        self.text.extend(s.chars().filter(|c| !c.is_control()).take(room));
        self.text.len() != before
    }
}

impl Drawable for InputWidget {
    fn draw(&self, ctx: &DrawContext<'_>, out: &mut DrawList) {
        let variant = StyleVariant::select(ctx.style, self.focus);
        draw_frame(ctx, &variant, out);
        draw_border(ctx, &variant, out);

        let (text, font) = match (&self.hint, self.text.is_empty()) {
            (Some(hint), true) => {
                let font = match ctx.style.get_color("hint_color") {
                    Some(c) => self.font.clone().with_color(c),
                    None => self.font.clone(),
                };
                (hint.clone(), font)
            }
            _ => (self.text.clone(), label_font(&self.font, &variant)),
        };
        if text.is_empty() {
            return;
        }
        out.push(DrawOp::Text {
            rect: ctx.rect,
            text,
            font,
            align: TextAlign::Start {
                inset: INPUT_TEXT_INSET,
            },
        });
    }
}

impl Focusable for InputWidget {
    fn focus_state(&self) -> FocusState {
        self.focus
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn handle_event(&mut self, event: &InputEvent, inside: bool) -> Vec<InteractionKind> {
        let mut out = Vec::new();
        if !self.enabled {
            return out;
        }
        match event {
            InputEvent::Text(s) if self.focus.is_active() => {
                if self.insert(s) {
                    out.push(InteractionKind::TextChanged {
                        text: self.text.clone(),
                    });
                }
            }
            InputEvent::Key(Key::Backspace) if self.focus.is_active() => {
                if self.text.pop().is_some() {
                    out.push(InteractionKind::TextChanged {
                        text: self.text.clone(),
                    });
                }
            }
            InputEvent::Key(Key::Enter | Key::Tab) if self.focus.is_active() => {
                apply(&mut self.focus, Stimulus::Blur, &mut out);
            }
            _ => {
                // Focus is the only effect a click has on an input.
                if let Some(stimulus) = event.stimulus(inside) {
                    apply(&mut self.focus, stimulus, &mut out);
                }
            }
        }
        out
    }
}

#[derive(Clone, Debug)]
pub struct ImageWidget {
    pub slot: ImageSlot,
}

impl Drawable for ImageWidget {
    fn draw(&self, ctx: &DrawContext<'_>, out: &mut DrawList) {
        if let Some(img) = self.slot.image() {
            out.push(DrawOp::Image {
                rect: ctx.rect,
                image: img.clone(),
            });
        }
    }
}

/// Image-sequence and spritesheet animations; they differ only in their frame source.
#[derive(Clone, Debug)]
pub struct AnimationWidget {
    pub state: AnimationState,
}

impl Drawable for AnimationWidget {
    fn draw(&self, ctx: &DrawContext<'_>, out: &mut DrawList) {
        if let Some(frame) = self.state.current_frame() {
            out.push(DrawOp::Image {
                rect: ctx.rect,
                image: frame.clone(),
            });
        }
    }
}

impl Animatable for AnimationWidget {
    fn animation(&self) -> &AnimationState {
        &self.state
    }

    fn animation_mut(&mut self) -> &mut AnimationState {
        &mut self.state
    }
}

/// Step `focus` and record the change. Returns whether the stimulus activated the widget.
fn apply(focus: &mut FocusState, stimulus: Stimulus, out: &mut Vec<InteractionKind>) -> bool {
    let t = focus.on(stimulus);
    *focus = t.to;
    if t.changed() {
        tracing::debug!(from = ?t.from, to = ?t.to, "focus transition");
        out.push(InteractionKind::FocusChanged {
            from: t.from,
            to: t.to,
        });
    }
    t.activated
}

fn draw_frame(ctx: &DrawContext<'_>, variant: &StyleVariant, out: &mut DrawList) {
    if let Some(color) = &variant.background {
        out.push(DrawOp::Fill {
            rect: ctx.rect,
            color: color.clone(),
            radius: variant.border_radius,
        });
    }
}

fn draw_border(ctx: &DrawContext<'_>, variant: &StyleVariant, out: &mut DrawList) {
    if let Some((color, width)) = &variant.border {
        out.push(DrawOp::Outline {
            rect: ctx.rect,
            color: color.clone(),
            width: *width,
            radius: variant.border_radius,
        });
    }
}

fn label_font(font: &FontSpec, variant: &StyleVariant) -> FontSpec {
    match &variant.font_color {
        Some(c) => font.clone().with_color(c.clone()),
        None => font.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/widgets.rs"]
mod tests;
