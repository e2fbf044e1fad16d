use crate::{
    animation::frames::FrameCache,
    assets::store::AssetLoader,
    binding::{Attr, AttrValue},
    component::{
        Animatable, DrawContext, Drawable, Focusable, Interaction,
        draw::DrawList,
        kind::ComponentKind,
        widgets::{
            AnimationWidget, ButtonWidget, ImageWidget, InputWidget, ParagraphWidget, TextWidget,
        },
    },
    foundation::{core::GridRect, error::DiagnosticKind},
    interaction::focus::{FocusState, InputEvent},
    style::ResolvedStyle,
};

/// Closed set of widget implementations behind a node.
#[derive(Clone, Debug)]
pub enum Widget {
    Text(TextWidget),
    Paragraph(ParagraphWidget),
    /// Both `button` and `text-button`; see [`super::widgets::ButtonFace`].
    Button(ButtonWidget),
    Input(InputWidget),
    Image(ImageWidget),
    /// Both `animation` and `spritesheet-animation`.
    Animation(AnimationWidget),
}

impl Widget {
    fn as_drawable(&self) -> &dyn Drawable {
        match self {
            Self::Text(w) => w,
            Self::Paragraph(w) => w,
            Self::Button(w) => w,
            Self::Input(w) => w,
            Self::Image(w) => w,
            Self::Animation(w) => w,
        }
    }
}

/// One finished component: geometry and style fixed at construction, widget state mutable.
#[derive(Clone, Debug)]
pub struct ComponentNode {
    id: Option<String>,
    label: String,
    kind: ComponentKind,
    cell: u64,
    rect: GridRect,
    style: ResolvedStyle,
    widget: Widget,
}

impl ComponentNode {
    pub fn new(
        id: Option<String>,
        label: String,
        kind: ComponentKind,
        cell: u64,
        rect: GridRect,
        style: ResolvedStyle,
        widget: Widget,
    ) -> Self {
        Self {
            id,
            label,
            kind,
            cell,
            rect,
            style,
            widget,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The id, or `#<declaration index>` for anonymous components.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn cell(&self) -> u64 {
        self.cell
    }

    pub fn rect(&self) -> GridRect {
        self.rect
    }

    pub fn resolved_style(&self) -> &ResolvedStyle {
        &self.style
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    pub fn draw(&self, out: &mut DrawList) {
        let ctx = DrawContext {
            rect: self.rect,
            style: &self.style,
        };
        self.widget.as_drawable().draw(&ctx, out);
    }

    pub fn as_focusable(&self) -> Option<&dyn Focusable> {
        match &self.widget {
            Widget::Button(w) => Some(w),
            Widget::Input(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_focusable_mut(&mut self) -> Option<&mut dyn Focusable> {
        match &mut self.widget {
            Widget::Button(w) => Some(w),
            Widget::Input(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_animatable(&self) -> Option<&dyn Animatable> {
        match &self.widget {
            Widget::Animation(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_animatable_mut(&mut self) -> Option<&mut dyn Animatable> {
        match &mut self.widget {
            Widget::Animation(w) => Some(w),
            _ => None,
        }
    }

    pub fn focus_state(&self) -> Option<FocusState> {
        self.as_focusable().map(Focusable::focus_state)
    }

    /// No-op for components that are not animatable.
    pub fn advance(&mut self, elapsed: f64) {
        if let Some(anim) = self.as_animatable_mut() {
            anim.advance(elapsed);
        }
    }

    /// Hit-test pointer events against this node's rect (focus events against its id) and
    /// forward them. Non-focusable components ignore all events.
    pub fn handle_event(&mut self, event: &InputEvent) -> Vec<Interaction> {
        let inside = match event {
            InputEvent::Focus(target) => self.id.as_deref() == Some(target.as_str()),
            _ => event.position().is_some_and(|p| self.rect.contains(p)),
        };
        let Some(focusable) = self.as_focusable_mut() else {
            return Vec::new();
        };
        let kinds = focusable.handle_event(event, inside);
        kinds
            .into_iter()
            .map(|kind| Interaction {
                component: self.label.clone(),
                kind,
            })
            .collect()
    }

    /// Current value of a bindable attribute, or `None` when this widget has no such attribute.
    pub fn attr(&self, attr: Attr) -> Option<AttrValue> {
        let value = match (attr, &self.widget) {
            (Attr::Text, Widget::Text(w)) => AttrValue::Text(w.text.clone()),
            (Attr::Text, Widget::Paragraph(w)) => AttrValue::Text(w.lines.join("\n")),
            (Attr::Text, Widget::Button(w)) => AttrValue::Text(w.text.clone()),
            (Attr::Text, Widget::Input(w)) => AttrValue::Text(w.text().to_owned()),
            (Attr::Hint, Widget::Input(w)) => AttrValue::Text(w.hint.clone().unwrap_or_default()),
            (Attr::Enabled, Widget::Button(w)) => AttrValue::Flag(w.enabled),
            (Attr::Enabled, Widget::Input(w)) => AttrValue::Flag(w.enabled),
            _ => return None,
        };
        Some(value)
    }

    /// Write a bindable attribute, converting `value` to the attribute's shape first. Returns
    /// `false` when this widget has no such attribute.
    pub fn set_attr(&mut self, attr: Attr, value: AttrValue) -> bool {
        match (attr, &mut self.widget, attr.coerce(value)) {
            (Attr::Text, Widget::Text(w), AttrValue::Text(s)) => w.text = s,
            (Attr::Text, Widget::Paragraph(w), AttrValue::Text(s)) => {
                w.lines = s.lines().map(str::to_owned).collect();
            }
            (Attr::Text, Widget::Button(w), AttrValue::Text(s)) => w.text = s,
            (Attr::Text, Widget::Input(w), AttrValue::Text(s)) => w.set_text(&s),
            (Attr::Hint, Widget::Input(w), AttrValue::Text(s)) => {
                w.hint = (!s.is_empty()).then_some(s);
            }
            (Attr::Enabled, Widget::Button(w), AttrValue::Flag(b)) => w.set_enabled(b),
            (Attr::Enabled, Widget::Input(w), AttrValue::Flag(b)) => w.set_enabled(b),
            _ => return false,
        }
        true
    }

    /// Ask the loader for anything this node still waits on.
    pub fn poll_assets(
        &mut self,
        loader: &dyn AssetLoader,
        cache: &mut FrameCache,
    ) -> Option<DiagnosticKind> {
        match &mut self.widget {
            Widget::Image(w) => w.slot.poll(loader, cache),
            Widget::Button(w) => w.bg_image.as_mut()?.poll(loader, cache),
            Widget::Animation(w) => w.state.poll_frames(loader, cache),
            Widget::Text(_) | Widget::Paragraph(_) | Widget::Input(_) => None,
        }
    }
}
