//! Component model: the closed set of widget kinds and the capabilities they expose.
//!
//! Every widget is [`Drawable`]. Buttons, text buttons and inputs are also [`Focusable`];
//! animations are [`Animatable`]. Callers reach a capability through
//! [`node::ComponentNode::as_focusable_mut`] and friends instead of matching on the kind.

pub mod draw;
pub mod factory;
pub mod kind;
pub mod node;
pub mod widgets;

use crate::{
    animation::state::AnimationState,
    component::draw::DrawList,
    foundation::core::GridRect,
    interaction::focus::{FocusState, InputEvent},
    style::ResolvedStyle,
};

/// Geometry and style a widget draws with. Both are fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct DrawContext<'a> {
    pub rect: GridRect,
    pub style: &'a ResolvedStyle,
}

pub trait Drawable {
    /// Append this widget's ops for the current frame. Widgets with nothing ready append nothing.
    fn draw(&self, ctx: &DrawContext<'_>, out: &mut DrawList);
}

pub trait Focusable {
    fn focus_state(&self) -> FocusState;

    fn is_enabled(&self) -> bool;

    /// `inside` is whether a pointer event hit this widget's rect; it is `false` for events
    /// without a position.
    fn handle_event(&mut self, event: &InputEvent, inside: bool) -> Vec<InteractionKind>;
}

pub trait Animatable {
    fn animation(&self) -> &AnimationState;

    fn animation_mut(&mut self) -> &mut AnimationState;

    fn advance(&mut self, elapsed: f64) {
        self.animation_mut().advance(elapsed);
    }
}

/// Something observable that happened to a component while handling an input event.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Interaction {
    /// Component label (id or `#<index>`).
    pub component: String,
    pub kind: InteractionKind,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InteractionKind {
    FocusChanged { from: FocusState, to: FocusState },
    /// A button was pressed and released inside its rect.
    Activated,
    /// An input's text was edited.
    TextChanged { text: String },
}
