//! Focus/hover/press tracking for interactive components.
//!
//! The machine itself knows nothing about geometry: the tree hit-tests pointer events against
//! each component's rect and feeds the result in as a [`Stimulus`].

use crate::foundation::core::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusState {
    #[default]
    Idle,
    Hovered,
    Focused,
    Pressed,
}

impl FocusState {
    /// Hovered, focused or pressed: the states that swap in focus colours.
    pub fn is_highlighted(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Focused or pressed: the states that draw the focus border.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Focused | Self::Pressed)
    }

    /// Apply one stimulus.
    pub fn on(self, stimulus: Stimulus) -> Transition {
        use FocusState::*;

        let mut activated = false;
        let to = match (self, stimulus) {
            (Idle, Stimulus::Move { inside: true }) => Hovered,
            (Hovered, Stimulus::Move { inside: false }) => Idle,

            (Idle | Hovered, Stimulus::Focus) => Focused,

            (_, Stimulus::Down { inside: true }) => Pressed,
            (Hovered | Focused | Pressed, Stimulus::Down { inside: false }) => Idle,

            (Pressed, Stimulus::Up { inside }) => {
                activated = inside;
                Focused
            }

            (Hovered, Stimulus::Leave) => Idle,
            (Pressed, Stimulus::Leave) => Focused,

            (Focused | Pressed, Stimulus::Blur) => Idle,

            (state, _) => state,
        };
        Transition {
            from: self,
            to,
            activated,
        }
    }
}

/// A pointer or focus event after hit-testing against one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stimulus {
    Move { inside: bool },
    Down { inside: bool },
    Up { inside: bool },
    /// The pointer left the display.
    Leave,
    /// Keyboard or programmatic focus landed on this component.
    Focus,
    Blur,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: FocusState,
    pub to: FocusState,
    /// A press was released inside the component.
    pub activated: bool,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Backspace,
    Enter,
    Tab,
}

/// Externally delivered input, in display pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove(Point),
    PointerDown(Point),
    PointerUp(Point),
    PointerLeave,
    /// Move focus to the component with this id; every other component blurs.
    Focus(String),
    /// Drop focus from whatever holds it (window lost focus and so on).
    Blur,
    /// Committed text from the platform's text input.
    Text(String),
    Key(Key),
}

impl InputEvent {
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerMove(p) | Self::PointerDown(p) | Self::PointerUp(p) => Some(*p),
            _ => None,
        }
    }

    /// The stimulus this event means for a component, given whether it hit the component.
    /// For [`InputEvent::Focus`], `inside` means the component is the target.
    ///
    /// Text and key events are not pointer stimuli and return `None`.
    pub fn stimulus(&self, inside: bool) -> Option<Stimulus> {
        match self {
            Self::PointerMove(_) => Some(Stimulus::Move { inside }),
            Self::PointerDown(_) => Some(Stimulus::Down { inside }),
            Self::PointerUp(_) => Some(Stimulus::Up { inside }),
            Self::PointerLeave => Some(Stimulus::Leave),
            Self::Focus(_) if inside => Some(Stimulus::Focus),
            Self::Focus(_) | Self::Blur => Some(Stimulus::Blur),
            Self::Text(_) | Self::Key(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/focus.rs"]
mod tests;
