use super::*;

use FocusState::*;

fn run(start: FocusState, stimuli: &[Stimulus]) -> FocusState {
    stimuli.iter().fold(start, |s, st| s.on(*st).to)
}

#[test]
fn initial_state_is_idle() {
    assert_eq!(FocusState::default(), Idle);
}

#[test]
fn hover_then_leave_returns_to_idle() {
    assert_eq!(Idle.on(Stimulus::Move { inside: true }).to, Hovered);
    assert_eq!(Hovered.on(Stimulus::Move { inside: false }).to, Idle);
    assert_eq!(Hovered.on(Stimulus::Leave).to, Idle);
}

#[test]
fn press_and_release_inside_activates() {
    let t = Hovered.on(Stimulus::Down { inside: true });
    assert_eq!(t.to, Pressed);
    assert!(!t.activated);

    let t = Pressed.on(Stimulus::Up { inside: true });
    assert_eq!(t.to, Focused);
    assert!(t.activated);
}

#[test]
fn release_outside_focuses_without_activation() {
    let t = Pressed.on(Stimulus::Up { inside: false });
    assert_eq!(t.to, Focused);
    assert!(!t.activated);
}

#[test]
fn click_elsewhere_or_blur_drops_focus() {
    assert_eq!(Focused.on(Stimulus::Down { inside: false }).to, Idle);
    assert_eq!(Focused.on(Stimulus::Blur).to, Idle);
    assert_eq!(Pressed.on(Stimulus::Blur).to, Idle);
}

#[test]
fn focused_component_ignores_pointer_motion() {
    let end = run(
        Focused,
        &[Stimulus::Move { inside: false }, Stimulus::Move { inside: true }],
    );
    assert_eq!(end, Focused);
}

#[test]
fn leaving_the_display_mid_press_keeps_focus() {
    assert_eq!(Pressed.on(Stimulus::Leave).to, Focused);
}

#[test]
fn idle_ignores_events_that_miss_it() {
    for st in [
        Stimulus::Move { inside: false },
        Stimulus::Down { inside: false },
        Stimulus::Up { inside: true },
        Stimulus::Leave,
        Stimulus::Blur,
    ] {
        let t = Idle.on(st);
        assert!(!t.changed(), "{st:?}");
        assert!(!t.activated);
    }
}

#[test]
fn highlight_and_active_predicates() {
    assert!(!Idle.is_highlighted());
    assert!(Hovered.is_highlighted() && !Hovered.is_active());
    assert!(Focused.is_active() && Pressed.is_active());
}

#[test]
fn events_map_to_stimuli() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(
        InputEvent::PointerDown(p).stimulus(true),
        Some(Stimulus::Down { inside: true })
    );
    assert_eq!(InputEvent::PointerUp(p).position(), Some(p));
    assert_eq!(InputEvent::Text("a".into()).stimulus(true), None);
    assert_eq!(InputEvent::Key(Key::Enter).position(), None);
}

#[test]
fn focus_event_walks_the_full_chain() {
    let mut state = Idle;
    let mut seen = vec![state];
    for st in [
        Stimulus::Move { inside: true },
        Stimulus::Focus,
        Stimulus::Down { inside: true },
        Stimulus::Up { inside: true },
        Stimulus::Blur,
    ] {
        state = state.on(st).to;
        seen.push(state);
    }
    assert_eq!(seen, [Idle, Hovered, Focused, Pressed, Focused, Idle]);
}

#[test]
fn focus_reaches_idle_components_and_keeps_a_press() {
    assert_eq!(Idle.on(Stimulus::Focus).to, Focused);
    assert!(!Idle.on(Stimulus::Focus).activated);
    assert_eq!(Pressed.on(Stimulus::Focus).to, Pressed);
}

#[test]
fn focus_event_blurs_components_it_does_not_target() {
    let ev = InputEvent::Focus("name".into());
    assert_eq!(ev.stimulus(true), Some(Stimulus::Focus));
    assert_eq!(ev.stimulus(false), Some(Stimulus::Blur));
    assert_eq!(ev.position(), None);
}
