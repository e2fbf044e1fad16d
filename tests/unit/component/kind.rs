use super::*;

#[test]
fn every_kind_round_trips_through_its_type_string() {
    for kind in ComponentKind::ALL {
        assert_eq!(kind.as_str().parse::<ComponentKind>(), Ok(kind));
    }
}

#[test]
fn unknown_type_is_reported_by_name() {
    assert_eq!(
        "slider".parse::<ComponentKind>(),
        Err(DiagnosticKind::UnknownComponentType {
            kind: "slider".into()
        })
    );
    // matching is exact
    assert!("Text".parse::<ComponentKind>().is_err());
    assert!("text_button".parse::<ComponentKind>().is_err());
}

#[test]
fn capabilities_follow_the_kind() {
    let focusable: Vec<_> = ComponentKind::ALL
        .into_iter()
        .filter(|k| k.is_focusable())
        .collect();
    assert_eq!(
        focusable,
        [
            ComponentKind::Button,
            ComponentKind::TextButton,
            ComponentKind::Input
        ]
    );
    assert!(ComponentKind::SpritesheetAnimation.is_animatable());
    assert!(!ComponentKind::Image.is_animatable());
    assert!(!ComponentKind::Image.is_focusable());
}
