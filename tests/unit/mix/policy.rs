use super::*;
use crate::foundation::core::{Rgba, Vec3};

#[test]
fn none_returns_binding_value_whatever_else_is_passed() {
    for (initial, blended, w) in [(0.0, 1.0, 0.0), (5.0, -3.0, 1.0), (2.0, 8.0, 2.5)] {
        assert_eq!(ValueControl::None.apply(0.75, initial, blended, w), 0.75);
    }
    let c = Rgba::rgb(0.2, 0.4, 0.6);
    assert_eq!(
        ValueControl::None.apply(c, Rgba::BLACK, Rgba::WHITE, 1.0),
        c
    );
}

#[test]
fn replace_boundaries() {
    let initial = Rgba::rgb(0.1, 0.2, 0.3);
    let blended = Rgba::rgb(0.9, 0.7, 0.5);
    assert_eq!(
        ValueControl::Replace.apply(Rgba::BLACK, initial, Rgba::ZERO, 0.0),
        initial
    );
    assert_eq!(
        ValueControl::Replace.apply(Rgba::BLACK, initial, blended, 1.0),
        blended
    );
}

#[test]
fn replace_weights_a_lone_input_once() {
    // One clip of value 4 at weight 0.5 arrives pre-weighted as 2.
    assert_eq!(ValueControl::Replace.apply(0.0, 2.0, 2.0, 0.5), 3.0);
    assert_eq!(ValueControl::Replace.apply(0.0, 0.0, 0.5, 0.5), 0.5);
}

#[test]
fn replace_overshoots_when_weights_exceed_one() {
    let v = ValueControl::Replace.apply(0.0, 1.0, 3.0, 1.5);
    assert_eq!(v, 2.5);
}

#[test]
fn add_ignores_total_weight() {
    for w in [0.0, 0.3, 1.0, 1.7] {
        assert_eq!(ValueControl::Add.apply(9.0, 2.0, 0.0, w), 2.0);
        assert_eq!(ValueControl::Add.apply(9.0, 0.0, 3.5, w), 3.5);
        assert_eq!(ValueControl::Add.apply(9.0, 2.0, 3.5, w), 5.5);
    }
}

#[test]
fn multiply_is_component_wise() {
    let v = ValueControl::Multiply.apply(
        Vec3::ZERO,
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(2.0, 0.5, 0.0),
        1.0,
    );
    assert_eq!(v, Vec3::new(2.0, 1.0, 0.0));
}

#[test]
fn tint_multiplies_baseline() {
    assert_eq!(
        tint(Rgba::rgb(0.5, 1.0, 0.2), Rgba::rgb(0.5, 0.5, 1.0)),
        Rgba::rgb(0.25, 0.5, 0.2)
    );
}

#[test]
fn unknown_options_are_rejected() {
    assert_eq!(ValueControl::try_from(3).unwrap(), ValueControl::Multiply);
    assert!(ValueControl::try_from(4).is_err());
    assert!("blend".parse::<ValueControl>().is_err());
    assert!(serde_json::from_str::<ValueControl>(r#""screen""#).is_err());
    assert_eq!(
        serde_json::from_str::<ValueControl>(r#""add""#).unwrap(),
        ValueControl::Add
    );
}

#[test]
fn display_round_trips_through_from_str() {
    for v in ValueControl::ALL {
        assert_eq!(v.to_string().parse::<ValueControl>().unwrap(), v);
    }
}
