use super::*;
use crate::tracks::color::{ColorFamily, ColorParams};
use crate::foundation::core::Rgba;

fn clip(name: &str, start: f64, end: f64) -> ParameterClip<ColorParams> {
    ParameterClip::new(name, start, end, ColorParams::solid(Rgba::WHITE))
}

#[test]
fn clip_id_is_stable_per_name() {
    assert_eq!(ClipId::from_name("intro"), ClipId::from_name("intro"));
    assert_ne!(ClipId::from_name("intro"), ClipId::from_name("outro"));
    assert_eq!(clip("intro", 0.0, 1.0).id(), ClipId::from_name("intro"));
}

#[test]
fn clip_time_helpers() {
    let c = clip("a", 2.0, 6.0);
    assert_eq!(c.duration(), 4.0);
    assert_eq!(c.local_time(3.0), 1.0);
    assert_eq!(c.normalized(1.0), 0.25);
    assert_eq!(c.normalized(8.0), 2.0);
    assert_eq!(c.normalized_clamped(8.0), 1.0);
}

#[test]
fn fade_lengths_prefer_blends() {
    let mut c = clip("a", 0.0, 10.0);
    c.ease_in_duration = 1.0;
    c.ease_out_duration = 2.0;
    c.blend_in_duration = 3.0;
    assert_eq!(c.fade_in_length(), 1.0);
    c.has_blend_in = true;
    assert_eq!(c.fade_in_length(), 3.0);
    assert_eq!(c.fade_out_length(), 2.0);
}

#[test]
fn timing_validation_rejects_bad_clips() {
    assert!(clip("ok", 0.0, 1.0).validate_timing().is_ok());
    assert!(clip("", 0.0, 1.0).validate_timing().is_err());
    assert!(clip("flat", 1.0, 1.0).validate_timing().is_err());
    assert!(clip("inf", 0.0, f64::INFINITY).validate_timing().is_err());

    let mut c = clip("neg", 0.0, 1.0);
    c.ease_in_duration = -0.5;
    assert!(c.validate_timing().is_err());

    let mut c = clip("long", 0.0, 1.0);
    c.has_blend_out = true;
    c.blend_out_duration = 2.0;
    assert!(c.validate_timing().is_err());
}

#[test]
fn track_validation_rejects_duplicate_names() {
    let mut t = Track::<ColorFamily>::new("t", "panel");
    t.clips.push(clip("a", 0.0, 1.0));
    t.clips.push(clip("b", 1.0, 2.0));
    assert!(t.validate().is_ok());

    t.clips.push(clip("a", 2.0, 3.0));
    assert!(t.validate().is_err());
}

#[test]
fn track_lookup_and_extent() {
    let mut t = Track::<ColorFamily>::new("t", "panel");
    assert_eq!(t.end_time(), 0.0);
    t.clips.push(clip("late", 4.0, 9.0));
    t.clips.push(clip("early", 0.0, 2.0));

    assert_eq!(t.kind(), TrackKind::Color);
    assert_eq!(t.channels(), &["color"]);
    assert_eq!(t.clip_index("early"), Some(1));
    assert_eq!(t.end_time(), 9.0);
    assert!(matches!(t.clip(5), Err(MixError::Contract(_))));
}

#[test]
fn track_kind_names() {
    assert_eq!(TrackKind::Light2d.to_string(), "light2d");
    let k: TrackKind = serde_json::from_str("\"transform\"").unwrap();
    assert_eq!(k, TrackKind::Transform);
}

#[test]
fn clip_deserializes_with_defaults() {
    let c: ParameterClip<ColorParams> = serde_json::from_str(
        r#"{"name":"a","start":0.0,"end":2.0,"params":{"color":{"constant":{"r":1.0,"g":0.0,"b":0.0}}}}"#,
    )
    .unwrap();
    assert!(!c.has_blend_in);
    assert_eq!(c.ease_in_curve, Ease::Linear);
    assert_eq!(c.params.color.evaluate(0.0), Rgba::rgb(1.0, 0.0, 0.0));
}
