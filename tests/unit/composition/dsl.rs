use super::*;
use crate::{
    foundation::core::Rgba,
    tracks::color::{ColorFamily, ColorParams},
    tracks::light::{LightFamily, LightParams},
};

#[test]
fn clip_builder_sets_fades() {
    let c = ClipBuilder::new("a", 0.0, 4.0, ())
        .ease_in(1.0, Ease::OutQuad)
        .blend_out(0.5)
        .build()
        .unwrap();
    assert_eq!(c.ease_in_duration, 1.0);
    assert_eq!(c.ease_in_curve, Ease::OutQuad);
    assert!(c.has_blend_out);
    assert!(!c.has_blend_in);
    assert_eq!(c.fade_out_length(), 0.5);
}

#[test]
fn clip_builder_rejects_bad_timing() {
    assert!(ClipBuilder::new("a", 2.0, 1.0, ()).build().is_err());
    assert!(ClipBuilder::new("a", 0.0, 1.0, ()).blend_in(3.0).build().is_err());
}

#[test]
fn timeline_builder_declares_missing_targets() {
    let red = ClipBuilder::new("red", 0.0, 2.0, ColorParams::solid(Rgba::rgb(1.0, 0.0, 0.0)))
        .build()
        .unwrap();
    let colors = TrackBuilder::<ColorFamily>::new("colors", "panel")
        .clip(red)
        .build()
        .unwrap();
    let lamp = TrackBuilder::<LightFamily>::new("lamp", "key")
        .clip(
            ClipBuilder::new("on", 0.0, 3.0, LightParams::default())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let timeline = TimelineBuilder::new()
        .target("panel", TargetState::Color(Rgba::BLACK))
        .unwrap()
        .track(colors)
        .track(lamp)
        .build()
        .unwrap();

    assert_eq!(timeline.targets["panel"], TargetState::Color(Rgba::BLACK));
    assert_eq!(
        timeline.targets["key"].kind(),
        crate::composition::model::TrackKind::Light
    );
    assert_eq!(timeline.end_time(), 3.0);
}

#[test]
fn duplicate_target_keys_are_rejected() {
    let r = TimelineBuilder::new()
        .target("x", TargetState::Color(Rgba::WHITE))
        .unwrap()
        .target("x", TargetState::Color(Rgba::BLACK));
    assert!(r.is_err());
}
