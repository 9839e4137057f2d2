use super::*;
use crate::{
    binding::MemoryBinding,
    composition::model::{ParameterClip, Track},
    mix::mixer::{MixInput, TrackMixer},
};

fn track(settings: ColorSettings) -> Track<ColorFamily> {
    let mut t = Track::<ColorFamily>::new("tint", "sprite");
    t.settings = settings;
    t.clips.push(ParameterClip::new(
        "red",
        0.0,
        4.0,
        ColorParams::solid(Rgba::new(1.0, 0.0, 0.0, 1.0)),
    ));
    t.clips.push(ParameterClip::new(
        "fade",
        4.0,
        8.0,
        ColorParams::gradient(Rgba::BLACK, Rgba::WHITE),
    ));
    t
}

#[test]
fn replace_at_full_weight_writes_clip_color() {
    let t = track(ColorSettings::default());
    let mut mixer = TrackMixer::<ColorFamily>::new();
    let mut target = MemoryBinding::new(Rgba::new(0.2, 0.4, 0.6, 1.0));

    let out = mixer
        .process_frame(&t, &[MixInput::new(0, 1.0, 1.0)], &mut target)
        .unwrap();
    assert_eq!(out.value(), Some(&Rgba::new(1.0, 0.0, 0.0, 1.0)));
    assert_eq!(*target.value(), Rgba::new(1.0, 0.0, 0.0, 1.0));
}

#[test]
fn tint_multiplies_baseline_regardless_of_policy() {
    let settings = ColorSettings {
        color: ValueControl::Add,
        tint: true,
    };
    let t = track(settings);
    let mut mixer = TrackMixer::<ColorFamily>::new();
    let mut target = MemoryBinding::new(Rgba::new(0.5, 0.5, 0.5, 1.0));

    mixer
        .process_frame(&t, &[MixInput::new(0, 1.0, 0.0)], &mut target)
        .unwrap();
    assert_eq!(*target.value(), Rgba::new(0.5, 0.0, 0.0, 1.0));
}

#[test]
fn gradient_follows_clip_normalized_time() {
    let t = track(ColorSettings::default());
    let mut mixer = TrackMixer::<ColorFamily>::new();
    let mut target = MemoryBinding::new(Rgba::TRANSPARENT);

    mixer
        .process_frame(&t, &[MixInput::new(1, 1.0, 2.0)], &mut target)
        .unwrap();
    let c = *target.value();
    assert!((c.r - 0.5).abs() < 1e-12);
    assert!((c.g - 0.5).abs() < 1e-12);
    assert_eq!(c.a, 1.0);
}

#[test]
fn none_policy_leaves_color_alone() {
    let settings = ColorSettings {
        color: ValueControl::None,
        tint: false,
    };
    let t = track(settings);
    let mut mixer = TrackMixer::<ColorFamily>::new();
    let start = Rgba::new(0.1, 0.2, 0.3, 0.4);
    let mut target = MemoryBinding::new(start);

    mixer
        .process_frame(&t, &[MixInput::new(0, 1.0, 0.0)], &mut target)
        .unwrap();
    assert_eq!(*target.value(), start);
}

#[test]
fn invalid_gradient_keys_fail_track_validation() {
    let mut t = Track::<ColorFamily>::new("bad", "sprite");
    t.clips.push(ParameterClip::new(
        "unsorted",
        0.0,
        1.0,
        ColorParams {
            color: ClipValue::keys(vec![
                crate::animation::value::Key::new(0.8, Rgba::WHITE),
                crate::animation::value::Key::new(0.2, Rgba::BLACK),
            ]),
        },
    ));
    assert!(t.validate().is_err());
}
