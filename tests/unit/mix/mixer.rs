use super::*;
use crate::{
    binding::MemoryBinding,
    foundation::core::Rgba,
    tracks::color::{ColorFamily, ColorParams},
    tracks::light::{LightFamily, LightParams, LightState},
    animation::value::ClipValue,
    mix::policy::ValueControl,
};

fn color_track() -> Track<ColorFamily> {
    let mut t = Track::<ColorFamily>::new("colors", "panel");
    t.clips
        .push(ParameterClip::new("red", 0.0, 2.0, ColorParams::solid(Rgba::rgb(1.0, 0.0, 0.0))));
    t.clips
        .push(ParameterClip::new("blue", 1.0, 3.0, ColorParams::solid(Rgba::rgb(0.0, 0.0, 1.0))));
    t
}

fn light_track(intensity: f64) -> Track<LightFamily> {
    let mut t = Track::<LightFamily>::new("light", "lamp");
    t.clips.push(ParameterClip::new(
        "a",
        0.0,
        4.0,
        LightParams {
            intensity: ClipValue::constant(intensity),
            ..LightParams::default()
        },
    ));
    t.clips.push(ParameterClip::new(
        "b",
        2.0,
        6.0,
        LightParams {
            intensity: ClipValue::constant(intensity * 2.0),
            ..LightParams::default()
        },
    ));
    t
}

#[test]
fn zero_weight_without_baseline_is_idle() {
    let t = color_track();
    let mut mixer = TrackMixer::<ColorFamily>::new();
    let mut target = MemoryBinding::new(Rgba::WHITE);

    let out = mixer.process_frame(&t, &[], &mut target).unwrap();
    assert_eq!(out, MixOutcome::Idle);
    assert_eq!(target.writes(), 0);
    assert!(!mixer.is_initialized());
}

#[test]
fn baseline_is_captured_once_and_restored_at_zero_weight() {
    let t = color_track();
    let mut mixer = TrackMixer::<ColorFamily>::new();
    let start = Rgba::rgb(0.25, 0.5, 0.75);
    let mut target = MemoryBinding::new(start);

    mixer
        .process_frame(&t, &[MixInput::new(0, 0.5, 0.5)], &mut target)
        .unwrap();
    assert_eq!(mixer.baseline(), Some(&start));

    // A later frame must mix against the original baseline, not the written value.
    let out = mixer
        .process_frame(&t, &[MixInput::new(0, 1.0, 1.0)], &mut target)
        .unwrap();
    assert_eq!(out.value(), Some(&Rgba::rgb(1.0, 0.0, 0.0)));
    assert_eq!(mixer.baseline(), Some(&start));

    let out = mixer.process_frame(&t, &[], &mut target).unwrap();
    assert_eq!(out, MixOutcome::Restored(start));
    assert_eq!(*target.value(), start);
    assert!(!mixer.is_initialized());
}

#[test]
fn recapture_after_restore_sees_scene_edits() {
    let t = color_track();
    let mut mixer = TrackMixer::<ColorFamily>::new();
    let mut target = MemoryBinding::new(Rgba::WHITE);

    mixer
        .process_frame(&t, &[MixInput::new(0, 1.0, 0.0)], &mut target)
        .unwrap();
    mixer.process_frame(&t, &[], &mut target).unwrap();

    let edited = Rgba::rgb(0.0, 1.0, 0.0);
    target.set(edited);
    mixer
        .process_frame(&t, &[MixInput::new(1, 0.25, 0.0)], &mut target)
        .unwrap();
    assert_eq!(mixer.baseline(), Some(&edited));
}

#[test]
fn input_order_does_not_change_the_result() {
    let t = light_track(3.0);
    let forward = [MixInput::new(0, 0.6, 2.5), MixInput::new(1, 0.4, 0.5)];
    let backward = [forward[1], forward[0]];

    let mut m1 = TrackMixer::<LightFamily>::new();
    let mut b1 = MemoryBinding::new(LightState::default());
    let a = m1.process_frame(&t, &forward, &mut b1).unwrap();

    let mut m2 = TrackMixer::<LightFamily>::new();
    let mut b2 = MemoryBinding::new(LightState::default());
    let b = m2.process_frame(&t, &backward, &mut b2).unwrap();

    let (a, b) = (a.value().unwrap().intensity, b.value().unwrap().intensity);
    assert!((a - b).abs() < 1e-12);
}

#[test]
fn replace_extrapolates_when_weights_overshoot() {
    let t = light_track(2.0);
    let mut mixer = TrackMixer::<LightFamily>::new();
    let mut target = MemoryBinding::new(LightState {
        intensity: 1.0,
        ..LightState::default()
    });

    let out = mixer
        .process_frame(
            &t,
            &[MixInput::new(0, 1.0, 3.0), MixInput::new(1, 0.5, 1.0)],
            &mut target,
        )
        .unwrap();
    assert_eq!(out.total_weight(), 1.5);
    // blended = 2*1 + 4*0.5 = 4; 1 * (1 - 1.5) + 4 = 3.5
    assert_eq!(target.value().intensity, 3.5);
}

#[test]
fn lone_fading_input_replaces_linearly() {
    let t = light_track(1.0);
    let mut mixer = TrackMixer::<LightFamily>::new();
    let mut target = MemoryBinding::new(LightState {
        intensity: 0.0,
        ..LightState::default()
    });

    mixer
        .process_frame(&t, &[MixInput::new(0, 0.5, 1.0)], &mut target)
        .unwrap();
    assert_eq!(target.value().intensity, 0.5);

    mixer
        .process_frame(&t, &[MixInput::new(0, 0.25, 1.0)], &mut target)
        .unwrap();
    assert_eq!(target.value().intensity, 0.25);
}

#[test]
fn non_positive_and_non_finite_weights_are_skipped() {
    let t = light_track(2.0);
    let mut mixer = TrackMixer::<LightFamily>::new();
    let mut target = MemoryBinding::new(LightState::default());

    let out = mixer
        .process_frame(
            &t,
            &[
                MixInput::new(0, 1.0, 1.0),
                MixInput::new(1, f64::NAN, 1.0),
                MixInput::new(1, -0.5, 1.0),
            ],
            &mut target,
        )
        .unwrap();
    assert_eq!(out.total_weight(), 1.0);
    assert_eq!(target.value().intensity, 2.0);
}

#[test]
fn bad_clip_index_is_a_contract_error() {
    let t = color_track();
    let mut mixer = TrackMixer::<ColorFamily>::new();
    let mut target = MemoryBinding::new(Rgba::WHITE);

    let err = mixer
        .process_frame(&t, &[MixInput::new(9, 1.0, 0.0)], &mut target)
        .unwrap_err();
    assert!(matches!(err, MixError::Contract(_)));
    assert_eq!(target.writes(), 0);
    assert!(!mixer.is_initialized());
}

#[test]
fn non_finite_local_time_is_a_contract_error() {
    let t = color_track();
    let mut mixer = TrackMixer::<ColorFamily>::new();
    let mut target = MemoryBinding::new(Rgba::WHITE);

    let err = mixer
        .process_frame(&t, &[MixInput::new(0, 1.0, f64::INFINITY)], &mut target)
        .unwrap_err();
    assert!(matches!(err, MixError::Contract(_)));
}

#[test]
fn teardown_restores_held_baseline() {
    let mut t = light_track(5.0);
    t.settings.intensity = ValueControl::Add;
    let mut mixer = TrackMixer::<LightFamily>::new();
    let start = LightState::default();
    let mut target = MemoryBinding::new(start);

    mixer
        .process_frame(&t, &[MixInput::new(0, 1.0, 0.0)], &mut target)
        .unwrap();
    assert_eq!(target.value().intensity, 6.0);

    assert_eq!(mixer.teardown(&mut target), Some(start));
    assert_eq!(*target.value(), start);
    assert_eq!(mixer.teardown(&mut target), None);
}

#[test]
fn invalidate_clip_drops_its_baked_curve() {
    let mut t = light_track(1.0);
    t.clips[0].params.intensity_modulators.curve.enabled = true;
    let mut mixer = TrackMixer::<LightFamily>::new();
    let mut target = MemoryBinding::new(LightState::default());

    mixer
        .process_frame(&t, &[MixInput::new(0, 1.0, 0.0)], &mut target)
        .unwrap();
    assert_eq!(mixer.curve_cache().len(), 1);
    assert!(mixer.invalidate_clip(t.clips[0].id()));
    assert!(mixer.curve_cache().is_empty());
}
