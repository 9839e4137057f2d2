use super::*;
use crate::{
    animation::value::Key,
    animation::value::NormalizedKeys,
    binding::MemoryBinding,
    composition::model::{ParameterClip, Track},
    mix::mixer::{MixInput, TrackMixer},
    mix::modulate::{CurveModulation, NoiseParams},
};

fn bright() -> LightParams {
    LightParams {
        color: ClipValue::constant(Rgba::rgb(1.0, 0.5, 0.25)),
        intensity: ClipValue::constant(4.0),
        range: ClipValue::constant(20.0),
        ..LightParams::default()
    }
}

#[test]
fn channels_mix_with_their_own_policy() {
    let mut t = Track::<LightFamily>::new("lamp", "key_light");
    t.settings.intensity = ValueControl::Multiply;
    t.settings.range = ValueControl::Add;
    t.clips.push(ParameterClip::new("bright", 0.0, 2.0, bright()));

    let mut mixer = TrackMixer::<LightFamily>::new();
    let mut target = MemoryBinding::new(LightState {
        intensity: 0.5,
        range: 5.0,
        ..LightState::default()
    });

    mixer
        .process_frame(&t, &[MixInput::new(0, 1.0, 0.5)], &mut target)
        .unwrap();
    let s = *target.value();
    assert_eq!(s.color, Rgba::rgb(1.0, 0.5, 0.25));
    assert_eq!(s.intensity, 2.0);
    assert_eq!(s.range, 25.0);
    assert_eq!(s.spot_angle, 30.0);
}

#[test]
fn noise_is_added_to_intensity() {
    let mut params = bright();
    params.intensity_modulators.noise = NoiseParams {
        enabled: true,
        ..NoiseParams::default()
    };
    let mut t = Track::<LightFamily>::new("lamp", "key_light");
    t.clips.push(ParameterClip::new("noisy", 0.0, 4.0, params));

    let mut mixer = TrackMixer::<LightFamily>::new();
    let mut target = MemoryBinding::new(LightState::default());

    // Lattice points sample the noise midpoint.
    mixer
        .process_frame(&t, &[MixInput::new(0, 1.0, 2.0)], &mut target)
        .unwrap();
    assert!((target.value().intensity - 4.5).abs() < 1e-12);
}

#[test]
fn curve_scales_intensity_after_policy() {
    let mut params = bright();
    params.intensity_modulators.curve = CurveModulation {
        enabled: true,
        curve: NormalizedKeys::new(vec![Key::new(0.0, 0.5)]),
    };
    let mut t = Track::<LightFamily>::new("lamp", "key_light");
    t.clips.push(ParameterClip::new("curved", 0.0, 4.0, params));

    let mut mixer = TrackMixer::<LightFamily>::new();
    let mut target = MemoryBinding::new(LightState::default());

    mixer
        .process_frame(&t, &[MixInput::new(0, 1.0, 1.0)], &mut target)
        .unwrap();
    assert_eq!(target.value().intensity, 2.0);
    assert_eq!(mixer.curve_cache().len(), 1);
}

#[test]
fn spot_angle_out_of_range_is_rejected() {
    let params = LightParams {
        spot_angle: ClipValue::constant(270.0),
        ..LightParams::default()
    };
    assert!(LightFamily::validate_params(&params).is_err());
    assert!(LightFamily::validate_params(&LightParams::default()).is_ok());
}

#[test]
fn params_deserialize_with_defaults() {
    let p: LightParams = serde_json::from_str(r#"{"intensity":{"constant":2.0}}"#).unwrap();
    assert_eq!(p.intensity.evaluate(0.3), 2.0);
    assert_eq!(p.range.evaluate(0.3), 10.0);
    assert!(!p.intensity_modulators.noise.enabled);
}
