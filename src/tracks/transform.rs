use crate::{
    animation::value::ClipValue,
    composition::model::TrackKind,
    foundation::core::Vec3,
    foundation::error::MixResult,
    mix::blend::Blend,
    mix::cache::CurveCache,
    mix::mixer::{InputSample, TrackFamily},
    mix::policy::ValueControl,
};

/// Tracks driving a spatial node's local transform.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransformFamily;

/// Local transform with the rotation expressed as Euler angles in degrees.
///
/// Rotations are mixed per Euler component, so crossfades between far-apart
/// orientations take the component-wise path rather than the shortest arc.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformState {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TransformParams {
    #[serde(default = "zero")]
    pub position: ClipValue<Vec3>,
    #[serde(default = "zero")]
    pub rotation: ClipValue<Vec3>,
    #[serde(default = "one")]
    pub scale: ClipValue<Vec3>,
}

fn zero() -> ClipValue<Vec3> {
    ClipValue::Constant(Vec3::ZERO)
}

fn one() -> ClipValue<Vec3> {
    ClipValue::Constant(Vec3::ONE)
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            position: zero(),
            rotation: zero(),
            scale: one(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransformSettings {
    pub position: ValueControl,
    pub rotation: ValueControl,
    pub scale: ValueControl,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TransformAccum {
    position: Blend<Vec3>,
    rotation: Blend<Vec3>,
    scale: Blend<Vec3>,
}

impl TrackFamily for TransformFamily {
    type Params = TransformParams;
    type Settings = TransformSettings;
    type State = TransformState;
    type Accum = TransformAccum;

    const KIND: TrackKind = TrackKind::Transform;
    const CHANNELS: &'static [&'static str] = &["position", "rotation", "scale"];

    fn validate_params(p: &TransformParams) -> MixResult<()> {
        p.position.validate()?;
        p.rotation.validate()?;
        p.scale.validate()
    }

    fn accumulate(
        acc: &mut TransformAccum,
        p: &TransformParams,
        sample: &InputSample,
        _cache: &mut CurveCache,
    ) {
        let t = sample.normalized;
        let w = sample.weight;
        acc.position.push(p.position.evaluate(t), w);
        acc.rotation.push(p.rotation.evaluate(t), w);
        acc.scale.push(p.scale.evaluate(t), w);
    }

    fn resolve(
        s: &TransformSettings,
        acc: &TransformAccum,
        current: &TransformState,
        initial: &TransformState,
    ) -> TransformState {
        TransformState {
            position: acc
                .position
                .resolve(s.position, current.position, initial.position),
            rotation: acc
                .rotation
                .resolve(s.rotation, current.rotation, initial.rotation),
            scale: acc.scale.resolve(s.scale, current.scale, initial.scale),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracks/transform.rs"]
mod tests;
