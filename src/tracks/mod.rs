pub mod color;
pub mod light;
pub mod light2d;
pub mod transform;
