pub mod ease;
pub mod noise;
pub mod value;
