pub mod fade;
pub mod schedule;
