pub mod blend;
pub mod cache;
pub mod mixer;
pub mod modulate;
pub mod policy;
pub mod state;
