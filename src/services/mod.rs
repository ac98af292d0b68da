pub mod pacing;
pub mod pdf;
