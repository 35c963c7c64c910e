//! Archive extraction.

pub mod engine;

pub use engine::extract_validated;
