//! Query parameters and data acquisition

pub mod frequency;
pub mod sources;

pub use frequency::Frequency;
