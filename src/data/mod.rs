//! Data sources.
//!
//! - seeded synthetic sample generation for `--demo` runs (`sample`)

pub mod sample;

pub use sample::*;
