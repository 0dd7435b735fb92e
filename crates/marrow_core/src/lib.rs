//! Foundational types for the Marrow engine: errors, math helpers and a
//! fixed-step clock.

pub mod errors;
pub mod math;
pub mod time;

pub use errors::{MarrowError, Result};
pub use time::FixedStep;
