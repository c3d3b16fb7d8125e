//! Table definitions.

pub mod roasts;
pub mod stats;
