//! Spatial helpers over position sets.
//!
//! This module provides rstar-backed bounding boxes used by the normalizer
//! and exposed to callers for viewport fitting.

mod bounds;

pub use bounds::{bounds, Bounds};
