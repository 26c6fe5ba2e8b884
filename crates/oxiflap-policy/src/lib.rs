//! Sensing and jump decisions for piloted birds.
//!
//! This crate is the decision layer shared by the scripted autopilot and the
//! training system:
//!
//! - [`SensorReading`] - the fixed feature vector a policy consumes
//! - [`PolicyParams`] - the five-gene parameter tuple governing decisions
//! - [`decide`] - the pure decision rule
//! - [`ParamBounds`] - valid per-gene ranges for sampling and mutation
//! - [`Autopilot`] - a cooldown-tracking pilot for single-bird sessions
//!
//! Parameters are data, decisions are pure functions: nothing here touches
//! world state, which keeps the same rule usable for one scripted bird or
//! five hundred evolving ones.

pub use self::{decision::*, params::*, sensor::*};

mod decision;
mod params;
mod sensor;

/// Rejected parameter bounds. Raised synchronously wherever bounds are
/// first consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("gene bounds must satisfy lo <= hi for every gene")]
pub struct BoundsError;
