//! World simulation for a side-scrolling obstacle-avoidance game.
//!
//! This crate owns everything that happens inside the playfield:
//!
//! - [`Bird`] - vertical physics of one bird (gravity, flap impulse)
//! - [`PipeCourse`] - the scrolling obstacle course, seeded and deterministic
//! - [`GameSession`] - a single-bird run with state and statistics
//! - [`WorldConfig`] - the flat configuration record with validated defaults
//! - [`FrameTime`] - the explicit per-update time value threaded through all
//!   updates (there are no ambient clocks in this crate)
//!
//! The course exposes pure positional queries ([`PipeCourse::next_gap_after`],
//! [`PipeCourse::is_solid_at`]) that are independent of any bird, so the same
//! course instance can serve one bird or a whole training population within a
//! frame.

pub use self::{bird::*, collision::*, config::*, course::*, frame::*, session::*};

mod bird;
mod collision;
mod config;
mod course;
mod frame;
mod session;

/// Rejected world configuration. Raised synchronously at construction and
/// fatal to the instance being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("playfield dimensions must be positive")]
    InvalidDimensions,
    #[display("ground band must fit inside the playfield")]
    InvalidGround,
    #[display("pipe gap and margins must fit between ceiling and ground")]
    InvalidGapGeometry,
    #[display("pipe spacing must exceed pipe width")]
    InvalidPipeLayout,
    #[display("scroll speed must be positive")]
    InvalidScrollSpeed,
    #[display("gravity must pull down and the flap impulse must push up")]
    InvalidPhysics,
}
