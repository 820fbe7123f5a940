//! # Observer Core
//!
//! Replay engine for skirmish observer logs.
//!
//! This crate contains **only** the replay logic:
//! - No rendering
//! - No windowing or input
//! - No file system access (the parser consumes an in-memory string)
//!
//! This separation enables:
//! - Unit testing the playback state machine without a renderer
//! - Property testing the clock invariants
//! - Reusing the engine under any 2D frontend
//!
//! ## Crate Structure
//!
//! - [`record`] - Parsed match record types (terrain, visibility, rounds)
//! - [`parser`] - Observer log tokenizer and parser
//! - [`playback`] - Playback clock (round advance, speed, pause)
//! - [`interpolate`] - Per-frame unit interpolation and round diffing
//! - [`fog`] - Fog-of-war recomputation per perspective

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod fog;
pub mod interpolate;
pub mod parser;
pub mod playback;
pub mod record;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{ParseError, Result};
    pub use crate::fog::{compute_fog, FogGrid};
    pub use crate::interpolate::{diff_rounds, interpolate, InterpolatedUnit, RoundDiff};
    pub use crate::parser::parse_match_record;
    pub use crate::playback::{AdvanceOutcome, PlaybackClock, SPEED_STEP};
    pub use crate::record::{
        CellPos, Grid, MatchRecord, Perspective, RoundSnapshot, Side, TerrainKind, UnitKind,
        UnitState,
    };
}
