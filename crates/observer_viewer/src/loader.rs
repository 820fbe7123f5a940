//! One-shot observer log loading.
//!
//! Loading happens once, before the Bevy app is built; a failure here
//! short-circuits startup so the renderer never sees partial state.

use std::path::Path;

use observer_core::parser::parse_match_record;
use observer_core::record::MatchRecord;

use crate::error::{ObserverError, Result};

/// Read and parse an observer log, optionally transposing the coordinate
/// system afterwards.
pub fn load_match(path: Option<&Path>, transpose: bool) -> Result<MatchRecord> {
    let path = path.ok_or(ObserverError::MissingLogPath)?;

    let text = std::fs::read_to_string(path).map_err(|source| ObserverError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut record = parse_match_record(&text)?;
    if transpose {
        record = record.transposed();
    }

    tracing::info!(
        path = %path.display(),
        rows = record.rows,
        cols = record.cols,
        rounds = record.rounds.len(),
        transposed = transpose,
        "loaded observer log"
    );
    Ok(record)
}
