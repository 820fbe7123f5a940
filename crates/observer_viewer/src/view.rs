//! Shared view state: the loaded match, the active perspective and the
//! current fog grid.

use bevy::prelude::*;

use observer_core::fog::{compute_fog, FogGrid};
use observer_core::record::{MatchRecord, Perspective};

use crate::playback::{advance_playback, Playback};

/// Resource holding the parsed match record. Immutable after startup.
#[derive(Resource)]
pub struct MatchReplay(pub MatchRecord);

/// Resource holding the perspective whose fog is rendered.
#[derive(Resource)]
pub struct ActivePerspective(pub Perspective);

/// Resource holding the fog grid for the current round and perspective.
#[derive(Resource)]
pub struct FogState {
    /// Hidden-cell grid.
    pub grid: FogGrid,
    /// Round the grid was computed for.
    computed_round: Option<usize>,
}

impl FogState {
    /// An empty fog state; filled in by [`recompute_fog`] on the first frame.
    #[must_use]
    pub fn empty(record: &MatchRecord) -> Self {
        Self {
            grid: FogGrid::clear(record.rows, record.cols),
            computed_round: None,
        }
    }
}

/// Plugin owning the shared view resources' upkeep.
pub struct ViewPlugin;

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, recompute_fog.after(advance_playback));
    }
}

/// Recomputes fog from scratch whenever the round or perspective changes.
pub fn recompute_fog(
    replay: Res<MatchReplay>,
    playback: Res<Playback>,
    perspective: Res<ActivePerspective>,
    mut fog: ResMut<FogState>,
) {
    let round = playback.clock.current_round();
    if fog.computed_round == Some(round) && !perspective.is_changed() {
        return;
    }

    fog.grid = compute_fog(
        perspective.0,
        &replay.0.visibility,
        &replay.0.rounds[round].units,
    );
    fog.computed_round = Some(round);
}
