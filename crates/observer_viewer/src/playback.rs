//! Per-frame playback driving.
//!
//! One system owns all mutation of the playback clock per frame; input
//! handlers run on the same schedule and mutate it between ticks, so there
//! is exactly one logical thread of control over playback state.

use bevy::prelude::*;

use observer_core::playback::{AdvanceOutcome, PlaybackClock};

use crate::view::MatchReplay;

/// Resource wrapping the core playback clock.
#[derive(Resource)]
pub struct Playback {
    /// The engine clock. Mutated only on the main schedule.
    pub clock: PlaybackClock,
}

/// Emitted when the clock crosses a round boundary.
#[derive(Debug, Clone, Copy, Event)]
pub struct RoundAdvanced {
    /// The round that just became current.
    pub round: usize,
}

/// Emitted on every tick once the terminal round is reached.
#[derive(Debug, Clone, Copy, Event)]
pub struct MatchEnded;

/// Plugin owning the playback clock and its events.
pub struct PlaybackPlugin;

impl Plugin for PlaybackPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RoundAdvanced>()
            .add_event::<MatchEnded>()
            .add_systems(Update, advance_playback);
    }
}

/// The single per-frame tick: advances the clock by the frame delta.
pub fn advance_playback(
    time: Res<Time>,
    replay: Res<MatchReplay>,
    mut playback: ResMut<Playback>,
    mut advanced: EventWriter<RoundAdvanced>,
    mut ended: EventWriter<MatchEnded>,
    mut end_logged: Local<bool>,
) {
    match playback.clock.advance(time.delta_seconds(), &replay.0) {
        AdvanceOutcome::InProgress => {}
        AdvanceOutcome::RoundAdvanced => {
            advanced.send(RoundAdvanced {
                round: playback.clock.current_round(),
            });
        }
        AdvanceOutcome::MatchEnded => {
            ended.send(MatchEnded);
            if !*end_logged {
                tracing::info!(
                    round = playback.clock.current_round(),
                    "final round reached"
                );
                *end_logged = true;
            }
        }
    }
}
