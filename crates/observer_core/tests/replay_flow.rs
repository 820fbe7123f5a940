//! End-to-end engine flow: parse a small log, drive the clock across the
//! round boundary, interpolate the transition and recompute fog.

use observer_core::prelude::*;

/// 2x2 defender-perspective map, one unit walking one cell down.
const LOG: &str = "\
    0\n\
    2 2\n\
    0 0\n\
    0 0\n\
    0 0\n\
    0 0\n\
    1 0 0\n\
    1 1 0\n\
    1 1 1\n\
    1 0 1\n\
    0 0 0 1\n\
    0 0 4 0 0 100 100\n\
    1 0 1 1\n\
    1 0 4 0 0 100 100\n";

#[test]
fn one_advance_at_speed_one_crosses_the_boundary_once() {
    let record = parse_match_record(LOG).unwrap();
    assert_eq!(record.perspective, Perspective::Side(Side::Defender));
    assert_eq!(record.rounds.len(), 2);

    let mut clock = PlaybackClock::new(1.0);
    assert_eq!(clock.advance(1.0, &record), AdvanceOutcome::RoundAdvanced);
    assert_eq!(clock.current_round(), 1);
    assert_eq!(clock.advance(1.0, &record), AdvanceOutcome::MatchEnded);
    assert_eq!(clock.current_round(), 1);
}

#[test]
fn mid_transition_interpolation_and_fog_agree_with_the_log() {
    let record = parse_match_record(LOG).unwrap();
    let mut clock = PlaybackClock::new(1.0);
    clock.advance(0.5, &record);

    let (current, next) = record.round_pair(clock.current_round());
    let units = interpolate(current, next, clock.fraction());
    assert_eq!(units.len(), 1);
    assert!((units[0].row - 0.5).abs() < 1e-6);
    assert_eq!(units[0].col, 0.0);

    // fog is keyed to the discrete round, not the fraction: the unit stands
    // at (0,0) and sees only its own cell
    let fog = compute_fog(
        Perspective::Side(Side::Defender),
        &record.visibility,
        &current.units,
    );
    assert!(!fog.is_hidden(CellPos::new(0, 0)));
    assert!(fog.is_hidden(CellPos::new(1, 0)));
    assert_eq!(fog.hidden_count(), 3);
}
