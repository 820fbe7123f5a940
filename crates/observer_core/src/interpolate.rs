//! Unit interpolation and round diffing.
//!
//! Rounds are discrete; the viewer animates the transition between round N
//! and round N+1 by interpolating each unit's grid position by the clock's
//! fraction. Because a unit id's presence across consecutive snapshots is
//! the only death/spawn signal, the diff is an explicit three-way
//! classification over the two id-sorted unit lists.

use crate::record::{RoundSnapshot, Side, UnitKind, UnitState};

/// Three-way classification of unit ids across one round transition.
#[derive(Debug, Default)]
pub struct RoundDiff<'a> {
    /// Ids present in both rounds, paired `(current, next)`.
    pub continuing: Vec<(&'a UnitState, &'a UnitState)>,
    /// Ids present only in the current round (died this transition).
    pub despawning: Vec<&'a UnitState>,
    /// Ids present only in the next round (spawn once it begins).
    pub appearing: Vec<&'a UnitState>,
}

/// Classify every unit id appearing in either snapshot.
///
/// Both unit lists must be sorted by id (the parser guarantees this); the
/// diff is then a single linear merge.
#[must_use]
pub fn diff_rounds<'a>(current: &'a RoundSnapshot, next: &'a RoundSnapshot) -> RoundDiff<'a> {
    debug_assert!(current.units.windows(2).all(|w| w[0].id < w[1].id));
    debug_assert!(next.units.windows(2).all(|w| w[0].id < w[1].id));

    let mut diff = RoundDiff::default();
    let (mut i, mut j) = (0, 0);
    while i < current.units.len() && j < next.units.len() {
        let (a, b) = (&current.units[i], &next.units[j]);
        match a.id.cmp(&b.id) {
            std::cmp::Ordering::Equal => {
                diff.continuing.push((a, b));
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => {
                diff.despawning.push(a);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                diff.appearing.push(b);
                j += 1;
            }
        }
    }
    diff.despawning.extend(&current.units[i..]);
    diff.appearing.extend(&next.units[j..]);
    diff
}

/// A renderable unit with its interpolated grid-space position.
///
/// Coordinates are fractional grid cells; scaling to pixels and any
/// per-kind centering offset is the renderer's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedUnit {
    /// Unit id.
    pub id: u32,
    /// Interpolated row coordinate.
    pub row: f32,
    /// Interpolated column coordinate.
    pub col: f32,
    /// Owning side, for styling.
    pub owner: Side,
    /// Combat role, for styling.
    pub kind: UnitKind,
    /// Hit points in the current round.
    pub hp: u32,
    /// Stamina in the current round.
    pub stamina: u32,
}

#[inline]
fn lerp(from: u32, to: u32, t: f32) -> f32 {
    let from = from as f32;
    from + (to as f32 - from) * t
}

/// Compute the renderable unit set for one instant of a round transition.
///
/// - Continuing units move linearly from their current to their next cell.
/// - Despawning units hold their current cell for the whole transition.
/// - Appearing units are omitted; they become renderable only once the
///   round fully advances, never mid-transition.
///
/// # Panics
///
/// Panics if `fraction` is outside `[0, 1)`; the clock never produces such
/// a value, so getting here with one is a driving-loop bug.
#[must_use]
pub fn interpolate(
    current: &RoundSnapshot,
    next: &RoundSnapshot,
    fraction: f32,
) -> Vec<InterpolatedUnit> {
    assert!(
        (0.0..1.0).contains(&fraction),
        "interpolation fraction {fraction} outside [0, 1)"
    );

    let diff = diff_rounds(current, next);
    let mut out = Vec::with_capacity(diff.continuing.len() + diff.despawning.len());

    for (from, to) in &diff.continuing {
        out.push(InterpolatedUnit {
            id: from.id,
            row: lerp(from.pos.row, to.pos.row, fraction),
            col: lerp(from.pos.col, to.pos.col, fraction),
            owner: from.owner,
            kind: from.kind,
            hp: from.hp,
            stamina: from.stamina,
        });
    }
    for unit in &diff.despawning {
        out.push(InterpolatedUnit {
            id: unit.id,
            row: unit.pos.row as f32,
            col: unit.pos.col as f32,
            owner: unit.owner,
            kind: unit.kind,
            hp: unit.hp,
            stamina: unit.stamina,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CellPos;

    fn unit(id: u32, row: u32, col: u32) -> UnitState {
        UnitState {
            id,
            pos: CellPos::new(row, col),
            owner: Side::Defender,
            kind: UnitKind::Warrior,
            hp: 100,
            stamina: 100,
        }
    }

    fn snapshot(units: Vec<UnitState>) -> RoundSnapshot {
        RoundSnapshot {
            round: 0,
            score: 0,
            is_final: false,
            units,
        }
    }

    #[test]
    fn diff_classifies_all_ids() {
        let current = snapshot(vec![unit(1, 0, 0), unit(2, 1, 1), unit(5, 2, 2)]);
        let next = snapshot(vec![unit(2, 1, 2), unit(3, 0, 0), unit(5, 2, 2)]);
        let diff = diff_rounds(&current, &next);

        let continuing: Vec<u32> = diff.continuing.iter().map(|(a, _)| a.id).collect();
        let despawning: Vec<u32> = diff.despawning.iter().map(|u| u.id).collect();
        let appearing: Vec<u32> = diff.appearing.iter().map(|u| u.id).collect();
        assert_eq!(continuing, vec![2, 5]);
        assert_eq!(despawning, vec![1]);
        assert_eq!(appearing, vec![3]);
    }

    #[test]
    fn fraction_zero_is_current_position() {
        let current = snapshot(vec![unit(7, 0, 0)]);
        let next = snapshot(vec![unit(7, 1, 0)]);
        let out = interpolate(&current, &next, 0.0);
        assert_eq!((out[0].row, out[0].col), (0.0, 0.0));
    }

    #[test]
    fn fraction_near_one_approaches_next() {
        let current = snapshot(vec![unit(7, 0, 0)]);
        let next = snapshot(vec![unit(7, 1, 0)]);
        let out = interpolate(&current, &next, 0.999);
        assert!(out[0].row > 0.99 && out[0].row < 1.0);
        assert_eq!(out[0].col, 0.0);
    }

    #[test]
    fn despawning_unit_holds_position_until_boundary() {
        let current = snapshot(vec![unit(4, 3, 3)]);
        let next = snapshot(Vec::new());
        let out = interpolate(&current, &next, 0.8);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].row, out[0].col), (3.0, 3.0));
    }

    #[test]
    fn appearing_unit_is_absent_before_boundary() {
        let current = snapshot(Vec::new());
        let next = snapshot(vec![unit(9, 0, 0)]);
        for fraction in [0.0, 0.5, 0.999] {
            assert!(interpolate(&current, &next, fraction).is_empty());
        }
    }

    #[test]
    #[should_panic(expected = "outside [0, 1)")]
    fn fraction_one_is_rejected() {
        let current = snapshot(vec![unit(1, 0, 0)]);
        let next = snapshot(vec![unit(1, 0, 1)]);
        let _ = interpolate(&current, &next, 1.0);
    }
}
