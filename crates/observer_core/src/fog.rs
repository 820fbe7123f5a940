//! Fog-of-war recomputation.
//!
//! The visibility-reveal table is static; which cells are hidden depends
//! only on the observing perspective and where that side's units stand this
//! round. The whole grid is recomputed on every round advance and every
//! perspective switch - the reveal sets are large and units move every
//! round, so there is nothing worth updating incrementally.

use crate::record::{CellPos, Grid, Perspective, UnitState};

/// The set of map cells hidden from the current perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FogGrid {
    rows: u32,
    cols: u32,
    hidden: Vec<bool>,
}

impl FogGrid {
    /// A fog grid with every cell hidden.
    #[must_use]
    pub fn all_hidden(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            hidden: vec![true; (rows as usize) * (cols as usize)],
        }
    }

    /// A fog grid with nothing hidden.
    #[must_use]
    pub fn clear(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            hidden: vec![false; (rows as usize) * (cols as usize)],
        }
    }

    #[inline]
    fn index_of(&self, pos: CellPos) -> usize {
        (pos.row as usize) * (self.cols as usize) + (pos.col as usize)
    }

    /// Whether the cell is hidden. Out-of-bounds positions are not hidden.
    #[must_use]
    pub fn is_hidden(&self, pos: CellPos) -> bool {
        if pos.row < self.rows && pos.col < self.cols {
            self.hidden[self.index_of(pos)]
        } else {
            false
        }
    }

    fn reveal(&mut self, pos: CellPos) {
        if pos.row < self.rows && pos.col < self.cols {
            let idx = self.index_of(pos);
            self.hidden[idx] = false;
        }
    }

    /// Number of hidden cells.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.hidden.iter().filter(|h| **h).count()
    }

    /// Iterate over all hidden cell positions in row-major order.
    pub fn iter_hidden(&self) -> impl Iterator<Item = CellPos> + '_ {
        let cols = self.cols;
        self.hidden
            .iter()
            .enumerate()
            .filter(|(_, hidden)| **hidden)
            .map(move |(i, _)| {
                let i = i as u32;
                CellPos::new(i / cols, i % cols)
            })
    }
}

/// Compute the hidden-cell set for one round.
///
/// Omniscient perspective hides nothing. A side perspective starts with the
/// whole map hidden, then reveals every cell visible from each of that
/// side's units. Pure function of its arguments; same inputs, same fog.
#[must_use]
pub fn compute_fog(
    perspective: Perspective,
    visibility: &Grid<Vec<CellPos>>,
    units: &[UnitState],
) -> FogGrid {
    let side = match perspective {
        Perspective::Omniscient => return FogGrid::clear(visibility.rows(), visibility.cols()),
        Perspective::Side(side) => side,
    };

    let mut fog = FogGrid::all_hidden(visibility.rows(), visibility.cols());
    for unit in units.iter().filter(|u| u.owner == side) {
        if let Some(seen) = visibility.get(unit.pos) {
            for pos in seen {
                fog.reveal(*pos);
            }
        }
    }
    fog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Side, UnitKind};

    fn unit(owner: Side, row: u32, col: u32) -> UnitState {
        UnitState {
            id: row * 100 + col,
            pos: CellPos::new(row, col),
            owner,
            kind: UnitKind::Warrior,
            hp: 100,
            stamina: 100,
        }
    }

    /// 2x2 table where standing at (0,0) reveals (0,0) and (0,1).
    fn corner_visibility() -> Grid<Vec<CellPos>> {
        Grid::from_cells(
            2,
            2,
            vec![
                vec![CellPos::new(0, 0), CellPos::new(0, 1)],
                Vec::new(),
                Vec::new(),
                Vec::new(),
            ],
        )
    }

    #[test]
    fn omniscient_hides_nothing() {
        let fog = compute_fog(
            Perspective::Omniscient,
            &corner_visibility(),
            &[unit(Side::Defender, 0, 0)],
        );
        assert_eq!(fog.hidden_count(), 0);
    }

    #[test]
    fn side_reveals_only_owned_unit_sight() {
        let fog = compute_fog(
            Perspective::Side(Side::Defender),
            &corner_visibility(),
            &[unit(Side::Defender, 0, 0)],
        );
        assert!(!fog.is_hidden(CellPos::new(0, 0)));
        assert!(!fog.is_hidden(CellPos::new(0, 1)));
        assert!(fog.is_hidden(CellPos::new(1, 0)));
        assert!(fog.is_hidden(CellPos::new(1, 1)));
        assert_eq!(fog.hidden_count(), 2);
    }

    #[test]
    fn enemy_units_reveal_nothing() {
        let fog = compute_fog(
            Perspective::Side(Side::Attacker),
            &corner_visibility(),
            &[unit(Side::Defender, 0, 0)],
        );
        assert_eq!(fog.hidden_count(), 4);
    }

    #[test]
    fn no_units_means_everything_hidden() {
        let fog = compute_fog(Perspective::Side(Side::Defender), &corner_visibility(), &[]);
        assert_eq!(fog.hidden_count(), 4);
        let hidden: Vec<CellPos> = fog.iter_hidden().collect();
        assert_eq!(hidden.len(), 4);
        assert_eq!(hidden[0], CellPos::new(0, 0));
    }

    #[test]
    fn recompute_is_deterministic() {
        let vis = corner_visibility();
        let units = [unit(Side::Defender, 0, 0), unit(Side::Attacker, 1, 1)];
        let a = compute_fog(Perspective::Side(Side::Defender), &vis, &units);
        let b = compute_fog(Perspective::Side(Side::Defender), &vis, &units);
        assert_eq!(a, b);
    }
}
