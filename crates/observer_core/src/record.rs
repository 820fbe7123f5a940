//! Parsed match record types.
//!
//! A [`MatchRecord`] is built once by the parser and never mutated during
//! playback. Grids are stored row-major and indexed `(row, col)` exactly as
//! the log stores them; mapping rows/columns onto screen axes is the
//! frontend's concern. Logs authored for the transposed orientation are
//! fixed up with [`MatchRecord::transposed`] once, right after parsing.

use serde::{Deserialize, Serialize};

/// One of the two sides of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Side 0 in the log.
    Defender,
    /// Side 1 in the log.
    Attacker,
}

impl Side {
    /// Decode a side from its log code (0 or 1).
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Defender),
            1 => Some(Self::Attacker),
            _ => None,
        }
    }

    /// The side's index in the log (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Defender => 0,
            Self::Attacker => 1,
        }
    }
}

/// The observing perspective a log was written for, and the perspective the
/// viewer applies fog for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Perspective {
    /// Sees everything; no fog.
    #[default]
    Omniscient,
    /// Sees only what the given side's units reveal.
    Side(Side),
}

impl Perspective {
    /// Decode a perspective from its log code (-1 observer, 0/1 a side).
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Omniscient),
            _ => match Side::from_code(code) {
                Some(side) => Some(Self::Side(side)),
                None => None,
            },
        }
    }
}

/// Terrain kind of one map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Open plains.
    #[default]
    Plains,
    /// Forest; obscures distant sight.
    Forest,
    /// Water; impassable in the underlying game.
    Water,
}

impl TerrainKind {
    /// Decode a terrain kind from its log code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Plains),
            1 => Some(Self::Forest),
            2 => Some(Self::Water),
            _ => None,
        }
    }

    /// The log code for this terrain kind.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Plains => 0,
            Self::Forest => 1,
            Self::Water => 2,
        }
    }
}

/// Combat role of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Melee unit.
    Warrior,
    /// Ranged unit.
    Archer,
}

impl UnitKind {
    /// Decode a unit kind from its log code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Warrior),
            1 => Some(Self::Archer),
            _ => None,
        }
    }
}

/// A cell position on the map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    /// Row index (first log dimension).
    pub row: u32,
    /// Column index (second log dimension).
    pub col: u32,
}

impl CellPos {
    /// Create a cell position.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// The same position with row and column swapped.
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self {
            row: self.col,
            col: self.row,
        }
    }
}

/// Row-major 2-D storage shared by the terrain, height and visibility maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: u32,
    cols: u32,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid from row-major cell data.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero or `cells` has the wrong length.
    #[must_use]
    pub fn from_cells(rows: u32, cols: u32, cells: Vec<T>) -> Self {
        assert!(rows > 0, "Grid rows must be positive");
        assert!(cols > 0, "Grid cols must be positive");
        assert_eq!(
            cells.len(),
            (rows as usize) * (cols as usize),
            "Grid cell count must be rows * cols"
        );
        Self { rows, cols, cells }
    }

    /// Grid row count.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Grid column count.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Check that a position is within grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    #[inline]
    fn index_of(&self, pos: CellPos) -> usize {
        (pos.row as usize) * (self.cols as usize) + (pos.col as usize)
    }

    /// Cell at the given position, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, pos: CellPos) -> Option<&T> {
        if self.in_bounds(pos) {
            Some(&self.cells[self.index_of(pos)])
        } else {
            None
        }
    }

    /// Iterate over all `(position, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, &T)> {
        let cols = self.cols;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let i = i as u32;
            (CellPos::new(i / cols, i % cols), cell)
        })
    }

    /// The row-major cell data.
    #[must_use]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}

impl<T: Clone> Grid<T> {
    /// The transposed grid: `new[(c, r)] = old[(r, c)]`.
    #[must_use]
    pub fn transposed(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for new_row in 0..self.cols {
            for new_col in 0..self.rows {
                cells.push(self.cells[self.index_of(CellPos::new(new_col, new_row))].clone());
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

/// Snapshot of a single unit within one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitState {
    /// Unit id, unique within a snapshot. Presence or absence of an id
    /// across consecutive snapshots is the only death/spawn signal.
    pub id: u32,
    /// Cell the unit occupies this round.
    pub pos: CellPos,
    /// Owning side.
    pub owner: Side,
    /// Combat role.
    pub kind: UnitKind,
    /// Current hit points.
    pub hp: u32,
    /// Current stamina.
    pub stamina: u32,
}

/// One discrete step of the match as recorded in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Round number as written in the log. Expected to equal the snapshot's
    /// index, but playback keys off the index, not this field.
    pub round: u32,
    /// Attacker score so far. Display-only.
    pub score: i64,
    /// Marks the terminal round. Playback stops at whatever snapshot is
    /// marked final regardless of its index.
    pub is_final: bool,
    /// Units alive this round, sorted by id.
    pub units: Vec<UnitState>,
}

impl RoundSnapshot {
    /// Look up a unit by id.
    #[must_use]
    pub fn unit(&self, id: u32) -> Option<&UnitState> {
        self.units
            .binary_search_by_key(&id, |u| u.id)
            .ok()
            .map(|i| &self.units[i])
    }
}

/// A fully parsed observer log. Immutable after parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// The perspective the log was written for.
    pub perspective: Perspective,
    /// Map row count (`n` in the log header).
    pub rows: u32,
    /// Map column count (`m` in the log header).
    pub cols: u32,
    /// Terrain kind per cell.
    pub terrain: Grid<TerrainKind>,
    /// Elevation per cell. Used only as a shading hint.
    pub heights: Grid<u32>,
    /// Visibility-reveal table: for each cell, the set of cells visible to a
    /// unit standing there. Built once at parse time.
    pub visibility: Grid<Vec<CellPos>>,
    /// Round snapshots in play order.
    pub rounds: Vec<RoundSnapshot>,
}

impl MatchRecord {
    /// Index of the terminal round: the first snapshot marked final, or the
    /// last snapshot if none is marked.
    ///
    /// `rounds` is never empty; the parser rejects a log without snapshots,
    /// and hand-built records must uphold the same invariant.
    #[must_use]
    pub fn final_round_index(&self) -> usize {
        debug_assert!(
            !self.rounds.is_empty(),
            "MatchRecord must hold at least one round"
        );
        self.rounds
            .iter()
            .position(|r| r.is_final)
            .unwrap_or(self.rounds.len().saturating_sub(1))
    }

    /// Whether playback must stop at the given round: it is marked final or
    /// no later snapshot exists.
    #[must_use]
    pub fn is_terminal_round(&self, idx: usize) -> bool {
        idx >= self.final_round_index()
    }

    /// The snapshots bracketing the transition out of round `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is the terminal round. The driving loop must check
    /// [`Self::is_terminal_round`] before asking for a transition; getting
    /// here past the end is a loop-control bug, not a recoverable state.
    #[must_use]
    pub fn round_pair(&self, idx: usize) -> (&RoundSnapshot, &RoundSnapshot) {
        assert!(
            !self.is_terminal_round(idx),
            "round_pair requested past the terminal round (index {idx})"
        );
        (&self.rounds[idx], &self.rounds[idx + 1])
    }

    /// The same record with row and column semantics swapped across terrain,
    /// heights, visibility and all unit coordinates.
    ///
    /// Pure post-parse transform; apply at most once.
    #[must_use]
    pub fn transposed(&self) -> Self {
        let visibility_cells: Vec<Vec<CellPos>> = self
            .visibility
            .transposed()
            .cells()
            .iter()
            .map(|seen| seen.iter().map(|pos| pos.transposed()).collect())
            .collect();

        let rounds = self
            .rounds
            .iter()
            .map(|snapshot| RoundSnapshot {
                units: snapshot
                    .units
                    .iter()
                    .map(|unit| UnitState {
                        pos: unit.pos.transposed(),
                        ..*unit
                    })
                    .collect(),
                ..snapshot.clone()
            })
            .collect();

        Self {
            perspective: self.perspective,
            rows: self.cols,
            cols: self.rows,
            terrain: self.terrain.transposed(),
            heights: self.heights.transposed(),
            visibility: Grid::from_cells(self.cols, self.rows, visibility_cells),
            rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn grid_round_trips_positions() {
        let grid = Grid::from_cells(2, 3, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(grid.get(CellPos::new(0, 0)), Some(&1));
        assert_eq!(grid.get(CellPos::new(0, 2)), Some(&3));
        assert_eq!(grid.get(CellPos::new(1, 0)), Some(&4));
        assert_eq!(grid.get(CellPos::new(2, 0)), None);
        assert_eq!(grid.get(CellPos::new(0, 3)), None);
    }

    #[test]
    fn grid_transpose_swaps_axes() {
        let grid = Grid::from_cells(2, 3, vec![1, 2, 3, 4, 5, 6]);
        let t = grid.transposed();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        for row in 0..2 {
            for col in 0..3 {
                assert_eq!(
                    grid.get(CellPos::new(row, col)),
                    t.get(CellPos::new(col, row))
                );
            }
        }
    }

    #[test]
    fn perspective_codes() {
        assert_eq!(Perspective::from_code(-1), Some(Perspective::Omniscient));
        assert_eq!(
            Perspective::from_code(0),
            Some(Perspective::Side(Side::Defender))
        );
        assert_eq!(
            Perspective::from_code(1),
            Some(Perspective::Side(Side::Attacker))
        );
        assert_eq!(Perspective::from_code(2), None);
    }

    fn two_round_record() -> MatchRecord {
        MatchRecord {
            perspective: Perspective::Omniscient,
            rows: 2,
            cols: 2,
            terrain: Grid::from_cells(2, 2, vec![TerrainKind::Plains; 4]),
            heights: Grid::from_cells(2, 2, vec![0; 4]),
            visibility: Grid::from_cells(2, 2, vec![Vec::new(); 4]),
            rounds: vec![
                RoundSnapshot {
                    round: 0,
                    score: 0,
                    is_final: false,
                    units: vec![unit(7, 0, 0)],
                },
                RoundSnapshot {
                    round: 1,
                    score: 0,
                    is_final: true,
                    units: vec![unit(7, 1, 0)],
                },
            ],
        }
    }

    #[test]
    fn final_round_is_terminal() {
        let record = two_round_record();
        assert_eq!(record.final_round_index(), 1);
        assert!(!record.is_terminal_round(0));
        assert!(record.is_terminal_round(1));
    }

    #[test]
    #[should_panic(expected = "at least one round")]
    fn empty_round_list_violates_the_record_contract() {
        let record = MatchRecord {
            rounds: Vec::new(),
            ..two_round_record()
        };
        let _ = record.final_round_index();
    }

    #[test]
    #[should_panic(expected = "terminal round")]
    fn round_pair_past_final_panics() {
        let record = two_round_record();
        let _ = record.round_pair(1);
    }

    #[test]
    fn transpose_swaps_units_and_grids() {
        let record = MatchRecord {
            visibility: Grid::from_cells(
                2,
                2,
                vec![
                    vec![CellPos::new(0, 1)],
                    Vec::new(),
                    Vec::new(),
                    Vec::new(),
                ],
            ),
            ..two_round_record()
        };
        let t = record.transposed();
        assert_eq!(t.rows, 2);
        assert_eq!(t.cols, 2);
        assert_eq!(t.rounds[1].units[0].pos, CellPos::new(0, 1));
        assert_eq!(
            t.visibility.get(CellPos::new(0, 0)).unwrap(),
            &vec![CellPos::new(1, 0)]
        );
        // a second transpose restores the original
        assert_eq!(t.transposed(), record);
    }
}
