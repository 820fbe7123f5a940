//! Observer log parser.
//!
//! The log is a flat stream of whitespace-delimited integers read strictly
//! sequentially, with no backtracking:
//!
//! ```text
//! mapType                 (-1 omniscient, 0/1 a side)
//! rows cols
//! terrain   rows*cols codes, row-major
//! heights   rows*cols non-negative integers, row-major
//! visibility  per cell: seeCount, then seeCount (row col) pairs
//! rounds, repeated until end of stream:
//!   round score isFinal unitCount
//!   unitCount * (row col id owner type hp stamina)
//! ```
//!
//! Every structural defect is fatal: a stream that ends mid-round or
//! mid-unit, a non-numeric token or an out-of-range code yields a
//! [`ParseError`] instead of a partial record.

use std::iter::Peekable;
use std::str::SplitAsciiWhitespace;

use crate::error::{ParseError, Result};
use crate::record::{
    CellPos, Grid, MatchRecord, Perspective, RoundSnapshot, Side, TerrainKind, UnitKind, UnitState,
};

/// Upper bound on `rows * cols`, to reject dimension values that make
/// array bounds impossible before any allocation happens.
const MAX_CELLS: u64 = 1 << 20;

/// Sequential token reader tracking its offset for error reporting.
struct TokenReader<'a> {
    tokens: Peekable<SplitAsciiWhitespace<'a>>,
    offset: usize,
}

impl<'a> TokenReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            tokens: text.split_ascii_whitespace().peekable(),
            offset: 0,
        }
    }

    fn is_empty(&mut self) -> bool {
        self.tokens.peek().is_none()
    }

    /// Read the next token as a signed integer.
    fn next_i64(&mut self, expected: &'static str) -> Result<i64> {
        let offset = self.offset;
        let token = self
            .tokens
            .next()
            .ok_or(ParseError::UnexpectedEnd { expected, offset })?;
        self.offset += 1;
        token.parse().map_err(|_| ParseError::InvalidToken {
            expected,
            token: token.to_owned(),
            offset,
        })
    }

    /// Read the next token as a non-negative integer fitting in `u32`.
    fn next_u32(&mut self, expected: &'static str) -> Result<u32> {
        let offset = self.offset;
        let value = self.next_i64(expected)?;
        u32::try_from(value).map_err(|_| ParseError::OutOfRange {
            expected,
            value,
            offset,
        })
    }

    /// Read a `(row, col)` pair and check it against the map bounds.
    fn next_cell(&mut self, expected: &'static str, rows: u32, cols: u32) -> Result<CellPos> {
        let offset = self.offset;
        let row = self.next_i64(expected)?;
        let col = self.next_i64(expected)?;
        let in_bounds = (0..i64::from(rows)).contains(&row) && (0..i64::from(cols)).contains(&col);
        if !in_bounds {
            return Err(ParseError::CellOutOfBounds {
                row,
                col,
                rows,
                cols,
                offset,
            });
        }
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        Ok(CellPos::new(row as u32, col as u32))
    }
}

/// Parse the full text of an observer log into a [`MatchRecord`].
pub fn parse_match_record(text: &str) -> Result<MatchRecord> {
    let mut reader = TokenReader::new(text);

    let perspective_code = reader.next_i64("map perspective")?;
    let perspective =
        Perspective::from_code(perspective_code).ok_or(ParseError::UnknownCode {
            what: "perspective",
            code: perspective_code,
            offset: 0,
        })?;

    let rows_raw = reader.next_i64("map row count")?;
    let cols_raw = reader.next_i64("map column count")?;
    let cell_total = u64::try_from(rows_raw)
        .ok()
        .zip(u64::try_from(cols_raw).ok())
        .and_then(|(r, c)| r.checked_mul(c));
    if rows_raw <= 0 || cols_raw <= 0 || !cell_total.is_some_and(|n| n <= MAX_CELLS) {
        return Err(ParseError::BadDimensions {
            rows: rows_raw,
            cols: cols_raw,
        });
    }
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let (rows, cols) = (rows_raw as u32, cols_raw as u32);
    let cell_count = (rows as usize) * (cols as usize);

    let terrain = parse_terrain(&mut reader, rows, cols, cell_count)?;
    let heights = parse_heights(&mut reader, rows, cols, cell_count)?;
    let visibility = parse_visibility(&mut reader, rows, cols, cell_count)?;
    let rounds = parse_rounds(&mut reader, rows, cols)?;

    tracing::debug!(
        rows,
        cols,
        rounds = rounds.len(),
        "parsed observer log"
    );

    Ok(MatchRecord {
        perspective,
        rows,
        cols,
        terrain,
        heights,
        visibility,
        rounds,
    })
}

fn parse_terrain(
    reader: &mut TokenReader<'_>,
    rows: u32,
    cols: u32,
    cell_count: usize,
) -> Result<Grid<TerrainKind>> {
    let mut cells = Vec::with_capacity(cell_count);
    for _ in 0..cell_count {
        let offset = reader.offset;
        let code = reader.next_i64("terrain cell")?;
        let kind = TerrainKind::from_code(code).ok_or(ParseError::UnknownCode {
            what: "terrain",
            code,
            offset,
        })?;
        cells.push(kind);
    }
    Ok(Grid::from_cells(rows, cols, cells))
}

fn parse_heights(
    reader: &mut TokenReader<'_>,
    rows: u32,
    cols: u32,
    cell_count: usize,
) -> Result<Grid<u32>> {
    let mut cells = Vec::with_capacity(cell_count);
    for _ in 0..cell_count {
        cells.push(reader.next_u32("height cell")?);
    }
    Ok(Grid::from_cells(rows, cols, cells))
}

fn parse_visibility(
    reader: &mut TokenReader<'_>,
    rows: u32,
    cols: u32,
    cell_count: usize,
) -> Result<Grid<Vec<CellPos>>> {
    let mut cells = Vec::with_capacity(cell_count);
    for _ in 0..cell_count {
        let see_count = reader.next_u32("visibility count")?;
        let mut seen = Vec::with_capacity(see_count as usize);
        for _ in 0..see_count {
            seen.push(reader.next_cell("visibility pair", rows, cols)?);
        }
        cells.push(seen);
    }
    Ok(Grid::from_cells(rows, cols, cells))
}

fn parse_rounds(reader: &mut TokenReader<'_>, rows: u32, cols: u32) -> Result<Vec<RoundSnapshot>> {
    let mut rounds = Vec::new();
    while !reader.is_empty() {
        let round = reader.next_u32("round number")?;
        let score = reader.next_i64("round score")?;
        let is_final = reader.next_i64("final-round flag")? != 0;
        let unit_count = reader.next_u32("unit count")?;

        let mut units = Vec::with_capacity(unit_count as usize);
        for _ in 0..unit_count {
            units.push(parse_unit(reader, rows, cols)?);
        }
        // The server emits units in hash order; sorted snapshots let the
        // diff engine merge two ordered sequences.
        units.sort_unstable_by_key(|u| u.id);

        rounds.push(RoundSnapshot {
            round,
            score,
            is_final,
            units,
        });
    }
    if rounds.is_empty() {
        return Err(ParseError::NoRounds);
    }
    Ok(rounds)
}

fn parse_unit(reader: &mut TokenReader<'_>, rows: u32, cols: u32) -> Result<UnitState> {
    let pos = reader.next_cell("unit position", rows, cols)?;
    let id = reader.next_u32("unit id")?;

    let offset = reader.offset;
    let owner_code = reader.next_i64("unit owner")?;
    let owner = Side::from_code(owner_code).ok_or(ParseError::UnknownCode {
        what: "owner",
        code: owner_code,
        offset,
    })?;

    let offset = reader.offset;
    let kind_code = reader.next_i64("unit type")?;
    let kind = UnitKind::from_code(kind_code).ok_or(ParseError::UnknownCode {
        what: "unit type",
        code: kind_code,
        offset,
    })?;

    let hp = reader.next_u32("unit hp")?;
    let stamina = reader.next_u32("unit stamina")?;

    Ok(UnitState {
        id,
        pos,
        owner,
        kind,
        hp,
        stamina,
    })
}
