use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of rows in an Excel 2007+ worksheet.
pub const EXCEL_MAX_ROWS: u32 = 1_048_576;
/// Number of columns in an Excel 2007+ worksheet (`A..=XFD`).
pub const EXCEL_MAX_COLS: u32 = 16_384;

/// A reference to a single cell within a worksheet.
///
/// Rows and columns are **0-indexed**:
/// - `row = 0` is Excel row `1`
/// - `col = 0` is Excel column `A`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    /// 0-indexed row.
    pub row: u32,
    /// 0-indexed column.
    pub col: u32,
}

impl CellRef {
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Convert to Excel A1 notation (e.g. `A1`, `BC32`).
    pub fn to_a1(self) -> String {
        format!("{}{}", col_to_name(self.col), self.row + 1)
    }

    /// Parse an Excel A1-style reference (e.g. `A1`, `$B$2`).
    pub fn from_a1(a1: &str) -> Result<Self, A1ParseError> {
        let s = a1.trim();
        if s.is_empty() {
            return Err(A1ParseError::Empty);
        }
        let (col, row) = split_a1(s)?;
        let col = col.ok_or(A1ParseError::MissingColumn)?;
        let row = row.ok_or(A1ParseError::MissingRow)?;
        Ok(Self { row, col })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// A rectangular region within a worksheet.
///
/// The range is inclusive and always normalized such that:
/// - `start.row <= end.row`
/// - `start.col <= end.col`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: CellRef,
    pub end: CellRef,
}

impl Range {
    /// Construct a new range, normalizing coordinates if needed.
    pub const fn new(a: CellRef, b: CellRef) -> Self {
        let start_row = if a.row <= b.row { a.row } else { b.row };
        let end_row = if a.row <= b.row { b.row } else { a.row };
        let start_col = if a.col <= b.col { a.col } else { b.col };
        let end_col = if a.col <= b.col { b.col } else { a.col };
        Self {
            start: CellRef::new(start_row, start_col),
            end: CellRef::new(end_row, end_col),
        }
    }

    /// Number of columns in the range.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    #[inline]
    pub const fn is_single_cell(&self) -> bool {
        self.start.row == self.end.row && self.start.col == self.end.col
    }

    /// Parse an A1-style range.
    ///
    /// Accepted forms:
    /// - `A1:B2` and single cells like `C3`
    /// - whole columns `B:B` / `B:D` (rows `1..=1048576`)
    /// - whole rows `3:3` / `3:5` (columns `A..=XFD`)
    pub fn from_a1(a1: &str) -> Result<Self, RangeParseError> {
        let s = a1.trim();
        if s.is_empty() {
            return Err(RangeParseError::Empty);
        }

        let Some((a, b)) = s.split_once(':') else {
            let cell = CellRef::from_a1(s)?;
            return Ok(Range::new(cell, cell));
        };

        let (a_col, a_row) = split_a1(a.trim())?;
        let (b_col, b_row) = split_a1(b.trim())?;
        let (start, end) = match (a_col, a_row, b_col, b_row) {
            (Some(c1), Some(r1), Some(c2), Some(r2)) => (CellRef::new(r1, c1), CellRef::new(r2, c2)),
            (Some(c1), None, Some(c2), None) => (
                CellRef::new(0, c1),
                CellRef::new(EXCEL_MAX_ROWS - 1, c2),
            ),
            (None, Some(r1), None, Some(r2)) => (
                CellRef::new(r1, 0),
                CellRef::new(r2, EXCEL_MAX_COLS - 1),
            ),
            _ => return Err(RangeParseError::MixedEndpoints),
        };
        Ok(Range::new(start, end))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

/// A range qualified with the 0-based index of the worksheet it belongs to.
///
/// Worksheet XML and BIFF12 records never carry a sheet name inside `ref`
/// attributes; the importer pairs them with the index of the sheet being read.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetRange {
    pub sheet: u16,
    pub range: Range,
}

impl SheetRange {
    pub const fn new(sheet: u16, range: Range) -> Self {
        Self { sheet, range }
    }

    /// Parse `a1` as a range on `sheet`.
    pub fn from_a1(sheet: u16, a1: &str) -> Result<Self, RangeParseError> {
        Ok(Self {
            sheet,
            range: Range::from_a1(a1)?,
        })
    }

    /// Convert the `rwFirst/rwLast/colFirst/colLast` quadruple stored in BIFF12
    /// records. Negative or out-of-sheet coordinates are clamped to the sheet bounds.
    pub fn from_biff_rect(sheet: u16, row_first: i32, row_last: i32, col_first: i32, col_last: i32) -> Self {
        let row = |v: i32| (v.max(0) as u32).min(EXCEL_MAX_ROWS - 1);
        let col = |v: i32| (v.max(0) as u32).min(EXCEL_MAX_COLS - 1);
        Self {
            sheet,
            range: Range::new(
                CellRef::new(row(row_first), col(col_first)),
                CellRef::new(row(row_last), col(col_last)),
            ),
        }
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}!{}", self.sheet, self.range)
    }
}

/// Errors that can occur when parsing an A1 cell reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum A1ParseError {
    #[error("empty A1 reference")]
    Empty,
    #[error("missing column in A1 reference")]
    MissingColumn,
    #[error("missing row in A1 reference")]
    MissingRow,
    #[error("invalid column in A1 reference")]
    InvalidColumn,
    #[error("invalid row in A1 reference")]
    InvalidRow,
    #[error("trailing characters in A1 reference")]
    TrailingCharacters,
}

/// Errors that can occur when parsing an A1 range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum RangeParseError {
    #[error("empty A1 range")]
    Empty,
    #[error("range mixes cell, column and row endpoints")]
    MixedEndpoints,
    #[error("invalid cell reference in range: {0}")]
    Cell(#[from] A1ParseError),
}

/// Split an A1 token into its (optional) column and (optional) row parts.
///
/// `B` yields `(Some(1), None)`, `7` yields `(None, Some(6))`.
fn split_a1(s: &str) -> Result<(Option<u32>, Option<u32>), A1ParseError> {
    if s.is_empty() {
        return Err(A1ParseError::Empty);
    }
    let bytes = s.as_bytes();
    let mut idx = 0usize;
    if bytes.get(idx) == Some(&b'$') {
        idx += 1;
    }

    let col_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_alphabetic() {
        idx += 1;
    }
    let col = if idx == col_start {
        None
    } else {
        let col = name_to_col(&s[col_start..idx])?;
        if col >= EXCEL_MAX_COLS {
            return Err(A1ParseError::InvalidColumn);
        }
        Some(col)
    };

    if bytes.get(idx) == Some(&b'$') {
        idx += 1;
    }

    let row_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    let row = if idx == row_start {
        None
    } else {
        let row_1_based: u32 = s[row_start..idx]
            .parse()
            .map_err(|_| A1ParseError::InvalidRow)?;
        if row_1_based == 0 || row_1_based > EXCEL_MAX_ROWS {
            return Err(A1ParseError::InvalidRow);
        }
        Some(row_1_based - 1)
    };

    if idx != bytes.len() {
        return Err(A1ParseError::TrailingCharacters);
    }
    if col.is_none() && row.is_none() {
        return Err(A1ParseError::MissingColumn);
    }
    Ok((col, row))
}

fn col_to_name(col: u32) -> String {
    // Excel columns are 1-based in A1 notation. We store 0-based internally.
    let mut n = col + 1;
    let mut out = String::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.insert(0, char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    out
}

fn name_to_col(s: &str) -> Result<u32, A1ParseError> {
    let mut col: u32 = 0;
    for b in s.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(A1ParseError::InvalidColumn);
        }
        let v = (b.to_ascii_uppercase() - b'A') as u32 + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(v))
            .ok_or(A1ParseError::InvalidColumn)?;
    }
    if col == 0 {
        return Err(A1ParseError::InvalidColumn);
    }
    Ok(col - 1)
}
