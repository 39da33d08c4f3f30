//! Excel I/O for the member roster workbook
//!
//! The first sheet is the roster (header row + members). Every other sheet is
//! read as plain cell values and written back as-is so a rewrite keeps the
//! workbook's sheet list and order.

mod reader;
mod writer;

pub use reader::read_roster_workbook;
pub use writer::write_roster_workbook;

use super::member::Roster;
use super::value::CellValue;

/// A workbook sheet that is carried through without interpretation
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    /// Zero-based (row, column) of the first cell in `rows`
    pub origin: (u32, u32),
    pub rows: Vec<Vec<CellValue>>,
}

/// Everything a run loads from, and writes back to, the roster file
#[derive(Debug, Clone, PartialEq)]
pub struct RosterWorkbook {
    /// First sheet, parsed as the member roster
    pub roster: Roster,
    /// Remaining sheets, in workbook order
    pub other_sheets: Vec<Sheet>,
}

impl From<Roster> for RosterWorkbook {
    fn from(roster: Roster) -> Self {
        Self {
            roster,
            other_sheets: Vec::new(),
        }
    }
}
