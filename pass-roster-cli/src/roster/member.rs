//! Roster table and typed member records

use anyhow::{Result, bail};

use super::{CellValue, ExpirationInput};

/// Header names the roster is read by
pub mod columns {
    pub const NAME: &str = "Name";
    pub const LICENSE_NUMBER: &str = "License_Number";
    pub const ID_NUMBER: &str = "ID_Number";
    pub const EXPIRATION_DATE: &str = "Expiration_Date";
    pub const PHOTO: &str = "Photo";
    pub const PASS_URL: &str = "Pass_URL";
}

static EMPTY_CELL: CellValue = CellValue::Empty;

/// The member sheet: a header row plus data rows of equal width
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// One member, with the cells the pass pipeline needs pulled out by name
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRecord {
    /// Index into `Roster::rows`
    pub row: usize,
    pub name: String,
    pub license_number: CellValue,
    pub id_number: CellValue,
    /// Expiration cell exactly as stored
    pub expiration_date: CellValue,
    pub expiration: ExpirationInput,
    pub photo: Option<String>,
    pub pass_url: Option<String>,
}

impl MemberRecord {
    /// Whether a pass link was recorded on an earlier run
    pub fn has_pass(&self) -> bool {
        self.pass_url.is_some()
    }
}

impl Roster {
    /// Build a roster, widening the header or padding rows so every row has
    /// one cell per column.
    pub fn new(
        sheet_name: impl Into<String>,
        mut columns: Vec<String>,
        mut rows: Vec<Vec<CellValue>>,
    ) -> Self {
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(columns.len()))
            .max()
            .unwrap_or(0);

        columns.resize(width, String::new());
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }

        Self {
            sheet_name: sheet_name.into(),
            columns,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First column carrying this header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` under header `name`; absent columns read as empty
    pub fn cell(&self, row: usize, name: &str) -> &CellValue {
        self.column_index(name)
            .and_then(|col| self.rows.get(row).and_then(|r| r.get(col)))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Append an empty `Pass_URL` column if the header has none.
    /// Returns true when the column was added.
    pub fn ensure_pass_url_column(&mut self) -> bool {
        if self.column_index(columns::PASS_URL).is_some() {
            return false;
        }

        self.columns.push(columns::PASS_URL.to_string());
        for row in &mut self.rows {
            row.push(CellValue::String(String::new()));
        }
        true
    }

    /// Record the pass link for one row
    pub fn set_pass_url(&mut self, row: usize, url: &str) -> Result<()> {
        self.ensure_pass_url_column();
        let Some(col) = self.column_index(columns::PASS_URL) else {
            bail!("Roster has no {} column", columns::PASS_URL);
        };

        match self.rows.get_mut(row) {
            Some(cells) => {
                cells[col] = CellValue::String(url.to_string());
                Ok(())
            }
            None => bail!("Row {} is outside the roster ({} rows)", row, self.rows.len()),
        }
    }

    /// Typed view of one row
    pub fn member(&self, row: usize) -> Option<MemberRecord> {
        if row >= self.rows.len() {
            return None;
        }

        let expiration_date = self.cell(row, columns::EXPIRATION_DATE).clone();
        Some(MemberRecord {
            row,
            name: self.cell(row, columns::NAME).to_string(),
            license_number: self.cell(row, columns::LICENSE_NUMBER).clone(),
            id_number: self.cell(row, columns::ID_NUMBER).clone(),
            expiration: ExpirationInput::from_cell(&expiration_date),
            expiration_date,
            photo: self.cell(row, columns::PHOTO).non_empty_text(),
            pass_url: self.cell(row, columns::PASS_URL).non_empty_text(),
        })
    }

    /// Typed views of every row, in sheet order
    pub fn members(&self) -> Vec<MemberRecord> {
        (0..self.rows.len()).filter_map(|row| self.member(row)).collect()
    }
}
