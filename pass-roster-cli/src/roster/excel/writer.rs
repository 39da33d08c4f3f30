//! Write the roster workbook

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use super::RosterWorkbook;
use crate::roster::value::CellValue;

/// Write the roster (as the first sheet, header in row 1) followed by every
/// other sheet, replacing whatever is at `path`.
pub fn write_roster_workbook<P: AsRef<Path>>(book: &RosterWorkbook, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();

    let roster = &book.roster;
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&roster.sheet_name)?;

    for (col, name) in roster.columns.iter().enumerate() {
        if !name.is_empty() {
            worksheet.write_string(0, col as u16, name)?;
        }
    }
    write_rows(worksheet, (1, 0), &roster.rows)?;

    for sheet in &book.other_sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        write_rows(worksheet, sheet.origin, &sheet.rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    Ok(())
}

fn write_rows(ws: &mut Worksheet, origin: (u32, u32), rows: &[Vec<CellValue>]) -> Result<()> {
    let (first_row, first_col) = origin;
    for (row_idx, cells) in rows.iter().enumerate() {
        let row = first_row + row_idx as u32;
        for (col_idx, cell) in cells.iter().enumerate() {
            let col = (first_col as usize + col_idx) as u16;
            write_cell(ws, row, col, cell)?;
        }
    }
    Ok(())
}

fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> Result<()> {
    match cell {
        CellValue::Empty => { /* Leave cell empty */ }
        CellValue::String(s) if s.is_empty() => {}
        CellValue::String(s) => {
            ws.write_string(row, col, s)?;
        }
        CellValue::Number(n) => {
            ws.write_number(row, col, *n)?;
        }
        CellValue::Bool(b) => {
            ws.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}
