//! Read the roster workbook

use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};

use super::{RosterWorkbook, Sheet};
use crate::roster::member::Roster;
use crate::roster::value::CellValue;

/// Read an `.xlsx` workbook, parsing its first sheet as the roster
pub fn read_roster_workbook<P: AsRef<Path>>(path: P) -> Result<RosterWorkbook> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let Some((roster_name, rest)) = sheet_names.split_first() else {
        bail!("Excel file has no sheets: {}", path.display());
    };

    let range = workbook
        .worksheet_range(roster_name)
        .with_context(|| format!("Failed to read sheet: {}", roster_name))?;
    let roster = parse_roster(roster_name, &range)?;

    let mut other_sheets = Vec::with_capacity(rest.len());
    for sheet_name in rest {
        let range = workbook
            .worksheet_range(sheet_name)
            .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;
        other_sheets.push(Sheet {
            name: sheet_name.clone(),
            origin: range.start().unwrap_or((0, 0)),
            rows: convert_rows(&range),
        });
    }

    log::debug!(
        "Read roster '{}' ({} members, {} columns) and {} other sheet(s) from {}",
        roster.sheet_name,
        roster.len(),
        roster.columns.len(),
        other_sheets.len(),
        path.display()
    );

    Ok(RosterWorkbook {
        roster,
        other_sheets,
    })
}

fn parse_roster(sheet_name: &str, range: &Range<Data>) -> Result<Roster> {
    let mut rows = convert_rows(range).into_iter();

    let Some(header) = rows.next() else {
        bail!("Sheet '{}' has no header row", sheet_name);
    };
    let columns = header.iter().map(|cell| cell.to_string()).collect();

    Ok(Roster::new(sheet_name, columns, rows.collect()))
}

fn convert_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    range
        .rows()
        .map(|row| row.iter().map(CellValue::from_data).collect())
        .collect()
}
