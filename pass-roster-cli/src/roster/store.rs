//! Where a roster is loaded from and persisted to

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::RosterWorkbook;
use super::excel::{read_roster_workbook, write_roster_workbook};

/// Tabular store holding the roster between runs
pub trait RosterStore {
    fn load(&self) -> Result<RosterWorkbook>;
    fn save(&self, workbook: &RosterWorkbook) -> Result<()>;
}

/// An `.xlsx` file read at start and overwritten in place at the end
#[derive(Debug, Clone)]
pub struct XlsxRosterStore {
    path: PathBuf,
}

impl XlsxRosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterStore for XlsxRosterStore {
    fn load(&self) -> Result<RosterWorkbook> {
        read_roster_workbook(&self.path)
    }

    fn save(&self, workbook: &RosterWorkbook) -> Result<()> {
        write_roster_workbook(workbook, &self.path)
    }
}
