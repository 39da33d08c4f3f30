//! Member roster: cell values, typed records, date handling and the workbook store

pub mod date;
pub mod excel;
pub mod member;
pub mod store;
pub mod value;

pub use date::{ExpirationInput, normalize};
pub use excel::RosterWorkbook;
pub use member::{MemberRecord, Roster, columns};
pub use store::{RosterStore, XlsxRosterStore};
pub use value::CellValue;
