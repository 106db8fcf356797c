pub mod payload;
pub mod spreadsheet;
