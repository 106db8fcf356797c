//! 表計算ファイルの読み書き
//!
//! 読み込みは calamine（xls / xlsx を中身から判別）、
//! 書き出しは共通ライブラリの xlsx_core を使う。

use crate::error::{DocShelfError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use docshelf_common::export::xlsx_core;
use docshelf_common::Table;
use std::io::Cursor;

/// バイト列の先頭シートを Table に変換
pub fn decode(bytes: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| DocShelfError::Spreadsheet(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| DocShelfError::Spreadsheet("シートがありません".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| DocShelfError::Spreadsheet(e.to_string()))?;

    // 使用範囲の開始位置に合わせてA1起点に揃える
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![String::new(); col_offset];
        cells.extend(row.iter().map(cell_to_string));
        rows.push(cells);
    }

    let mut table = Table::new(sheet_name, rows);
    table.trim_trailing_empty();
    Ok(table)
}

/// Table をXLSXのバイト列に変換
pub fn encode(table: &Table) -> Result<Vec<u8>> {
    Ok(xlsx_core::encode_table(table)?)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
