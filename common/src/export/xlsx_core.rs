//! XLSX書き出し（共通ライブラリ）
//!
//! Table の内容を先頭シートとして書き出す。値はすべて文字列セルとして書く。

use crate::error::{Error, Result};
use crate::table::{Table, DEFAULT_SHEET_NAME};
use rust_xlsxwriter::Workbook;

/// Excelの列数上限
const MAX_COLS: usize = 16_384;

/// Table をXLSXのバイト列に変換
pub fn encode_table(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let sheet_name = if table.sheet_name.trim().is_empty() {
        DEFAULT_SHEET_NAME
    } else {
        table.sheet_name.as_str()
    };
    worksheet
        .set_name(sheet_name)
        .map_err(|e| Error::Spreadsheet(format!("シート名エラー: {}", e)))?;

    for (row_idx, row) in table.rows.iter().enumerate() {
        if row.len() > MAX_COLS {
            return Err(Error::Spreadsheet(format!(
                "列数が上限を超えています: {}行目 {}列",
                row_idx + 1,
                row.len()
            )));
        }
        let row_num = u32::try_from(row_idx)
            .map_err(|_| Error::Spreadsheet(format!("行数が上限を超えています: {}", row_idx + 1)))?;

        for (col_idx, value) in row.iter().enumerate() {
            // 空セルは書かない（読み戻すと空として扱われる）
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(row_num, col_idx as u16, value)
                .map_err(|e| Error::Spreadsheet(format!("セル書き込みエラー: {}", e)))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Spreadsheet(format!("Excel保存エラー: {}", e)))
}
