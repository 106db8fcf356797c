//! 表計算の編集グリッド
//!
//! 見出し行は編集不可、本文の各セルは独立した入力欄。
//! 入力はその場で保持するだけで、保存時にまとめて読み取る。

use crate::error::{DocShelfError, Result};
use docshelf_common::Table;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellInput {
    pub value: String,
    original: String,
}

impl CellInput {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            original: value.to_string(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.value != self.original
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSurface {
    pub sheet_name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellInput>>,
}

impl GridSurface {
    /// 本文の各行は見出しの列数まで空欄で埋め、見えているセルはすべて入力欄にする
    pub fn from_table(table: &Table) -> Self {
        let width = table.header().len();
        Self {
            sheet_name: table.sheet_name.clone(),
            header: table.header().to_vec(),
            rows: table
                .body()
                .iter()
                .map(|row| {
                    let mut cells: Vec<CellInput> = row.iter().map(|c| CellInput::new(c)).collect();
                    while cells.len() < width {
                        cells.push(CellInput::new(""));
                    }
                    cells
                })
                .collect(),
        }
    }

    /// 本文セルの入力欄の数
    pub fn input_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// 本文セル（0始まり、見出し行を含まない）を書き換える
    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<String>) -> Result<()> {
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(DocShelfError::CellOutOfRange { row, col })?;
        cell.value = value.into();
        Ok(())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(|c| c.value.as_str())
    }

    /// 編集されたセルの位置
    pub fn dirty_cells(&self) -> Vec<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.is_dirty())
                    .map(move |(c, _)| (r, c))
            })
            .collect()
    }

    /// 見出しと現在の入力値から新しい Table を組み立てる
    pub fn scrape(&self) -> Table {
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        if !self.header.is_empty() || !self.rows.is_empty() {
            rows.push(self.header.clone());
        }
        rows.extend(
            self.rows
                .iter()
                .map(|row| row.iter().map(|c| c.value.clone()).collect()),
        );
        Table::new(self.sheet_name.clone(), rows)
    }
}
