//! 表計算データのメモリ上の表現

use serde::{Deserialize, Serialize};

pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// 先頭シートの内容（行ごとのセル文字列）
///
/// 1行目は見出し行として扱う。行の長さは揃っていなくてもよい。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub sheet_name: String,
    pub rows: Vec<Vec<String>>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            rows: Vec::new(),
        }
    }
}

impl Table {
    pub fn new(sheet_name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            rows,
        }
    }

    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 行末の空セルと末尾の空行を取り除く
    pub fn trim_trailing_empty(&mut self) {
        for row in &mut self.rows {
            while row.last().is_some_and(|c| c.is_empty()) {
                row.pop();
            }
        }
        while self.rows.last().is_some_and(|r| r.is_empty()) {
            self.rows.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_header_and_body() {
        let table = Table::new("S", rows(&[&["名前", "数量"], &["りんご", "3"]]));
        assert_eq!(table.header(), &["名前".to_string(), "数量".to_string()]);
        assert_eq!(table.body().len(), 1);
        assert_eq!(table.cell(1, 0), Some("りんご"));
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::default();
        assert!(table.header().is_empty());
        assert!(table.body().is_empty());
        assert_eq!(table.sheet_name, DEFAULT_SHEET_NAME);
    }

    #[test]
    fn test_trim_trailing_empty() {
        let mut table = Table::new("S", rows(&[&["a", "", "b", ""], &["", ""], &[]]));
        table.trim_trailing_empty();
        assert_eq!(table.rows, rows(&[&["a", "", "b"]]));
    }
}
