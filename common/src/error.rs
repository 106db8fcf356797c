//! エラー型定義

use thiserror::Error;

/// 共通ライブラリのエラー
#[derive(Error, Debug)]
pub enum Error {
    #[error("XLSXの書き出しに失敗: {0}")]
    Spreadsheet(String),

    #[error("不明なテーマです: {0}（dark または light を指定してください）")]
    UnknownTheme(String),
}

pub type Result<T> = std::result::Result<T, Error>;
