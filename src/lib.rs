//! DocShelf
//!
//! オフィス文書（表計算・Word・PDF・テキスト）を取り込み、プレビュー・編集し、
//! ローカルのストレージに保管して後から開き直す・ダウンロードするためのライブラリ。

pub mod cli;
pub mod codec;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod logging;
pub mod pdf;
pub mod render;
pub mod session;
pub mod storage;
pub mod store;
pub mod upload;

pub use controller::{Controller, ListAction, ListView, SaveOutcome, View, ViewerSettings};
pub use docshelf_common::{DocumentKind, DocumentRecord, RecordId, Table, Theme};
pub use error::{DocShelfError, Result};
