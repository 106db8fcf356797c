//! DocShelf Common Library
//!
//! フロントエンド間で共有される文書モデルとXLSX書き出し

pub mod error;
pub mod record;
pub mod table;
pub mod theme;
pub mod export;

pub use error::{Error, Result};
pub use record::{DocumentKind, DocumentRecord, RecordId, SUPPORTED_EXTENSIONS};
pub use table::Table;
pub use theme::Theme;
