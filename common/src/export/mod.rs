//! 文書の書き出し

#[cfg(feature = "excel")]
pub mod xlsx_core;
