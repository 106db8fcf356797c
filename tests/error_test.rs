//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use docshelf::error::DocShelfError;
use docshelf::DocumentKind;

/// DocShelfErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        DocShelfError::UnsupportedFormat("a.csv".to_string()),
        DocShelfError::FileRead("a.txt".to_string()),
        DocShelfError::Render("表示失敗".to_string()),
        DocShelfError::PdfPage { page: 3, message: "壊れている".to_string() },
        DocShelfError::Storage("書き込み失敗".to_string()),
        DocShelfError::StorageQuotaExceeded { needed: 10, quota: 5 },
        DocShelfError::Save("保存失敗".to_string()),
        DocShelfError::Download("ダウンロード失敗".to_string()),
        DocShelfError::NoActiveDocument,
        DocShelfError::DocumentNotFound("x.txt".to_string()),
        DocShelfError::CellOutOfRange { row: 1, col: 2 },
        DocShelfError::NotEditable(DocumentKind::Pdf),
        DocShelfError::Config("設定エラー".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "Error display should not be empty");
    }
}

/// 非対応形式のメッセージに対応形式の一覧が含まれる
#[test]
fn test_unsupported_format_lists_extensions() {
    let message = DocShelfError::UnsupportedFormat("a.csv".to_string()).to_string();
    assert!(message.contains("a.csv"));
    for ext in [".docx", ".xlsx", ".xls", ".pdf", ".txt"] {
        assert!(message.contains(ext), "missing {}", ext);
    }
}

/// PDFページのエラーにページ番号が含まれる
#[test]
fn test_pdf_page_error_mentions_page() {
    let message = DocShelfError::PdfPage { page: 7, message: "x".to_string() }.to_string();
    assert!(message.contains('7'));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
    let err: DocShelfError = json_err.into();
    assert!(matches!(err, DocShelfError::JsonParse(_)));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: DocShelfError = io_err.into();
    assert!(matches!(err, DocShelfError::Io(_)));
}
