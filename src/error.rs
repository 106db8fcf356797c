use docshelf_common::DocumentKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocShelfError {
    #[error("対応していないファイル形式です: {0}（.docx, .xlsx, .xls, .pdf, .txt のいずれかをアップロードしてください）")]
    UnsupportedFormat(String),

    #[error("ファイルの読み込みに失敗しました: {0}")]
    FileRead(String),

    #[error("文書の表示に失敗しました: {0}")]
    Render(String),

    #[error("{page}ページ目の描画に失敗しました: {message}")]
    PdfPage { page: u32, message: String },

    #[error("ストレージエラー: {0}")]
    Storage(String),

    #[error("ストレージの容量を超えています（必要: {needed} bytes / 上限: {quota} bytes）")]
    StorageQuotaExceeded { needed: usize, quota: usize },

    #[error("文書の保存に失敗しました: {0}")]
    Save(String),

    #[error("文書のダウンロードに失敗しました: {0}")]
    Download(String),

    #[error("開いている文書がありません")]
    NoActiveDocument,

    #[error("文書が見つかりません: {0}")]
    DocumentNotFound(String),

    #[error("セルが存在しません: {row}行 {col}列")]
    CellOutOfRange { row: usize, col: usize },

    #[error("この形式は編集できません: {0}")]
    NotEditable(DocumentKind),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("表計算ファイルの解析に失敗: {0}")]
    Spreadsheet(String),

    #[error("PDFの解析に失敗: {0}")]
    Pdf(String),

    #[error("base64デコードエラー: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] docshelf_common::Error),
}

pub type Result<T> = std::result::Result<T, DocShelfError>;
