//! 文書レコードの型定義
//!
//! 永続化される1文書分のデータ。JSONのフィールド名は
//! ブラウザ版の保存形式（name / type / data / lastModified）に合わせている。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 受け付ける拡張子（小文字）
pub const SUPPORTED_EXTENSIONS: &[&str] = &["docx", "xlsx", "xls", "pdf", "txt"];

/// レコードの安定ID
///
/// 表示順（更新日時の降順）と保存順が異なっても、
/// 開く・削除する対象をこのIDで特定する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 文書の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// .docx
    #[serde(rename = "docx")]
    WordProcessor,
    /// .xlsx
    #[serde(rename = "xlsx")]
    SpreadsheetModern,
    /// .xls
    #[serde(rename = "xls")]
    SpreadsheetLegacy,
    /// .pdf
    #[serde(rename = "pdf")]
    Pdf,
    /// .txt
    #[serde(rename = "txt")]
    PlainText,
}

impl DocumentKind {
    /// 拡張子（大文字小文字を区別しない）から種別を判定
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "docx" => Some(Self::WordProcessor),
            "xlsx" => Some(Self::SpreadsheetModern),
            "xls" => Some(Self::SpreadsheetLegacy),
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// ファイル名の末尾の拡張子から種別を判定
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::WordProcessor => "docx",
            Self::SpreadsheetModern => "xlsx",
            Self::SpreadsheetLegacy => "xls",
            Self::Pdf => "pdf",
            Self::PlainText => "txt",
        }
    }

    /// 一覧表示用のラベル
    pub fn label(&self) -> String {
        self.extension().to_ascii_uppercase()
    }

    /// 一覧表示用のアイコン
    pub fn icon(&self) -> &'static str {
        match self {
            Self::WordProcessor => "📄",
            Self::Pdf => "📑",
            Self::PlainText => "📝",
            Self::SpreadsheetModern | Self::SpreadsheetLegacy => "📊",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::WordProcessor => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::SpreadsheetModern => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            Self::SpreadsheetLegacy => "application/vnd.ms-excel",
            Self::Pdf => "application/pdf",
            Self::PlainText => "text/plain;charset=utf-8",
        }
    }

    pub fn is_spreadsheet(&self) -> bool {
        matches!(self, Self::SpreadsheetModern | Self::SpreadsheetLegacy)
    }

    /// ペイロードがbase64で保存されるか（テキスト以外）
    pub fn is_binary(&self) -> bool {
        !matches!(self, Self::PlainText)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 永続化される文書レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// 旧データにはIDが無いため、読み込み時に採番する
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,

    /// 元のファイル名（主キー）
    pub name: String,

    #[serde(rename = "type")]
    pub kind: DocumentKind,

    /// バイナリ種別はbase64、テキストは本文そのもの
    #[serde(rename = "data", default)]
    pub payload: String,

    /// 表示用の更新日時文字列
    #[serde(default)]
    pub last_modified: String,
}

impl DocumentRecord {
    pub fn new(
        name: impl Into<String>,
        kind: DocumentKind,
        payload: impl Into<String>,
        last_modified: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            kind,
            payload: payload.into(),
            last_modified: last_modified.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(DocumentKind::from_file_name("report.docx"), Some(DocumentKind::WordProcessor));
        assert_eq!(DocumentKind::from_file_name("Book.XLSX"), Some(DocumentKind::SpreadsheetModern));
        assert_eq!(DocumentKind::from_file_name("old.xls"), Some(DocumentKind::SpreadsheetLegacy));
        assert_eq!(DocumentKind::from_file_name("a.b.Pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_file_name("a.txt"), Some(DocumentKind::PlainText));
        assert_eq!(DocumentKind::from_file_name("a.csv"), None);
        assert_eq!(DocumentKind::from_file_name("txt"), None);
    }

    #[test]
    fn test_every_supported_extension_maps_to_a_kind() {
        for ext in SUPPORTED_EXTENSIONS {
            let kind = DocumentKind::from_extension(ext).expect("未対応の拡張子");
            assert_eq!(kind.extension(), *ext);
        }
    }

    #[test]
    fn test_record_serialize_uses_storage_field_names() {
        let record = DocumentRecord::new("a.txt", DocumentKind::PlainText, "hello", "2026/10/19 10:00:00");
        let json = serde_json::to_string(&record).expect("シリアライズ失敗");
        assert!(json.contains("\"name\":\"a.txt\""));
        assert!(json.contains("\"type\":\"txt\""));
        assert!(json.contains("\"data\":\"hello\""));
        assert!(json.contains("\"lastModified\":\"2026/10/19 10:00:00\""));
        assert!(json.contains("\"id\":"));
    }

    #[test]
    fn test_record_without_id_gets_generated_id() {
        let json = r#"{"name":"b.pdf","type":"pdf","data":"JVBERi0=","lastModified":"2026/1/2 3:04:05"}"#;
        let record: DocumentRecord = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(record.kind, DocumentKind::Pdf);
        assert!(!record.id.as_str().is_empty());
    }

    #[test]
    fn test_kind_labels_and_icons() {
        assert_eq!(DocumentKind::SpreadsheetLegacy.label(), "XLS");
        assert_eq!(DocumentKind::SpreadsheetModern.icon(), "📊");
        assert_eq!(DocumentKind::PlainText.icon(), "📝");
        assert!(DocumentKind::Pdf.is_binary());
        assert!(!DocumentKind::PlainText.is_binary());
    }
}
