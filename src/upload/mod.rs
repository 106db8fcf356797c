//! アップロードされたファイルの判定と読み込み

use crate::error::{DocShelfError, Result};
use crate::store::TIMESTAMP_FORMAT;
use docshelf_common::DocumentKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// ファイルの中身の所在
#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

/// ユーザーが選択したファイル
#[derive(Debug, Clone)]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    /// ファイル自体の更新日時（分かる場合）
    pub last_modified: Option<String>,
    source: FileSource,
}

/// 読み込み結果
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Bytes(Vec<u8>),
    Text(String),
}

impl FileHandle {
    /// パスからハンドルを作る（メタデータのみ取得）
    pub async fn from_path(path: &Path) -> Result<Self> {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| DocShelfError::FileRead(format!("{}: {}", path.display(), e)))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let last_modified = meta.modified().ok().map(|t| {
            chrono::DateTime::<chrono::Local>::from(t)
                .format(TIMESTAMP_FORMAT)
                .to_string()
        });

        Ok(Self {
            name,
            size: meta.len(),
            last_modified,
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    /// メモリ上のバイト列からハンドルを作る（ドラッグ&ドロップ等）
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            last_modified: None,
            source: FileSource::Memory(Arc::from(bytes)),
        }
    }

    pub async fn read_bytes(&self) -> Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| DocShelfError::FileRead(format!("{}: {}", self.name, e))),
            FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }

    /// UTF-8として読む（不正なバイト列は置換文字にする）
    pub async fn read_text(&self) -> Result<String> {
        let bytes = self.read_bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// ファイル名の拡張子から種別を判定
pub fn classify(name: &str) -> Result<DocumentKind> {
    DocumentKind::from_file_name(name)
        .ok_or_else(|| DocShelfError::UnsupportedFormat(name.to_string()))
}

/// 種別に応じた方法で1回だけ読み込む
pub async fn read_for_kind(file: &FileHandle, kind: DocumentKind) -> Result<Decoded> {
    info!("ファイル読み込み開始: {}", file.name);
    let decoded = match kind {
        DocumentKind::PlainText => Decoded::Text(file.read_text().await?),
        _ => Decoded::Bytes(file.read_bytes().await?),
    };
    info!("ファイル読み込み完了: {}", file.name);
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_supported() {
        assert_eq!(classify("a.TXT").unwrap(), DocumentKind::PlainText);
        assert_eq!(classify("b.xls").unwrap(), DocumentKind::SpreadsheetLegacy);
    }

    #[test]
    fn test_classify_unsupported() {
        let err = classify("a.csv").unwrap_err();
        assert!(matches!(err, DocShelfError::UnsupportedFormat(ref n) if n == "a.csv"));
        assert!(classify("noext").is_err());
    }

    #[tokio::test]
    async fn test_read_text_lossy() {
        let file = FileHandle::from_bytes("a.txt", vec![b'h', b'i', 0xff]);
        let decoded = read_for_kind(&file, DocumentKind::PlainText).await.unwrap();
        assert_eq!(decoded, Decoded::Text("hi\u{fffd}".to_string()));
    }

    #[tokio::test]
    async fn test_read_bytes_for_binary_kinds() {
        let file = FileHandle::from_bytes("a.pdf", b"%PDF-1.5".to_vec());
        assert_eq!(file.size, 8);
        let decoded = read_for_kind(&file, DocumentKind::Pdf).await.unwrap();
        assert_eq!(decoded, Decoded::Bytes(b"%PDF-1.5".to_vec()));
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let err = FileHandle::from_path(Path::new("/nonexistent/doc.txt")).await.unwrap_err();
        assert!(matches!(err, DocShelfError::FileRead(_)));
    }

    #[tokio::test]
    async fn test_from_path_reads_metadata() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("memo.txt");
        std::fs::write(&path, "hello").unwrap();

        let file = FileHandle::from_path(&path).await.unwrap();
        assert_eq!(file.name, "memo.txt");
        assert_eq!(file.size, 5);
        assert!(file.last_modified.is_some());
        assert_eq!(file.read_text().await.unwrap(), "hello");
    }
}
