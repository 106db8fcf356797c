//! ダウンロード用データの生成
//!
//! 表計算は手元のモデルを再エンコードし、それ以外は保存済みの
//! ペイロードを元のバイト列に戻す。失敗した場合はアップロード時の
//! ファイルが残っていればそれを使う。

use crate::codec::{payload, spreadsheet};
use crate::error::{DocShelfError, Result};
use crate::session::Session;
use crate::store::DocumentStore;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Download {
    /// 指定ディレクトリに元のファイル名で書き出す
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        // パス区切りを含む名前でもディレクトリ外に出ないようにする
        let file_name = Path::new(&self.file_name)
            .file_name()
            .ok_or_else(|| DocShelfError::Download(format!("不正なファイル名: {}", self.file_name)))?;

        std::fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

pub async fn prepare_download(session: &Session, store: &DocumentStore) -> Result<Download> {
    let name = session.name().to_string();
    let mime_type = session.kind.mime_type();

    match primary_bytes(session, store) {
        Ok(bytes) => {
            info!("ダウンロード準備完了: {}", name);
            Ok(Download { file_name: name, mime_type, bytes })
        }
        Err(e) => {
            warn!("ダウンロード準備に失敗、元のファイルで再試行します: {}", e);
            let Some(handle) = session.file.handle() else {
                return Err(DocShelfError::Download(format!("{}: {}", name, e)));
            };
            let bytes = handle
                .read_bytes()
                .await
                .map_err(|e| DocShelfError::Download(format!("{}: {}", name, e)))?;
            Ok(Download { file_name: name, mime_type, bytes })
        }
    }
}

fn primary_bytes(session: &Session, store: &DocumentStore) -> Result<Vec<u8>> {
    if session.kind.is_spreadsheet() {
        if let Some(table) = &session.table {
            match spreadsheet::encode(table) {
                Ok(bytes) => return Ok(bytes),
                Err(e) => warn!("表計算の再エンコードに失敗: {}", e),
            }
        }
    }

    let record = store
        .find(session.name(), session.kind)
        .ok_or_else(|| DocShelfError::DocumentNotFound(session.name().to_string()))?;
    payload::decode(session.kind, &record.payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_to_strips_directories() {
        let dir = tempdir().expect("Failed to create temp dir");
        let download = Download {
            file_name: "../../evil.txt".into(),
            mime_type: "text/plain;charset=utf-8",
            bytes: b"x".to_vec(),
        };
        let path = download.save_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("evil.txt"));
        assert_eq!(std::fs::read(&path).unwrap(), b"x");
    }
}
