//! ディレクトリ上のストレージ（1キー = 1ファイル）

use super::{check_quota, validate_key, KeyValueStore};
use crate::error::{DocShelfError, Result};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileKvStore {
    /// ディレクトリが無ければ作成する
    pub fn open(dir: impl Into<PathBuf>, quota: Option<usize>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, quota })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// 指定キー以外の保存済みバイト数
    fn used_bytes_except(&self, key: &str) -> Result<usize> {
        let mut total = 0usize;
        for entry in std::fs::read_dir(&self.dir)?.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name == key || validate_key(&name).is_err() {
                continue;
            }
            if let Ok(meta) = entry.metadata() {
                if meta.is_file() {
                    total += meta.len() as usize;
                }
            }
        }
        Ok(total)
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        check_quota(self.used_bytes_except(key)?, value.len(), self.quota)?;

        // 一時ファイルに書いてから置き換える
        let mut temp = tempfile::Builder::new()
            .prefix(".kv-")
            .tempfile_in(&self.dir)?;
        temp.write_all(value.as_bytes())?;
        temp.flush()?;
        temp.persist(self.key_path(key))
            .map_err(|e| DocShelfError::Storage(format!("書き込みに失敗: {}", e.error)))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
