//! 永続キー・バリューストレージ
//!
//! ブラウザのローカルストレージに相当する層。値は文字列で、
//! 1回の `set` で値全体を置き換える。

mod file;

pub use file::FileKvStore;

use crate::error::{DocShelfError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// 文書一覧のキー
pub const DOCUMENTS_KEY: &str = "documents";
/// テーマ設定のキー
pub const THEME_KEY: &str = "theme";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// キー名の検証（ファイル名としても安全な文字のみ）
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(DocShelfError::Storage(format!("不正なキー: {:?}", key)))
    }
}

/// 容量チェック（書き込み後の合計が上限を超えるなら拒否）
pub(crate) fn check_quota(others: usize, value: usize, quota: Option<usize>) -> Result<()> {
    match quota {
        Some(quota) if others + value > quota => Err(DocShelfError::StorageQuotaExceeded {
            needed: others + value,
            quota,
        }),
        _ => Ok(()),
    }
}

/// メモリ上のストレージ（テスト・組み込み用）
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| DocShelfError::Storage("ストレージのロックに失敗".into()))
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let mut entries = self.lock()?;
        let others: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum();
        check_quota(others, value.len(), self.quota)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.lock()?.remove(key);
        Ok(())
    }
}
