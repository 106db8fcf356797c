//! 文書ストア
//!
//! 起動時に一度だけストレージから読み込み、以降はメモリ上の一覧を正とする。
//! 変更のたびに一覧全体をシリアライズして1回で書き戻す。
//! 読み書きの失敗はログに残して縮退し、呼び出し元には伝播しない。

mod theme;

pub use theme::ThemeStore;

use crate::storage::{KeyValueStore, DOCUMENTS_KEY};
use chrono::NaiveDateTime;
use docshelf_common::{DocumentKind, DocumentRecord, RecordId};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// 更新日時の表示形式
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// 並べ替え時に受け付ける日時形式
const TIMESTAMP_PARSE_FORMATS: &[&str] = &[
    TIMESTAMP_FORMAT,
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y, %I:%M:%S %p",
];

/// 現在時刻を表示用の文字列で返す
pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// 表示用の日時文字列を解釈する（失敗時は None）
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_PARSE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// 新しい順の比較。解釈できない日時は最も古いものとして扱う
fn newest_first(a: &DocumentRecord, b: &DocumentRecord) -> Ordering {
    match (parse_timestamp(&a.last_modified), parse_timestamp(&b.last_modified)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub struct DocumentStore {
    kv: Arc<dyn KeyValueStore>,
    records: Vec<DocumentRecord>,
}

impl DocumentStore {
    /// ストレージから一覧を読み込む
    ///
    /// 未保存・破損時は空の一覧で開始する。
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            kv,
            records: Vec::new(),
        };

        let raw = match store.kv.get(DOCUMENTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return store,
            Err(e) => {
                error!("文書一覧の読み込みに失敗: {}", e);
                return store;
            }
        };

        let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                error!("文書一覧の解析に失敗、空の一覧で開始します: {}", e);
                return store;
            }
        };

        let missing_ids = values.iter().any(|v| v.get("id").is_none());
        let records: Vec<DocumentRecord> = match values
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
        {
            Ok(records) => records,
            Err(e) => {
                error!("文書レコードの解析に失敗、空の一覧で開始します: {}", e);
                return store;
            }
        };

        // 同名レコードが重複していた場合は後勝ちで1件にまとめる
        for record in records {
            store.replace_or_push(record);
        }
        debug!("文書一覧を読み込みました: {}件", store.records.len());

        if missing_ids {
            store.flush();
        }
        store
    }

    pub fn list(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&DocumentRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn index_of(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&DocumentRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn find(&self, name: &str, kind: DocumentKind) -> Option<&DocumentRecord> {
        self.records.iter().find(|r| r.name == name && r.kind == kind)
    }

    /// 更新日時の新しい順に並べたコピー（保存順は変えない）
    pub fn sorted_by_last_modified(&self) -> Vec<&DocumentRecord> {
        let mut sorted: Vec<&DocumentRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| newest_first(a, b));
        sorted
    }

    /// 同名があれば同じ位置で置き換え、無ければ末尾に追加して保存
    ///
    /// 置き換え時は既存レコードのIDを引き継ぐ。格納位置を返す。
    pub fn upsert(&mut self, record: DocumentRecord) -> usize {
        let index = self.replace_or_push(record);
        self.flush();
        index
    }

    /// 保存順の位置で削除
    pub fn remove(&mut self, index: usize) -> Option<DocumentRecord> {
        if index >= self.records.len() {
            warn!("削除対象の位置が範囲外: {}", index);
            return None;
        }
        let removed = self.records.remove(index);
        self.flush();
        Some(removed)
    }

    pub fn remove_by_id(&mut self, id: &RecordId) -> Option<DocumentRecord> {
        let index = self.index_of(id)?;
        self.remove(index)
    }

    /// 一覧全体をストレージへ書き戻す。失敗はログのみ
    pub fn flush(&self) {
        let json = match serde_json::to_string(&self.records) {
            Ok(json) => json,
            Err(e) => {
                error!("文書一覧のシリアライズに失敗: {}", e);
                return;
            }
        };

        if let Err(e) = self.kv.set(DOCUMENTS_KEY, &json) {
            error!("文書一覧の保存に失敗: {}", e);
        }
    }

    fn replace_or_push(&mut self, mut record: DocumentRecord) -> usize {
        match self.records.iter().position(|r| r.name == record.name) {
            Some(index) => {
                record.id = self.records[index].id.clone();
                self.records[index] = record;
                index
            }
            None => {
                self.records.push(record);
                self.records.len() - 1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKvStore;

    fn record(name: &str, last_modified: &str) -> DocumentRecord {
        DocumentRecord::new(name, DocumentKind::PlainText, "x", last_modified)
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2026/10/19 08:30:00").is_some());
        assert!(parse_timestamp("2026/1/2 3:04:05").is_some());
        assert!(parse_timestamp("2026-10-19 08:30:00").is_some());
        assert!(parse_timestamp("10/19/2026, 8:30:00 AM").is_some());
        assert!(parse_timestamp("不明").is_none());
    }

    #[test]
    fn test_now_timestamp_is_parseable() {
        assert!(parse_timestamp(&now_timestamp()).is_some());
    }

    #[test]
    fn test_upsert_replaces_in_place_and_keeps_id() {
        let mut store = DocumentStore::load(Arc::new(MemoryKvStore::new()));
        store.upsert(record("a.txt", "2026/01/01 00:00:00"));
        store.upsert(record("b.txt", "2026/01/02 00:00:00"));
        let original_id = store.list()[0].id.clone();

        let index = store.upsert(record("a.txt", "2026/01/03 00:00:00"));
        assert_eq!(index, 0);
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].id, original_id);
        assert_eq!(store.list()[0].last_modified, "2026/01/03 00:00:00");
    }

    #[test]
    fn test_sorted_copy_does_not_reorder_storage() {
        let mut store = DocumentStore::load(Arc::new(MemoryKvStore::new()));
        store.upsert(record("old.txt", "2026/01/01 00:00:00"));
        store.upsert(record("broken.txt", "???"));
        store.upsert(record("new.txt", "2026/03/01 00:00:00"));

        let names: Vec<&str> = store
            .sorted_by_last_modified()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["new.txt", "old.txt", "broken.txt"]);
        assert_eq!(store.list()[0].name, "old.txt");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = DocumentStore::load(Arc::new(MemoryKvStore::new()));
        assert!(store.remove(0).is_none());
    }

    #[test]
    fn test_duplicate_names_collapse_on_load() {
        let kv = Arc::new(MemoryKvStore::new());
        kv.set(
            DOCUMENTS_KEY,
            r#"[{"name":"a.txt","type":"txt","data":"1","lastModified":""},
                {"name":"b.txt","type":"txt","data":"2","lastModified":""},
                {"name":"a.txt","type":"txt","data":"3","lastModified":""}]"#,
        )
        .unwrap();

        let store = DocumentStore::load(kv);
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].payload, "3");
    }

    /// 読み込みが常に失敗するストレージ
    struct UnreadableKv;

    impl KeyValueStore for UnreadableKv {
        fn get(&self, _key: &str) -> crate::error::Result<Option<String>> {
            Err(crate::error::DocShelfError::Storage("読み込み不可".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> crate::error::Result<()> {
            Ok(())
        }

        fn remove(&self, _key: &str) -> crate::error::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_read_failure_starts_empty() {
        let mut store = DocumentStore::load(Arc::new(UnreadableKv));
        assert!(store.is_empty());

        // 以降の操作はメモリ上で続行できる
        store.upsert(record("a.txt", "2026/01/01 00:00:00"));
        assert_eq!(store.len(), 1);
    }
}
