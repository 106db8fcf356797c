//! テーマ設定の保存

use crate::storage::{KeyValueStore, THEME_KEY};
use docshelf_common::Theme;
use std::sync::Arc;
use tracing::{error, warn};

pub struct ThemeStore {
    kv: Arc<dyn KeyValueStore>,
    prefer_dark: bool,
}

impl ThemeStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, prefer_dark: bool) -> Self {
        Self { kv, prefer_dark }
    }

    /// 保存済みのテーマ。未保存なら設定の既定値
    pub fn load(&self) -> Theme {
        match self.kv.get(THEME_KEY) {
            Ok(Some(value)) => match value.parse() {
                Ok(theme) => return theme,
                Err(e) => warn!("保存されたテーマが不正です: {}", e),
            },
            Ok(None) => {}
            Err(e) => error!("テーマの読み込みに失敗: {}", e),
        }

        if self.prefer_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// テーマを切り替えて保存する
    pub fn toggle(&self) -> Theme {
        let next = self.load().toggled();
        if let Err(e) = self.kv.set(THEME_KEY, next.as_str()) {
            error!("テーマの保存に失敗: {}", e);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKvStore;

    #[test]
    fn test_default_follows_preference() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());
        assert_eq!(ThemeStore::new(kv.clone(), false).load(), Theme::Light);
        assert_eq!(ThemeStore::new(kv, true).load(), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());
        let themes = ThemeStore::new(kv.clone(), false);
        assert_eq!(themes.toggle(), Theme::Dark);
        assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(themes.toggle(), Theme::Light);
        assert_eq!(themes.load(), Theme::Light);
    }

    #[test]
    fn test_invalid_stored_value_falls_back() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());
        kv.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(ThemeStore::new(kv, true).load(), Theme::Dark);
    }

    #[test]
    fn test_toggle_survives_write_failure() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::with_quota(0));
        let themes = ThemeStore::new(kv, false);
        assert_eq!(themes.toggle(), Theme::Dark);
    }
}
