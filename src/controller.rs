//! セッションコントローラ
//!
//! アップロード → 判定 → 読み込み → 表示 → 保存 の流れをまとめる。
//! 失敗時はセッションも文書ストアも変更しない。

use crate::codec::{payload, spreadsheet};
use crate::error::{DocShelfError, Result};
use crate::export::{self, Download};
use crate::pdf::{PageObserver, PdfEngine};
use crate::render::{self, Content, FileMeta, GridSurface, RenderContext, Surface};
use crate::session::{ActiveFile, Session};
use crate::storage::KeyValueStore;
use crate::store::{now_timestamp, DocumentStore};
use crate::upload::{self, Decoded, FileHandle};
use docshelf_common::{DocumentKind, DocumentRecord, RecordId};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy)]
pub struct ViewerSettings {
    pub pdf_scale: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self { pdf_scale: 1.5 }
    }
}

/// 画面の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// アップロード欄と文書一覧
    List,
    /// 文書表示（タイトルはファイル名）
    Document { title: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(DocumentRecord),
    /// PDFは編集しないので保存済み扱い
    Unchanged,
    /// Word文書の保存は未実装
    Unsupported(DocumentKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Open(RecordId),
    Delete(RecordId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: RecordId,
    pub name: String,
    pub label: String,
    pub icon: &'static str,
    pub last_modified: String,
}

/// 更新日時の新しい順に並んだ一覧
#[derive(Debug, Clone, Default)]
pub struct ListView {
    pub items: Vec<ListItem>,
}

impl ListView {
    pub fn open_action(&self, index: usize) -> Option<ListAction> {
        self.items.get(index).map(|item| ListAction::Open(item.id.clone()))
    }

    pub fn delete_action(&self, index: usize) -> Option<ListAction> {
        self.items.get(index).map(|item| ListAction::Delete(item.id.clone()))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub struct Controller {
    store: DocumentStore,
    engine: Arc<dyn PdfEngine>,
    settings: ViewerSettings,
    observer: Option<PageObserver>,
    session: Option<Session>,
}

impl Controller {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        engine: Arc<dyn PdfEngine>,
        settings: ViewerSettings,
    ) -> Self {
        Self {
            store: DocumentStore::load(kv),
            engine,
            settings,
            observer: None,
            session: None,
        }
    }

    pub fn with_page_observer(mut self, observer: PageObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn view(&self) -> View {
        match &self.session {
            Some(session) => View::Document {
                title: session.name().to_string(),
            },
            None => View::List,
        }
    }

    pub fn list_view(&self) -> ListView {
        ListView {
            items: self
                .store
                .sorted_by_last_modified()
                .into_iter()
                .map(|record| ListItem {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    label: record.kind.label(),
                    icon: record.kind.icon(),
                    last_modified: record.last_modified.clone(),
                })
                .collect(),
        }
    }

    /// IDまたはファイル名でレコードを探す
    pub fn resolve(&self, key: &str) -> Option<RecordId> {
        let id = RecordId::from(key);
        self.store
            .get(&id)
            .or_else(|| self.store.find_by_name(key))
            .map(|record| record.id.clone())
    }

    fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            engine: self.engine.as_ref(),
            pdf_scale: self.settings.pdf_scale,
            observer: self.observer.clone(),
        }
    }

    /// ファイルをアップロードして開き、文書ストアに登録する
    pub async fn upload(&mut self, file: FileHandle) -> Result<&Session> {
        let kind = upload::classify(&file.name)?;
        let decoded = upload::read_for_kind(&file, kind).await?;

        let (content, stored_payload) = match decoded {
            Decoded::Text(text) => {
                let stored = text.clone();
                (Content::Text(text), stored)
            }
            Decoded::Bytes(bytes) => {
                let stored = payload::encode(kind, &bytes);
                (Content::Bytes(bytes), stored)
            }
        };

        let meta = FileMeta {
            size: Some(file.size),
            modified: file.last_modified.clone(),
        };
        let rendered = render::render(kind, &file.name, content, meta, &self.render_context()).await?;

        self.store.upsert(DocumentRecord::new(
            file.name.clone(),
            kind,
            stored_payload,
            now_timestamp(),
        ));
        info!("文書を開きました: {}", file.name);

        let session = Session {
            file: ActiveFile::Uploaded(file),
            kind,
            surface: rendered.surface,
            table: rendered.table,
        };
        Ok(&*self.session.insert(session))
    }

    /// 保存済みの文書を開く（ストアは変更しない）
    pub async fn open(&mut self, id: &RecordId) -> Result<&Session> {
        let record = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| DocShelfError::DocumentNotFound(id.to_string()))?;

        let (content, size) = match record.kind {
            DocumentKind::PlainText => {
                let size = record.payload.len() as u64;
                (Content::Text(record.payload.clone()), Some(size))
            }
            DocumentKind::WordProcessor => match payload::decode(record.kind, &record.payload) {
                Ok(bytes) => {
                    let size = bytes.len() as u64;
                    (Content::Bytes(bytes), Some(size))
                }
                Err(e) => {
                    // 内容は表示しないのでメタ情報だけで開く
                    warn!("Word文書のデータを復元できません: {}", e);
                    (Content::Bytes(Vec::new()), None)
                }
            },
            kind => {
                let bytes = payload::decode(kind, &record.payload)
                    .map_err(|e| DocShelfError::Render(format!("{}: {}", record.name, e)))?;
                let size = bytes.len() as u64;
                (Content::Bytes(bytes), Some(size))
            }
        };

        let meta = FileMeta {
            size,
            modified: Some(record.last_modified.clone()),
        };
        let rendered =
            render::render(record.kind, &record.name, content, meta, &self.render_context()).await?;

        let session = Session {
            file: ActiveFile::Stored {
                id: record.id.clone(),
                name: record.name.clone(),
                last_modified: record.last_modified.clone(),
            },
            kind: record.kind,
            surface: rendered.surface,
            table: rendered.table,
        };
        Ok(&*self.session.insert(session))
    }

    /// 表計算の本文セルを書き換える（保存するまでストアは変わらない）
    pub fn edit_cell(&mut self, row: usize, col: usize, value: impl Into<String>) -> Result<()> {
        let session = self.session.as_mut().ok_or(DocShelfError::NoActiveDocument)?;
        match &mut session.surface {
            Surface::Grid(grid) => grid.set_cell(row, col, value),
            _ => Err(DocShelfError::NotEditable(session.kind)),
        }
    }

    /// テキストの編集欄を書き換える
    pub fn edit_text(&mut self, text: impl Into<String>) -> Result<()> {
        let session = self.session.as_mut().ok_or(DocShelfError::NoActiveDocument)?;
        match &mut session.surface {
            Surface::Text(surface) => {
                surface.text = text.into();
                Ok(())
            }
            _ => Err(DocShelfError::NotEditable(session.kind)),
        }
    }

    /// 表示中の編集内容を文書ストアに保存する
    pub fn save(&mut self) -> Result<SaveOutcome> {
        let session = self.session.as_mut().ok_or(DocShelfError::NoActiveDocument)?;
        let name = session.name().to_string();

        let kind = session.kind;
        let missing = || DocShelfError::Save(format!("{}: 表示内容が見つかりません ({})", name, kind));

        let stored_payload = match kind {
            DocumentKind::WordProcessor => return Ok(SaveOutcome::Unsupported(kind)),
            DocumentKind::Pdf => return Ok(SaveOutcome::Unchanged),
            DocumentKind::PlainText => match &session.surface {
                Surface::Text(surface) => surface.text.clone(),
                _ => return Err(missing()),
            },
            DocumentKind::SpreadsheetModern | DocumentKind::SpreadsheetLegacy => {
                let table = match &session.surface {
                    Surface::Grid(grid) => grid.scrape(),
                    _ => return Err(missing()),
                };
                let bytes = spreadsheet::encode(&table)
                    .map_err(|e| DocShelfError::Save(format!("{}: {}", name, e)))?;
                session.surface = Surface::Grid(GridSurface::from_table(&table));
                session.table = Some(table);
                payload::encode(kind, &bytes)
            }
        };

        let record = DocumentRecord::new(name, kind, stored_payload, now_timestamp());
        let index = self.store.upsert(record);
        let saved = self.store.list()[index].clone();
        info!("文書を保存しました: {}", saved.name);
        Ok(SaveOutcome::Saved(saved))
    }

    pub async fn download(&self) -> Result<Download> {
        let session = self.session.as_ref().ok_or(DocShelfError::NoActiveDocument)?;
        export::prepare_download(session, &self.store).await
    }

    /// 一覧に戻る（セッションは破棄）
    pub fn back(&mut self) {
        self.session = None;
    }

    pub fn delete(&mut self, id: &RecordId) -> Result<DocumentRecord> {
        let removed = self
            .store
            .remove_by_id(id)
            .ok_or_else(|| DocShelfError::DocumentNotFound(id.to_string()))?;
        info!("文書を削除しました: {}", removed.name);
        Ok(removed)
    }

    /// 一覧の表示位置で削除する
    pub fn delete_at_display(&mut self, index: usize) -> Result<DocumentRecord> {
        match self.list_view().delete_action(index) {
            Some(ListAction::Delete(id)) => self.delete(&id),
            _ => Err(DocShelfError::DocumentNotFound(format!("#{}", index))),
        }
    }

    pub async fn dispatch(&mut self, action: ListAction) -> Result<()> {
        match action {
            ListAction::Open(id) => self.open(&id).await.map(|_| ()),
            ListAction::Delete(id) => self.delete(&id).map(|_| ()),
        }
    }
}
