//! PDFのページ描画
//!
//! 全ページの描画要求を最初にまとめて発行し、それぞれ独立に完了させる。
//! 完了順は要求順と一致しない。1ページの失敗はそのページの
//! エラー表示になるだけで、残りのページの描画は続行する。

mod lopdf_engine;

pub use lopdf_engine::LopdfEngine;

use crate::error::{DocShelfError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// PDFのバイト列を開くエンジン
pub trait PdfEngine: Send + Sync {
    fn open(&self, bytes: Vec<u8>) -> Result<Arc<dyn PdfPages>>;
}

/// 開いたPDF文書（ページ番号は1始まり）
pub trait PdfPages: Send + Sync {
    fn page_count(&self) -> u32;

    fn render_page(&self, number: u32, scale: f32) -> Result<PageCanvas>;
}

/// 描画済みページ
#[derive(Debug, Clone, PartialEq)]
pub struct PageCanvas {
    pub number: u32,
    /// 拡大率適用後のピクセル幅
    pub width: u32,
    pub height: u32,
    /// ページから抽出したテキスト
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageSlot {
    Rendered(PageCanvas),
    Failed { page: u32, message: String },
}

impl PageSlot {
    pub fn page(&self) -> u32 {
        match self {
            PageSlot::Rendered(canvas) => canvas.number,
            PageSlot::Failed { page, .. } => *page,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, PageSlot::Rendered(_))
    }
}

/// ページ単位の進捗通知
#[derive(Debug, Clone, Copy)]
pub struct PageEvent {
    pub page: u32,
    pub total: u32,
    pub ok: bool,
}

pub type PageObserver = Arc<dyn Fn(PageEvent) + Send + Sync>;

/// PDFの表示面（ページ順に並んだ描画結果）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PdfSurface {
    pub pages: Vec<PageSlot>,
    /// 実際に描画が完了した順のページ番号
    pub completion_order: Vec<u32>,
}

impl PdfSurface {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn failed_pages(&self) -> Vec<u32> {
        self.pages
            .iter()
            .filter(|slot| !slot.is_rendered())
            .map(PageSlot::page)
            .collect()
    }
}

/// 全ページを並行に描画する
pub async fn render_pages(
    document: Arc<dyn PdfPages>,
    scale: f32,
    observer: Option<PageObserver>,
) -> PdfSurface {
    let total = document.page_count();
    debug!("PDF読み込み成功: 全{}ページ", total);

    let mut tasks = JoinSet::new();
    for number in 1..=total {
        let document = Arc::clone(&document);
        tasks.spawn_blocking(move || (number, document.render_page(number, scale)));
    }

    let mut slots: BTreeMap<u32, PageSlot> = BTreeMap::new();
    let mut completion_order = Vec::with_capacity(total as usize);

    while let Some(joined) = tasks.join_next().await {
        let (number, result) = match joined {
            Ok(done) => done,
            Err(e) => {
                warn!("ページ描画タスクが異常終了: {}", e);
                continue;
            }
        };

        let slot = match result {
            Ok(canvas) => {
                debug!("PDFページ {} 描画成功", number);
                PageSlot::Rendered(canvas)
            }
            Err(e) => {
                warn!("PDFページ {} 描画失敗: {}", number, e);
                PageSlot::Failed {
                    page: number,
                    message: e.to_string(),
                }
            }
        };

        if let Some(observer) = &observer {
            observer(PageEvent {
                page: number,
                total,
                ok: slot.is_rendered(),
            });
        }
        completion_order.push(number);
        slots.insert(number, slot);
    }

    // パニック等で結果が返らなかったページ
    for number in 1..=total {
        slots.entry(number).or_insert_with(|| PageSlot::Failed {
            page: number,
            message: DocShelfError::PdfPage {
                page: number,
                message: "描画タスクが完了しませんでした".into(),
            }
            .to_string(),
        });
    }

    PdfSurface {
        pages: slots.into_values().collect(),
        completion_order,
    }
}
