//! lopdf による PDF 読み込み

use super::{PageCanvas, PdfEngine, PdfPages};
use crate::error::{DocShelfError, Result};
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// MediaBox が見つからない場合の既定サイズ（A4, pt）
const DEFAULT_PAGE_SIZE: (f32, f32) = (595.0, 842.0);

/// Parent をたどる上限
const MAX_INHERIT_DEPTH: usize = 32;

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfEngine;

impl PdfEngine for LopdfEngine {
    fn open(&self, bytes: Vec<u8>) -> Result<Arc<dyn PdfPages>> {
        let document = Document::load_mem(&bytes).map_err(|e| DocShelfError::Pdf(e.to_string()))?;
        let pages = document.get_pages();
        Ok(Arc::new(LopdfPages { document, pages }))
    }
}

struct LopdfPages {
    document: Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl LopdfPages {
    /// ページ（または祖先の Pages ノード）の MediaBox を取得
    fn media_box(&self, page_id: ObjectId) -> Result<(f32, f32)> {
        let mut current = Some(page_id);

        for _ in 0..MAX_INHERIT_DEPTH {
            let Some(id) = current else { break };
            let dict = self
                .document
                .get_dictionary(id)
                .map_err(|e| DocShelfError::Pdf(e.to_string()))?;

            if let Ok(value) = dict.get(b"MediaBox") {
                return self.parse_box(value);
            }
            current = dict.get(b"Parent").and_then(Object::as_reference).ok();
        }

        Ok(DEFAULT_PAGE_SIZE)
    }

    fn parse_box(&self, value: &Object) -> Result<(f32, f32)> {
        let value = match value {
            Object::Reference(id) => self
                .document
                .get_object(*id)
                .map_err(|e| DocShelfError::Pdf(e.to_string()))?,
            other => other,
        };

        let numbers: Vec<f32> = value
            .as_array()
            .map_err(|e| DocShelfError::Pdf(format!("MediaBox: {}", e)))?
            .iter()
            .filter_map(number)
            .collect();

        match numbers.as_slice() {
            [x0, y0, x1, y1] => Ok(((x1 - x0).abs(), (y1 - y0).abs())),
            _ => Err(DocShelfError::Pdf("MediaBox の形式が不正です".into())),
        }
    }
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

impl PdfPages for LopdfPages {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn render_page(&self, number: u32, scale: f32) -> Result<PageCanvas> {
        let page_id = *self.pages.get(&number).ok_or_else(|| DocShelfError::PdfPage {
            page: number,
            message: "ページが存在しません".into(),
        })?;

        let (width, height) = self.media_box(page_id).map_err(|e| DocShelfError::PdfPage {
            page: number,
            message: e.to_string(),
        })?;

        // テキスト抽出はフォント次第で失敗するため、失敗しても描画は続ける
        let text = match self.document.extract_text(&[number]) {
            Ok(text) => text,
            Err(e) => {
                debug!("ページ {} のテキスト抽出に失敗: {}", number, e);
                String::new()
            }
        };

        Ok(PageCanvas {
            number,
            width: (width * scale).round() as u32,
            height: (height * scale).round() as u32,
            text,
        })
    }
}
