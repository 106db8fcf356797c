//! 統合テスト用のフィクスチャ

#![allow(dead_code)]

use docshelf::codec::spreadsheet;
use docshelf::error::{DocShelfError, Result};
use docshelf::pdf::{LopdfEngine, PageCanvas, PdfEngine, PdfPages};
use docshelf::storage::{KeyValueStore, MemoryKvStore};
use docshelf::{Controller, Table, ViewerSettings};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::sync::Arc;

/// 指定ページが常に失敗するPDFエンジン
pub struct FlakyEngine {
    pub pages: u32,
    pub failing_page: u32,
}

struct FlakyPages {
    pages: u32,
    failing_page: u32,
}

impl PdfEngine for FlakyEngine {
    fn open(&self, _bytes: Vec<u8>) -> Result<Arc<dyn PdfPages>> {
        Ok(Arc::new(FlakyPages {
            pages: self.pages,
            failing_page: self.failing_page,
        }))
    }
}

impl PdfPages for FlakyPages {
    fn page_count(&self) -> u32 {
        self.pages
    }

    fn render_page(&self, number: u32, scale: f32) -> Result<PageCanvas> {
        if number == self.failing_page {
            return Err(DocShelfError::PdfPage {
                page: number,
                message: "壊れたページ".to_string(),
            });
        }
        Ok(PageCanvas {
            number,
            width: (100.0 * scale) as u32,
            height: (140.0 * scale) as u32,
            text: format!("page {}", number),
        })
    }
}

pub fn memory_kv() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryKvStore::new())
}

pub fn controller(kv: Arc<dyn KeyValueStore>) -> Controller {
    Controller::new(kv, Arc::new(LopdfEngine), ViewerSettings::default())
}

pub fn controller_with_engine(kv: Arc<dyn KeyValueStore>, engine: Arc<dyn PdfEngine>) -> Controller {
    Controller::new(kv, engine, ViewerSettings::default())
}

/// 見出し行 + 本文のXLSXを作る
pub fn xlsx_bytes(rows: &[&[&str]]) -> Vec<u8> {
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();
    spreadsheet::encode(&Table::new("Sheet1", rows)).expect("encode xlsx")
}

/// 各ページに「Page N」と書かれたPDFを作る
pub fn pdf_bytes(pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for number in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("Page {}", number))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().expect("encode content")));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    // MediaBox は親の Pages ノードから継承させる
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => i64::from(pages),
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}
