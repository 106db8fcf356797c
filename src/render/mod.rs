//! 種別ごとの表示面の生成

mod grid;
mod html;

pub use grid::{CellInput, GridSurface};
pub use html::escape_html;

use crate::codec::spreadsheet;
use crate::error::{DocShelfError, Result};
use crate::pdf::{self, PageObserver, PdfEngine, PdfSurface};
use docshelf_common::{DocumentKind, Table};
use tracing::debug;

/// Word文書の表示内容は未実装であることを示す案内文
pub const WORD_NOTICE: &str =
    "Word文書の内容表示は未対応です。元のファイルをダウンロードして確認してください。";

/// 編集可能なテキスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSurface {
    pub text: String,
}

/// Word文書のメタ情報表示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordInfo {
    pub name: String,
    pub size: Option<u64>,
    pub modified: Option<String>,
    pub notice: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Grid(GridSurface),
    Text(TextSurface),
    Pdf(PdfSurface),
    Word(WordInfo),
}

impl Surface {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Surface::Grid(_) => "grid",
            Surface::Text(_) => "text",
            Surface::Pdf(_) => "pdf",
            Surface::Word(_) => "word",
        }
    }
}

/// 表示に必要な設定
#[derive(Clone)]
pub struct RenderContext<'a> {
    pub engine: &'a dyn PdfEngine,
    pub pdf_scale: f32,
    pub observer: Option<PageObserver>,
}

/// 読み込んだ内容
pub enum Content {
    Bytes(Vec<u8>),
    Text(String),
}

/// ファイルのメタ情報（Word文書の表示に使う）
#[derive(Debug, Clone, Default)]
pub struct FileMeta {
    pub size: Option<u64>,
    pub modified: Option<String>,
}

/// 表示面と、表計算の場合はそのモデル
pub struct Rendered {
    pub surface: Surface,
    pub table: Option<Table>,
}

/// 種別に応じて表示面を作る
pub async fn render(
    kind: DocumentKind,
    name: &str,
    content: Content,
    meta: FileMeta,
    ctx: &RenderContext<'_>,
) -> Result<Rendered> {
    debug!("表示開始: {} ({})", name, kind);

    match (kind, content) {
        (DocumentKind::PlainText, Content::Text(text)) => Ok(Rendered {
            surface: Surface::Text(TextSurface { text }),
            table: None,
        }),
        (DocumentKind::PlainText, Content::Bytes(bytes)) => Ok(Rendered {
            surface: Surface::Text(TextSurface {
                text: String::from_utf8_lossy(&bytes).into_owned(),
            }),
            table: None,
        }),
        (DocumentKind::SpreadsheetModern | DocumentKind::SpreadsheetLegacy, Content::Bytes(bytes)) => {
            let table = spreadsheet::decode(&bytes)
                .map_err(|e| DocShelfError::Render(format!("{}: {}", name, e)))?;
            Ok(Rendered {
                surface: Surface::Grid(GridSurface::from_table(&table)),
                table: Some(table),
            })
        }
        (DocumentKind::Pdf, Content::Bytes(bytes)) => {
            let document = ctx
                .engine
                .open(bytes)
                .map_err(|e| DocShelfError::Render(format!("{}: {}", name, e)))?;
            let surface = pdf::render_pages(document, ctx.pdf_scale, ctx.observer.clone()).await;
            Ok(Rendered {
                surface: Surface::Pdf(surface),
                table: None,
            })
        }
        (DocumentKind::WordProcessor, _) => {
            Ok(Rendered {
                surface: Surface::Word(WordInfo {
                    name: name.to_string(),
                    size: meta.size,
                    modified: meta.modified,
                    notice: WORD_NOTICE,
                }),
                table: None,
            })
        }
        (kind, Content::Text(_)) => Err(DocShelfError::Render(format!(
            "{} はテキストとして表示できません ({})",
            name, kind
        ))),
    }
}
