//! 表示面のHTML化（ブラウザ版と同じ要素IDを使う）

use super::{GridSurface, Surface, TextSurface, WordInfo};
use crate::pdf::{PageSlot, PdfSurface};
use std::fmt::Write;

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

impl Surface {
    pub fn to_html(&self) -> String {
        match self {
            Surface::Grid(grid) => grid_html(grid),
            Surface::Text(text) => text_html(text),
            Surface::Pdf(pdf) => pdf_html(pdf),
            Surface::Word(info) => word_html(info),
        }
    }
}

fn grid_html(grid: &GridSurface) -> String {
    let mut html = String::from(r#"<table id="excelSheet">"#);

    if !grid.header.is_empty() || !grid.rows.is_empty() {
        html.push_str("<thead><tr>");
        for cell in &grid.header {
            let _ = write!(html, "<th>{}</th>", escape_html(cell));
        }
        html.push_str("</tr></thead><tbody>");

        for (r, row) in grid.rows.iter().enumerate() {
            html.push_str("<tr>");
            for (c, cell) in row.iter().enumerate() {
                let _ = write!(
                    html,
                    r#"<td><input type="text" data-row="{}" data-col="{}" value="{}"></td>"#,
                    r,
                    c,
                    escape_html(&cell.value)
                );
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody>");
    }

    html.push_str("</table>");
    html
}

fn text_html(text: &TextSurface) -> String {
    format!(
        r#"<textarea id="txtEditor">{}</textarea>"#,
        escape_html(&text.text)
    )
}

fn pdf_html(pdf: &PdfSurface) -> String {
    let mut html = String::from(r#"<div id="pdfContainer">"#);
    for slot in &pdf.pages {
        match slot {
            PageSlot::Rendered(canvas) => {
                let _ = write!(
                    html,
                    r#"<div class="pdf-page"><canvas data-page="{}" width="{}" height="{}"></canvas></div>"#,
                    canvas.number, canvas.width, canvas.height
                );
            }
            PageSlot::Failed { page, .. } => {
                let _ = write!(
                    html,
                    r#"<div class="pdf-page-error">ページ {} の描画に失敗しました</div>"#,
                    page
                );
            }
        }
    }
    html.push_str("</div>");
    html
}

fn word_html(info: &WordInfo) -> String {
    let size = info
        .size
        .map(|s| format!("{:.2} KB", s as f64 / 1024.0))
        .unwrap_or_else(|| "不明".into());
    let modified = info.modified.as_deref().unwrap_or("不明");

    format!(
        r#"<div class="word-info"><p><strong>ファイル名:</strong> {}</p><p><strong>サイズ:</strong> {}</p><p><strong>更新日時:</strong> {}</p><p class="notice">{}</p></div>"#,
        escape_html(&info.name),
        size,
        escape_html(modified),
        escape_html(info.notice)
    )
}
