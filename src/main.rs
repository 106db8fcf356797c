use anyhow::{bail, Context, Result};
use clap::Parser;
use dialoguer::Confirm;
use docshelf::cli::{Cli, Commands};
use docshelf::config::Config;
use docshelf::pdf::{LopdfEngine, PageEvent, PageObserver, PageSlot};
use docshelf::render::Surface;
use docshelf::session::Session;
use docshelf::storage::{FileKvStore, KeyValueStore};
use docshelf::store::ThemeStore;
use docshelf::upload::FileHandle;
use docshelf::{logging, Controller, DocumentKind, SaveOutcome, ViewerSettings};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    logging::init_logging(cli.verbose, &config.log_level);

    match cli.command {
        Commands::Upload { file, html } => {
            println!("📄 docshelf - アップロード\n");

            let handle = FileHandle::from_path(&file).await?;
            let progress = page_progress(DocumentKind::from_file_name(&handle.name));
            let mut controller = with_progress(open_controller(&config)?, progress.as_ref());

            let session = controller.upload(handle).await?;
            finish_progress(progress);
            print_session(session);
            write_html(session, html.as_deref())?;

            println!("\n✅ 保管しました: {}", session.name());
        }

        Commands::List => {
            let controller = open_controller(&config)?;
            let list = controller.list_view();

            if list.is_empty() {
                println!("保管中の文書はありません");
            }
            for (i, item) in list.items.iter().enumerate() {
                println!(
                    "{:>3}. {} {}  [{}]  {}  ({})",
                    i + 1,
                    item.icon,
                    item.name,
                    item.label,
                    item.last_modified,
                    item.id
                );
            }
        }

        Commands::Open { document, html } => {
            let controller = open_controller(&config)?;
            let id = controller
                .resolve(&document)
                .with_context(|| format!("文書が見つかりません: {}", document))?;
            let kind = controller.store().get(&id).map(|r| r.kind);

            let progress = page_progress(kind);
            let mut controller = with_progress(controller, progress.as_ref());
            let session = controller.open(&id).await?;
            finish_progress(progress);

            print_session(session);
            write_html(session, html.as_deref())?;
        }

        Commands::Edit { document, cells, text_file } => {
            let mut controller = open_controller(&config)?;
            let id = controller
                .resolve(&document)
                .with_context(|| format!("文書が見つかりません: {}", document))?;
            controller.open(&id).await?;

            for edit in &cells {
                controller.edit_cell(edit.row, edit.col, edit.value.clone())?;
            }
            if let Some(path) = text_file {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("read {}", path.display()))?;
                controller.edit_text(text)?;
            }

            match controller.save()? {
                SaveOutcome::Saved(record) => {
                    println!("✔ 文書を保存しました: {} ({})", record.name, record.last_modified)
                }
                SaveOutcome::Unchanged => println!("✔ 文書を保存しました（変更なし）"),
                SaveOutcome::Unsupported(kind) => {
                    println!("⚠ {} 文書の保存機能は開発中です", kind.label())
                }
            }
        }

        Commands::Download { document, output } => {
            let mut controller = open_controller(&config)?;
            let id = controller
                .resolve(&document)
                .with_context(|| format!("文書が見つかりません: {}", document))?;
            controller.open(&id).await?;

            let download = controller.download().await?;
            let dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
            let path = download.save_to(&dir)?;
            println!("✔ ダウンロード: {} ({} bytes, {})", path.display(), download.bytes.len(), download.mime_type);
        }

        Commands::Delete { document, yes } => {
            let mut controller = open_controller(&config)?;
            let id = controller
                .resolve(&document)
                .with_context(|| format!("文書が見つかりません: {}", document))?;

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("{} を削除しますか？", document))
                    .default(false)
                    .interact()
                    .context("確認の入力に失敗")?;
                if !confirmed {
                    println!("キャンセルしました");
                    return Ok(());
                }
            }

            let removed = controller.delete(&id)?;
            println!("✔ 削除しました: {}", removed.name);
        }

        Commands::Theme { toggle } => {
            let themes = ThemeStore::new(open_storage(&config)?, config.prefer_dark);
            let theme = if toggle { themes.toggle() } else { themes.load() };
            println!("{} テーマ: {}", theme.toggle_icon(), theme);
        }

        Commands::Config { set_storage_dir, show } => {
            let mut config = config;

            if let Some(dir) = set_storage_dir {
                config.set_storage_dir(dir)?;
                println!("✔ 保存先を設定しました");
            }

            if show {
                println!("設定:");
                println!("  保存先: {}", config.resolve_storage_dir()?.display());
                println!("  容量上限: {} bytes", config.storage_quota_bytes);
                println!("  PDF拡大率: {}", config.pdf_scale);
                println!("  ダークテーマ優先: {}", if config.prefer_dark { "はい" } else { "いいえ" });
                println!("  ログレベル: {}", config.log_level);
            }
        }
    }

    Ok(())
}

fn open_storage(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    let dir = config.resolve_storage_dir()?;
    let store = FileKvStore::open(dir.clone(), Some(config.storage_quota_bytes))
        .with_context(|| format!("open storage {}", dir.display()))?;
    Ok(Arc::new(store))
}

fn open_controller(config: &Config) -> Result<Controller> {
    if config.pdf_scale <= 0.0 {
        bail!("pdf_scale は正の値を指定してください: {}", config.pdf_scale);
    }

    Ok(Controller::new(
        open_storage(config)?,
        Arc::new(LopdfEngine),
        ViewerSettings { pdf_scale: config.pdf_scale },
    ))
}

/// ページ描画の完了ごとにプログレスバーを進める
fn with_progress(controller: Controller, progress: Option<&ProgressBar>) -> Controller {
    let Some(bar) = progress else {
        return controller;
    };
    let bar = bar.clone();
    let observer: PageObserver = Arc::new(move |event: PageEvent| {
        bar.set_length(u64::from(event.total));
        bar.inc(1);
    });
    controller.with_page_observer(observer)
}

fn page_progress(kind: Option<DocumentKind>) -> Option<ProgressBar> {
    if kind != Some(DocumentKind::Pdf) {
        return None;
    }
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template("  ページ描画 [{bar:30}] {pos}/{len}") {
        bar.set_style(style);
    }
    Some(bar)
}

fn finish_progress(progress: Option<ProgressBar>) {
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }
}

fn write_html(session: &Session, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        std::fs::write(path, session.surface.to_html())
            .with_context(|| format!("write {}", path.display()))?;
        println!("✔ プレビューHTML: {}", path.display());
    }
    Ok(())
}

fn print_session(session: &Session) {
    println!("■ {}", session.name());

    match &session.surface {
        Surface::Grid(grid) => {
            println!("  シート: {}", grid.sheet_name);
            println!("      | {}", grid.header.join(" | "));
            for (i, row) in grid.rows.iter().enumerate() {
                let values: Vec<&str> = row.iter().map(|c| c.value.as_str()).collect();
                println!("  {:>3} | {}", i + 1, values.join(" | "));
            }
        }
        Surface::Text(text) => {
            println!("{}", text.text);
        }
        Surface::Pdf(pdf) => {
            println!("  全{}ページ", pdf.page_count());
            for slot in &pdf.pages {
                match slot {
                    PageSlot::Rendered(canvas) => {
                        let preview: String = canvas.text.chars().take(60).collect();
                        println!(
                            "  [{}] {}x{} {}",
                            canvas.number,
                            canvas.width,
                            canvas.height,
                            preview.replace('\n', " ")
                        );
                    }
                    PageSlot::Failed { page, message } => {
                        println!("  [{}] ❌ {}", page, message);
                    }
                }
            }
        }
        Surface::Word(info) => {
            println!("  ファイル名: {}", info.name);
            match info.size {
                Some(size) => println!("  サイズ: {:.2} KB", size as f64 / 1024.0),
                None => println!("  サイズ: 不明"),
            }
            println!("  更新日時: {}", info.modified.as_deref().unwrap_or("不明"));
            println!("  {}", info.notice);
        }
    }
}
