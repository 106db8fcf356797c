use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docshelf")]
#[command(about = "オフィス文書の保管・プレビュー・再編集ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ファイルをアップロードして開き、保管する
    Upload {
        /// 対象ファイル (.docx/.xlsx/.xls/.pdf/.txt)
        #[arg(required = true)]
        file: PathBuf,

        /// プレビューHTMLの出力先
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// 保管中の文書一覧（新しい順）
    List,

    /// 保管中の文書を開いてプレビュー
    Open {
        /// ファイル名またはID
        #[arg(required = true)]
        document: String,

        /// プレビューHTMLの出力先
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// 保管中の文書を編集して保存
    Edit {
        /// ファイル名またはID
        #[arg(required = true)]
        document: String,

        /// セルの書き換え ROW:COL=VALUE（1始まり、見出し行を除く）
        #[arg(long = "cell")]
        cells: Vec<CellEdit>,

        /// テキスト文書の新しい内容
        #[arg(long)]
        text_file: Option<PathBuf>,
    },

    /// 保管中の文書を元のファイル名で書き出す
    Download {
        /// ファイル名またはID
        #[arg(required = true)]
        document: String,

        /// 出力ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 保管中の文書を削除
    Delete {
        /// ファイル名またはID
        #[arg(required = true)]
        document: String,

        /// 確認せずに削除
        #[arg(short, long)]
        yes: bool,
    },

    /// 表示テーマを表示/切り替え
    Theme {
        /// ダーク/ライトを切り替える
        #[arg(long)]
        toggle: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 保存先ディレクトリを設定
        #[arg(long)]
        set_storage_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// セル編集の指定（内部では0始まり）
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellEdit {
    pub row: usize,
    pub col: usize,
    pub value: String,
}

impl std::str::FromStr for CellEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let usage = || format!("Invalid cell edit: {}. Use ROW:COL=VALUE (1-based)", s);

        let (position, value) = s.split_once('=').ok_or_else(usage)?;
        let (row, col) = position.split_once(':').ok_or_else(usage)?;
        let row: usize = row.trim().parse().map_err(|_| usage())?;
        let col: usize = col.trim().parse().map_err(|_| usage())?;
        if row == 0 || col == 0 {
            return Err(usage());
        }

        Ok(CellEdit {
            row: row - 1,
            col: col - 1,
            value: value.to_string(),
        })
    }
}
