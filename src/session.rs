//! 現在開いている文書の状態（永続化しない）

use crate::render::Surface;
use crate::upload::FileHandle;
use docshelf_common::{DocumentKind, RecordId, Table};

/// 開いているファイルの出どころ
#[derive(Debug, Clone)]
pub enum ActiveFile {
    /// 今回アップロードされたファイル
    Uploaded(FileHandle),
    /// 保存済みレコードから復元したもの（元ファイルは無い）
    Stored {
        id: RecordId,
        name: String,
        last_modified: String,
    },
}

impl ActiveFile {
    pub fn name(&self) -> &str {
        match self {
            ActiveFile::Uploaded(file) => &file.name,
            ActiveFile::Stored { name, .. } => name,
        }
    }

    /// 元のファイルハンドル（アップロード時のみ）
    pub fn handle(&self) -> Option<&FileHandle> {
        match self {
            ActiveFile::Uploaded(file) => Some(file),
            ActiveFile::Stored { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub file: ActiveFile,
    pub kind: DocumentKind,
    pub surface: Surface,
    /// 表計算のときだけ保持する（保存・ダウンロード時の再エンコード用）
    pub table: Option<Table>,
}

impl Session {
    pub fn name(&self) -> &str {
        self.file.name()
    }
}
