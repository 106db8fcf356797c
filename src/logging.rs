//! ログ初期化

use tracing_subscriber::EnvFilter;

/// stderr へのログ出力を設定する
///
/// `RUST_LOG` があればそれを優先し、なければ `docshelf=<level>` を使う。
pub fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("docshelf={},warn", level)));

    // テストなどで二重初期化された場合は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
