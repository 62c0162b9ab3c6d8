//! ログの初期化。画面向けの状況表示は stdout、診断用のログは stderr に出す。
//!
//! 既定ではログを出さない。`RUST_LOG=debug` などで有効にする。

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` が未設定のときのフィルタ。
const DEFAULT_FILTER: &str = "off";

/// ディレクティブ文字列からフィルタを作る。未指定や不正な値なら既定値。
fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// stderr への構造化ログを初期化する。
///
/// 既にサブスクライバが登録されている場合（テストなど）は何もしない。
pub fn init_logging() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    /// 何も指定しなければ stderr には何も出ない（404 の警告も含む）
    #[test]
    fn test_default_filter_is_silent() {
        assert_eq!(build_filter(None).max_level_hint(), Some(LevelFilter::OFF));
    }

    #[test]
    fn test_rust_log_enables_diagnostics() {
        assert_eq!(
            build_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            build_filter(Some("warn")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }
}
