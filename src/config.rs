//! 実行時の設定。起動時に一度だけ組み立て、その後は変更しない。

use crate::domain::fetcher::HttpFetcher;
use crate::domain::markdown_file::MarkdownProcessor;
use crate::domain::paths::directory_path::DirectoryPath;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// ホームディレクトリ配下の既定の保存先 `Pictures/markdown图片`。
pub fn default_save_dir(home: &Path) -> PathBuf {
    home.join("Pictures").join("markdown图片")
}

/// 実行中のプログラムが置かれているディレクトリ。
pub fn executable_dir() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("'{}' 没有父目录", exe.display()),
        )
    })
}

#[derive(Debug, Clone)]
pub struct LocalizerConfig {
    /// 画像の保存先
    pub save_dir: DirectoryPath,
    /// Markdownを探すルート
    pub markdown_dir: DirectoryPath,
    /// 対象とするURLが含む文字列
    pub host_marker: String,
    /// HTTPリクエストのタイムアウト
    pub timeout: Duration,
}

impl LocalizerConfig {
    /// 設定に従ってHTTPでダウンロードする `MarkdownProcessor` を作る。
    pub fn processor(&self) -> Result<MarkdownProcessor<HttpFetcher>, reqwest::Error> {
        let fetcher = HttpFetcher::new(self.timeout)?;
        Ok(MarkdownProcessor::new(
            fetcher,
            self.save_dir.clone(),
            self.host_marker.clone(),
        ))
    }
}
