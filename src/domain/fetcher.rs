//! 画像をダウンロードしてファイルに保存する部分。
//!
//! `MarkdownProcessor` は `ImageFetcher` トレイト越しに呼び出すので、
//! テストではネットワークを使わない実装に差し替えられる。

use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// HTTPリクエスト全体のタイムアウトの既定値。
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// ダウンロード1件ごとのエラー。
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("下载图片失败 {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("下载图片失败 {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("创建文件失败 {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("保存图片失败 {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// コンソールに表示すべきエラーかどうか。
    ///
    /// 200以外のステータスは表示せず、ログにだけ残す。
    pub fn is_reported(&self) -> bool {
        !matches!(self, FetchError::Status { .. })
    }
}

/// URLの内容を指定パスに保存する処理。
pub trait ImageFetcher {
    /// `url` を取得して `dest` に書き込み、書き込んだバイト数を返す。
    /// `dest` が既に存在する場合は上書きする。
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}

impl<T: ImageFetcher + ?Sized> ImageFetcher for &T {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        (**self).fetch(url, dest)
    }
}

/// `reqwest` のブロッキングクライアントを使う実装。
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// 設定済みのクライアントをそのまま使う。
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let mut file = File::create(dest).map_err(|source| FetchError::CreateFile {
            path: dest.to_path_buf(),
            source,
        })?;

        // 本文はメモリに溜めずにファイルへ流し込む
        let written = io::copy(&mut response, &mut file).map_err(|source| FetchError::WriteFile {
            path: dest.to_path_buf(),
            source,
        })?;

        tracing::debug!(url, dest = %dest.display(), bytes = written, "image saved");
        Ok(written)
    }
}
