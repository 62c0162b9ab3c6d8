//! Markdownファイル1件分の処理（読み込み → 画像タグの置換 → 必要なら書き戻し）。

use super::fetcher::ImageFetcher;
use super::image_tag::{self, ImageReference};
use super::paths::directory_path::DirectoryPath;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// 画像の取得先を判定する既定のホスト識別文字列。
pub const DEFAULT_HOST_MARKER: &str = "noedgeai.com";

/// 本文1件分の置換結果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizeOutcome {
    /// 置換後の本文
    pub content: String,
    /// 見つかった画像タグの総数（対象外のホストも含む）
    pub image_count: usize,
    /// ローカルパスに置き換えたタグの数
    pub localized: usize,
    /// ダウンロードに失敗したタグの数
    pub failed: usize,
    /// 「対象外ホスト」の通知を出したかどうか
    pub foreign_notice_printed: bool,
}

impl LocalizeOutcome {
    pub fn is_modified(&self) -> bool {
        self.localized > 0
    }
}

/// ファイル1件の最終的な状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// 1枚以上ローカルに置き換えて書き戻した
    Updated { localized: usize },
    /// 書き戻す必要がなかった
    Unchanged,
    /// 読み込みに失敗したのでスキップした
    ReadFailed,
    /// 画像は保存したが、Markdownの書き戻しに失敗した
    WriteFailed,
}

/// Markdown内のリモート画像をローカルに保存し、参照を書き換える。
///
/// 状態は保存先とホスト識別文字列だけで、ファイルをまたいで共有するものはない。
pub struct MarkdownProcessor<F> {
    fetcher: F,
    save_dir: DirectoryPath,
    host_marker: String,
}

impl<F: ImageFetcher> MarkdownProcessor<F> {
    pub fn new(fetcher: F, save_dir: DirectoryPath, host_marker: impl Into<String>) -> Self {
        Self {
            fetcher,
            save_dir,
            host_marker: host_marker.into(),
        }
    }

    /// ファイルを処理し、状況を `out` に1行ずつ書き出す。
    ///
    /// 読み書きの失敗はこのファイルの中で完結させるので、`Err` になるのは
    /// `out` への書き込みに失敗したときだけ。
    pub fn process_file<W: Write>(&self, path: &Path, out: &mut W) -> io::Result<FileOutcome> {
        writeln!(out, "处理文件: {}", path.display())?;

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read markdown file");
                writeln!(out, "读取文件失败 {}: {}", path.display(), e)?;
                return Ok(FileOutcome::ReadFailed);
            }
        };

        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string());
        let outcome = self.localize(&content, &base_name, out)?;

        if outcome.is_modified() {
            // 既存ファイルへの上書きなのでパーミッションはそのまま
            if let Err(e) = fs::write(path, &outcome.content) {
                tracing::warn!(path = %path.display(), error = %e, "failed to write markdown file");
                writeln!(out, "写入文件失败 {}: {}", path.display(), e)?;
                return Ok(FileOutcome::WriteFailed);
            }
            writeln!(out, "文件已更新")?;
            Ok(FileOutcome::Updated {
                localized: outcome.localized,
            })
        } else {
            if !outcome.foreign_notice_printed {
                writeln!(out, "文件无需更新")?;
            }
            Ok(FileOutcome::Unchanged)
        }
    }

    /// 本文中の画像タグを走査し、対象ホストの画像を保存して置換した本文を返す。
    ///
    /// 連番はファイル内の全タグに対する1始まりの出現順で、対象外ホストのタグも数える。
    pub fn localize<W: Write>(
        &self,
        content: &str,
        base_name: &str,
        out: &mut W,
    ) -> io::Result<LocalizeOutcome> {
        let mut rebuilt = String::with_capacity(content.len());
        let mut last_end = 0;
        let mut outcome = LocalizeOutcome {
            content: String::new(),
            image_count: 0,
            localized: 0,
            failed: 0,
            foreign_notice_printed: false,
        };

        for image in image_tag::find_image_tags(content) {
            outcome.image_count += 1;
            rebuilt.push_str(&content[last_end..image.span.start]);
            last_end = image.span.end;

            let occurrence = outcome.image_count;
            let replacement =
                self.localize_one(&image, base_name, occurrence, &mut outcome, out)?;
            rebuilt.push_str(replacement.as_deref().unwrap_or(image.tag));
        }
        rebuilt.push_str(&content[last_end..]);

        outcome.content = rebuilt;
        Ok(outcome)
    }

    /// タグ1つを処理する。置換する場合は新しいタグを返す。
    fn localize_one<W: Write>(
        &self,
        image: &ImageReference<'_>,
        base_name: &str,
        occurrence: usize,
        outcome: &mut LocalizeOutcome,
        out: &mut W,
    ) -> io::Result<Option<String>> {
        if !image.is_hosted_on(&self.host_marker) {
            tracing::debug!(url = image.url, "image is not on the target host");
            if !outcome.foreign_notice_printed {
                writeln!(out, "所有图片不包含{},文件无需更新", self.host_marker)?;
                outcome.foreign_notice_printed = true;
            }
            return Ok(None);
        }

        let file_name = image_tag::local_file_name(base_name, occurrence, image.url);
        let save_path = self.save_dir.join_file(&file_name);

        match self.fetcher.fetch(image.url, &save_path) {
            Ok(_) => {
                outcome.localized += 1;
                Ok(Some(image_tag::render_image_tag(&save_path)))
            }
            Err(e) => {
                tracing::warn!(url = image.url, error = %e, "image download failed");
                if e.is_reported() {
                    writeln!(out, "{}", e)?;
                }
                outcome.failed += 1;
                Ok(None)
            }
        }
    }
}
