//! アプリケーションのメインワークフローを定義するモジュール。
//!
//! このモジュールは、UI層（`cli`, `prompt`）とドメイン層（`domain`）を仲介し、
//! 起動時の設定確定からMarkdownの走査までの流れを実装します。

use crate::cli::Args;
use markdown_image_localizer::config::{self, LocalizerConfig};
use markdown_image_localizer::domain::fetcher::ImageFetcher;
use markdown_image_localizer::domain::markdown_file::{FileOutcome, MarkdownProcessor};
use markdown_image_localizer::domain::paths::directory_path::DirectoryPath;
use markdown_image_localizer::domain::paths::path_error::PathError;
use markdown_image_localizer::error::AppError;
use markdown_image_localizer::prompt::Prompter;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

/// 1回の実行で処理したファイル数の集計。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub updated: usize,
    pub images_localized: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: FileOutcome) {
        self.files += 1;
        match outcome {
            FileOutcome::Updated { localized } => {
                self.updated += 1;
                self.images_localized += localized;
            }
            FileOutcome::Unchanged => {}
            FileOutcome::ReadFailed | FileOutcome::WriteFailed => self.failed += 1,
        }
    }
}

// --- public な main 関数 ---

/// アプリケーションのメインロジックを実行します。
///
/// # 戻り値
/// * `Ok(RunSummary)`: 走査まで到達した場合（個々のファイルの失敗は含む）。
/// * `Err(AppError)`: 起動時の設定が確定できなかった場合。
pub fn run<R: BufRead, W: Write>(
    args: &Args,
    prompter: &mut Prompter<R, W>,
) -> Result<RunSummary, AppError> {
    // 1. 設定の確定（パスの解決と保存先の確認）
    let config = resolve_config(args, prompter)?;
    tracing::info!(
        save_dir = %config.save_dir,
        markdown_dir = %config.markdown_dir,
        host_marker = %config.host_marker,
        "configuration resolved"
    );

    // 2. Markdownの走査と処理
    let processor = config.processor()?;
    process_tree(&processor, &config.markdown_dir, prompter.output())
}

// --- private なヘルパー関数 ---

/// 引数と対話入力から `LocalizerConfig` を組み立てる。
fn resolve_config<R: BufRead, W: Write>(
    args: &Args,
    prompter: &mut Prompter<R, W>,
) -> Result<LocalizerConfig, AppError> {
    let markdown_dir = match &args.markdown_dir {
        Some(dir) => dir.clone(),
        None => config::executable_dir().map_err(AppError::ExecutablePath)?,
    };
    let markdown_dir = DirectoryPath::new(markdown_dir)?;

    let save_dir = match &args.save_dir {
        Some(dir) => dir.clone(),
        None => {
            let home = dirs::home_dir().ok_or(AppError::HomeDirNotFound)?;
            prompter.ask_save_dir(&config::default_save_dir(&home))?
        }
    };
    let save_dir = std::path::absolute(save_dir)?;
    let save_dir = ensure_save_dir(save_dir, args.yes, prompter)?;

    Ok(LocalizerConfig {
        save_dir,
        markdown_dir,
        host_marker: args.host_marker.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
    })
}

/// 保存先が無ければ確認の上で作成する。断られた場合は `AppError::Declined`。
fn ensure_save_dir<R: BufRead, W: Write>(
    save_dir: PathBuf,
    assume_yes: bool,
    prompter: &mut Prompter<R, W>,
) -> Result<DirectoryPath, AppError> {
    if save_dir.exists() {
        return Ok(DirectoryPath::new(&save_dir)?);
    }
    if assume_yes || prompter.confirm_create(&save_dir)? {
        DirectoryPath::create_all(&save_dir).map_err(|e| match e {
            PathError::IoError(e) => AppError::CreateSaveDir(e),
            other => AppError::Path(other),
        })
    } else {
        Err(AppError::Declined)
    }
}

/// ルート配下のMarkdownを順に処理する。
///
/// 走査中のエラーはそこで打ち切り、メッセージを出して処理済みの分の集計を返す。
fn process_tree<F: ImageFetcher, W: Write>(
    processor: &MarkdownProcessor<F>,
    root: &DirectoryPath,
    out: &mut W,
) -> Result<RunSummary, AppError> {
    let mut summary = RunSummary::default();
    for entry in root.markdown_files() {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                let err = AppError::Walk(e);
                tracing::warn!(error = %err, "directory walk aborted");
                writeln!(out, "{}", err)?;
                break;
            }
        };
        summary.record(processor.process_file(&path, out)?);
    }

    tracing::info!(
        files = summary.files,
        updated = summary.updated,
        images = summary.images_localized,
        failed = summary.failed,
        "run finished"
    );
    Ok(summary)
}
