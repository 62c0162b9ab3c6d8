use clap::Parser;
use markdown_image_localizer::domain::fetcher::DEFAULT_TIMEOUT;
use markdown_image_localizer::domain::markdown_file::DEFAULT_HOST_MARKER;
use std::path::PathBuf;

/// Markdown内のリモート画像をダウンロードし、参照をローカルパスに書き換えるツール
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 画像の保存先フォルダ (省略時は起動後に入力を求める)
    #[arg(short, long)]
    pub save_dir: Option<PathBuf>,

    /// Markdownを探すフォルダ (オプション: デフォルトは実行ファイルのあるフォルダ)
    #[arg(short, long)]
    pub markdown_dir: Option<PathBuf>,

    /// ダウンロード対象とするURLが含む文字列
    #[arg(long, default_value = DEFAULT_HOST_MARKER)]
    pub host_marker: String,

    /// HTTPリクエストのタイムアウト（秒）
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// 保存先が存在しない場合、確認せずに作成する
    #[arg(short, long)]
    pub yes: bool,

    /// 終了前にEnterを待たない
    #[arg(long)]
    pub no_pause: bool,
}
