mod cli;
mod workflow;

use clap::Parser;
use markdown_image_localizer::logging;
use markdown_image_localizer::prompt::Prompter;
use std::io;

fn main() {
    logging::init_logging();

    // コマンドライン引数を解析します
    let args = cli::Args::parse();

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    // 失敗しても終了コードは変えず、メッセージを表示して Enter を待つ
    let closing = match workflow::run(&args, &mut prompter) {
        Ok(summary) => {
            tracing::debug!(?summary, "all markdown files processed");
            "\n处理完成！"
        }
        Err(e) => {
            tracing::debug!(error = %e, "run aborted");
            println!("{}", e);
            "\n"
        }
    };

    if args.no_pause {
        println!("{}", closing);
    } else if let Err(e) = prompter.pause(&format!("{}按回车键退出...", closing)) {
        tracing::debug!(error = %e, "failed to wait for enter");
    }
}
