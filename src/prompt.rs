//! 対話的な入力。標準入出力以外でもテストできるよう `BufRead`/`Write` で受け取る。

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// 状況表示の出力先。
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// 保存先を尋ねる。空行（または入力終端）なら `default` を返す。
    pub fn ask_save_dir(&mut self, default: &Path) -> io::Result<PathBuf> {
        writeln!(
            self.output,
            "请输入图片保存路径 (直接回车使用默认路径: {}): ",
            default.display()
        )?;
        let answer = self.read_answer()?;
        if answer.is_empty() {
            Ok(default.to_path_buf())
        } else {
            Ok(PathBuf::from(answer))
        }
    }

    /// 存在しないディレクトリを作成するか尋ねる。`y` / `Y` のみ承諾。
    pub fn confirm_create(&mut self, dir: &Path) -> io::Result<bool> {
        write!(self.output, "路径 {} 不存在，是否创建? (y/n): ", dir.display())?;
        let answer = self.read_answer()?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }

    /// メッセージを出して Enter を待つ。
    pub fn pause(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)?;
        self.read_answer()?;
        Ok(())
    }

    fn read_answer(&mut self) -> io::Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}
