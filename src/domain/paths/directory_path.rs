use super::path_error::PathError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 存在が確認済みのディレクトリを表す構造体。
///
/// 画像の保存先とMarkdownの探索ルートの両方で使う。内部のパスは常に絶対パス。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPath {
    pub path: PathBuf,
}

impl DirectoryPath {
    /// 既存のディレクトリを受け取り、絶対パスにして保持する。
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PathError::InvalidPath(format!(
                "路径 '{}' 不存在",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(PathError::InvalidPath(format!(
                "路径 '{}' 不是目录",
                path.display()
            )));
        }

        Ok(Self {
            path: std::path::absolute(path)?,
        })
    }

    /// ディレクトリを（親も含めて）作成してから `DirectoryPath` を返す。
    pub fn create_all<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        fs::create_dir_all(path.as_ref())?;
        Self::new(path)
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// ディレクトリ直下のファイルパスを組み立てる（存在は確認しない）。
    pub fn join_file(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    /// 配下のMarkdownファイルを再帰的に列挙する。
    ///
    /// ファイル名順に走査するので、出力の順序は実行ごとに安定する。
    /// 走査中のエラーはそのまま `Err` として流すので、呼び出し側で中断を判断する。
    pub fn markdown_files(&self) -> impl Iterator<Item = Result<PathBuf, walkdir::Error>> {
        WalkDir::new(&self.path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) if !e.file_type().is_dir() && is_markdown_file(e.path()) => {
                    Some(Ok(e.into_path()))
                }
                Ok(_) => None,
                Err(err) => Some(Err(err)),
            })
    }
}

/// パスが `.md` で終わるかを判定する（大文字小文字は区別する）。
fn is_markdown_file(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().ends_with(".md")
}

impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
