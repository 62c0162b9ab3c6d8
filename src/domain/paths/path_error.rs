use std::fmt;

/// 保存先や探索ルートとして使えないパスを表すエラー。
#[derive(Debug)]
pub enum PathError {
    /// 存在しない、またはディレクトリではない
    InvalidPath(String),
    /// ディレクトリの作成や絶対パス化に失敗した
    IoError(std::io::Error),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidPath(s) => write!(f, "无效的路径: {}", s),
            PathError::IoError(e) => write!(f, "I/O错误: {}", e),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathError::InvalidPath(_) => None,
            PathError::IoError(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for PathError {
    fn from(e: std::io::Error) -> Self {
        PathError::IoError(e)
    }
}
