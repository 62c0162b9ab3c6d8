use crate::domain::paths::path_error::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("获取程序路径失败: {0}")]
    ExecutablePath(#[source] std::io::Error),

    #[error("获取用户目录失败: 无法确定用户主目录")]
    HomeDirNotFound,

    #[error("创建目录失败: {0}")]
    CreateSaveDir(#[source] std::io::Error),

    #[error("程序退出")]
    Declined,

    #[error("{0}")]
    Path(#[from] PathError),

    #[error("遍历目录失败: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("创建HTTP客户端失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O错误: {0}")]
    Io(#[from] std::io::Error),
}
