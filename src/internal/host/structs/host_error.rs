//! 宿主相关错误类型。

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjectUrlError {
    #[error("对象 URL 不存在或已被撤销: {0}")]
    Revoked(String),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("锚点已被移除: {0}")]
    AnchorDetached(u64),

    #[error("{0}")]
    ObjectUrl(#[from] ObjectUrlError),

    #[error("文件名不合法: {0:?}")]
    InvalidFileName(String),

    #[error("找不到系统下载目录")]
    NoDownloadDir,

    #[error("创建目录失败: {0}")]
    CreateDir(std::io::Error),

    #[error("写入文件失败: {0}")]
    WriteFile(std::io::Error),

    #[error("无法为 {0} 找到可用的文件名")]
    NameExhausted(PathBuf),
}

#[derive(Debug, Error)]
pub enum NavigateError {
    #[error("启动 {program} 失败: {source}")]
    Spawn {
        program: &'static str,
        source: std::io::Error,
    },

    #[error("{program} 退出码异常: {code:?}")]
    ExitStatus {
        program: &'static str,
        code: Option<i32>,
    },
}
