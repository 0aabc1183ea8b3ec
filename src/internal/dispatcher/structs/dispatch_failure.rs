//! 缓冲下载路径的失败类型。不会传给调用方界面，只用于日志与回退。

use reqwest::StatusCode;
use thiserror::Error;

use crate::internal::host::structs::host_error::SaveError;

#[derive(Debug, Error)]
pub enum DispatchFailure {
    /// 请求本身失败（离线、DNS、TLS 等）
    #[error("请求失败: {0}")]
    FetchFailed(#[source] reqwest::Error),

    /// 收到响应但状态码非 2xx
    #[error("下载失败，状态码: {status}")]
    DownloadFailed { status: StatusCode },

    /// 响应体读取中断
    #[error("读取响应内容失败: {0}")]
    BlobReadFailed(#[source] reqwest::Error),

    /// 锚点激活后保存失败
    #[error("保存失败: {0}")]
    SaveFailed(#[from] SaveError),
}
