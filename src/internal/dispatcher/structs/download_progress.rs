/// 缓冲下载进度：响应式状态，记录当前文件与已读取字节数。
///
/// 调用方通过分发器的 `progress()` 读取或监听；比例可用 [`DownloadProgress::pct`] 获取。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadProgress {
    /// 正在下载的存储文件 id，尚未开始时为空
    pub bucket_file_id: Option<String>,
    pub bytes_done: u64,
    /// 总大小：优先取响应的 Content-Length，其次取文件描述中的 size
    pub total: Option<u64>,
}

impl DownloadProgress {
    /// 进度百分比（0～100）；总大小为 0 或未知时返回 `f64::NAN`。
    pub fn pct(&self) -> f64 {
        self.total
            .filter(|&t| t > 0)
            .map(|t| (self.bytes_done as f64 / t as f64) * 100.0)
            .unwrap_or(f64::NAN)
    }
}
