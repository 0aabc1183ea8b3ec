use crate::internal::dispatcher::structs::dispatch_failure::DispatchFailure;
use crate::internal::host::structs::saved_file::SavedFile;

/// 下载策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStrategy {
    /// 在新的无引用上下文中打开下载地址，由宿主处理字节传输
    DirectNavigation,
    /// 整个响应体读入内存，再通过临时锚点触发保存
    BufferedBlob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 点击落在排除区域（操作菜单）内
    ExcludedRegion,
    /// 同一文件的下载仍在进行
    AlreadyInFlight,
}

/// 一次分发的结果。用户侧只会看到保存或新窗口，这里给调用方区分具体路径。
#[derive(Debug)]
pub enum DispatchOutcome {
    Navigated,
    Saved(SavedFile),
    /// 缓冲下载失败，已回退到直接导航
    FellBack(DispatchFailure),
    Skipped(SkipReason),
}

impl DispatchOutcome {
    /// 是否触发了直接导航（包括回退）。
    pub fn navigated(&self) -> bool {
        matches!(self, DispatchOutcome::Navigated | DispatchOutcome::FellBack(_))
    }
}
