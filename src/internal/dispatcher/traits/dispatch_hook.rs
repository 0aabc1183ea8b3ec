//! 分发流程钩子：在「选定策略 / 进度 / 保存完成 / 回退」插入自定义逻辑。

use async_trait::async_trait;

use crate::internal::dispatcher::structs::dispatch_failure::DispatchFailure;
use crate::internal::dispatcher::structs::dispatch_outcome::DownloadStrategy;
use crate::internal::file_descriptor::structs::file_descriptor::FileDescriptor;
use crate::internal::host::structs::saved_file::SavedFile;

/// 分发钩子。
///
/// 使用方式二选一（可混用）：
/// - **单阶段**：用 `with_on_progress_hook` / `with_on_fallback_hook` 传入闭包；
/// - **完整钩子**：实现本 trait，通过分发器的 `with_hook` 注册。
#[async_trait]
pub trait DispatchHook: Send + Sync {
    /// 策略选定后调用，此时尚未发起任何请求或导航。
    fn on_strategy(&mut self, _file: &FileDescriptor, _strategy: DownloadStrategy) {}

    /// 缓冲下载每收到一段数据后调用。
    fn on_progress(&mut self, _bytes_done: u64, _total: Option<u64>) {}

    /// 缓冲下载保存成功后调用。
    async fn after_saved(&mut self, _file: &FileDescriptor, _saved: &SavedFile) {}

    /// 缓冲下载失败、即将回退到直接导航时调用（诊断用）。
    fn on_fallback(&mut self, _file: &FileDescriptor, _failure: &DispatchFailure) {}
}
