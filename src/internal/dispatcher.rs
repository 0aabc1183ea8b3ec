//! 下载分发器领域模块：为每个文件选择下载策略并执行，缓冲下载失败时回退到直接导航。
//!
//! 使用方式：`DownloadDispatcher::new(..).large_file_threshold(n).with_hook(hook)`，
//! 之后每次点击调用 `dispatch_download(&file, &mut event).await`。

pub mod structs;
pub mod traits;
