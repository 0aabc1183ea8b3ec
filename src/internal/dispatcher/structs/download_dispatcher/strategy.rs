//! 策略选择。

use crate::internal::dispatcher::structs::dispatch_config::DispatchConfig;
use crate::internal::dispatcher::structs::dispatch_outcome::DownloadStrategy;
use crate::internal::file_descriptor::structs::file_descriptor::FileDescriptor;

/// 类型命中 `direct_types` 或大小严格超过阈值时直接导航，否则缓冲下载。
pub fn select_strategy(config: &DispatchConfig, file: &FileDescriptor) -> DownloadStrategy {
    if config.direct_types.contains(&file.file_type) || file.size > config.large_file_threshold {
        DownloadStrategy::DirectNavigation
    } else {
        DownloadStrategy::BufferedBlob
    }
}
