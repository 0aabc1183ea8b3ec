pub mod dispatch_config;
pub mod dispatch_failure;
pub mod dispatch_hooks_container;
pub mod dispatch_outcome;
pub mod download_dispatcher;
pub mod download_progress;
pub mod hook_adapters;
pub mod in_flight;

// 重导出公共类型
pub use dispatch_config::{DEFAULT_LARGE_FILE_THRESHOLD, DispatchConfig};
pub use dispatch_failure::DispatchFailure;
pub use dispatch_outcome::{DispatchOutcome, DownloadStrategy, SkipReason};
pub use download_dispatcher::{DownloadDispatcher, select_strategy};
pub use download_progress::DownloadProgress;
pub use in_flight::InFlightSet;
