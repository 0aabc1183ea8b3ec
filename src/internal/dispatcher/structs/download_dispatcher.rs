//! 下载分发器
//!
//! 给定文件描述与触发事件，选择下载策略并执行。
//!
//! ## 策略选择
//!
//! - **直接导航**：类型在 `direct_types`（默认仅视频）中，或大小严格超过 `large_file_threshold`（默认 50 MiB）。
//!   在新的无引用上下文中打开下载地址，字节不经过本进程内存。
//! - **缓冲下载**：其余文件。带会话 cookie 请求下载地址，整个响应体读入内存，
//!   登记为对象 URL，挂载临时锚点并激活触发保存，随后移除锚点、撤销对象 URL。
//!
//! ## 失败回退
//!
//! 缓冲下载的任何失败（请求失败、非 2xx、读取中断、保存失败）都不会抛给调用方：
//! 记录日志、通知 `on_fallback` 钩子，然后对同一地址执行直接导航。
//! 回退导航自身的失败只记录日志。
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use bucket_download::{DownloadDispatcher, auth::SessionAuth, download_url::BackendConfig};
//! # use bucket_download::card::TriggerEvent;
//! # use bucket_download::file_descriptor::{FileDescriptor, FileType};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = BackendConfig::from_env()?;
//! let auth = SessionAuth::new(&backend, Some("session-secret"))?;
//! let dispatcher = DownloadDispatcher::system(backend, auth)?
//!     .with_on_progress_hook(|done, total| println!("{done}/{total:?}"));
//!
//! let file = FileDescriptor::new("abc", "report.pdf", FileType::Document, 1024);
//! let outcome = dispatcher
//!     .dispatch_download(&file, &mut TriggerEvent::default())
//!     .await;
//! # Ok(())
//! # }
//! ```
//!
//! ## 内部实现说明
//!
//! - `strategy` 子模块：策略选择（纯函数）
//! - `buffered_blob` 子模块：缓冲下载与保存

mod buffered_blob;
mod strategy;

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use url::Url;

use crate::internal::auth::structs::session_auth::SessionAuth;
use crate::internal::card::structs::trigger_event::TriggerEvent;
use crate::internal::download_url::functions::construct_download_url::construct_download_url;
use crate::internal::download_url::structs::backend_config::BackendConfig;
use crate::internal::file_descriptor::structs::file_descriptor::FileDescriptor;
use crate::internal::host::structs::disk_save_surface::DiskSaveSurface;
use crate::internal::host::structs::host_error::SaveError;
use crate::internal::host::structs::object_url::ObjectUrlRegistry;
use crate::internal::host::structs::system_navigator::SystemNavigator;
use crate::internal::host::traits::navigator::Navigator;
use crate::internal::host::traits::save_surface::SaveSurface;
use crate::internal::states::reactive::ReactiveProperty;

use super::dispatch_config::DispatchConfig;
use super::dispatch_failure::DispatchFailure;
use super::dispatch_hooks_container::DispatchHooksContainer;
use super::dispatch_outcome::{DispatchOutcome, DownloadStrategy, SkipReason};
use super::download_progress::DownloadProgress;
use super::hook_adapters::{OnFallbackHookAdapter, OnProgressHookAdapter};
use super::in_flight::InFlightSet;
use crate::internal::dispatcher::traits::dispatch_hook::DispatchHook;

pub use strategy::select_strategy;

/// 下载分发器
///
/// 每次 `dispatch_download` 相互独立，只共享对象 URL 注册表、保存表面与进行中集合。
/// 拥有响应式属性：`progress()` 为缓冲下载进度，`in_flight()` 为进行中的文件集合。
pub struct DownloadDispatcher {
    pub(crate) backend: BackendConfig,
    pub(crate) auth: SessionAuth,
    pub(crate) navigator: Arc<dyn Navigator>,
    pub(crate) surface: Arc<dyn SaveSurface>,
    pub(crate) registry: ObjectUrlRegistry,
    pub(crate) config: DispatchConfig,
    pub(crate) hooks: Mutex<DispatchHooksContainer>,
    pub(crate) progress_state: ReactiveProperty<DownloadProgress>,
    pub(crate) in_flight: InFlightSet,
}

impl DownloadDispatcher {
    /// `registry` 需与 `surface` 解析 href 时使用的注册表相同。
    pub fn new(
        backend: BackendConfig,
        auth: SessionAuth,
        navigator: Arc<dyn Navigator>,
        surface: Arc<dyn SaveSurface>,
        registry: ObjectUrlRegistry,
    ) -> Self {
        Self {
            backend,
            auth,
            navigator,
            surface,
            registry,
            config: DispatchConfig::default(),
            hooks: Default::default(),
            progress_state: ReactiveProperty::new(DownloadProgress::default()),
            in_flight: InFlightSet::new(),
        }
    }

    /// 使用系统 URL 打开程序与系统下载目录。
    pub fn system(backend: BackendConfig, auth: SessionAuth) -> Result<Self, SaveError> {
        let registry = ObjectUrlRegistry::new();
        let surface = DiskSaveSurface::in_download_dir(registry.clone())?;
        Ok(Self::new(
            backend,
            auth,
            Arc::new(SystemNavigator::new()),
            Arc::new(surface),
            registry,
        ))
    }

    /// 整体替换配置。
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置直接导航的大小阈值（字节）。
    pub fn large_file_threshold(mut self, bytes: u64) -> Self {
        self.config.large_file_threshold = bytes;
        self
    }

    /// 是否忽略同一文件进行中的重复点击，默认开启。
    pub fn dedupe_in_flight(mut self, enabled: bool) -> Self {
        self.config.dedupe_in_flight = enabled;
        self
    }

    /// 添加完整钩子；可链式多次调用，按注册顺序执行。
    pub fn with_hook(mut self, hook: impl DispatchHook + 'static) -> Self {
        self.hooks.get_mut().add(hook);
        self
    }

    /// 注册「进度」钩子；参数为已读取字节数、总大小（可能未知为 `None`）。
    pub fn with_on_progress_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(u64, Option<u64>) + Send + Sync + 'static,
    {
        self.hooks.get_mut().add(OnProgressHookAdapter(f));
        self
    }

    /// 注册「回退」钩子；缓冲下载失败时收到文件与失败原因。
    pub fn with_on_fallback_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(&FileDescriptor, &DispatchFailure) + Send + Sync + 'static,
    {
        self.hooks.get_mut().add(OnFallbackHookAdapter(f));
        self
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// 缓冲下载进度；返回可共享句柄，`.watch()` 后 `changed().await` 监听。
    pub fn progress(&self) -> ReactiveProperty<DownloadProgress> {
        self.progress_state.clone()
    }

    /// 进行中的存储文件 id 集合。
    pub fn in_flight(&self) -> ReactiveProperty<HashSet<String>> {
        self.in_flight.state()
    }

    /// 该文件的下载地址。
    pub fn download_url(&self, file: &FileDescriptor) -> Url {
        construct_download_url(&self.backend, &file.bucket_file_id)
    }

    /// 该文件会采用的策略。
    pub fn strategy_for(&self, file: &FileDescriptor) -> DownloadStrategy {
        select_strategy(&self.config, file)
    }

    /// 执行一次下载。
    ///
    /// 先吞掉触发事件的默认行为与冒泡，结果完全由本方法负责；
    /// 返回值只用于调用方区分路径，失败不会以错误形式返回。
    pub async fn dispatch_download(
        &self,
        file: &FileDescriptor,
        event: &mut TriggerEvent,
    ) -> DispatchOutcome {
        event.prevent_default();
        event.stop_propagation();

        let _slot = match self
            .in_flight
            .acquire(&file.bucket_file_id, self.config.dedupe_in_flight)
        {
            Some(slot) => slot,
            None => {
                tracing::debug!(
                    bucket_file_id = %file.bucket_file_id,
                    "download already in flight, ignoring repeated trigger"
                );
                return DispatchOutcome::Skipped(SkipReason::AlreadyInFlight);
            }
        };

        let url = self.download_url(file);
        let strategy = self.strategy_for(file);
        self.hooks.lock().await.run_on_strategy(file, strategy);

        tracing::debug!(
            bucket_file_id = %file.bucket_file_id,
            file_type = %file.file_type,
            size = file.size,
            ?strategy,
            "dispatching download"
        );

        match strategy {
            DownloadStrategy::DirectNavigation => {
                self.navigate(&url).await;
                DispatchOutcome::Navigated
            }
            DownloadStrategy::BufferedBlob => match self.run_buffered(file, &url).await {
                Ok(saved) => {
                    self.hooks.lock().await.run_after_saved(file, &saved).await;
                    DispatchOutcome::Saved(saved)
                }
                Err(failure) => {
                    tracing::error!(
                        bucket_file_id = %file.bucket_file_id,
                        url = %url,
                        error = %failure,
                        "download failed, falling back to direct navigation"
                    );
                    self.hooks.lock().await.run_on_fallback(file, &failure);
                    self.navigate(&url).await;
                    DispatchOutcome::FellBack(failure)
                }
            },
        }
    }

    async fn navigate(&self, url: &Url) {
        if let Err(e) = self.navigator.open_unreferenced(url).await {
            tracing::error!(url = %url, error = %e, "direct navigation failed");
        }
    }
}
