//! 单阶段钩子适配器：将闭包包装成 [`DispatchHook`]，供 `with_xx_hook` 使用。

use async_trait::async_trait;

use crate::internal::dispatcher::structs::dispatch_failure::DispatchFailure;
use crate::internal::dispatcher::traits::dispatch_hook::DispatchHook;
use crate::internal::file_descriptor::structs::file_descriptor::FileDescriptor;

/// 仅实现「进度」的钩子适配器。
pub(crate) struct OnProgressHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> DispatchHook for OnProgressHookAdapter<F>
where
    F: FnMut(u64, Option<u64>) + Send + Sync + 'static,
{
    fn on_progress(&mut self, bytes_done: u64, total: Option<u64>) {
        (self.0)(bytes_done, total);
    }
}

/// 仅实现「回退」的钩子适配器。
pub(crate) struct OnFallbackHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> DispatchHook for OnFallbackHookAdapter<F>
where
    F: FnMut(&FileDescriptor, &DispatchFailure) + Send + Sync + 'static,
{
    fn on_fallback(&mut self, file: &FileDescriptor, failure: &DispatchFailure) {
        (self.0)(file, failure);
    }
}
