use crate::internal::dispatcher::structs::dispatch_failure::DispatchFailure;
use crate::internal::dispatcher::structs::dispatch_outcome::DownloadStrategy;
use crate::internal::dispatcher::traits::dispatch_hook::DispatchHook;
use crate::internal::file_descriptor::structs::file_descriptor::FileDescriptor;
use crate::internal::host::structs::saved_file::SavedFile;

/// 钩子容器：按注册顺序依次执行。
#[derive(Default)]
pub struct DispatchHooksContainer {
    hooks: Vec<Box<dyn DispatchHook>>,
}

impl DispatchHooksContainer {
    pub fn add(&mut self, hook: impl DispatchHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn run_on_strategy(&mut self, file: &FileDescriptor, strategy: DownloadStrategy) {
        for h in self.hooks.iter_mut() {
            h.on_strategy(file, strategy);
        }
    }

    pub fn run_on_progress(&mut self, bytes_done: u64, total: Option<u64>) {
        for h in self.hooks.iter_mut() {
            h.on_progress(bytes_done, total);
        }
    }

    pub async fn run_after_saved(&mut self, file: &FileDescriptor, saved: &SavedFile) {
        for h in self.hooks.iter_mut() {
            h.after_saved(file, saved).await;
        }
    }

    pub fn run_on_fallback(&mut self, file: &FileDescriptor, failure: &DispatchFailure) {
        for h in self.hooks.iter_mut() {
            h.on_fallback(file, failure);
        }
    }
}
