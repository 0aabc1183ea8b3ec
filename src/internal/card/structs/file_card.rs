use std::sync::Arc;

use crate::internal::card::structs::trigger_event::TriggerEvent;
use crate::internal::dispatcher::structs::dispatch_outcome::{DispatchOutcome, SkipReason};
use crate::internal::dispatcher::structs::download_dispatcher::DownloadDispatcher;
use crate::internal::file_descriptor::structs::descriptor_error::DescriptorError;
use crate::internal::file_descriptor::structs::file_descriptor::FileDescriptor;

/// 文件卡片的交互部分。
///
/// 构造时校验文件描述（必须有所有者姓名），多张卡片共享同一个分发器。
#[derive(Clone)]
pub struct FileCard {
    file: FileDescriptor,
    dispatcher: Arc<DownloadDispatcher>,
}

impl FileCard {
    pub fn new(
        file: FileDescriptor,
        dispatcher: Arc<DownloadDispatcher>,
    ) -> Result<Self, DescriptorError> {
        file.validate()?;
        Ok(Self { file, dispatcher })
    }

    /// 由后端文档 JSON 构造。
    pub fn from_document(
        document: serde_json::Value,
        dispatcher: Arc<DownloadDispatcher>,
    ) -> Result<Self, DescriptorError> {
        Self::new(FileDescriptor::from_document(document)?, dispatcher)
    }

    pub fn file(&self) -> &FileDescriptor {
        &self.file
    }

    /// 点击卡片任意位置。落在操作菜单内时不触发下载，事件原样留给菜单处理。
    pub async fn on_card_click(&self, event: &mut TriggerEvent) -> DispatchOutcome {
        let excluded = &self.dispatcher.config().excluded_region;
        if event.target.is_within(excluded) {
            tracing::trace!(
                bucket_file_id = %self.file.bucket_file_id,
                region = %excluded,
                "click inside excluded region"
            );
            return DispatchOutcome::Skipped(SkipReason::ExcludedRegion);
        }
        self.dispatcher.dispatch_download(&self.file, event).await
    }

    /// 点击显式的下载按钮。
    pub async fn on_download_click(&self, event: &mut TriggerEvent) -> DispatchOutcome {
        self.dispatcher.dispatch_download(&self.file, event).await
    }

    /// 下载按钮是否可用；开启去重时，本文件下载进行中即为不可用。
    pub fn is_download_enabled(&self) -> bool {
        !(self.dispatcher.config().dedupe_in_flight
            && self.dispatcher.in_flight.contains(&self.file.bucket_file_id))
    }
}
