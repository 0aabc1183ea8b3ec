//! 缓冲下载：带会话 cookie 整体读取响应，再通过临时锚点触发保存。

use std::sync::Arc;

use bytes::BytesMut;
use futures_util::StreamExt;
use url::Url;

use crate::internal::dispatcher::structs::dispatch_failure::DispatchFailure;
use crate::internal::dispatcher::structs::download_progress::DownloadProgress;
use crate::internal::file_descriptor::structs::file_descriptor::FileDescriptor;
use crate::internal::host::structs::saved_file::SavedFile;
use crate::internal::host::structs::transient_anchor::TransientAnchor;

use super::DownloadDispatcher;

impl DownloadDispatcher {
    /// 缓冲下载并保存。
    ///
    /// 对象 URL 与锚点都是作用域守卫：锚点先移除，对象 URL 随后撤销，激活失败也一样。
    pub(super) async fn run_buffered(
        &self,
        file: &FileDescriptor,
        url: &Url,
    ) -> Result<SavedFile, DispatchFailure> {
        let bucket_file_id = Some(file.bucket_file_id.clone());
        self.progress_state.update(DownloadProgress {
            bucket_file_id: bucket_file_id.clone(),
            bytes_done: 0,
            total: Some(file.size),
        });

        // 会话 cookie 由 SessionAuth 的 cookie jar 自动附带
        let resp = self
            .auth
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(DispatchFailure::FetchFailed)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DispatchFailure::DownloadFailed { status });
        }

        let total = resp.content_length().or(Some(file.size));
        let capacity = usize::try_from(total.unwrap_or(0).min(self.config.large_file_threshold))
            .unwrap_or_default();
        let mut blob = BytesMut::with_capacity(capacity);
        let mut bytes_done: u64 = 0;
        let mut stream = resp.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(DispatchFailure::BlobReadFailed)?;
            bytes_done += chunk.len() as u64;
            blob.extend_from_slice(&chunk);

            self.hooks.lock().await.run_on_progress(bytes_done, total);
            self.progress_state.update(DownloadProgress {
                bucket_file_id: bucket_file_id.clone(),
                bytes_done,
                total,
            });
        }

        tracing::debug!(
            bucket_file_id = %file.bucket_file_id,
            bytes = bytes_done,
            "response body buffered"
        );

        let object_url = self.registry.create(blob.freeze());
        let saved = {
            let anchor =
                TransientAnchor::acquire(Arc::clone(&self.surface), object_url.href(), &file.name);
            anchor.activate().await
        };
        drop(object_url);

        saved.map_err(DispatchFailure::SaveFailed)
    }
}
