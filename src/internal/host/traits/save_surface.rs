use async_trait::async_trait;

use crate::internal::host::structs::host_error::SaveError;
use crate::internal::host::structs::saved_file::SavedFile;

pub type AnchorId = u64;

/// 临时下载锚点：`href` 指向对象 URL，`download` 为另存为的文件名。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorElement {
    pub href: String,
    pub download: String,
    pub hidden: bool,
}

/// 承载临时锚点的表面（文档）。激活锚点即触发宿主的原生保存流程。
///
/// 一般不直接调用，而是通过 [`TransientAnchor`](crate::host::TransientAnchor) 保证挂载与移除成对出现。
#[async_trait]
pub trait SaveSurface: Send + Sync {
    fn attach(&self, anchor: AnchorElement) -> AnchorId;

    async fn activate(&self, id: AnchorId) -> Result<SavedFile, SaveError>;

    fn detach(&self, id: AnchorId);
}
