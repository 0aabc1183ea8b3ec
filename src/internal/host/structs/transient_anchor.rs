use std::sync::Arc;

use crate::internal::host::structs::host_error::SaveError;
use crate::internal::host::structs::saved_file::SavedFile;
use crate::internal::host::traits::save_surface::{AnchorElement, AnchorId, SaveSurface};

/// 临时锚点：创建时挂载到表面，drop 时移除，任何退出路径都不会遗留节点。
pub struct TransientAnchor {
    surface: Arc<dyn SaveSurface>,
    id: AnchorId,
}

impl TransientAnchor {
    /// 挂载一个不可见锚点。
    pub fn acquire(surface: Arc<dyn SaveSurface>, href: &str, download: &str) -> Self {
        let id = surface.attach(AnchorElement {
            href: href.to_string(),
            download: download.to_string(),
            hidden: true,
        });
        Self { surface, id }
    }

    pub fn id(&self) -> AnchorId {
        self.id
    }

    /// 程序化点击，触发原生保存流程。
    pub async fn activate(&self) -> Result<SavedFile, SaveError> {
        self.surface.activate(self.id).await
    }
}

impl Drop for TransientAnchor {
    fn drop(&mut self) {
        self.surface.detach(self.id);
    }
}
