//! 对象 URL：为内存中的字节生成短期引用，撤销后字节随之释放。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use bytes::Bytes;

use super::host_error::ObjectUrlError;

const OBJECT_URL_PREFIX: &str = "blob:bucket-download/";

#[derive(Debug, Default)]
struct RegistryInner {
    blobs: Mutex<HashMap<String, Bytes>>,
    next_id: AtomicU64,
}

/// 对象 URL 注册表。克隆得到的是同一个注册表。
#[derive(Debug, Clone, Default)]
pub struct ObjectUrlRegistry {
    inner: Arc<RegistryInner>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一段字节，返回的 [`ObjectUrl`] 在 drop 时自动撤销。
    pub fn create(&self, blob: Bytes) -> ObjectUrl {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let href = format!("{OBJECT_URL_PREFIX}{id}");
        self.blobs().insert(href.clone(), blob);
        ObjectUrl {
            href,
            registry: self.clone(),
        }
    }

    /// 按 href 取回字节（`Bytes` 克隆只增加引用计数）。
    pub fn resolve(&self, href: &str) -> Result<Bytes, ObjectUrlError> {
        self.blobs()
            .get(href)
            .cloned()
            .ok_or_else(|| ObjectUrlError::Revoked(href.to_string()))
    }

    /// 撤销；返回该 href 此前是否仍然有效。
    pub fn revoke(&self, href: &str) -> bool {
        self.blobs().remove(href).is_some()
    }

    /// 当前仍有效的对象 URL 数量。
    pub fn live_count(&self) -> usize {
        self.blobs().len()
    }

    fn blobs(&self) -> MutexGuard<'_, HashMap<String, Bytes>> {
        // 锁内只有 HashMap 的单步操作，中毒时数据仍一致
        self.inner
            .blobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// 已登记的对象 URL，作用域结束即撤销。
#[derive(Debug)]
pub struct ObjectUrl {
    href: String,
    registry: ObjectUrlRegistry,
}

impl ObjectUrl {
    pub fn href(&self) -> &str {
        &self.href
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        self.registry.revoke(&self.href);
        tracing::trace!(href = %self.href, "object url revoked");
    }
}
