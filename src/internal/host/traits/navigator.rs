use async_trait::async_trait;
use url::Url;

use crate::internal::host::structs::host_error::NavigateError;

/// 直接导航：把地址交给宿主的原生下载/浏览流程。
///
/// 实现必须在**无引用关系**的新上下文中打开（对应 `noopener,noreferrer`），
/// 被打开的一方拿不到发起方的任何句柄。
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn open_unreferenced(&self, url: &Url) -> Result<(), NavigateError>;
}
