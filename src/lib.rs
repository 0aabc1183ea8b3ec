/// 内部实现模块
mod internal;

#[cfg(test)]
mod tests;

/// 导出核心入口：下载分发器与文件卡片
pub use internal::card::structs::file_card::FileCard;
pub use internal::dispatcher::structs::download_dispatcher::DownloadDispatcher;

pub mod auth {
    use crate::internal;
    pub use internal::auth::structs::session_auth::SessionAuth;
}

/// 后端配置与下载地址构造，纯函数，不做任何网络访问
pub mod download_url {
    use crate::internal;
    pub use internal::download_url::functions::construct_download_url::*;
    pub use internal::download_url::structs::backend_config::*;
}

/// 文件描述（后端文档的只读视图）
pub mod file_descriptor {
    use crate::internal;
    pub use internal::file_descriptor::structs::*;
}

/// 宿主环境抽象：新窗口导航、对象 URL、临时下载锚点
pub mod host {
    use crate::internal;
    pub use internal::host::structs::*;
    pub use internal::host::traits::*;
}

pub mod dispatcher {
    use crate::internal;
    pub use internal::dispatcher::structs::*;
    pub use internal::dispatcher::traits::*;
}

pub mod card {
    use crate::internal;
    pub use internal::card::structs::*;
}

pub mod states {
    use crate::internal;
    pub use internal::states::reactive::*;
}
