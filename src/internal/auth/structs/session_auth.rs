use core::fmt;
use std::sync::Arc;

use reqwest::{Client, cookie::Jar};
use sha2::{Digest, Sha256};
use url::Url;

use crate::internal::download_url::structs::backend_config::BackendConfig;

/// 会话认证结构体
///
/// 该结构体定位
/// - 持有带 cookie 存储的 http 客户端，所有请求都会带上会话 cookie（相当于 `credentials: include`）
/// - 服务端下发的 cookie 写回同一个 jar，后续请求继续生效
///
/// 默认Eq时会匹配endpoint和会话指纹，如果需要单独比较会话，需使用eq_only_session方法
#[derive(Clone)]
pub struct SessionAuth {
    pub client: Client, // 内部是Arc，不需要特殊处理
    pub endpoint: Arc<Url>,
    pub(crate) jar: Arc<Jar>,
    pub(crate) session_fingerprint: Arc<String>, // 只保存哈希，不保存原文
}

impl SessionAuth {
    /// 创建认证结构体；`session_secret` 为空时只依赖服务端后续下发的 cookie。
    pub fn new(
        config: &BackendConfig,
        session_secret: Option<&str>,
    ) -> Result<Self, String> {
        let jar = Arc::new(Jar::default());

        if let Some(secret) = session_secret {
            let cookie = format!(
                "{}={}; Path=/",
                session_cookie_name(&config.project_id),
                secret
            );
            jar.add_cookie_str(&cookie, &config.endpoint);
        }

        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Self {
            client,
            endpoint: Arc::new(config.endpoint.clone()),
            jar,
            session_fingerprint: Arc::new(fingerprint(session_secret.unwrap_or_default())),
        })
    }

    /// 仅比较会话是否相同
    pub fn eq_only_session(&self, other: &Self) -> bool {
        self.session_fingerprint == other.session_fingerprint
    }

    /// 补充一条 cookie（例如登录接口返回的会话），作用域为给定地址。
    pub fn add_cookie(&self, cookie: &str, url: &Url) {
        self.jar.add_cookie_str(cookie, url);
    }
}

/// 会话 cookie 名：`a_session_{project_id}`
pub fn session_cookie_name(project_id: &str) -> String {
    format!("a_session_{}", project_id.to_lowercase())
}

fn fingerprint(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl PartialEq for SessionAuth {
    fn eq(&self, other: &Self) -> bool {
        self.session_fingerprint == other.session_fingerprint
            && self.endpoint == other.endpoint
    }
}

/// 防止debug泄漏会话
impl fmt::Debug for SessionAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionAuth")
            .field("endpoint", &self.endpoint.as_str())
            .field("client", &"<Client with hidden session>")
            .finish()
    }
}
