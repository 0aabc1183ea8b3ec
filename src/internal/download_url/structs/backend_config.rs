use std::env;

use thiserror::Error;
use url::Url;

/// 读取后端配置时使用的环境变量名
pub mod env_var_names {
    /// 存储服务根地址，例如 `https://cloud.example.com/v1`
    pub const STORAGE_ENDPOINT: &str = "STORAGE_ENDPOINT";
    pub const STORAGE_PROJECT_ID: &str = "STORAGE_PROJECT_ID";
    pub const STORAGE_BUCKET_ID: &str = "STORAGE_BUCKET_ID";
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("缺少环境变量: {0}")]
    MissingVar(&'static str),

    #[error("服务地址为空")]
    EmptyEndpoint,

    #[error("服务地址格式错误: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("服务地址不能作为基础路径: {0}")]
    CannotBeBase(String),

    #[error("{field} 不能为空")]
    EmptyField { field: &'static str },
}

/// 后端存储服务配置：根地址、项目、存储桶。
///
/// `endpoint` 在构造时规范化为以 `/` 结尾，便于后续 join。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub endpoint: Url,
    pub project_id: String,
    pub bucket_id: String,
}

impl BackendConfig {
    pub fn new(
        endpoint: &str,
        project_id: &str,
        bucket_id: &str,
    ) -> Result<Self, ConfigError> {
        if project_id.trim().is_empty() {
            return Err(ConfigError::EmptyField { field: "project_id" });
        }
        if bucket_id.trim().is_empty() {
            return Err(ConfigError::EmptyField { field: "bucket_id" });
        }

        Ok(Self {
            endpoint: format_endpoint(endpoint)?,
            project_id: project_id.trim().to_string(),
            bucket_id: bucket_id.trim().to_string(),
        })
    }

    /// 从环境变量读取，变量名见 [`env_var_names`]。
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = read_var(env_var_names::STORAGE_ENDPOINT)?;
        let project_id = read_var(env_var_names::STORAGE_PROJECT_ID)?;
        let bucket_id = read_var(env_var_names::STORAGE_BUCKET_ID)?;
        Self::new(&endpoint, &project_id, &bucket_id)
    }
}

fn read_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn format_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(ConfigError::EmptyEndpoint);
    }

    let mut url = Url::parse(endpoint)?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::CannotBeBase(endpoint.to_string()));
    }

    if !url.path().ends_with('/') {
        let new_path = format!("{}/", url.path());
        url.set_path(&new_path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}
