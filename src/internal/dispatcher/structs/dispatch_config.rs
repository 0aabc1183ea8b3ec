use serde::{Deserialize, Serialize};

use crate::internal::file_descriptor::structs::file_type::FileType;

/// 超过该大小（字节）的文件直接导航，不进内存：50 MiB
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 50 * 1024 * 1024;

/// 卡片上不触发下载的区域（操作菜单）
pub const DEFAULT_EXCLUDED_REGION: &str = "action-dropdown";

/// 分发配置。可从配置文件反序列化，缺省字段取默认值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// 严格大于该值才走直接导航，等于时仍缓冲下载
    pub large_file_threshold: u64,
    /// 无论大小都直接导航的类型
    pub direct_types: Vec<FileType>,
    /// 同一文件下载进行中时忽略重复点击
    pub dedupe_in_flight: bool,
    /// 卡片点击的排除区域（class 名）
    pub excluded_region: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            large_file_threshold: DEFAULT_LARGE_FILE_THRESHOLD,
            direct_types: vec![FileType::Video],
            dedupe_in_flight: true,
            excluded_region: DEFAULT_EXCLUDED_REGION.to_string(),
        }
    }
}

impl DispatchConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
