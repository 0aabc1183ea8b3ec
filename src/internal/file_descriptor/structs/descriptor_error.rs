use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("没有可用的文件数据")]
    Missing,

    #[error("文件数据无效：缺少所有者信息")]
    MissingOwner,

    #[error("文件数据解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}
