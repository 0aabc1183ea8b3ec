use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::descriptor_error::DescriptorError;
use super::file_type::FileType;

/// 文件所有者，仅用于展示。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOwner {
    #[serde(default)]
    pub full_name: Option<String>,
}

/// 文件描述：后端存储文档的只读视图。
///
/// 下载流程只读取 `bucket_file_id` / `name` / `file_type` / `size`，其余字段供卡片展示。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    #[serde(rename = "$id", default)]
    pub id: Option<String>,
    pub bucket_file_id: String, // 用于构造下载地址，不校验格式
    pub name: String,           // 另存为的文件名
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub size: u64, // 字节
    #[serde(default)]
    pub owner: Option<FileOwner>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub url: Option<String>, // 缩略图 / 预览地址
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl FileDescriptor {
    pub fn new(
        bucket_file_id: impl Into<String>,
        name: impl Into<String>,
        file_type: FileType,
        size: u64,
    ) -> Self {
        Self {
            id: None,
            bucket_file_id: bucket_file_id.into(),
            name: name.into(),
            file_type,
            size,
            owner: None,
            extension: None,
            url: None,
            created_at: None,
        }
    }

    pub fn with_owner(mut self, full_name: impl Into<String>) -> Self {
        self.owner = Some(FileOwner {
            full_name: Some(full_name.into()),
        });
        self
    }

    /// 从后端文档 JSON 解析；`null` 视为没有文件数据。
    pub fn from_document(document: serde_json::Value) -> Result<Self, DescriptorError> {
        if document.is_null() {
            return Err(DescriptorError::Missing);
        }
        Ok(serde_json::from_value(document)?)
    }

    /// 所有者姓名，空白视为缺失。
    pub fn owner_name(&self) -> Option<&str> {
        self.owner
            .as_ref()
            .and_then(|o| o.full_name.as_deref())
            .filter(|n| !n.trim().is_empty())
    }

    /// UI 边界校验：卡片只为带所有者姓名的文件构建。
    pub fn validate(&self) -> Result<(), DescriptorError> {
        match self.owner_name() {
            Some(_) => Ok(()),
            None => Err(DescriptorError::MissingOwner),
        }
    }
}
