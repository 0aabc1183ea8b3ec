use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 文件类别标签，对应后端文档中的 `type` 字段（小写字符串）。
///
/// 未识别的标签保留原文，放在 [`FileType::Other`] 中。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileType {
    Video,
    Image,
    Document,
    Audio,
    Other(String),
}

impl FileType {
    pub fn as_str(&self) -> &str {
        match self {
            FileType::Video => "video",
            FileType::Image => "image",
            FileType::Document => "document",
            FileType::Audio => "audio",
            FileType::Other(tag) => tag,
        }
    }
}

impl From<&str> for FileType {
    fn from(tag: &str) -> Self {
        match tag {
            "video" => FileType::Video,
            "image" => FileType::Image,
            "document" => FileType::Document,
            "audio" => FileType::Audio,
            other => FileType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FileType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FileType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(FileType::from(tag.as_str()))
    }
}
