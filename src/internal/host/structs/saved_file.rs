use std::path::PathBuf;

/// 一次成功保存的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub path: PathBuf,
    pub size: u64,
}
