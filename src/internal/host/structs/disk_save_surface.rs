//! 写入本地目录的保存表面：激活锚点时按 `download` 名把对象 URL 指向的字节落盘。

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::internal::host::structs::host_error::SaveError;
use crate::internal::host::structs::object_url::ObjectUrlRegistry;
use crate::internal::host::structs::saved_file::SavedFile;
use crate::internal::host::traits::save_surface::{AnchorElement, AnchorId, SaveSurface};

/// 同名文件重命名的最大尝试次数
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// 保存到本地目录。同名文件存在时改名为 `name (1).ext`、`name (2).ext`……
#[derive(Debug)]
pub struct DiskSaveSurface {
    dir: PathBuf,
    registry: ObjectUrlRegistry,
    anchors: Mutex<HashMap<AnchorId, AnchorElement>>,
    next_id: AtomicU64,
}

impl DiskSaveSurface {
    /// `registry` 必须与分发器使用的是同一个，否则锚点的 href 无法解析。
    pub fn new(dir: impl Into<PathBuf>, registry: ObjectUrlRegistry) -> Self {
        Self {
            dir: dir.into(),
            registry,
            anchors: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// 使用系统下载目录。
    pub fn in_download_dir(registry: ObjectUrlRegistry) -> Result<Self, SaveError> {
        let dir = dirs::download_dir().ok_or(SaveError::NoDownloadDir)?;
        Ok(Self::new(dir, registry))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 按 id 查看挂载中的锚点。
    pub fn anchor(&self, id: AnchorId) -> Option<AnchorElement> {
        self.anchors().get(&id).cloned()
    }

    /// 当前挂载中的锚点数量。
    pub fn attached_count(&self) -> usize {
        self.anchors().len()
    }

    fn anchors(&self) -> MutexGuard<'_, HashMap<AnchorId, AnchorElement>> {
        self.anchors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SaveSurface for DiskSaveSurface {
    fn attach(&self, anchor: AnchorElement) -> AnchorId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.anchors().insert(id, anchor);
        id
    }

    async fn activate(&self, id: AnchorId) -> Result<SavedFile, SaveError> {
        let anchor = self.anchor(id).ok_or(SaveError::AnchorDetached(id))?;

        let file_name = sanitize_file_name(&anchor.download)?;
        let blob = self.registry.resolve(&anchor.href)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(SaveError::CreateDir)?;

        let (path, mut file) = create_unique(&self.dir.join(file_name)).await?;
        file.write_all(&blob).await.map_err(SaveError::WriteFile)?;
        file.flush().await.map_err(SaveError::WriteFile)?;

        tracing::info!(path = %path.display(), size = blob.len(), "file saved");
        Ok(SavedFile {
            path,
            size: blob.len() as u64,
        })
    }

    fn detach(&self, id: AnchorId) {
        self.anchors().remove(&id);
    }
}

/// 拒绝会逃出保存目录的名字。
fn sanitize_file_name(name: &str) -> Result<&str, SaveError> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\', '\0']);

    if invalid {
        return Err(SaveError::InvalidFileName(name.to_string()));
    }
    Ok(trimmed)
}

/// 以 `create_new` 占用文件名，已存在则依次尝试 `name (n).ext`。
///
/// 占用与创建是同一次系统调用，并发保存同名文件时各自拿到不同路径。
async fn create_unique(path: &Path) -> Result<(PathBuf, File), SaveError> {
    if let Some(file) = create_new(path).await? {
        return Ok((path.to_path_buf(), file));
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| SaveError::InvalidFileName(path.display().to_string()))?;
    let extension = path.extension().and_then(|e| e.to_str());
    let parent = path.parent().unwrap_or_else(|| Path::new(""));

    for i in 1..=MAX_RENAME_ATTEMPTS {
        let new_name = match extension {
            Some(ext) => format!("{stem} ({i}).{ext}"),
            None => format!("{stem} ({i})"),
        };
        let candidate = parent.join(new_name);
        if let Some(file) = create_new(&candidate).await? {
            return Ok((candidate, file));
        }
    }

    Err(SaveError::NameExhausted(path.to_path_buf()))
}

/// 文件已存在时返回 `None`。
async fn create_new(path: &Path) -> Result<Option<File>, SaveError> {
    match OpenOptions::new().write(true).create_new(true).open(path).await {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(SaveError::WriteFile(e)),
    }
}
