//! # ReactiveProperty
//!
//! 基于 [`tokio::sync::watch`] 的响应式属性，分发器用它发布下载进度与进行中的文件集合，
//! UI 侧 `watch()` 后即可在值变化时刷新（例如下载期间禁用下载按钮）。
//!
//! ## 使用示例
//! ```rust,no_run
//! use bucket_download::states::ReactiveProperty;
//!
//! let prop = ReactiveProperty::new(0u64);
//! prop.update(1024);
//! assert_eq!(prop.get_current(), Some(1024));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::watch;
use tokio::sync::watch::error::RecvError;

#[derive(Debug, Error)]
pub enum ReactivePropertyError {
    /// 属性已被销毁，监听器不会再收到新值
    #[error("属性已被销毁")]
    Destroyed,

    #[error("接收失败: {0}")]
    RecvError(#[from] RecvError),
}

/// 共享内核：发送端 + 销毁标志。最后一个句柄释放时向监听者广播 `None`。
#[derive(Debug)]
struct Inner<T> {
    sender: watch::Sender<Option<T>>,
    is_dropped: AtomicBool,
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        self.is_dropped.store(true, Ordering::Relaxed);
        let _ = self.sender.send(None);
    }
}

/// 响应式属性：读写不阻塞，克隆得到的是同一份状态的句柄。
#[derive(Clone, Debug)]
pub struct ReactiveProperty<T: Clone + Send + Sync> {
    inner: Arc<Inner<T>>,
    cache_receiver: watch::Receiver<Option<T>>,
}

impl<T> ReactiveProperty<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(value: T) -> Self {
        let (sender, cache_receiver) = watch::channel(Some(value));
        Self {
            inner: Arc::new(Inner {
                sender,
                is_dropped: AtomicBool::new(false),
            }),
            cache_receiver,
        }
    }

    /// 替换当前值并通知所有监听者。
    pub fn update(&self, new_value: T) -> &Self {
        if !self.inner.is_dropped.load(Ordering::Relaxed) {
            let _ = self.inner.sender.send(Some(new_value));
        }
        self
    }

    /// 当前值的快照。
    pub fn get_current(&self) -> Option<T> {
        self.cache_receiver.borrow().as_ref().cloned()
    }

    /// 创建监听器，`changed().await` 等待下一次变化。
    pub fn watch(&self) -> PropertyWatcher<T> {
        PropertyWatcher {
            receiver: self.inner.sender.subscribe(),
        }
    }
}

/// 属性监听器。
pub struct PropertyWatcher<T> {
    receiver: watch::Receiver<Option<T>>,
}

impl<T> PropertyWatcher<T>
where
    T: Clone + Send + Sync,
{
    pub async fn changed(&mut self) -> Result<T, ReactivePropertyError> {
        self.receiver.changed().await?;
        match self.receiver.borrow_and_update().as_ref() {
            None => Err(ReactivePropertyError::Destroyed),
            Some(value) => Ok(value.clone()),
        }
    }

    pub fn borrow(&self) -> Option<T> {
        self.receiver.borrow().clone()
    }
}
