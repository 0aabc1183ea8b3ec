//! 进行中的下载集合：去重重复点击，并把集合发布给 UI（可据此禁用下载按钮）。

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use crate::internal::states::reactive::ReactiveProperty;

#[derive(Debug)]
pub struct InFlightSet {
    counts: Mutex<HashMap<String, usize>>,
    state: ReactiveProperty<HashSet<String>>,
}

impl Default for InFlightSet {
    fn default() -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
            state: ReactiveProperty::new(HashSet::new()),
        }
    }
}

impl InFlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一次下载。`exclusive` 为 true 且该文件已在进行时返回 `None`。
    ///
    /// 返回的槽位 drop 时自动注销，出错或 panic 都不会让文件一直处于占用状态。
    pub fn acquire(&self, bucket_file_id: &str, exclusive: bool) -> Option<InFlightSlot<'_>> {
        let mut counts = self.counts();
        let count = counts.entry(bucket_file_id.to_string()).or_insert(0);
        if exclusive && *count > 0 {
            return None;
        }
        *count += 1;
        self.publish(&counts);
        drop(counts);

        Some(InFlightSlot {
            set: self,
            bucket_file_id: bucket_file_id.to_string(),
        })
    }

    pub fn contains(&self, bucket_file_id: &str) -> bool {
        self.counts().contains_key(bucket_file_id)
    }

    /// 可监听的进行中集合。
    pub fn state(&self) -> ReactiveProperty<HashSet<String>> {
        self.state.clone()
    }

    fn release(&self, bucket_file_id: &str) {
        let mut counts = self.counts();
        if let Some(count) = counts.get_mut(bucket_file_id) {
            *count -= 1;
            if *count == 0 {
                counts.remove(bucket_file_id);
            }
        }
        self.publish(&counts);
    }

    /// 在持有 `counts` 锁时发布，保证发布顺序与修改顺序一致。
    fn publish(&self, counts: &HashMap<String, usize>) {
        let snapshot: HashSet<String> = counts.keys().cloned().collect();
        self.state.update(snapshot);
    }

    fn counts(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        self.counts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// 进行中槽位，drop 即注销。
#[derive(Debug)]
pub struct InFlightSlot<'a> {
    set: &'a InFlightSet,
    bucket_file_id: String,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.set.release(&self.bucket_file_id);
    }
}
