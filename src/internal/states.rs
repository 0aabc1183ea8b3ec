//! 响应式状态：下载进度、进行中的文件集合等需要被 UI 监听的值。

pub mod reactive;
