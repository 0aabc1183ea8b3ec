//! 宿主环境抽象。
//!
//! 分发器不直接接触窗口或文档，而是通过这里的 trait 完成两件事：
//! - **直接导航**：[`Navigator`] 在新的、无引用关系的上下文中打开下载地址；
//! - **缓冲保存**：[`ObjectUrlRegistry`] 为内存中的字节生成短期对象 URL，
//!   [`TransientAnchor`] 把临时锚点挂到 [`SaveSurface`] 上触发保存，作用域结束即移除。
//!
//! 生产实现为 [`SystemNavigator`]（调用系统 URL 打开程序）与 [`DiskSaveSurface`]（写入下载目录）。
//!
//! [`Navigator`]: traits::navigator::Navigator
//! [`SaveSurface`]: traits::save_surface::SaveSurface
//! [`ObjectUrlRegistry`]: structs::object_url::ObjectUrlRegistry
//! [`TransientAnchor`]: structs::transient_anchor::TransientAnchor
//! [`SystemNavigator`]: structs::system_navigator::SystemNavigator
//! [`DiskSaveSurface`]: structs::disk_save_surface::DiskSaveSurface

pub mod structs;
pub mod traits;
