//! 文件描述领域模块：后端文档中下载流程需要读取的字段，在 UI 边界处校验。

pub mod structs;
