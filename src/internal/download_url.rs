//! 下载地址：后端配置 + 纯函数构造，不做网络访问。

pub mod functions;
pub mod structs;
