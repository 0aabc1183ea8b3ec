//! 文件卡片：整张卡片可点击下载，操作菜单区域除外；另有一个显式的下载按钮。

pub mod structs;
