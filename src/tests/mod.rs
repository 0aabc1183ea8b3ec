//! 测试模块入口：公共桩件在 `lib` 子模块，按领域划分的测试在 `internal`。

#[cfg(test)]
pub use lib::*;
