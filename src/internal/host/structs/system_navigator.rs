use async_trait::async_trait;
use tokio::process::Command;
use url::Url;

use crate::internal::host::structs::host_error::NavigateError;
use crate::internal::host::traits::navigator::Navigator;

/// 调用系统默认的 URL 打开程序（浏览器）。
///
/// 新进程与本进程之间没有任何句柄关联，天然满足无引用打开。
#[derive(Debug, Clone, Default)]
pub struct SystemNavigator;

impl SystemNavigator {
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "windows")]
    fn command(url: &Url) -> (&'static str, Command) {
        let mut cmd = Command::new("cmd");
        // start 的第一个带引号参数是窗口标题，这里给空串
        cmd.args(["/C", "start", ""]).arg(url.as_str());
        ("cmd", cmd)
    }

    #[cfg(target_os = "macos")]
    fn command(url: &Url) -> (&'static str, Command) {
        let mut cmd = Command::new("open");
        cmd.arg(url.as_str());
        ("open", cmd)
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    fn command(url: &Url) -> (&'static str, Command) {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url.as_str());
        ("xdg-open", cmd)
    }
}

#[async_trait]
impl Navigator for SystemNavigator {
    async fn open_unreferenced(&self, url: &Url) -> Result<(), NavigateError> {
        let (program, mut cmd) = Self::command(url);
        let status = cmd
            .status()
            .await
            .map_err(|source| NavigateError::Spawn { program, source })?;

        if !status.success() {
            return Err(NavigateError::ExitStatus {
                program,
                code: status.code(),
            });
        }

        tracing::debug!(program, url = %url, "handed url to system opener");
        Ok(())
    }
}
