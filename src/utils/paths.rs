//! 环境目录的命名与路径布局
//!
//! 目录名只由主机名决定，同一台机器上多次运行得到同一个路径。

use crate::error::{MkenvError, Result};
use crate::types::Platform;
use std::path::{Path, PathBuf};

/// 环境目录名前缀
pub const ENV_PREFIX: &str = "python-env-";

/// 主机名规范化：取第一个 `.` 之前的短名，转小写，空格换成 `-`，
/// 只保留 ASCII 字母、数字、`-` 和 `_`
pub fn sanitize_host_name(host: &str) -> String {
    let short = host.split('.').next().unwrap_or_default();
    short
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// 由主机名得到环境目录名
pub fn env_dir_name(host: &str) -> String {
    format!("{ENV_PREFIX}{}", sanitize_host_name(host))
}

/// 读取本机主机名，读取失败时返回空串
#[cfg(unix)]
pub fn local_host_name() -> String {
    match nix::unistd::gethostname() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, "无法读取主机名");
            String::new()
        }
    }
}

/// 读取本机主机名，读取失败时返回空串
#[cfg(not(unix))]
pub fn local_host_name() -> String {
    std::env::var("COMPUTERNAME").unwrap_or_default()
}

/// 默认基础目录：当前可执行文件所在目录
pub fn default_base_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    parent_dir(&exe)
}

fn parent_dir(path: &Path) -> Result<PathBuf> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            MkenvError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("无法确定 {} 的所在目录", path.display()),
            ))
        })
}

/// 环境目录布局，启动时计算一次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLayout {
    root: PathBuf,
    platform: Platform,
}

impl EnvLayout {
    pub fn new(base_dir: &Path, host: &str, platform: Platform) -> Self {
        Self {
            root: base_dir.join(env_dir_name(host)),
            platform,
        }
    }

    /// 环境根目录
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// 可执行文件目录 (`Scripts` 或 `bin`)
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join(self.platform.scripts_dir())
    }

    /// 环境内某个工具的完整路径，Windows 上自动加 `.exe`
    pub fn executable(&self, name: &str) -> PathBuf {
        self.bin_dir()
            .join(format!("{name}{}", self.platform.exe_suffix()))
    }

    /// 激活当前环境的 shell 命令
    pub fn activation_hint(&self) -> String {
        match self.platform {
            Platform::Windows => format!(" {}\\Scripts\\activate.bat", self.root.display()),
            Platform::Posix => format!(" . {}/bin/activate", self.root.display()),
        }
    }
}
