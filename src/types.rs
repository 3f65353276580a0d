//! 核心数据结构定义

use std::fmt;
use std::process::Stdio;

/// 目标平台，决定可执行文件目录和激活命令的形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Posix,
}

impl Platform {
    /// 当前编译目标对应的平台
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// 环境内可执行文件所在的目录名
    pub fn scripts_dir(self) -> &'static str {
        match self {
            Platform::Windows => "Scripts",
            Platform::Posix => "bin",
        }
    }

    /// 可执行文件后缀
    pub fn exe_suffix(self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            Platform::Posix => "",
        }
    }

    /// 是否为 venv 传入 --symlinks
    pub fn supports_symlinks(self) -> bool {
        matches!(self, Platform::Posix)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::Posix => write!(f, "posix"),
        }
    }
}

/// 子进程输出的去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// 直接输出到控制台 (--verbose)
    Inherit,
    /// 丢弃 (默认)
    Discard,
}

impl OutputMode {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            OutputMode::Inherit
        } else {
            OutputMode::Discard
        }
    }

    /// 为 stdout/stderr 各生成一个 Stdio
    pub fn stdio(self) -> Stdio {
        match self {
            OutputMode::Inherit => Stdio::inherit(),
            OutputMode::Discard => Stdio::null(),
        }
    }
}
