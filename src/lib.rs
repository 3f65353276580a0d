//! mkenv - 按主机名创建隔离的 Python 虚拟环境
//!
//! 流程：推导环境目录 → `python -m venv` → 升级 pip/pip-tools →
//! pip-compile 生成锁文件 → pip-sync 同步 → 打印激活命令

// CLI 定义
pub mod cli;

// 配置
pub mod config;

// 环境创建与依赖安装
pub mod core;

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use error::{MkenvError, Result};
pub use types::{OutputMode, Platform};
