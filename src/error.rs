//! 错误处理模块 (明确抛出异常，不做重试)

use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MkenvError {
    #[error("文件IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("不支持的 Python 版本: {found} (需要 3.6+)")]
    UnsupportedRuntime { found: String },

    #[error("找不到 Python 解释器: {0}")]
    InterpreterNotFound(String),

    #[error("命令未找到: {}", .0.display())]
    CommandNotFound(PathBuf),

    #[error("命令执行失败 ({}): {command}", exit_label(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("权限不足: {}", .0.display())]
    PermissionDenied(PathBuf),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("退出码 {code}"),
        None => "被信号终止".to_string(),
    }
}

impl From<toml::de::Error> for MkenvError {
    fn from(err: toml::de::Error) -> Self {
        MkenvError::Config(err.to_string())
    }
}

/// 详细的错误报告函数
impl MkenvError {
    /// 报告错误，支持详细/安静模式
    /// verbose = true: 详细错误链
    /// verbose = false: 关键信息
    pub fn report(&self, verbose: bool) {
        if verbose {
            eprintln!("❌ 错误: {}", self);

            if let Some(source) = self.source() {
                eprintln!("  └─ 原因: {}", source);
                let mut current = source.source();
                while let Some(next) = current {
                    eprintln!("     └─ {}", next);
                    current = next.source();
                }
            }
        } else {
            match self {
                MkenvError::Io(err) => eprintln!("文件错误: {}", err),
                MkenvError::PermissionDenied(path) => {
                    eprintln!("权限被拒绝: {}", path.display())
                }
                MkenvError::CommandNotFound(path) => eprintln!("命令未找到: {}", path.display()),
                _ => eprintln!("错误: {}", self),
            }
        }
    }
}

/// 简化 Result 类型别名
pub type Result<T> = std::result::Result<T, MkenvError>;
