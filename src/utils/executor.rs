//! 外部命令执行器
//!
//! 所有子进程都同步执行、不设超时。`CommandRunner` 是测试替身的接缝。

use crate::error::{MkenvError, Result};
use crate::types::OutputMode;
use std::ffi::OsString;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// 一次外部命令调用：程序路径 + 参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// 程序文件名 (不含目录)，用于测试断言和日志
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// 外部命令执行接口
pub trait CommandRunner {
    /// 执行命令并等待结束，非零退出码视为失败
    fn run(&self, spec: &CommandSpec, output: OutputMode) -> Result<()>;

    /// 执行命令并返回 stdout + stderr 文本
    fn capture(&self, spec: &CommandSpec) -> Result<String>;
}

/// 真实的子进程执行器
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec, output: OutputMode) -> Result<()> {
        tracing::debug!(command = %spec, ?output, "执行命令");

        let status = spec
            .to_command()
            .stdin(Stdio::null())
            .stdout(output.stdio())
            .stderr(output.stdio())
            .status()
            .map_err(|e| spawn_error(&spec.program, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(MkenvError::CommandFailed {
                command: spec.to_string(),
                code: status.code(),
            })
        }
    }

    fn capture(&self, spec: &CommandSpec) -> Result<String> {
        tracing::debug!(command = %spec, "执行命令 (捕获输出)");

        let Output {
            status,
            stdout,
            stderr,
        } = spec
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(&spec.program, e))?;

        if !status.success() {
            return Err(MkenvError::CommandFailed {
                command: spec.to_string(),
                code: status.code(),
            });
        }

        let mut text = String::from_utf8_lossy(&stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&stderr));
        Ok(text)
    }
}

/// 启动失败时区分权限问题和找不到程序
fn spawn_error(program: &Path, err: std::io::Error) -> MkenvError {
    match err.kind() {
        ErrorKind::PermissionDenied => MkenvError::PermissionDenied(program.to_path_buf()),
        ErrorKind::NotFound => MkenvError::CommandNotFound(program.to_path_buf()),
        _ => MkenvError::Io(err),
    }
}
