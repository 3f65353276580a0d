//! 测试工具模块
//!
//! 记录调用的假执行器，用来在不启动子进程的情况下验证流程

use crate::error::{MkenvError, Result};
use crate::types::OutputMode;
use crate::utils::executor::{CommandRunner, CommandSpec};
use std::cell::RefCell;

/// 失败方式
#[derive(Debug, Clone)]
enum Fault {
    Exit(String),
    Denied(String),
}

/// 记录每次调用，可按程序名让 run 失败 (capture 总是成功)
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<(CommandSpec, OutputMode)>>,
    fault: Option<Fault>,
    /// capture 的返回内容
    pub captured: String,
}

impl RecordingRunner {
    /// 指定程序返回非零退出码
    pub fn failing_on(program: &str) -> Self {
        Self {
            fault: Some(Fault::Exit(program.to_string())),
            ..Self::default()
        }
    }

    /// 指定程序启动时权限不足
    pub fn denying(program: &str) -> Self {
        Self {
            fault: Some(Fault::Denied(program.to_string())),
            ..Self::default()
        }
    }

    /// capture 返回给定版本字符串
    pub fn with_version(version: &str) -> Self {
        Self {
            captured: version.to_string(),
            ..Self::default()
        }
    }

    /// 已调用的程序名 (按顺序)
    pub fn programs(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(spec, _)| spec.program_name())
            .collect()
    }

    pub fn modes(&self) -> Vec<OutputMode> {
        self.calls.borrow().iter().map(|(_, mode)| *mode).collect()
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().iter().map(|(spec, _)| spec.clone()).collect()
    }

    fn check(&self, spec: &CommandSpec) -> Result<()> {
        let name = spec.program_name();
        match &self.fault {
            Some(Fault::Exit(p)) if *p == name => Err(MkenvError::CommandFailed {
                command: spec.to_string(),
                code: Some(1),
            }),
            Some(Fault::Denied(p)) if *p == name => {
                Err(MkenvError::PermissionDenied(spec.program.clone()))
            }
            _ => Ok(()),
        }
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec, output: OutputMode) -> Result<()> {
        self.calls.borrow_mut().push((spec.clone(), output));
        self.check(spec)
    }

    fn capture(&self, spec: &CommandSpec) -> Result<String> {
        self.calls
            .borrow_mut()
            .push((spec.clone(), OutputMode::Discard));
        Ok(self.captured.clone())
    }
}
