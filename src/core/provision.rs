//! 完整的环境供给流程：检查解释器版本 → 创建环境 → 安装依赖

use crate::config::Settings;
use crate::core::{install, venv};
use crate::error::{MkenvError, Result};
use crate::types::OutputMode;
use crate::utils::executor::{CommandRunner, CommandSpec};
use crate::utils::paths::EnvLayout;
use std::path::{Path, PathBuf};

/// 支持的最低 Python 版本
pub const MIN_PYTHON: (u32, u32) = (3, 6);

/// 从 `python --version` 的输出中解析主次版本号
pub fn parse_python_version(text: &str) -> Option<(u32, u32)> {
    let rest = text.trim().strip_prefix("Python")?.trim();
    let mut parts = rest.split(|c: char| c == '.' || c.is_whitespace());
    let major = parts.next()?.parse().ok()?;
    let minor = parts
        .next()?
        .chars()
        .take_while(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .ok()?;
    Some((major, minor))
}

/// 确认基础解释器版本满足要求
pub fn check_runtime(runner: &dyn CommandRunner, python: &Path) -> Result<()> {
    let text = runner.capture(&CommandSpec::new(python).arg("--version"))?;
    let found = text.trim().to_string();
    match parse_python_version(&found) {
        Some(version) if version >= MIN_PYTHON => {
            tracing::debug!(%found, "解释器版本检查通过");
            Ok(())
        }
        _ => Err(MkenvError::UnsupportedRuntime { found }),
    }
}

/// 解析基础解释器：优先使用配置，否则在 PATH 中查找 python3 / python
pub fn resolve_python(settings: &Settings) -> Result<PathBuf> {
    if let Some(python) = &settings.python {
        return Ok(python.clone());
    }
    ["python3", "python"]
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or_else(|| MkenvError::InterpreterNotFound("PATH 中没有 python3 或 python".to_string()))
}

/// 环境供给器
pub struct Provisioner<'a> {
    runner: &'a dyn CommandRunner,
    layout: &'a EnvLayout,
    settings: &'a Settings,
    output: OutputMode,
}

impl<'a> Provisioner<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        layout: &'a EnvLayout,
        settings: &'a Settings,
        output: OutputMode,
    ) -> Self {
        Self {
            runner,
            layout,
            settings,
            output,
        }
    }

    /// 创建环境并安装依赖。中途失败时保留已创建的目录。
    pub fn run(&self, python: &Path) -> Result<()> {
        check_runtime(self.runner, python)?;

        println!("Creating virtualenv  {}", self.layout.root().display());
        venv::create(self.runner, python, self.layout, self.output)?;

        install::install_requirements(self.runner, self.layout, self.settings, self.output)
    }
}
