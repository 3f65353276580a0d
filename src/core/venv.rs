//! 虚拟环境创建
//!
//! 固定选项：不继承系统 site-packages，自带 pip，支持时使用符号链接。
//! 失败直接向上传播，不在这里打印诊断。

use crate::error::Result;
use crate::types::OutputMode;
use crate::utils::executor::{CommandRunner, CommandSpec};
use crate::utils::paths::EnvLayout;
use std::path::Path;

/// 构造 `python -m venv` 命令
pub fn venv_command(python: &Path, layout: &EnvLayout) -> CommandSpec {
    let mut spec = CommandSpec::new(python).args(["-m", "venv"]);
    if layout.platform().supports_symlinks() {
        spec = spec.arg("--symlinks");
    }
    spec.arg(layout.root())
}

/// 在 layout 指定的位置创建环境；目录已存在时原样复用
pub fn create(
    runner: &dyn CommandRunner,
    python: &Path,
    layout: &EnvLayout,
    output: OutputMode,
) -> Result<()> {
    tracing::info!(root = %layout.root().display(), "创建虚拟环境");
    runner.run(&venv_command(python, layout), output)
}
