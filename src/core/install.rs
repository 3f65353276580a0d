//! 依赖安装：升级 pip/pip-tools，pip-compile 生成锁文件，pip-sync 同步
//!
//! 三步依次同步执行，任何一步失败立即终止，不重试。

use crate::config::Settings;
use crate::error::{MkenvError, Result};
use crate::types::OutputMode;
use crate::utils::executor::{CommandRunner, CommandSpec};
use crate::utils::paths::EnvLayout;

/// 第一步要升级的包
pub const BOOTSTRAP_PACKAGES: [&str; 3] = ["pip", "pip-tools", "wheel"];

/// 安装流程中用到的三条命令
#[derive(Debug, Clone)]
pub struct InstallPlan {
    pub upgrade: CommandSpec,
    pub compile: CommandSpec,
    pub sync: CommandSpec,
}

impl InstallPlan {
    pub fn new(layout: &EnvLayout, settings: &Settings) -> Self {
        let upgrade = CommandSpec::new(layout.executable("python"))
            .args(["-m", "pip", "install", "--upgrade"])
            .args(BOOTSTRAP_PACKAGES);

        // --no-build-isolation 绕开 PEP 517 构建隔离
        let compile = CommandSpec::new(layout.executable("pip-compile"))
            .args(["--no-build-isolation", "--upgrade"])
            .args(index_args(settings));

        let sync = CommandSpec::new(layout.executable("pip-sync")).args(index_args(settings));

        Self {
            upgrade,
            compile,
            sync,
        }
    }
}

fn index_args(settings: &Settings) -> Vec<String> {
    let mut args = vec!["-i".to_string(), settings.index_url.clone()];
    if let Some(host) = &settings.trusted_host {
        args.push("--trusted-host".to_string());
        args.push(host.clone());
    }
    args
}

/// 执行安装流程并打印激活提示
pub fn install_requirements(
    runner: &dyn CommandRunner,
    layout: &EnvLayout,
    settings: &Settings,
    output: OutputMode,
) -> Result<()> {
    println!("Checking required packages are installed...");

    let plan = InstallPlan::new(layout, settings);
    if let Err(e) = run_plan(runner, &plan, output) {
        match &e {
            MkenvError::CommandFailed { .. } => println!(
                "ERROR: Could not install required packages using  {}  and  {}",
                plan.compile.program.display(),
                plan.sync.program.display()
            ),
            MkenvError::PermissionDenied(_) => println!(
                "ERROR: Could not run pip-tools due to permission error {}",
                layout.bin_dir().display()
            ),
            _ => {}
        }
        return Err(e);
    }

    println!("Packages up to date...");
    println!(
        "\n Now activate the virtual environment with:\n    {}\n",
        layout.activation_hint()
    );
    Ok(())
}

fn run_plan(runner: &dyn CommandRunner, plan: &InstallPlan, output: OutputMode) -> Result<()> {
    println!("Update pip ... ");
    tracing::info!("升级 pip / pip-tools");
    runner.run(&plan.upgrade, output)?;

    println!("Installing / Refreshing required packages... ");
    println!("Dependency resolution...");
    tracing::info!("pip-compile 生成锁文件");
    runner.run(&plan.compile, output)?;

    println!("Installing/upgrading packages...");
    tracing::info!("pip-sync 同步依赖");
    runner.run(&plan.sync, output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingRunner;
    use crate::types::Platform;
    use std::path::Path;

    fn layout() -> EnvLayout {
        EnvLayout::new(Path::new("/srv"), "host", Platform::Posix)
    }

    fn settings() -> Settings {
        Settings {
            index_url: "http://index.internal:8081/simple".to_string(),
            trusted_host: Some("index.internal".to_string()),
            ..Settings::default()
        }
    }

    #[test]
    fn test_plan_commands() {
        let plan = InstallPlan::new(&layout(), &settings());
        assert_eq!(
            plan.upgrade.to_string(),
            "/srv/python-env-host/bin/python -m pip install --upgrade pip pip-tools wheel"
        );
        assert_eq!(
            plan.compile.to_string(),
            "/srv/python-env-host/bin/pip-compile --no-build-isolation --upgrade \
             -i http://index.internal:8081/simple --trusted-host index.internal"
        );
        assert_eq!(
            plan.sync.to_string(),
            "/srv/python-env-host/bin/pip-sync -i http://index.internal:8081/simple \
             --trusted-host index.internal"
        );
    }

    #[test]
    fn test_trusted_host_omitted_when_unset() {
        let plan = InstallPlan::new(&layout(), &Settings::default());
        assert!(!plan.compile.to_string().contains("--trusted-host"));
        assert!(!plan.sync.to_string().contains("--trusted-host"));
    }

    #[test]
    fn test_windows_plan_uses_exe_tools() {
        let layout = EnvLayout::new(Path::new("C:\\tools"), "host", Platform::Windows);
        let plan = InstallPlan::new(&layout, &settings());
        assert_eq!(plan.upgrade.program_name(), "python.exe");
        assert_eq!(plan.compile.program_name(), "pip-compile.exe");
        assert_eq!(plan.sync.program_name(), "pip-sync.exe");
    }

    #[test]
    fn test_runs_all_steps_in_order() {
        let runner = RecordingRunner::default();
        install_requirements(&runner, &layout(), &settings(), OutputMode::Discard).unwrap();
        assert_eq!(runner.programs(), ["python", "pip-compile", "pip-sync"]);
        assert!(runner.modes().iter().all(|m| *m == OutputMode::Discard));
    }

    #[test]
    fn test_verbose_output_is_forwarded() {
        let runner = RecordingRunner::default();
        install_requirements(&runner, &layout(), &settings(), OutputMode::Inherit).unwrap();
        assert!(runner.modes().iter().all(|m| *m == OutputMode::Inherit));
    }

    #[test]
    fn test_compile_failure_skips_sync() {
        let runner = RecordingRunner::failing_on("pip-compile");
        let err =
            install_requirements(&runner, &layout(), &settings(), OutputMode::Discard).unwrap_err();
        assert!(matches!(err, MkenvError::CommandFailed { .. }));
        assert_eq!(runner.programs(), ["python", "pip-compile"]);
    }

    #[test]
    fn test_upgrade_failure_stops_everything() {
        let runner = RecordingRunner::failing_on("python");
        assert!(install_requirements(&runner, &layout(), &settings(), OutputMode::Discard).is_err());
        assert_eq!(runner.programs(), ["python"]);
    }

    #[test]
    fn test_permission_error_is_propagated() {
        let runner = RecordingRunner::denying("pip-sync");
        let err =
            install_requirements(&runner, &layout(), &settings(), OutputMode::Discard).unwrap_err();
        assert!(matches!(err, MkenvError::PermissionDenied(p) if p.ends_with("pip-sync")));
    }
}
