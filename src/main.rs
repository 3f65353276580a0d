//! mkenv 主程序入口
//!
//! - 入口代码简洁，逻辑委托给各模块
//! - 路径查询只输出一行路径，便于脚本解析
//! - 任何错误都以非零退出码结束

use clap::Parser;
use mkenv::cli::{Action, Cli};
use mkenv::config::Settings;
use mkenv::core::{Provisioner, provision};
use mkenv::utils::executor::SystemRunner;
use mkenv::utils::paths::{self, EnvLayout};
use mkenv::{OutputMode, Platform, Result, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        e.report(cli.verbose);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match cli.action() {
        // 路径查询只需要 base_dir / host_name，配置问题不影响退出码
        Action::PrintName => {
            let layout = init_layout(&Settings::load_for_query())?;
            println!("{}", layout.root().display());
        }
        Action::PrintPath => {
            let layout = init_layout(&Settings::load_for_query())?;
            println!("{}", layout.bin_dir().display());
        }
        Action::Provision => {
            let settings = Settings::load()?;
            let layout = init_layout(&settings)?;
            let python = provision::resolve_python(&settings)?;
            let output = OutputMode::from_verbose(cli.verbose);
            Provisioner::new(&SystemRunner, &layout, &settings, output).run(&python)?;
        }
    }

    Ok(())
}

/// 计算环境目录布局 (进程内只算一次)
fn init_layout(settings: &Settings) -> Result<EnvLayout> {
    let base_dir = match &settings.base_dir {
        Some(dir) => dir.clone(),
        None => paths::default_base_dir()?,
    };
    let host = match &settings.host_name {
        Some(host) => host.clone(),
        None => paths::local_host_name(),
    };
    let platform = Platform::current();
    let layout = EnvLayout::new(&base_dir, &host, platform);
    tracing::debug!(root = %layout.root().display(), %host, %platform, "环境目录");
    Ok(layout)
}
