//! CLI 参数定义

use clap::Parser;

/// mkenv - 按主机名创建 Python 虚拟环境并同步锁定依赖
#[derive(Parser, Debug)]
#[command(
    name = "mkenv",
    version,
    about = "Virtual environment setup script",
    long_about = "在可执行文件旁创建 python-env-<主机名> 虚拟环境，用 pip-tools 编译并同步依赖"
)]
pub struct Cli {
    /// Show package installation output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the environment name and exit
    #[arg(long)]
    pub env_name: bool,

    /// Print the path to the programs in the environment and exit
    #[arg(long)]
    pub env_path: bool,
}

/// 启动时选定的唯一动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// 打印环境目录
    PrintName,
    /// 打印环境内可执行文件目录
    PrintPath,
    /// 创建环境并安装依赖
    Provision,
}

impl Cli {
    /// --env-name 优先于 --env-path
    pub fn action(&self) -> Action {
        if self.env_name {
            Action::PrintName
        } else if self.env_path {
            Action::PrintPath
        } else {
            Action::Provision
        }
    }
}
