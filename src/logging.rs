//! tracing 初始化
//!
//! 日志只写 stderr，stdout 留给路径查询等可被脚本解析的输出。

use tracing_subscriber::{EnvFilter, prelude::*};

/// 日志过滤环境变量
pub const ENV_LOG: &str = "MKENV_LOG";

/// 初始化 tracing。重复调用无副作用。
pub fn init(verbose: bool) {
    let default_level = if verbose { "mkenv=debug" } else { "mkenv=warn" };
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
