//! 配置加载
//!
//! 优先级：默认值 < TOML 文件 < 环境变量。
//! 包索引地址和信任主机属于部署信息，不写死在代码里。

use crate::error::{MkenvError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认包索引
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/simple";

pub const ENV_CONFIG: &str = "MKENV_CONFIG";
pub const ENV_INDEX_URL: &str = "MKENV_INDEX_URL";
pub const ENV_TRUSTED_HOST: &str = "MKENV_TRUSTED_HOST";
pub const ENV_PYTHON: &str = "MKENV_PYTHON";
pub const ENV_BASE_DIR: &str = "MKENV_BASE_DIR";
pub const ENV_HOSTNAME: &str = "MKENV_HOSTNAME";

/// 配置文件内容，所有字段可选
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub index_url: Option<String>,
    pub trusted_host: Option<String>,
    pub python: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
    pub host_name: Option<String>,
}

/// 合并后的运行配置
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// pip-compile / pip-sync 使用的包索引
    pub index_url: String,
    /// 跳过证书校验的索引主机
    pub trusted_host: Option<String>,
    /// 创建环境用的基础解释器，未配置时从 PATH 查找
    pub python: Option<PathBuf>,
    /// 环境目录的父目录，未配置时为可执行文件所在目录
    pub base_dir: Option<PathBuf>,
    /// 覆盖系统主机名
    pub host_name: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            trusted_host: None,
            python: None,
            base_dir: None,
            host_name: None,
        }
    }
}

impl Settings {
    /// 从进程环境和默认配置文件加载
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// 用给定的环境变量查询函数加载 (测试时注入)
    pub fn load_with<F>(env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(path) = config_path(&env)
            && let Some(file) = read_config_file(&path)?
        {
            tracing::debug!(path = %path.display(), "已加载配置文件");
            settings.apply_file(file);
        }
        settings.apply_env(env);
        settings.validate()?;
        Ok(settings)
    }

    /// 路径查询用的宽松加载：配置文件无效时只记警告，不做校验
    pub fn load_for_query() -> Self {
        Self::load_for_query_with(|key| std::env::var(key).ok())
    }

    pub fn load_for_query_with<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(path) = config_path(&env) {
            match read_config_file(&path) {
                Ok(Some(file)) => settings.apply_file(file),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "配置文件无效，使用默认值")
                }
            }
        }
        settings.apply_env(env);
        settings
    }

    fn apply_file(&mut self, file: FileSettings) {
        if let Some(url) = file.index_url {
            self.index_url = url;
        }
        self.trusted_host = file.trusted_host.or(self.trusted_host.take());
        self.python = file.python.or(self.python.take());
        self.base_dir = file.base_dir.or(self.base_dir.take());
        self.host_name = file.host_name.or(self.host_name.take());
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_INDEX_URL) {
            self.index_url = url;
        }
        if let Some(host) = non_empty(ENV_TRUSTED_HOST) {
            self.trusted_host = Some(host);
        }
        if let Some(python) = non_empty(ENV_PYTHON) {
            self.python = Some(PathBuf::from(python));
        }
        if let Some(dir) = non_empty(ENV_BASE_DIR) {
            self.base_dir = Some(PathBuf::from(dir));
        }
        // 主机名允许为空串，用来得到只有前缀的目录名
        if let Some(host) = env(ENV_HOSTNAME) {
            self.host_name = Some(host);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.index_url.trim().is_empty() {
            return Err(MkenvError::Config("index_url 不能为空".to_string()));
        }
        if let Some(host) = &self.trusted_host
            && (host.trim().is_empty() || host.contains(char::is_whitespace))
        {
            return Err(MkenvError::Config(format!("无效的 trusted_host: {host:?}")));
        }
        Ok(())
    }
}

/// 配置文件位置：$MKENV_CONFIG，否则为默认位置
fn config_path<F>(env: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    match env(ENV_CONFIG) {
        Some(p) => Some(PathBuf::from(p)),
        None => default_config_path(),
    }
}

/// 默认配置文件位置：<config_dir>/mkenv/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mkenv").join("config.toml"))
}

/// 读取配置文件，文件不存在时返回 None
fn read_config_file(path: &Path) -> Result<Option<FileSettings>> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| {
        MkenvError::Config(format!("读取配置文件 {} 失败: {}", path.display(), e))
    })?;
    let file: FileSettings = toml::from_str(&content)?;
    Ok(Some(file))
}
