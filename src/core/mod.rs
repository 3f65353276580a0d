//! 环境供给核心

pub mod install;
pub mod provision;
pub mod venv;

pub use provision::Provisioner;
