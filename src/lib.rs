//! SHA-256 原像恢复系统 - Rust + OpenCL 实现
//!
//! 在给定字符集和长度范围内穷举候选串，逐个计算 SHA-256 摘要并与
//! 目标比对。提供两个执行后端: 主机多线程扫描 (rayon) 和 OpenCL
//! 分块卸载扫描。

pub mod api;
pub mod candidate;
pub mod config;
pub mod host;
pub mod kernel_loader;
pub mod opencl;
pub mod sha256;

pub use api::{Backend, CrackRequest, CrackResponse, crack};
pub use config::{
    ConfigError, CrackConfig, CrackResult, DEFAULT_CHARSET, DEFAULT_CHUNK_SIZE, DEFAULT_HASH,
    DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, MAX_CANDIDATE_LEN, parse_target_hex,
};
pub use kernel_loader::load_kernel_source;
pub use opencl::{CrackKernel, DeviceKind, OpenCLContext};
