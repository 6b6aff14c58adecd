//! 对外提供的 Rust 调用接口

use std::time::{Duration, Instant};

use log::info;

use crate::config::{
    CrackConfig, DEFAULT_CHARSET, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH,
};
use crate::kernel_loader::load_kernel_source;
use crate::opencl::{CrackKernel, DeviceKind, OpenCLContext};
use crate::sha256::DIGEST_LEN;
use crate::{host, sha256};

/// 执行后端选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// 主机多线程扫描
    Host,
    /// OpenCL 卸载扫描
    OpenCl(DeviceKind),
}

/// 一次破解请求
#[derive(Debug, Clone)]
pub struct CrackRequest {
    /// 目标摘要 (32 字节)
    pub target: [u8; DIGEST_LEN],
    /// 候选串字符集
    pub charset: Vec<u8>,
    /// 最小长度
    pub min_length: u32,
    /// 最大长度
    pub max_length: u32,
    /// 执行后端
    pub backend: Backend,
    /// OpenCL 块大小 (0 表示单块覆盖整个空间)
    pub chunk_size: u64,
    /// 主机线程数 (0 表示使用 rayon 全局线程池)
    pub threads: usize,
}

impl CrackRequest {
    pub fn new(target: [u8; DIGEST_LEN]) -> Self {
        Self {
            target,
            charset: DEFAULT_CHARSET.as_bytes().to_vec(),
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            backend: Backend::OpenCl(DeviceKind::Gpu),
            chunk_size: DEFAULT_CHUNK_SIZE,
            threads: 0,
        }
    }
}

/// 破解结果
#[derive(Debug, Clone)]
pub struct CrackResponse {
    /// 命中的明文，未命中为 None
    pub plaintext: Option<String>,
    /// 扫描耗时
    pub elapsed: Duration,
    /// 声明的序号空间大小
    pub search_space: u64,
    /// 平均速度 (序号/秒)
    pub speed: f64,
}

/// 执行一次完整扫描
///
/// 配置错误在扫描开始前返回；后端资源获取失败是致命错误，
/// 不会自动回退到另一个后端。
pub fn crack(request: CrackRequest) -> anyhow::Result<CrackResponse> {
    let config = CrackConfig::new(
        request.target,
        &request.charset,
        request.min_length,
        request.max_length,
    )?;

    info!(
        "scan parameters: target={}, charset_len={}, lengths={}..={}",
        hex::encode(config.target()),
        config.charset().len(),
        config.min_length(),
        config.max_length()
    );

    let start = Instant::now();
    let plaintext = match request.backend {
        Backend::Host => host::crack(&config, request.threads)?,
        Backend::OpenCl(kind) => {
            let ctx = OpenCLContext::new(kind)?;
            let source = load_kernel_source()?;
            let kernel = CrackKernel::new(&ctx, &source, &config)?;
            kernel.crack(request.chunk_size)?
        }
    };
    let elapsed = start.elapsed();

    // 命中时校验一次摘要，保证发布出去的明文确实是原像
    if let Some(word) = &plaintext {
        debug_assert_eq!(&sha256::digest(word.as_bytes()), config.target());
    }

    let search_space = config.search_space();
    let speed = if elapsed.as_secs_f64() > 0.0 {
        search_space as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    Ok(CrackResponse {
        plaintext,
        elapsed,
        search_space,
        speed,
    })
}
