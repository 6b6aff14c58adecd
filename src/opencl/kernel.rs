//! OpenCL 内核加载与分块扫描
//!
//! 序号空间按 chunk_size 切成连续的块，严格串行派发: 一个块入队、
//! 等队列排空、回读输出槽，命中则停止派发直接返回。块间不重叠，
//! 换来的是单块工作集的有界驻留。

use log::{debug, info};
use ocl::{Buffer, Kernel, Program, Queue, SpatialDims};

use super::context::OpenCLContext;
use crate::config::{CrackConfig, CrackResult};
use crate::sha256::DIGEST_LEN;

/// 扫描内核封装
pub struct CrackKernel {
    /// OpenCL 程序 (必须保持存活以确保内核正常工作)
    #[allow(dead_code)]
    program: Program,
    /// 扫描内核
    kernel: Kernel,
    /// 输出槽缓冲区
    result_buffer: Buffer<u8>,
    /// 命令队列
    queue: Queue,
    /// 序号空间大小
    search_space: u64,
}

impl CrackKernel {
    /// 编译内核并准备缓冲区
    ///
    /// 目标摘要与字符集写入只读缓冲区，输出槽清零。任何一步失败都是
    /// 致命错误，调用方不做重试。
    pub fn new(ctx: &OpenCLContext, kernel_source: &str, config: &CrackConfig) -> anyhow::Result<Self> {
        info!("Building OpenCL program...");

        let program = Program::builder()
            .src(kernel_source)
            .build(&ctx.context)?;

        info!("OpenCL program built successfully");

        let target_buffer = Buffer::<u8>::builder()
            .queue(ctx.queue.clone())
            .flags(ocl::flags::MEM_READ_ONLY)
            .len(DIGEST_LEN)
            .copy_host_slice(config.target())
            .build()?;

        let charset_buffer = Buffer::<u8>::builder()
            .queue(ctx.queue.clone())
            .flags(ocl::flags::MEM_READ_ONLY)
            .len(config.charset().len())
            .copy_host_slice(config.charset())
            .build()?;

        let result_buffer = Buffer::<u8>::builder()
            .queue(ctx.queue.clone())
            .flags(ocl::flags::MEM_READ_WRITE)
            .len(std::mem::size_of::<CrackResult>())
            .build()?;

        // 输出槽清零，found 字段为 0 表示未命中
        let empty = vec![0u8; std::mem::size_of::<CrackResult>()];
        result_buffer.write(&empty).enq()?;

        let kernel = Kernel::builder()
            .program(&program)
            .name("crack_kernel")
            .queue(ctx.queue.clone())
            .global_work_size(SpatialDims::One(1)) // 临时值，每个块派发时更新
            .arg(&target_buffer)
            .arg(config.min_length())
            .arg(config.max_length())
            .arg(&charset_buffer)
            .arg(config.charset().len() as u32)
            .arg_named("ordinal_offset", 0u64)
            .arg(&result_buffer)
            .build()?;

        Ok(Self {
            program,
            kernel,
            result_buffer,
            queue: ctx.queue.clone(),
            search_space: config.search_space(),
        })
    }

    /// 分块扫描整个序号空间
    ///
    /// `chunk_size == 0` 表示整个空间作为一个块。命中即停止派发后续块；
    /// 全部块扫完仍未命中时返回 None。
    pub fn crack(&self, chunk_size: u64) -> anyhow::Result<Option<String>> {
        let total = self.search_space;
        let chunk = if chunk_size == 0 { total } else { chunk_size };

        let mut offset: u64 = 0;
        while offset < total {
            let lanes = chunk.min(total - offset);
            debug!("dispatching chunk: offset={}, lanes={}", offset, lanes);

            self.kernel.set_arg("ordinal_offset", offset)?;
            unsafe {
                self.kernel
                    .cmd()
                    .global_work_size(SpatialDims::One(lanes as usize))
                    .enq()?;
            }
            self.queue.finish()?;

            let result = self.read_result()?;
            if result.found != 0 {
                return Ok(result.plaintext());
            }

            offset += lanes;
        }

        Ok(None)
    }

    /// 回读输出槽
    pub fn read_result(&self) -> anyhow::Result<CrackResult> {
        let mut result_bytes = vec![0u8; std::mem::size_of::<CrackResult>()];
        self.result_buffer.read(&mut result_bytes).enq()?;

        let result = unsafe { std::ptr::read(result_bytes.as_ptr() as *const CrackResult) };

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_target_hex;
    use crate::kernel_loader::load_kernel_source;
    use crate::opencl::{DeviceKind, OpenCLContext};

    /// 需要 OpenCL 设备的冒烟测试；无设备时跳过
    #[test]
    fn test_kernel_builds_on_available_device() {
        let ctx = match OpenCLContext::new(DeviceKind::Any) {
            Ok(ctx) => ctx,
            Err(_) => {
                println!("OpenCL unavailable, skipping");
                return;
            }
        };

        let target = parse_target_hex(crate::config::DEFAULT_HASH).unwrap();
        let config = CrackConfig::new(target, b"abc", 1, 3).unwrap();
        let source = load_kernel_source().unwrap();
        assert!(CrackKernel::new(&ctx, &source, &config).is_ok());
    }
}
