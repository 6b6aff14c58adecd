//! OpenCL 内核源代码加载模块
//!
//! 提供统一的内核源代码加载功能，避免在 main.rs 和测试代码中重复。

/// 加载扫描内核源代码
///
/// 内核文件在编译期嵌入，包含:
/// 1. 单块 SHA-256 摘要
/// 2. 序号展开与截断扫描 (crack_kernel)
/// 3. 测试用的摘要包装 (sha256_kernel)
pub fn load_kernel_source() -> anyhow::Result<String> {
    let mut source = String::new();
    source.push_str(include_str!("../kernels/sha256.cl"));
    Ok(source)
}
