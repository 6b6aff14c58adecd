//! 测试公共模块

use ocl::ProQue;
use sha2::{Digest, Sha256};

/// 检查 OpenCL 是否可用
///
/// 无设备的环境里 OpenCL 相关测试直接跳过，不视为失败。
/// 零平台环境下 ProQue 的默认平台选择会 panic，必须先查平台列表。
pub fn is_opencl_available() -> bool {
    if ocl::Platform::list().is_empty() {
        return false;
    }
    ProQue::builder()
        .src("__kernel void test() {}")
        .dims(1)
        .build()
        .is_ok()
}

/// sha2 crate 的参考摘要
pub fn reference_sha256(message: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(message);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}
