//! OpenCL 卸载扫描引擎

pub mod context;
pub mod kernel;

pub use context::{DeviceKind, OpenCLContext};
pub use kernel::CrackKernel;
