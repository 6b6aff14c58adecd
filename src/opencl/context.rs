//! OpenCL 上下文管理

use log::info;
use ocl::enums::{DeviceInfo, DeviceInfoResult};
use ocl::{Context, Device, Platform, Queue};

/// 目标设备类型
///
/// 数值对应 CLI 的 -d 参数 (1=CPU, 2=GPU, 4=Accelerator)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Cpu,
    Gpu,
    Accelerator,
    /// 任意设备，取第一个可用的
    Any,
}

impl DeviceKind {
    /// OpenCL 设备类型位掩码 (CL_DEVICE_TYPE_*)
    fn type_bits(self) -> u64 {
        match self {
            DeviceKind::Cpu => 2,
            DeviceKind::Gpu => 4,
            DeviceKind::Accelerator => 8,
            DeviceKind::Any => 0xFFFF_FFFF,
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceKind::Cpu => write!(f, "CPU"),
            DeviceKind::Gpu => write!(f, "GPU"),
            DeviceKind::Accelerator => write!(f, "Accelerator"),
            DeviceKind::Any => write!(f, "Any"),
        }
    }
}

/// OpenCL 上下文结构
pub struct OpenCLContext {
    /// 选择的平台
    pub platform: Platform,
    /// 选择的设备
    pub device: Device,
    /// OpenCL 上下文
    pub context: Context,
    /// 命令队列
    pub queue: Queue,
}

impl OpenCLContext {
    /// 创建指定设备类型的 OpenCL 上下文
    ///
    /// 指定类型找不到设备时直接报错，不做跨后端回退。
    pub fn new(kind: DeviceKind) -> anyhow::Result<Self> {
        let platforms = Platform::list();
        if platforms.is_empty() {
            anyhow::bail!("No OpenCL platforms found");
        }

        info!("Found {} OpenCL platform(s)", platforms.len());

        let mut selected = None;

        'outer: for platform in &platforms {
            let devices = Device::list_all(platform)?;
            info!("Platform: {:?}, Devices: {}", platform.name(), devices.len());

            for device in devices {
                // 类型查询必须走枚举变体; Display 输出的是位标志名字，不可解析
                let device_type = match device.info(DeviceInfo::Type) {
                    Ok(DeviceInfoResult::Type(t)) => t.bits(),
                    _ => 0,
                };

                info!("  Device: {} (Type bits: {})", device.name()?, device_type);

                if device_type & kind.type_bits() != 0 {
                    selected = Some((*platform, device));
                    break 'outer;
                }
            }
        }

        let (platform, device) = match selected {
            Some(pair) => pair,
            None => anyhow::bail!("No OpenCL device of type {} found", kind),
        };

        let device_name = device.name()?;
        info!("Using device: {}", device_name);

        let context = Context::builder()
            .platform(platform)
            .devices(device)
            .build()?;

        let queue = Queue::new(&context, device, None)?;

        Ok(Self {
            platform,
            device,
            context,
            queue,
        })
    }
}
