//! SHA-256 原像恢复系统 - 主程序
//!
//! 使用方式:
//!   cargo run -- --host 2cf24dba...
//!   cargo run -- --gpu -i 3 -a 5 -c abcdefghijklmnopqrstuvwxyz
//!   cargo run -- -d 1 -k 500000 <hash>

use clap::Parser;
use log::info;

use rust_sha256crack::config::{
    DEFAULT_CHARSET, DEFAULT_CHUNK_SIZE, DEFAULT_HASH, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH,
};
use rust_sha256crack::{Backend, CrackRequest, DeviceKind, crack, parse_target_hex};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "sha256crack")]
#[command(about = "SHA-256 原像恢复系统")]
#[command(version = "0.1.0")]
struct Args {
    /// 目标哈希 (64 个十六进制字符)
    #[arg(default_value = DEFAULT_HASH)]
    hash: String,

    /// 不使用 OpenCL，在主机上扫描
    #[arg(short = 'H', long)]
    host: bool,

    /// 使用 OpenCL，设备类型 CPU
    #[arg(short = 'C', long)]
    cpu: bool,

    /// 使用 OpenCL，设备类型 GPU (默认)
    #[arg(short = 'G', long)]
    gpu: bool,

    /// 设备编号: 0=主机, 1=CPU, 2=GPU, 4=Accelerator
    #[arg(short, long)]
    device: Option<u32>,

    /// 最小密码长度
    #[arg(short = 'i', long, default_value_t = DEFAULT_MIN_LENGTH)]
    min_length: u32,

    /// 最大密码长度
    #[arg(short = 'a', long, default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: u32,

    /// 密码字符集
    #[arg(short, long, default_value = DEFAULT_CHARSET)]
    charset: String,

    /// OpenCL 块大小，0 表示不分块
    #[arg(short = 'k', long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: u64,

    /// 主机线程数，0 表示使用全部核心
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// 静默模式，只输出结果
    #[arg(short, long)]
    silent: bool,
}

/// 解析后端选择
///
/// --device 数值优先于快捷开关；--host 与 0 等价。
fn parse_backend(args: &Args) -> anyhow::Result<Backend> {
    if let Some(device) = args.device {
        return match device {
            0 => Ok(Backend::Host),
            1 => Ok(Backend::OpenCl(DeviceKind::Cpu)),
            2 => Ok(Backend::OpenCl(DeviceKind::Gpu)),
            4 => Ok(Backend::OpenCl(DeviceKind::Accelerator)),
            other => anyhow::bail!("unknown device {}, expected 0, 1, 2 or 4", other),
        };
    }
    if args.host {
        Ok(Backend::Host)
    } else if args.cpu {
        Ok(Backend::OpenCl(DeviceKind::Cpu))
    } else {
        Ok(Backend::OpenCl(DeviceKind::Gpu))
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.silent { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let backend = parse_backend(&args)?;
    let target = parse_target_hex(&args.hash)?;

    info!("Hash: {}", args.hash);
    info!(
        "Minimum length: {}, Maximum length: {}",
        args.min_length, args.max_length
    );
    info!("Character set: {}", args.charset);
    match backend {
        Backend::Host => info!("Running on host"),
        Backend::OpenCl(kind) => {
            if args.chunk_size != 0 {
                info!("Chunk size: {}", args.chunk_size);
            }
            info!("Running on device: {}", kind);
        }
    }

    let mut request = CrackRequest::new(target);
    request.charset = args.charset.into_bytes();
    request.min_length = args.min_length;
    request.max_length = args.max_length;
    request.backend = backend;
    request.chunk_size = args.chunk_size;
    request.threads = args.threads;

    let response = crack(request)?;

    if args.silent {
        if let Some(plaintext) = &response.plaintext {
            println!("{}", plaintext);
        }
    } else {
        match &response.plaintext {
            Some(plaintext) => println!("Result: {}", plaintext),
            None => println!("Result: No match."),
        }
        println!(
            "Scanned {} ordinals in {:.2} s ({:.0} ordinals/s)",
            response.search_space,
            response.elapsed.as_secs_f64(),
            response.speed
        );
    }

    Ok(())
}
