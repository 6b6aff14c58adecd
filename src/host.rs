//! 主机端多 worker 扫描引擎
//!
//! 用 rayon 在序号空间上做工作窃取式的动态分配：先处理完便宜序号的
//! worker 会自动领取更多工作。每个 worker 在处理序号前先查共享的命中
//! 标志，置位后尽快跳过剩余工作 (已在途的序号允许算完，属于文档化的
//! 有界超额)。结果槽只写一次，后到的写入会被丢弃。

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use rayon::prelude::*;

use crate::candidate::{expand_into, truncation_offsets};
use crate::config::CrackConfig;
use crate::sha256::digest;

/// 在主机上扫描整个序号空间
///
/// `threads == 0` 使用 rayon 全局线程池，否则建一个定大小的池。
/// 返回命中的明文，全空间扫完无命中时返回 None。
pub fn crack(config: &CrackConfig, threads: usize) -> anyhow::Result<Option<String>> {
    if threads == 0 {
        return Ok(scan(config));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;
    Ok(pool.install(|| scan(config)))
}

fn scan(config: &CrackConfig) -> Option<String> {
    let total = config.search_space();
    let max_length = config.max_length() as usize;
    let min_length = config.min_length() as usize;
    let charset = config.charset();
    let target = config.target();

    info!("host scan over {} ordinals", total);

    let found = AtomicBool::new(false);
    let result: Mutex<Option<String>> = Mutex::new(None);

    (0..total).into_par_iter().for_each_init(
        || vec![0u8; max_length],
        |buf, ordinal| {
            if found.load(Ordering::Relaxed) {
                return;
            }

            let sd = expand_into(ordinal, charset, buf);
            for offset in truncation_offsets(sd, min_length, max_length) {
                let word = &buf[offset..];
                if &digest(word) == target {
                    publish(&found, &result, word, ordinal);
                    break;
                }
            }
        },
    );

    result.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 发布命中结果；槽位只接受第一次写入
fn publish(found: &AtomicBool, result: &Mutex<Option<String>>, word: &[u8], ordinal: u64) {
    let mut slot = match result.lock() {
        Ok(slot) => slot,
        Err(poisoned) => poisoned.into_inner(),
    };
    if slot.is_none() {
        debug!("match at ordinal {}", ordinal);
        *slot = Some(word.iter().map(|&b| b as char).collect());
        found.store(true, Ordering::Relaxed);
    }
}
