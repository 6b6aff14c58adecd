//! 候选串序号映射
//!
//! 把单一整数序号空间映射到 [min_length, max_length] 内的全部候选串：
//! 序号按字符集大小做进制展开得到长度 max_length 的规范候选串
//! (左侧用 charset[0] 填充)，再通过后缀截断派生更短的候选串。
//! 填充符与真实的首位 charset[0] 不可区分，因此带前导零符号的串
//! 也会被正确枚举到。
//!
//! 同一个候选串可能被不同的 (序号, 偏移) 组合重复产生，这是用
//! 单一序号空间换取无每长度状态的取舍；覆盖完整性是这里的契约。

/// 序号在 base 进制下的有效位数 (序号 0 记为 0 位)
///
/// base 为 1 时序号空间只含序号 0，直接返回 0，避免除法循环不终止。
pub fn significant_digits(ordinal: u64, base: u64) -> u32 {
    debug_assert!(base >= 1);
    if base < 2 {
        return 0;
    }
    let mut digits = 0;
    let mut value = ordinal;
    while value != 0 {
        value /= base;
        digits += 1;
    }
    digits
}

/// 把序号展开为规范候选串，写入 buf (长度即 max_length)
///
/// 返回有效位数 sd。buf 的前 max_length - sd 个位置填 charset[0]，
/// 其余位置是序号的进制位，高位在前。
pub fn expand_into(ordinal: u64, charset: &[u8], buf: &mut [u8]) -> usize {
    let base = charset.len() as u64;
    let sd = significant_digits(ordinal, base) as usize;
    debug_assert!(sd <= buf.len());

    let pad = buf.len() - sd;
    buf[..pad].fill(charset[0]);

    let mut remainder = ordinal;
    for slot in buf[pad..].iter_mut().rev() {
        *slot = charset[(remainder % base) as usize];
        remainder /= base;
    }
    sd
}

/// 序号对应的合法截断偏移范围
///
/// 偏移 i 的派生候选串是规范串的后缀 buf[i..]，长度 max_length - i；
/// 合法偏移保证派生长度落在 [min_length, max_length] 内，且不会
/// 截掉序号的有效位。
pub fn truncation_offsets(sd: usize, min_length: usize, max_length: usize) -> std::ops::RangeInclusive<usize> {
    0..=max_length - sd.max(min_length)
}

/// 规范候选串还原为序号 (测试用逆映射)
///
/// 每个字节必须出现在字符集中，否则返回 None。
pub fn decode(canonical: &[u8], charset: &[u8]) -> Option<u64> {
    let base = charset.len() as u64;
    let mut ordinal: u64 = 0;
    for &symbol in canonical {
        let digit = charset.iter().position(|&c| c == symbol)? as u64;
        ordinal = ordinal.checked_mul(base)?.checked_add(digit)?;
    }
    Some(ordinal)
}
