//! 扫描配置和数据结构定义

use thiserror::Error;

use crate::sha256::DIGEST_LEN;

/// 默认字符集 (与原版 CLI 一致)
pub const DEFAULT_CHARSET: &str = "abcdefghijklmnopqrstuvwxyz";
/// 默认最小长度
pub const DEFAULT_MIN_LENGTH: u32 = 3;
/// 默认最大长度
pub const DEFAULT_MAX_LENGTH: u32 = 5;
/// 默认 OpenCL 块大小 (0 表示整个空间一次派发)
pub const DEFAULT_CHUNK_SIZE: u64 = 1_000_000;
/// 默认演示哈希 (sha256("hello"))
pub const DEFAULT_HASH: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

/// 候选串长度上限
///
/// 单块 SHA-256 最多安全容纳 55 字节消息，内核侧只实现单块压缩，
/// 取 32 为实用上限。
pub const MAX_CANDIDATE_LEN: u32 = 32;

/// 配置校验错误 (扫描开始前拒绝，不重试)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("charset must not be empty")]
    EmptyCharset,
    #[error("charset contains duplicate symbol {0:?}")]
    DuplicateSymbol(char),
    #[error("charset must be ASCII, got byte 0x{0:02x}")]
    NonAsciiCharset(u8),
    #[error("length bounds must be positive")]
    ZeroLength,
    #[error("max length {0} exceeds limit {MAX_CANDIDATE_LEN}")]
    LengthTooLarge(u32),
    #[error("search space |charset|^max_length overflows u64")]
    SearchSpaceTooLarge,
    #[error("target hash must be {expected} hex characters, got {actual}")]
    BadTargetLength { expected: usize, actual: usize },
    #[error("target hash is not valid hex: {0}")]
    BadTargetHex(String),
}

/// 一次扫描的只读配置
///
/// 构造时完成全部校验；扫描期间对所有 worker 只读共享。
#[derive(Debug, Clone)]
pub struct CrackConfig {
    target: [u8; DIGEST_LEN],
    charset: Vec<u8>,
    min_length: u32,
    max_length: u32,
}

impl CrackConfig {
    /// 校验并构造扫描配置
    ///
    /// min_length > max_length 时按约定收缩到 max_length，不报错。
    pub fn new(
        target: [u8; DIGEST_LEN],
        charset: &[u8],
        min_length: u32,
        max_length: u32,
    ) -> Result<Self, ConfigError> {
        if charset.is_empty() {
            return Err(ConfigError::EmptyCharset);
        }
        for (i, &symbol) in charset.iter().enumerate() {
            if !symbol.is_ascii() {
                return Err(ConfigError::NonAsciiCharset(symbol));
            }
            if charset[..i].contains(&symbol) {
                return Err(ConfigError::DuplicateSymbol(symbol as char));
            }
        }
        if min_length == 0 || max_length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if max_length > MAX_CANDIDATE_LEN {
            return Err(ConfigError::LengthTooLarge(max_length));
        }
        let min_length = min_length.min(max_length);

        (charset.len() as u64)
            .checked_pow(max_length)
            .ok_or(ConfigError::SearchSpaceTooLarge)?;

        Ok(Self {
            target,
            charset: charset.to_vec(),
            min_length,
            max_length,
        })
    }

    pub fn target(&self) -> &[u8; DIGEST_LEN] {
        &self.target
    }

    pub fn charset(&self) -> &[u8] {
        &self.charset
    }

    pub fn min_length(&self) -> u32 {
        self.min_length
    }

    pub fn max_length(&self) -> u32 {
        self.max_length
    }

    /// 进制基数 = 字符集大小
    pub fn base(&self) -> u64 {
        self.charset.len() as u64
    }

    /// 序号空间大小 |charset|^max_length
    pub fn search_space(&self) -> u64 {
        // 构造时已用 checked_pow 校验过
        self.base().pow(self.max_length)
    }
}

/// 解析十六进制目标哈希
pub fn parse_target_hex(hash: &str) -> Result<[u8; DIGEST_LEN], ConfigError> {
    if hash.len() != DIGEST_LEN * 2 {
        return Err(ConfigError::BadTargetLength {
            expected: DIGEST_LEN * 2,
            actual: hash.len(),
        });
    }
    let bytes = hex::decode(hash).map_err(|e| ConfigError::BadTargetHex(e.to_string()))?;
    let mut target = [0u8; DIGEST_LEN];
    target.copy_from_slice(&bytes);
    Ok(target)
}

/// 内核输出槽 (从设备传回)
///
/// 注意：必须与 OpenCL 的 crack_result_t 结构体完全匹配
/// 布局: found @0 (uint), len @4 (uint), word[32] @8，共 40 字节
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CrackResult {
    /// 是否命中 (0/1) - 对应 OpenCL uint
    pub found: u32,
    /// 派生候选串长度 - 对应 OpenCL uint
    pub len: u32,
    /// 派生候选串字节 - 对应 OpenCL uchar[32]
    pub word: [u8; 32],
}

impl Default for CrackResult {
    fn default() -> Self {
        Self {
            found: 0,
            len: 0,
            word: [0u8; 32],
        }
    }
}

impl CrackResult {
    /// 命中时取出明文
    pub fn plaintext(&self) -> Option<String> {
        if self.found == 0 {
            return None;
        }
        let len = (self.len as usize).min(self.word.len());
        Some(self.word[..len].iter().map(|&b| b as char).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn demo_target() -> [u8; DIGEST_LEN] {
        parse_target_hex(DEFAULT_HASH).unwrap()
    }

    #[test]
    fn test_valid_config() {
        let config = CrackConfig::new(demo_target(), b"abc", 1, 4).unwrap();
        assert_eq!(config.base(), 3);
        assert_eq!(config.search_space(), 81);
    }

    #[test]
    fn test_min_clamped_to_max() {
        let config = CrackConfig::new(demo_target(), b"abc", 7, 4).unwrap();
        assert_eq!(config.min_length(), 4);
        assert_eq!(config.max_length(), 4);
    }

    #[test]
    fn test_rejects_empty_charset() {
        assert_eq!(
            CrackConfig::new(demo_target(), b"", 1, 4).unwrap_err(),
            ConfigError::EmptyCharset
        );
    }

    #[test]
    fn test_rejects_duplicate_symbol() {
        assert_eq!(
            CrackConfig::new(demo_target(), b"abca", 1, 4).unwrap_err(),
            ConfigError::DuplicateSymbol('a')
        );
    }

    #[test]
    fn test_rejects_zero_length() {
        assert_eq!(
            CrackConfig::new(demo_target(), b"abc", 0, 4).unwrap_err(),
            ConfigError::ZeroLength
        );
    }

    #[test]
    fn test_rejects_length_over_block_limit() {
        assert_eq!(
            CrackConfig::new(demo_target(), b"abc", 1, 33).unwrap_err(),
            ConfigError::LengthTooLarge(33)
        );
    }

    #[test]
    fn test_rejects_overflowing_space() {
        let charset: Vec<u8> = (0u8..128).collect();
        assert_eq!(
            CrackConfig::new(demo_target(), &charset, 1, 32).unwrap_err(),
            ConfigError::SearchSpaceTooLarge
        );
    }

    #[test]
    fn test_parse_target_hex() {
        let target = parse_target_hex(DEFAULT_HASH).unwrap();
        assert_eq!(target[0], 0x2c);
        assert_eq!(target[31], 0x24);
    }

    #[test]
    fn test_parse_target_rejects_bad_input() {
        assert!(matches!(
            parse_target_hex("abcd"),
            Err(ConfigError::BadTargetLength { .. })
        ));
        assert!(matches!(
            parse_target_hex(&"zz".repeat(32)),
            Err(ConfigError::BadTargetHex(_))
        ));
    }

    #[test]
    fn test_crack_result_layout_matches_kernel() {
        assert_eq!(std::mem::size_of::<CrackResult>(), 40);
        assert_eq!(std::mem::offset_of!(CrackResult, found), 0);
        assert_eq!(std::mem::offset_of!(CrackResult, len), 4);
        assert_eq!(std::mem::offset_of!(CrackResult, word), 8);
    }

    #[test]
    fn test_crack_result_plaintext() {
        let mut result = CrackResult::default();
        assert_eq!(result.plaintext(), None);
        result.found = 1;
        result.len = 3;
        result.word[..3].copy_from_slice(b"abc");
        assert_eq!(result.plaintext().as_deref(), Some("abc"));
    }
}
