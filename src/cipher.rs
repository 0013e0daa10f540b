//! # 密码层
//!
//! 口令校验与密钥流生成均基于 `SHA-256(password || hex(salt) [|| counter])`，
//! 其中盐使用小写十六进制 ASCII 表示，计数器使用十进制 ASCII 表示。

use sha2::{Digest, Sha256};

fn salted_hasher(password: &str, salt: &[u8]) -> Sha256 {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(hex::encode(salt).as_bytes());
    hasher
}

/// 计算头部中保存的口令哈希。
pub fn password_hash(password: &str, salt: &[u8]) -> [u8; 32] {
    salted_hasher(password, salt).finalize().into()
}

/// 口令是否与保存的哈希逐字节一致。
pub fn verify_password(password: &str, salt: &[u8], stored_hash: &[u8]) -> bool {
    password_hash(password, salt).as_slice() == stored_hash
}

/// 生成长度为 `len` 的密钥流。
///
/// 依次对计数器 0, 1, 2, … 求摘要并拼接，最后一块按需截断。
pub fn keystream(password: &str, salt: &[u8], len: usize) -> Vec<u8> {
    let base = salted_hasher(password, salt);
    let mut stream = Vec::with_capacity(len);

    for counter in 0u64.. {
        if stream.len() >= len {
            break;
        }
        let mut hasher = base.clone();
        hasher.update(counter.to_string().as_bytes());
        let block = hasher.finalize();
        let take = (len - stream.len()).min(block.len());
        stream.extend_from_slice(&block[..take]);
    }

    stream
}

/// 与密钥流逐字节异或。加密与解密是同一操作。
pub fn apply_keystream(password: &str, salt: &[u8], data: &mut [u8]) {
    let stream = keystream(password, salt, data.len());
    data.iter_mut()
        .zip(stream)
        .for_each(|(byte, key)| *byte ^= key);
}
