//! # 头部解析模块
//!
//! 头部布局 (位于 32 位长度前缀之后)：
//!
//! ```text
//! [1 byte ] has_password (0 或 1)
//! [32 bytes] password hash   (仅当 has_password)
//! [16 bytes] salt            (仅当 has_password)
//! [1 byte ] extension_len
//! [N bytes] extension (UTF-8)
//! [4 bytes] data_len (u32 BE)
//! [M bytes] data (有口令时为密文)
//! ```

use crate::cipher::{apply_keystream, verify_password};
use crate::constants::{DATA_LENGTH_BYTES, PASSWORD_HASH_LEN, SALT_LEN};
use crate::error::CodecError;

/// 解密后的载荷及其扩展名。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    pub bytes: Vec<u8>,
    pub extension: String,
}

struct HeaderReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> HeaderReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], CodecError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(CodecError::Truncated { field })?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn byte(&mut self, field: &'static str) -> Result<u8, CodecError> {
        Ok(self.take(1, field)?[0])
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.offset..]
    }
}

/// 按布局解析头部并在需要时解密。
///
/// # Errors
///
/// * 结构不完整、标志位非法、扩展名不是 UTF-8 或数据长度与剩余字节数不一致时，
///   返回归类为 `CorruptedPayload` 的错误。
/// * 头部要求口令但 `password` 为空时返回 [`CodecError::PasswordRequired`]。
/// * 口令哈希不匹配时返回 [`CodecError::WrongPassword`]。
pub fn parse_header(bytes: &[u8], password: &str) -> Result<DecodedPayload, CodecError> {
    let mut reader = HeaderReader::new(bytes);

    let protection = match reader.byte("password flag")? {
        0 => None,
        1 => {
            let hash = reader.take(PASSWORD_HASH_LEN, "password hash")?;
            let salt = reader.take(SALT_LEN, "salt")?;
            Some((hash, salt))
        }
        other => return Err(CodecError::InvalidFlag(other)),
    };

    let extension_len = reader.byte("extension length")? as usize;
    let extension = std::str::from_utf8(reader.take(extension_len, "extension")?)
        .map_err(|_| CodecError::InvalidExtension)?
        .to_owned();

    let declared = reader.take(DATA_LENGTH_BYTES, "data length")?;
    let declared = <[u8; DATA_LENGTH_BYTES]>::try_from(declared)
        .map(u32::from_be_bytes)
        .map_err(|_| CodecError::Truncated {
            field: "data length",
        })? as usize;

    let data = reader.rest();
    if data.len() != declared {
        return Err(CodecError::LengthMismatch {
            declared,
            actual: data.len(),
        });
    }

    let mut bytes = data.to_vec();
    if let Some((hash, salt)) = protection {
        if password.is_empty() {
            return Err(CodecError::PasswordRequired);
        }
        if !verify_password(password, salt, hash) {
            return Err(CodecError::WrongPassword);
        }
        apply_keystream(password, salt, &mut bytes);
    }

    Ok(DecodedPayload { bytes, extension })
}
