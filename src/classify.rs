//! # 载荷分类模块
//!
//! 根据扩展名和文件头魔数判断解出的载荷是图片、嵌套视频还是不支持的内容。

use crate::binpng;
use crate::constants::{BINPNG_SUFFIX, IMAGE_EXTENSIONS, NESTED_VIDEO_EXTENSION};
use crate::error::CodecError;
use crate::header::DecodedPayload;

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8];
const BMP_SIGNATURE: &[u8] = b"BM";

/// 解码目标：仅图片，或允许嵌套视频。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeTarget {
    #[default]
    ImageOnly,
    Media,
}

/// 分类成功后的载荷。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Image(DecodedPayload),
    Video(DecodedPayload),
}

/// 去掉首尾空白和一个前导点，并转换为小写。
pub fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_prefix('.').unwrap_or(trimmed).to_lowercase()
}

/// 字节开头是否符合扩展名对应的魔数。未知扩展名始终返回 `false`。
pub fn matches_signature(bytes: &[u8], extension: &str) -> bool {
    match extension {
        "png" => bytes.starts_with(PNG_SIGNATURE),
        "jpg" | "jpeg" => bytes.starts_with(JPEG_SIGNATURE),
        "webp" => bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP",
        "gif" => {
            bytes.len() >= 6
                && bytes.starts_with(b"GIF8")
                && matches!(bytes[4], b'7' | b'9')
                && bytes[5] == b'a'
        }
        "bmp" => bytes.starts_with(BMP_SIGNATURE),
        _ => false,
    }
}

pub fn classify(payload: DecodedPayload, target: DecodeTarget) -> Result<Classified, CodecError> {
    let extension = normalize_extension(&payload.extension);

    if extension.ends_with(BINPNG_SUFFIX) {
        return match target {
            DecodeTarget::ImageOnly => Err(CodecError::NonImagePayload(extension)),
            DecodeTarget::Media => Ok(Classified::Video(DecodedPayload {
                bytes: binpng::unpack(&payload.bytes)?,
                extension: NESTED_VIDEO_EXTENSION.to_owned(),
            })),
        };
    }

    if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(CodecError::NonImagePayload(extension));
    }

    if !matches_signature(&payload.bytes, &extension) {
        return Err(CodecError::SignatureMismatch { extension });
    }

    Ok(Classified::Image(DecodedPayload {
        bytes: payload.bytes,
        extension,
    }))
}
