//! # 嵌套视频解包
//!
//! 视频字节按每像素 3 字节 (R, G, B) 行优先写入一张 PNG，
//! 像素网格不足的部分用 0 填充。解包时依次尝试多个解码后端，
//! 读取全部 RGB 字节后去掉末尾的 0。

use crate::error::CodecError;

/// 将内层图像解码为行优先 RGB 字节，失败时返回 `None`。
type NestedDecoder = fn(&[u8]) -> Option<Vec<u8>>;

const BACKENDS: [(&str, NestedDecoder); 2] = [("image", decode_with_image), ("png", decode_with_png)];

fn decode_with_image(bytes: &[u8]) -> Option<Vec<u8>> {
    match image::load_from_memory(bytes) {
        Ok(img) => Some(img.to_rgb8().into_raw()),
        Err(e) => {
            log::debug!("image backend rejected nested payload: {e}");
            None
        }
    }
}

fn decode_with_png(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| log::debug!("png backend could not read header: {e}"))
        .ok()?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| log::debug!("png backend could not read frame: {e}"))
        .ok()?;
    buf.truncate(info.buffer_size());

    let rgb = match info.color_type {
        png::ColorType::Rgb => buf,
        png::ColorType::Rgba => buf
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g]).collect(),
        png::ColorType::GrayscaleAlpha => buf.chunks_exact(2).flat_map(|px| [px[0]; 3]).collect(),
        png::ColorType::Indexed => {
            log::debug!("png backend left palette data unexpanded");
            return None;
        }
    };
    Some(rgb)
}

/// 去掉打包时补齐像素网格产生的末尾 0。
pub fn trim_trailing_zeros(mut bytes: Vec<u8>) -> Vec<u8> {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    bytes.truncate(end);
    bytes
}

/// 还原嵌套在图像中的原始字节。
///
/// # Errors
///
/// 所有后端都无法解码时返回 [`CodecError::NestedDecode`]。
pub fn unpack(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    unpack_with(bytes, &BACKENDS)
}

fn unpack_with(bytes: &[u8], backends: &[(&str, NestedDecoder)]) -> Result<Vec<u8>, CodecError> {
    backends
        .iter()
        .find_map(|(name, decode)| {
            let rgb = decode(bytes)?;
            log::debug!("nested payload unpacked by {name} backend ({} bytes)", rgb.len());
            Some(trim_trailing_zeros(rgb))
        })
        .ok_or(CodecError::NestedDecode)
}
