//! 测试用的载体构造工具。
//!
//! 库本身只负责解码，这里按相同的格式写入载荷以便做往返测试。

#![allow(dead_code)]

use carrier_unveil::SkipRegion;
use carrier_unveil::cipher::{apply_keystream, password_hash};
use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::io::Cursor;

/// 组装头部 (不含 32 位长度前缀)。
pub fn build_header(data: &[u8], extension: &str, password: Option<&str>) -> Vec<u8> {
    let mut header = Vec::new();
    let mut body = data.to_vec();

    match password {
        Some(password) => {
            let mut salt = [0u8; 16];
            StdRng::seed_from_u64(42).fill_bytes(&mut salt);
            apply_keystream(password, &salt, &mut body);
            header.push(1);
            header.extend_from_slice(&password_hash(password, &salt));
            header.extend_from_slice(&salt);
        }
        None => header.push(0),
    }

    header.push(extension.len() as u8);
    header.extend_from_slice(extension.as_bytes());
    header.extend_from_slice(&(body.len() as u32).to_be_bytes());
    header.extend_from_slice(&body);
    header
}

/// 生成带随机噪声像素的 RGB 图像。
pub fn noise_image(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut raw = vec![0u8; (width * height * 3) as usize];
    StdRng::seed_from_u64(seed).fill_bytes(&mut raw);
    ImageBuffer::from_raw(width, height, raw).expect("buffer size matches dimensions")
}

/// 将长度前缀与头部写入 `image` 每个通道的低 `depth` 位，跳过水印区域。
pub fn embed(image: &mut RgbImage, depth: u8, header: &[u8]) {
    let mut bits: Vec<u8> = Vec::with_capacity((header.len() + 4) * 8);
    for byte in (header.len() as u32).to_be_bytes().iter().chain(header) {
        bits.extend((0..8).rev().map(|shift| (byte >> shift) & 1));
    }

    let (width, height) = image.dimensions();
    let skip = SkipRegion::for_dimensions(width, height);
    let mask = ((1u16 << depth) - 1) as u8;
    let mut chunks = bits.chunks(depth as usize);

    'outer: for y in 0..height {
        for x in 0..width {
            if skip.contains(x, y) {
                continue;
            }
            let pixel = image.get_pixel_mut(x, y);
            for channel in pixel.0.iter_mut() {
                let Some(chunk) = chunks.next() else {
                    break 'outer;
                };
                let mut value = 0u8;
                for i in 0..depth as usize {
                    value = (value << 1) | chunk.get(i).copied().unwrap_or(0);
                }
                *channel = (*channel & !mask) | value;
            }
        }
    }

    assert!(chunks.next().is_none(), "payload does not fit in the carrier");
}

/// 以无损格式编码图像。
pub fn encode(image: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut out), format)
        .expect("encoding into memory succeeds");
    out
}

/// 构造一张嵌入了指定载荷的 PNG 载体。
pub fn carrier_png(
    data: &[u8],
    extension: &str,
    password: Option<&str>,
    depth: u8,
) -> Vec<u8> {
    let mut image = noise_image(64, 64, 7);
    embed(&mut image, depth, &build_header(data, extension, password));
    encode(&image, ImageFormat::Png)
}

/// 一张小的真实 PNG，用作图片载荷。
pub fn sample_png() -> Vec<u8> {
    let image = RgbImage::from_fn(6, 5, |x, y| Rgb([x as u8 * 40, y as u8 * 50, 200]));
    encode(&image, ImageFormat::Png)
}

/// 将任意字节按每像素 3 字节打包进最小的矩形 PNG，末尾补 0。
pub fn pack_binpng(data: &[u8]) -> Vec<u8> {
    let pixels = data.len().div_ceil(3).max(1);
    let width = (pixels as f64).sqrt().ceil() as usize;
    let height = pixels.div_ceil(width);

    let mut raw = data.to_vec();
    raw.resize(width * height * 3, 0);
    let image: RgbImage = ImageBuffer::from_raw(width as u32, height as u32, raw)
        .expect("buffer size matches dimensions");
    encode(&image, ImageFormat::Png)
}

/// 模拟一段视频文件的字节，最后一个字节非 0。
pub fn sample_video_bytes() -> Vec<u8> {
    let mut bytes = b"\x00\x00\x00\x20ftypisom\x00\x00\x02\x00".to_vec();
    bytes.extend((0..480u32).map(|i| (i * 37 % 256) as u8));
    bytes.push(0x7F);
    bytes
}
