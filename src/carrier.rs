//! # 载体图像模块
//!
//! 将已编码的位图转换为按行优先排列的 RGB 字节序列，并计算水印保留区域与可用位数。

use crate::constants::{CHANNELS_PER_PIXEL, SKIP_HEIGHT_PERCENT, SKIP_WIDTH_PERCENT};
use crate::error::CodecError;

/// 不可变的载体图像：宽、高以及每像素 3 字节的 RGB 数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl CarrierImage {
    /// 由原始 RGB 数据构造载体图像。
    ///
    /// # Errors
    ///
    /// 宽或高为 0，或字节数不等于 `width * height * 3` 时返回
    /// [`CodecError::InvalidDimensions`]。
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self, CodecError> {
        let expected = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(CHANNELS_PER_PIXEL));

        match expected {
            Some(expected) if width > 0 && height > 0 && expected == rgb.len() as u64 => {
                Ok(Self { width, height, rgb })
            }
            _ => Err(CodecError::InvalidDimensions {
                width,
                height,
                actual: rgb.len(),
            }),
        }
    }

    /// 使用 `image` 库解码任意支持的位图格式，丢弃 alpha 通道。
    ///
    /// # Errors
    ///
    /// 字节无法被解码为图像时返回 [`CodecError::UndecodableImage`]。
    pub fn from_encoded(bytes: &[u8]) -> Result<Self, CodecError> {
        let rgb = image::load_from_memory(bytes)
            .map_err(|e| CodecError::UndecodableImage(e.to_string()))?
            .to_rgb8();
        let (width, height) = rgb.dimensions();
        Self::new(width, height, rgb.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// 左上角的水印保留区域。
    pub fn skip_region(&self) -> SkipRegion {
        SkipRegion::for_dimensions(self.width, self.height)
    }

    /// 在位深 `depth` 下、扣除保留区域后可提取的总位数。
    pub fn available_bits(&self, depth: u8) -> u64 {
        let skip = self.skip_region();
        let pixels = self.width as u64 * self.height as u64;
        let skipped = skip.width as u64 * skip.height as u64;
        pixels.saturating_sub(skipped) * CHANNELS_PER_PIXEL * depth as u64
    }
}

/// 矩形 `[0, width) × [0, height)`，其中的像素不参与提取。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipRegion {
    pub width: u32,
    pub height: u32,
}

impl SkipRegion {
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        Self {
            width: (width as u64 * SKIP_WIDTH_PERCENT / 100) as u32,
            height: (height as u64 * SKIP_HEIGHT_PERCENT / 100) as u32,
        }
    }

    /// 像素是否落在保留区域内 (行和列同时在范围内)。
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }
}
