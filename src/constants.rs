/// 依次尝试的位深 (每个颜色通道使用的低位数量)。
/// 顺序固定，第一个成功的位深即为结果。
pub const BIT_DEPTH_CANDIDATES: [u8; 3] = [2, 6, 8];

/// 水印保留区域宽度占图像宽度的百分比 (向下取整)。
pub const SKIP_WIDTH_PERCENT: u64 = 40;

/// 水印保留区域高度占图像高度的百分比 (向下取整)。
pub const SKIP_HEIGHT_PERCENT: u64 = 8;

/// 每个像素参与隐写的颜色通道数 (R, G, B)。
pub const CHANNELS_PER_PIXEL: u64 = 3;

/// 头部长度前缀占用的位数。
/// 前缀按大端 (MSB 优先) 解释为随后头部的字节长度。
pub const LENGTH_PREFIX_BITS: usize = 32;

/// 长度前缀占用的字节数。
pub const LENGTH_PREFIX_BYTES: usize = LENGTH_PREFIX_BITS / 8;

/// 密码哈希 (SHA-256) 的字节数。
pub const PASSWORD_HASH_LEN: usize = 32;

/// 盐的字节数。
pub const SALT_LEN: usize = 16;

/// 数据长度字段的字节数 (大端 u32)。
pub const DATA_LENGTH_BYTES: usize = 4;

/// 嵌套视频编码的扩展名后缀，例如 `mp4.binpng`。
pub const BINPNG_SUFFIX: &str = ".binpng";

/// 嵌套视频解包后固定使用的扩展名。
pub const NESTED_VIDEO_EXTENSION: &str = "mp4";

/// 可直接作为图片使用的扩展名。
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "gif", "bmp"];
