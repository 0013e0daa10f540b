//! # carrier_unveil 库
//!
//! 本库从载体图像的低位中恢复隐藏的图片或视频载荷。
//! 主要入口为 [`decode_if_carrier`] 和 [`decode_media_if_carrier`]。

// 声明库包含的所有模块。

pub mod binpng;
pub mod carrier;
pub mod cipher;
pub mod classify;
pub mod cli;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod handler;
pub mod header;
pub mod steganography;

pub use carrier::{CarrierImage, SkipRegion};
pub use classify::DecodeTarget;
pub use decoder::{ImageOutcome, MediaOutcome, decode_carrier, decode_if_carrier, decode_media_if_carrier};
pub use error::{CodecError, FailureReason};
pub use header::DecodedPayload;
