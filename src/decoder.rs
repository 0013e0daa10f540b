//! # 解码入口模块
//!
//! 对每个候选位深依次执行：提取头部 → 解析/解密 → 分类。
//! 第一个成功的位深立即返回；全部失败时按优先级选出一个回退原因。
//!
//! 入口函数是全函数：任何输入都会得到一个结果，而不是错误或 panic。
//! 解码是纯 CPU 计算且不持有共享状态，可在任意线程并发调用。

use crate::carrier::CarrierImage;
use crate::classify::{Classified, DecodeTarget, classify};
use crate::constants::BIT_DEPTH_CANDIDATES;
use crate::error::{CodecError, FailureReason};
use crate::header::{DecodedPayload, parse_header};
use crate::steganography::extract_header_bytes;

/// 仅图片视图下的解码结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Decoded(DecodedPayload),
    Fallback(FailureReason),
}

/// 媒体视图下的解码结果，嵌套视频会被完整解包。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaOutcome {
    Image(DecodedPayload),
    Video(DecodedPayload),
    Fallback(FailureReason),
}

impl MediaOutcome {
    /// 图片或视频载荷；回退时为 `None`。
    pub fn payload(&self) -> Option<&DecodedPayload> {
        match self {
            Self::Image(payload) | Self::Video(payload) => Some(payload),
            Self::Fallback(_) => None,
        }
    }

    /// 回退原因；解码成功时为 `None`。
    pub fn fallback_reason(&self) -> Option<&FailureReason> {
        match self {
            Self::Fallback(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<MediaOutcome> for ImageOutcome {
    fn from(outcome: MediaOutcome) -> Self {
        match outcome {
            MediaOutcome::Image(payload) => Self::Decoded(payload),
            // 仅图片目标下分类器不会产生视频，这里保持全函数
            MediaOutcome::Video(payload) => Self::Fallback(FailureReason::NonImagePayload {
                extension: payload.extension,
            }),
            MediaOutcome::Fallback(reason) => Self::Fallback(reason),
        }
    }
}

/// 单个位深的尝试结果，供诊断使用。
#[derive(Debug)]
pub struct AttemptReport {
    pub depth: u8,
    pub result: Result<Classified, CodecError>,
}

fn attempt(
    carrier: &CarrierImage,
    depth: u8,
    password: &str,
    target: DecodeTarget,
) -> Result<Classified, CodecError> {
    let header = extract_header_bytes(carrier, depth)?;
    let payload = parse_header(&header, password)?;
    classify(payload, target)
}

/// 从所有失败原因中选出一个：
/// `WrongPassword` > `PasswordRequired` > `NonImagePayload` > `CorruptedPayload` > `NotCarrierImage`。
/// 同级时取最先出现的那个；没有任何原因时为 `NotCarrierImage`。
pub fn select_reason<I>(reasons: I) -> FailureReason
where
    I: IntoIterator<Item = FailureReason>,
{
    reasons
        .into_iter()
        .min_by_key(FailureReason::rank)
        .unwrap_or(FailureReason::NotCarrierImage)
}

/// 对已解码的像素执行完整的多位深解码。
pub fn decode_carrier(carrier: &CarrierImage, password: &str, target: DecodeTarget) -> MediaOutcome {
    let mut reasons = Vec::with_capacity(BIT_DEPTH_CANDIDATES.len());

    for depth in BIT_DEPTH_CANDIDATES {
        match attempt(carrier, depth, password, target) {
            Ok(Classified::Image(payload)) => {
                log::debug!("depth {depth}: recovered {} image", payload.extension);
                return MediaOutcome::Image(payload);
            }
            Ok(Classified::Video(payload)) => {
                log::debug!("depth {depth}: recovered {} video", payload.extension);
                return MediaOutcome::Video(payload);
            }
            Err(e) => {
                let reason = e.reason();
                log::debug!("depth {depth}: {reason:?} ({e})");
                reasons.push(reason);
            }
        }
    }

    MediaOutcome::Fallback(select_reason(reasons))
}

/// 不短路地尝试全部位深并报告每一次的结果。
pub fn probe(carrier: &CarrierImage, password: &str, target: DecodeTarget) -> Vec<AttemptReport> {
    BIT_DEPTH_CANDIDATES
        .iter()
        .map(|&depth| AttemptReport {
            depth,
            result: attempt(carrier, depth, password, target),
        })
        .collect()
}

fn decode_encoded(image_bytes: &[u8], password: &str, target: DecodeTarget) -> MediaOutcome {
    match CarrierImage::from_encoded(image_bytes) {
        Ok(carrier) => decode_carrier(&carrier, password, target),
        Err(e) => {
            log::debug!("carrier rejected before extraction: {e}");
            MediaOutcome::Fallback(e.reason())
        }
    }
}

/// 解码载体图像，只接受静态图片载荷。
///
/// 嵌套视频载荷会以 `Fallback(NonImagePayload)` 返回。
pub fn decode_if_carrier(image_bytes: &[u8], password: &str) -> ImageOutcome {
    decode_encoded(image_bytes, password, DecodeTarget::ImageOnly).into()
}

/// 解码载体图像，嵌套视频载荷会被解包为 `Video`。
pub fn decode_media_if_carrier(image_bytes: &[u8], password: &str) -> MediaOutcome {
    decode_encoded(image_bytes, password, DecodeTarget::Media)
}
