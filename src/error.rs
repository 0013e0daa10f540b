//! # 错误模型模块
//!
//! 库内部使用 [`CodecError`] 描述每一次位深尝试失败的具体原因，
//! 对外只暴露归类后的 [`FailureReason`]。两者都由 `thiserror` 派生。

/// 调用方可见的回退原因。
///
/// 解码入口从不返回错误，所有失败都会被归类为以下之一。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    #[error("The image does not carry a hidden payload")]
    NotCarrierImage,

    #[error("The hidden payload is password protected; a password is required")]
    PasswordRequired,

    #[error("The password does not match the hidden payload")]
    WrongPassword,

    #[error("The hidden payload is not a supported image (extension: {extension})")]
    NonImagePayload { extension: String },

    #[error("The hidden payload is corrupted")]
    CorruptedPayload,
}

impl FailureReason {
    /// 是否需要向用户提示。
    ///
    /// 普通图片 (`NotCarrierImage`) 不应打扰用户，其余原因都说明
    /// 图片确实携带了内容但无法使用。
    pub fn notifies_user(&self) -> bool {
        !matches!(self, Self::NotCarrierImage)
    }

    /// 回退选择时的排名，数值越小优先级越高。
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Self::WrongPassword => 0,
            Self::PasswordRequired => 1,
            Self::NonImagePayload { .. } => 2,
            Self::CorruptedPayload => 3,
            Self::NotCarrierImage => 4,
        }
    }
}

/// 单次位深尝试中的内部错误。
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("image is {width}x{height} with {actual} RGB bytes")]
    InvalidDimensions {
        width: u32,
        height: u32,
        actual: usize,
    },

    #[error("image could not be decoded: {0}")]
    UndecodableImage(String),

    #[error("bit depth {0} is outside 1..=8")]
    UnsupportedDepth(u8),

    #[error("need {required} bits but only {available} are available")]
    CapacityExceeded { required: u64, available: u64 },

    #[error("header ended while reading {field}")]
    Truncated { field: &'static str },

    #[error("password flag byte is {0}, expected 0 or 1")]
    InvalidFlag(u8),

    #[error("extension is not valid UTF-8")]
    InvalidExtension,

    #[error("declared data length {declared} but {actual} bytes remain")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("payload bytes do not look like {extension}")]
    SignatureMismatch { extension: String },

    #[error("nested image could not be unpacked by any backend")]
    NestedDecode,

    #[error("password required")]
    PasswordRequired,

    #[error("password hash mismatch")]
    WrongPassword,

    #[error("unsupported payload extension {0:?}")]
    NonImagePayload(String),
}

impl CodecError {
    /// 将内部错误归类为调用方可见的回退原因。
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::InvalidDimensions { .. }
            | Self::UndecodableImage(_)
            | Self::UnsupportedDepth(_)
            | Self::CapacityExceeded { .. } => FailureReason::NotCarrierImage,
            Self::Truncated { .. }
            | Self::InvalidFlag(_)
            | Self::InvalidExtension
            | Self::LengthMismatch { .. }
            | Self::SignatureMismatch { .. }
            | Self::NestedDecode => FailureReason::CorruptedPayload,
            Self::PasswordRequired => FailureReason::PasswordRequired,
            Self::WrongPassword => FailureReason::WrongPassword,
            Self::NonImagePayload(extension) => FailureReason::NonImagePayload {
                extension: extension.clone(),
            },
        }
    }
}
