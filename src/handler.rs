//! # 命令处理逻辑模块
//!
//! 包含处理 `decode` 和 `inspect` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用解码器以及向用户报告结果。

use crate::carrier::CarrierImage;
use crate::classify::{Classified, DecodeTarget};
use crate::cli::{DecodeArgs, InspectArgs};
use crate::decoder::{
    ImageOutcome, MediaOutcome, decode_carrier, decode_if_carrier, decode_media_if_carrier, probe,
};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

fn target_for(media: bool) -> DecodeTarget {
    if media {
        DecodeTarget::Media
    } else {
        DecodeTarget::ImageOnly
    }
}

/// 生成载荷的默认输出路径：`<目录>/unveiled_<文件名主干>.<扩展名>`。
pub fn default_payload_path(image: &Path, extension: &str) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "carrier".to_owned());
    image.with_file_name(format!("unveiled_{stem}.{extension}"))
}

/// 生成保留原图时的默认输出路径：`<目录>/original_<文件名>`。
pub fn default_original_path(image: &Path) -> PathBuf {
    let name = image
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "carrier".to_owned());
    image.with_file_name(format!("original_{name}"))
}

fn write_output(dest: &Path, bytes: &[u8], force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );

    fs::write(dest, bytes).with_context(|| {
        format!(
            "Unable to write to output file: {}",
            dest.to_string_lossy().red().bold()
        )
    })
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 解码成功时将载荷写入目标路径；失败时报告回退原因，
/// 并在指定 `--keep-original` 时写出原始图像。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入到目标文件。
///
/// 图像不是载体或载荷无法使用不属于错误。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    let picture = read_image(&args.image)?;

    let outcome = if args.media {
        decode_media_if_carrier(&picture, &args.password)
    } else {
        match decode_if_carrier(&picture, &args.password) {
            ImageOutcome::Decoded(payload) => MediaOutcome::Image(payload),
            ImageOutcome::Fallback(reason) => MediaOutcome::Fallback(reason),
        }
    };

    let (kind, payload) = match outcome {
        MediaOutcome::Image(payload) => ("image", payload),
        MediaOutcome::Video(payload) => ("video", payload),
        MediaOutcome::Fallback(reason) => {
            if reason.notifies_user() {
                println!("{}", reason.to_string().yellow().bold());
            } else {
                println!(
                    "{} is an ordinary image without a hidden payload.",
                    args.image.to_string_lossy().bold()
                );
            }

            if args.keep_original {
                let dest = args
                    .dest
                    .unwrap_or_else(|| default_original_path(&args.image));
                write_output(&dest, &picture, args.force)?;
                println!(
                    "The original image has been kept: {}",
                    dest.to_string_lossy().green().bold()
                );
            }
            return Ok(());
        }
    };

    let dest = args
        .dest
        .unwrap_or_else(|| default_payload_path(&args.image, &payload.extension));
    write_output(&dest, &payload.bytes, args.force)?;

    println!(
        "The hidden {} ({}, {} bytes) has been recovered and saved: {}",
        kind,
        payload.extension.cyan(),
        payload.bytes.len(),
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Inspect' 命令的执行逻辑。
///
/// 打印图像尺寸、保留区域、每个位深的可用位数与尝试结果，以及最终选出的结果。
///
/// # Errors
///
/// 无法读取图像文件或文件不是可解码的位图时返回错误。
pub fn handle_inspect(args: InspectArgs) -> Result<()> {
    let picture = read_image(&args.image)?;
    let carrier = CarrierImage::from_encoded(&picture).with_context(|| {
        format!(
            "Unable to decode image: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let skip = carrier.skip_region();
    println!(
        "{}x{} pixels, watermark region {}x{}",
        carrier.width(),
        carrier.height(),
        skip.width,
        skip.height
    );

    let target = target_for(args.media);
    for report in probe(&carrier, &args.password, target) {
        let status = match &report.result {
            Ok(Classified::Image(payload)) => {
                format!("image {} ({} bytes)", payload.extension, payload.bytes.len())
                    .green()
                    .to_string()
            }
            Ok(Classified::Video(payload)) => {
                format!("video {} ({} bytes)", payload.extension, payload.bytes.len())
                    .green()
                    .to_string()
            }
            Err(e) => format!("{:?}: {}", e.reason(), e).red().to_string(),
        };
        println!(
            "  k={} ({} bits available): {}",
            report.depth,
            carrier.available_bits(report.depth),
            status
        );
    }

    let summary = match decode_carrier(&carrier, &args.password, target) {
        MediaOutcome::Image(payload) => format!("image ({})", payload.extension).green(),
        MediaOutcome::Video(payload) => format!("video ({})", payload.extension).green(),
        MediaOutcome::Fallback(reason) => format!("fallback: {reason}").yellow(),
    };
    println!("Outcome: {}", summary.bold());

    Ok(())
}
