//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 从载体图像的低位中恢复隐藏的图片或视频。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "从载体图像的低位中恢复隐藏的图片或视频。非载体图像会被识别为普通图片。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：decode (解码) 和 inspect (诊断)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 解码载体图像并保存隐藏的载荷。
    Decode(DecodeArgs),

    /// 逐个位深报告解码尝试的结果。
    Inspect(InspectArgs),
}

/// 'decode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// 载体图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 保存载荷的输出路径。缺省时写入图像所在目录。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 解密载荷使用的口令，可为空。
    #[arg(
        short,
        long,
        env = "CARRIER_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    pub password: String,

    /// 允许解包嵌套视频载荷。
    #[arg(short, long)]
    pub media: bool,

    /// 解码失败时将原始图像写入输出路径。
    #[arg(short, long)]
    pub keep_original: bool,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'inspect' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// 载体图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 解密载荷使用的口令，可为空。
    #[arg(
        short,
        long,
        env = "CARRIER_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    pub password: String,

    /// 按媒体目标进行分类。
    #[arg(short, long)]
    pub media: bool,
}
