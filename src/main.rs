use clap::Parser;

use carrier_unveil::{
    cli::{Cli, Commands},
    handler::{handle_decode, handle_inspect},
};

/// 程序的主入口点
///
/// 初始化日志后解析命令行参数，并根据指定的子命令（`decode` 或 `inspect`）
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 默认只输出警告，可通过 RUST_LOG 调整
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode(args) => handle_decode(args),
        Commands::Inspect(args) => handle_inspect(args),
    }
}
