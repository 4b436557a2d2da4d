use std::process;

use clap::Parser;

use smokers::{resolve_smoke_duration, run, RandomChooser, SimulationConfig, SMOKE_SENTINEL};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// 吸一支烟要几秒，-1 表示默认（5 秒）
    #[clap(default_value_t = SMOKE_SENTINEL, allow_hyphen_values = true, value_parser = clap::value_parser!(i64).range(-1..))]
    time: i64,
    /// 模拟多少轮后停止，不指定则一直运行
    #[clap(short, long, value_parser)]
    rounds: Option<u64>,
    /// 打印信息时每个线程缩进的数量
    #[clap(short, long, default_value_t = 0, value_parser)]
    tab: u8,
    /// 结束后把甘特图复制到剪贴板
    #[clap(short, long, action)]
    copy: bool,
}

fn main() {
    let args = Args::parse();
    let config = SimulationConfig {
        smoke_duration: resolve_smoke_duration(args.time),
        rounds: args.rounds,
        tab: args.tab,
    };

    let rows = run(config, RandomChooser::new()).unwrap_or_else(|err| {
        eprintln!("Problem spawning workers: {err}");
        process::exit(1);
    });

    let chart = rows.join("\n");
    println!("\n{chart}");

    if args.copy {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(chart)) {
            Ok(()) => println!("已复制到剪贴板。"),
            Err(err) => eprintln!("Problem accessing the clipboard: {err}"),
        }
    }
}
