use std::{
    io,
    sync::{mpsc, Arc},
    thread,
    time::{Duration, Instant},
};

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::semaphore::Semaphore;
use crate::{Action, Ingredient, Participant, ReportMessage, Reporter, ReporterConfig, Table, INGREDIENTS};

/// 哨兵值，表示取默认吸烟时长
pub const SMOKE_SENTINEL: i64 = -1;
/// 默认吸烟时长
const DEFAULT_SMOKE_MILLIS: u64 = 5000;

/// 把命令行输入的秒数换算成时长，哨兵值 `-1` 取默认的 5 秒
pub fn resolve_smoke_duration(seconds: i64) -> Duration {
    if seconds == SMOKE_SENTINEL {
        Duration::from_millis(DEFAULT_SMOKE_MILLIS)
    } else {
        Duration::from_secs(seconds as u64)
    }
}

/// 代理的三路选择，抽象出来以便测试时换成确定的序列
pub trait PairChooser: Send {
    /// 决定这一轮唤醒哪位吸烟者，即放上他缺的那一对材料
    fn choose(&mut self) -> Ingredient;
}

/// 在三种材料中均匀随机选择
pub struct RandomChooser {
    rng: StdRng,
}

impl RandomChooser {
    pub fn new() -> RandomChooser {
        RandomChooser {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> RandomChooser {
        RandomChooser {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomChooser {
    fn default() -> RandomChooser {
        RandomChooser::new()
    }
}

impl PairChooser for RandomChooser {
    fn choose(&mut self) -> Ingredient {
        INGREDIENTS[self.rng.gen_range(0..INGREDIENTS.len())]
    }
}

pub struct SimulationConfig {
    /// 吸一支烟要多久
    pub smoke_duration: Duration,
    /// 模拟多少轮后停止，`None` 表示一直运行，直到进程被杀死
    pub rounds: Option<u64>,
    /// 打印信息时每个线程缩进的数量
    pub tab: u8,
}

/// 启动三个吸烟者线程和一个代理线程，事件发到 `tx`
///
/// 代理一定在所有吸烟者就位之后才开始放材料，
/// 这样第一对材料不会在没人等的时候上桌。
fn start(
    config: &SimulationConfig,
    mut chooser: impl PairChooser + 'static,
    tx: mpsc::Sender<ReportMessage>,
    origin: Instant,
) -> io::Result<Vec<thread::JoinHandle<()>>> {
    let table = Arc::new(Table::new());
    let ready = Arc::new(Semaphore::new(0));

    let mut handles = Vec::new();
    for ingredient in INGREDIENTS {
        let table = Arc::clone(&table);
        let ready = Arc::clone(&ready);
        let tx = tx.clone();
        let duration = config.smoke_duration;

        handles.push(
            thread::Builder::new()
                .name(format!("smoker-{:?}", ingredient).to_lowercase())
                .spawn(move || {
                    let me = Participant::Smoker(ingredient);
                    tx.send((me, Action::Create, origin.elapsed())).unwrap();
                    ready.signal();

                    loop {
                        table.wait_pair(ingredient);
                        if table.stopped() {
                            break;
                        }

                        tx.send((me, Action::StartSmoking, origin.elapsed())).unwrap();
                        thread::sleep(duration);
                        tx.send((me, Action::EndSmoking, origin.elapsed())).unwrap();

                        table.finish_smoking();
                    }
                })?,
        );
    }

    // 等所有吸烟者就位
    for _ in INGREDIENTS {
        ready.wait();
    }

    let rounds = config.rounds;
    handles.push(
        thread::Builder::new().name("agent".to_string()).spawn(move || {
            tx.send((Participant::Agent, Action::Create, origin.elapsed())).unwrap();

            let mut placed = 0;
            loop {
                // 等上一轮的吸烟者吸完；第一轮消耗的是初值 1
                table.wait_free();
                if rounds.map_or(false, |n| placed == n) {
                    break;
                }

                let ingredient = chooser.choose();
                tx.send((Participant::Agent, Action::Place(ingredient), origin.elapsed()))
                    .unwrap();
                table.place_for(ingredient);
                placed += 1;
            }
            table.request_stop();
        })?,
    );

    Ok(handles)
}

/// 按给定配置运行整个模拟，返回甘特图的 markdown 行
///
/// `rounds` 为 `None` 时本函数不会返回。
pub fn run(config: SimulationConfig, chooser: impl PairChooser + 'static) -> io::Result<Vec<String>> {
    let (tx, rx) = mpsc::channel();
    let origin = Instant::now();
    let mut reporter = Reporter::new(ReporterConfig { tab: config.tab });

    let handles = start(&config, chooser, tx, origin)?;

    // 所有工作线程退出、发送端全部释放后，接收循环才会结束
    reporter.receive(rx);
    for handle in handles {
        handle.join().unwrap();
    }

    Ok(reporter.draw())
}
