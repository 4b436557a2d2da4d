use std::sync::atomic::{AtomicBool, Ordering};

use super::semaphore::Semaphore;

/// 吸烟的材料
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ingredient {
    /// 烟草
    Tobacco,
    /// 火柴
    Matches,
    /// 纸
    Paper,
}

pub const INGREDIENTS: [Ingredient; 3] = [Ingredient::Tobacco, Ingredient::Matches, Ingredient::Paper];

impl Ingredient {
    pub fn name(self) -> &'static str {
        match self {
            Ingredient::Tobacco => "烟草",
            Ingredient::Matches => "火柴",
            Ingredient::Paper => "纸",
        }
    }

    /// 另外两种材料，即要让这位吸烟者吸上烟，代理需放上桌的那一对
    pub fn complement(self) -> (Ingredient, Ingredient) {
        match self {
            Ingredient::Tobacco => (Ingredient::Matches, Ingredient::Paper),
            Ingredient::Matches => (Ingredient::Tobacco, Ingredient::Paper),
            Ingredient::Paper => (Ingredient::Tobacco, Ingredient::Matches),
        }
    }
}

/// 桌子：代理与吸烟者之间唯一共享的同步状态
///
/// 桌面本身不存数据，“桌上有什么”全部隐含在四个信号量的计数里。
pub struct Table {
    /// 桌面空闲，代理可以放下一对材料（初值 1）
    smoking_completed: Semaphore,
    /// 每种材料对应的“互补的一对已上桌”信号（初值 0），
    /// 按 `INGREDIENTS` 的顺序排列
    pair_ready: [Semaphore; 3],
    /// 协作式停止标志
    stopped: AtomicBool,
}

impl Table {
    pub fn new() -> Table {
        Table {
            smoking_completed: Semaphore::new(1),
            pair_ready: [Semaphore::new(0), Semaphore::new(0), Semaphore::new(0)],
            stopped: AtomicBool::new(false),
        }
    }

    /// 代理：等桌面空出来
    pub fn wait_free(&self) {
        self.smoking_completed.wait();
    }

    /// 代理：放上 `ingredient` 的互补对，唤醒对应的吸烟者
    pub fn place_for(&self, ingredient: Ingredient) {
        self.pair_ready[ingredient as usize].signal();
    }

    /// 吸烟者：等自己缺的那对材料上桌
    pub fn wait_pair(&self, ingredient: Ingredient) {
        self.pair_ready[ingredient as usize].wait();
    }

    /// 吸烟者：吸完了，桌面归还给代理
    pub fn finish_smoking(&self) {
        self.smoking_completed.signal();
    }

    /// 要求所有线程停下：竖起标志，并把每个配对信号都发一次，
    /// 让阻塞中的吸烟者醒来看到标志
    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        for pair in &self.pair_ready {
            pair.signal();
        }
    }

    pub fn stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl Default for Table {
    fn default() -> Table {
        Table::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complements_match_the_narration() {
        assert_eq!(
            Ingredient::Tobacco.complement(),
            (Ingredient::Matches, Ingredient::Paper)
        );
        assert_eq!(
            Ingredient::Matches.complement(),
            (Ingredient::Tobacco, Ingredient::Paper)
        );
        assert_eq!(
            Ingredient::Paper.complement(),
            (Ingredient::Tobacco, Ingredient::Matches)
        );
    }

    #[test]
    fn placement_wakes_only_the_matching_waiter() {
        let table = Table::new();
        table.place_for(Ingredient::Paper);
        // Would block forever if the permit went to another ingredient.
        table.wait_pair(Ingredient::Paper);
    }

    #[test]
    fn stop_releases_every_pair_waiter() {
        let table = Table::new();
        assert!(!table.stopped());

        table.request_stop();
        assert!(table.stopped());
        for ingredient in INGREDIENTS {
            table.wait_pair(ingredient);
        }
    }
}
