use std::sync::{Condvar, Mutex};

/// 计数信号量
pub struct Semaphore {
    count: Mutex<u32>,
    cvar: Condvar,
}

impl Semaphore {
    pub fn new(count: u32) -> Semaphore {
        Semaphore {
            count: Mutex::new(count),
            cvar: Condvar::new(),
        }
    }

    /// P 操作：等到计数大于零，然后减一
    pub fn wait(&self) {
        let mut count = self.count.lock().unwrap();
        while *count == 0 {
            count = self.cvar.wait(count).unwrap();
        }
        *count -= 1;
    }

    /// V 操作：计数加一，唤醒一个等待者（若有）
    pub fn signal(&self) {
        let mut count = self.count.lock().unwrap();
        *count += 1;
        self.cvar.notify_one();
    }
}
