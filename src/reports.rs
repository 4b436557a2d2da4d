use std::{collections::HashMap, sync::mpsc::Receiver, time::Duration};

use super::gantt::Gantt;
use super::table::Ingredient;

/// 参与者：一个代理，三个吸烟者
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Participant {
    /// 代理
    Agent,
    /// 吸烟者，以其手头无限供应的那种材料区分
    Smoker(Ingredient),
}

impl Participant {
    pub fn name(&self) -> String {
        match self {
            Participant::Agent => "代理".to_string(),
            Participant::Smoker(ingredient) => format!("{}吸烟者", ingredient.name()),
        }
    }

    /// 打印时的缩进档位
    fn column(&self) -> usize {
        match self {
            Participant::Agent => 0,
            Participant::Smoker(ingredient) => *ingredient as usize + 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// 创建线程
    Create,
    /// 放上一对材料（参数是因此被唤醒的吸烟者的材料）
    Place(Ingredient),
    /// 开始吸烟
    StartSmoking,
    /// 吸完了
    EndSmoking,
}

/// (who, action, now.elapsed())
pub type ReportMessage = (Participant, Action, Duration);

pub struct ReporterConfig {
    /// 打印信息时每个线程缩进的数量
    pub tab: u8,
}

pub struct Reporter {
    gantt: Gantt,
    /// Smokers that started but not done yet ⇒ start at
    pending_start_at: HashMap<Participant, Duration>,
    /// 打印信息时每个线程缩进的数量
    pub tab: u8,
}

impl Reporter {
    pub fn new(config: ReporterConfig) -> Reporter {
        Reporter {
            gantt: Gantt::new(),
            pending_start_at: HashMap::new(),
            tab: config.tab,
        }
    }

    /// Receive reports
    ///
    /// Reports format: (who, action, now.elapsed())
    pub fn receive(&mut self, rx: Receiver<ReportMessage>) {
        for (who, action, at) in rx {
            let who_str = who.name();

            // Update the Gantt
            match action {
                Action::Create => self.gantt.push_milestone(&who_str, "🚀".to_string(), at),
                Action::Place(ingredient) => {
                    let (a, b) = ingredient.complement();
                    self.gantt
                        .push_milestone(&who_str, format!("🫴{}{}", a.name(), b.name()), at);
                }
                Action::StartSmoking => {
                    let old = self.pending_start_at.insert(who, at);
                    assert!(old.is_none(), "A smoker starts again before it ends.");
                    assert!(
                        self.pending_start_at.len() == 1,
                        "Two smokers are smoking at the same time."
                    );
                }
                Action::EndSmoking => {
                    let start_at = self
                        .pending_start_at
                        .remove(&who)
                        .expect("A smoker ends before it starts.");

                    self.gantt.push_task(&who_str, "🚬".to_string(), start_at, at);
                }
            }

            // Print
            let action_str = match action {
                Action::Create => "🚀创建".to_string(),
                Action::Place(ingredient) => {
                    let (a, b) = ingredient.complement();
                    format!("🫴放上{}和{}", a.name(), b.name())
                }
                Action::StartSmoking => "🏁开始吸烟".to_string(),
                Action::EndSmoking => "🛑吸完了".to_string(),
            };
            println!(
                "{:6.3} s |{:indent$}{}：{}。",
                at.as_millis() as f32 / 1000.,
                " ",
                who_str,
                action_str,
                indent = who.column() * self.tab as usize
            );
        }
    }

    pub fn draw(&self) -> Vec<String> {
        self.gantt.to_md()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn receive_all(messages: Vec<ReportMessage>) -> Reporter {
        let (tx, rx) = mpsc::channel();
        for m in messages {
            tx.send(m).unwrap();
        }
        drop(tx);

        let mut reporter = Reporter::new(ReporterConfig { tab: 0 });
        reporter.receive(rx);
        reporter
    }

    #[test]
    fn one_round_becomes_a_task() {
        let smoker = Participant::Smoker(Ingredient::Paper);
        let reporter = receive_all(vec![
            (Participant::Agent, Action::Place(Ingredient::Paper), Duration::ZERO),
            (smoker, Action::StartSmoking, Duration::from_millis(10)),
            (smoker, Action::EndSmoking, Duration::from_millis(1010)),
        ]);

        let rows = reporter.draw();
        assert!(rows.contains(&"section 纸吸烟者".to_string()));
        assert!(rows.contains(&"🚬: 00.010, 01.010".to_string()));
        assert!(rows.contains(&"🫴烟草火柴: milestone, 00.000, 0".to_string()));
    }

    #[test]
    #[should_panic(expected = "Two smokers are smoking at the same time.")]
    fn overlapping_smokers_are_rejected() {
        receive_all(vec![
            (
                Participant::Smoker(Ingredient::Tobacco),
                Action::StartSmoking,
                Duration::ZERO,
            ),
            (
                Participant::Smoker(Ingredient::Paper),
                Action::StartSmoking,
                Duration::from_millis(1),
            ),
        ]);
    }

    #[test]
    #[should_panic(expected = "A smoker ends before it starts.")]
    fn ending_without_starting_is_rejected() {
        receive_all(vec![(
            Participant::Smoker(Ingredient::Matches),
            Action::EndSmoking,
            Duration::ZERO,
        )]);
    }
}
