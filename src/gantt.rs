use std::{collections::BTreeMap, time::Duration};

fn format_time(time: &Duration) -> String {
    format!("{:06.3}", time.as_millis() as f32 / 1000.)
}

enum Record {
    Milestone {
        name: String,
        at: Duration,
    },
    Task {
        name: String,
        start_at: Duration,
        end_at: Duration,
    },
}

impl Record {
    /// Export to a mermaid.js markdown row.
    fn to_md(&self) -> String {
        match self {
            Record::Milestone { name, at } => {
                format!("{}: milestone, {}, 0", name, format_time(at))
            }
            Record::Task {
                name,
                start_at,
                end_at,
            } => format!("{}: {}, {}", name, format_time(start_at), format_time(end_at)),
        }
    }
}

pub struct Gantt {
    /// Sections in name order, hence `BTreeMap`.
    sections: BTreeMap<String, Vec<Record>>,
}

impl Gantt {
    pub fn new() -> Gantt {
        Gantt {
            sections: BTreeMap::new(),
        }
    }

    pub fn push_task(&mut self, section: &str, task: String, start_at: Duration, end_at: Duration) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .push(Record::Task {
                name: task,
                start_at,
                end_at,
            });
    }

    pub fn push_milestone(&mut self, section: &str, milestone: String, at: Duration) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .push(Record::Milestone {
                name: milestone,
                at,
            });
    }

    pub fn to_md(&self) -> Vec<String> {
        let mut rows = vec![
            "gantt".to_string(),
            "dateFormat ss.SSS".to_string(),
            "axisFormat %S.%L s".to_string(),
        ];

        for (name, schedule) in &self.sections {
            rows.push("".to_string());
            rows.push(format!("section {}", name));
            rows.extend(schedule.iter().map(Record::to_md));
        }

        rows
    }
}
