mod gantt;
mod reports;
mod semaphore;
mod simulation;
mod table;

pub use reports::{Action, Participant, ReportMessage, Reporter, ReporterConfig};
pub use simulation::{
    resolve_smoke_duration, run, PairChooser, RandomChooser, SimulationConfig, SMOKE_SENTINEL,
};
pub use table::{Ingredient, Table, INGREDIENTS};
