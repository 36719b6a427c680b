// src/simulation/mod.rs

pub mod control;
pub mod csv;
pub mod framework;
pub mod load_parameters;
pub mod observer;

pub use control::{ControlEvent, RunController};
pub use csv::{PhaseSpaceCsv, TrajectoryCsv};
pub use framework::{initialize_ensemble, Integrator, RunSummary};
pub use load_parameters::load_parameters;
pub use observer::{NoopObserver, ProgressLog, StepObserver};
