// src/models/mod.rs

pub mod ensemble;
pub mod extrema;
pub mod track;

pub use ensemble::{EnsembleState, PhaseTrack};
pub use extrema::Extrema;
pub use track::Track;
