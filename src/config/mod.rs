// src/config/mod.rs

pub mod parameters;

pub use parameters::GridSize;
pub use parameters::RunParameters;
