// src/math/mod.rs

pub mod integrator;
pub mod coupling;

pub use integrator::{correct, predict, PhasePoint};
pub use coupling::{coupling_integral, forcing};
