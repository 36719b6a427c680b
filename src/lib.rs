// src/lib.rs

//! 電子アンサンブルの位相バンチング方程式
//!
//! ```text
//! d²θ/dz² = Re(A e^{iθ}),  θ|_{z=0} = θ0 ∈ [0, 2π),  dθ/dz|_{z=0} = Δ
//! ```
//!
//! を予測子・修正子法（Runge-Kutta-Nyström 型、2 次精度、固定ステップ）で積分する。

pub mod config;
pub mod error;
pub mod logging;
pub mod math;
pub mod models;
pub mod simulation;

pub use config::RunParameters;
pub use error::SimError;
pub use models::EnsembleState;
pub use simulation::{Integrator, RunController, StepObserver};
