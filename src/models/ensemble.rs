// src/models/ensemble.rs

use std::f64::consts::PI;

use num_complex::Complex64;
use tracing::debug;

use crate::config::RunParameters;
use crate::error::SimError;
use crate::math::coupling_integral;
use crate::models::extrema::Extrema;
use crate::models::track::Track;

/// 位相 θ(z, k) と位相速度 dθ/dz(z, k) の組
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTrack {
    pub theta: Track,
    pub dtheta: Track,
}

impl PhaseTrack {
    fn new(nz: usize, ne: usize) -> Self {
        PhaseTrack {
            theta: Track::filled(nz, ne, 0.0),
            dtheta: Track::filled(nz, ne, 0.0),
        }
    }
}

/// 電子アンサンブルの全状態
///
/// - `reference`: 駆動なし（dθ/dz = 0）の参照軌道。初期化のみで積分はしない
/// - `driven`: 積分器が格子点 0 から順に埋めていく軌道
#[derive(Debug, Clone)]
pub struct EnsembleState {
    h: f64,
    delta: f64,
    hth: f64,
    z: Vec<f64>,
    reference: PhaseTrack,
    driven: PhaseTrack,
    amplitude: Complex64,
    extrema: Extrema,
}

impl EnsembleState {
    /// パラメータを検証してから配列を確保し、初期条件を設定する
    pub fn new(params: &RunParameters) -> Result<Self, SimError> {
        let size = params.validate()?;
        let hth = 2.0 * PI / size.ne as f64;

        let z = (0..size.nz).map(|i| i as f64 * params.h).collect();

        let mut state = EnsembleState {
            h: params.h,
            delta: params.delta,
            hth,
            z,
            reference: PhaseTrack::new(size.nz, size.ne),
            driven: PhaseTrack::new(size.nz, size.ne),
            amplitude: Complex64::new(params.ar, params.ai),
            extrema: Extrema::empty(),
        };

        for i in 0..size.nz {
            for (k, theta) in state.reference.theta.row_mut(i).iter_mut().enumerate() {
                *theta = hth * k as f64;
            }
        }
        state.reset();

        debug!(nz = size.nz, ne = size.ne, hth, "アンサンブルを初期化しました");
        Ok(state)
    }

    /// 駆動軌道の初期条件と極値を設定し直す
    ///
    /// 同じ入力で計算をやり直すときに使う。
    pub fn reset(&mut self) {
        let hth = self.hth;
        for (k, theta) in self.driven.theta.row_mut(0).iter_mut().enumerate() {
            *theta = hth * k as f64;
        }
        self.driven.dtheta.row_mut(0).fill(self.delta);

        self.extrema = Extrema::empty();
        self.extrema
            .update_row(self.driven.theta.row(0), self.driven.dtheta.row(0));
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    /// 初期位相の間隔 2π/Ne
    pub fn phase_step(&self) -> f64 {
        self.hth
    }

    /// 格子点数 NZ
    pub fn nz(&self) -> usize {
        self.z.len()
    }

    /// 電子数 Ne
    pub fn electrons(&self) -> usize {
        self.driven.theta.cols()
    }

    pub fn grid(&self) -> &[f64] {
        &self.z
    }

    pub fn z(&self, index: usize) -> f64 {
        self.z[index]
    }

    pub fn amplitude(&self) -> Complex64 {
        self.amplitude
    }

    pub fn reference(&self) -> &PhaseTrack {
        &self.reference
    }

    pub fn driven(&self) -> &PhaseTrack {
        &self.driven
    }

    pub fn extrema(&self) -> &Extrema {
        &self.extrema
    }

    /// 格子点 `index` における結合積分 J
    pub fn bunching(&self, index: usize) -> Complex64 {
        coupling_integral(self.driven.theta.row(index))
    }

    /// 積分器用: 駆動軌道と極値を同時に可変借用する
    pub(crate) fn parts_mut(&mut self) -> (&mut PhaseTrack, &mut Extrema) {
        (&mut self.driven, &mut self.extrema)
    }
}
