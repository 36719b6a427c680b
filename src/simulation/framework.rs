// src/simulation/framework.rs

use tracing::{info, warn};

use crate::config::RunParameters;
use crate::error::SimError;
use crate::math::{correct, forcing, predict, PhasePoint};
use crate::models::{EnsembleState, Extrema};
use crate::simulation::control::RunController;
use crate::simulation::observer::StepObserver;

/// 実行結果の要約
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub extrema: Extrema,
}

/// シミュレーションステートの初期化
pub fn initialize_ensemble(params: &RunParameters) -> Result<EnsembleState, SimError> {
    let state = EnsembleState::new(params)?;
    let (nz, hth) = (state.nz(), state.phase_step());
    info!(
        h = params.h,
        L = params.length,
        Ne = params.electrons,
        delta = params.delta,
        NZ = nz,
        hth,
        "パラメータを読み込みました"
    );
    Ok(state)
}

/// 予測子・修正子法による積分器
///
/// 右辺 F0 の作業領域を保持し、格子点 0 から NZ-1 まで順に計算する。
#[derive(Debug, Default)]
pub struct Integrator {
    f0: Vec<f64>,
}

impl Integrator {
    pub fn new() -> Self {
        Integrator::default()
    }

    /// 格子点 `index` から `index + 1` へ 1 ステップ進める
    ///
    /// 全電子の予測子を計算してから修正子を計算する。
    /// 非有限値が現れた場合は `NumericInstability` を返す。
    pub fn execute_step(&mut self, state: &mut EnsembleState, index: usize) -> Result<(), SimError> {
        let h = state.h();
        let amplitude = state.amplitude();
        let ne = state.electrons();
        let (driven, extrema) = state.parts_mut();

        self.f0.resize(ne, 0.0);

        let (theta, theta_next) = driven.theta.adjacent_rows_mut(index);
        let (dtheta, dtheta_next) = driven.dtheta.adjacent_rows_mut(index);

        // 予測子
        for k in 0..ne {
            let f0 = forcing(amplitude, theta[k]);
            if !f0.is_finite() {
                return Err(SimError::NumericInstability {
                    grid_index: index,
                    electron_index: k,
                });
            }
            self.f0[k] = f0;

            let current = PhasePoint { theta: theta[k], dtheta: dtheta[k] };
            let predicted = predict(current, f0, h);
            theta_next[k] = predicted.theta;
            dtheta_next[k] = predicted.dtheta;
        }

        // 修正子
        for k in 0..ne {
            let f0 = self.f0[k];
            let f1 = forcing(amplitude, theta_next[k]);

            let current = PhasePoint { theta: theta[k], dtheta: dtheta[k] };
            let corrected = correct(current, f0, f1, h);
            if !f1.is_finite() || !corrected.theta.is_finite() || !corrected.dtheta.is_finite() {
                return Err(SimError::NumericInstability {
                    grid_index: index + 1,
                    electron_index: k,
                });
            }
            theta_next[k] = corrected.theta;
            dtheta_next[k] = corrected.dtheta;

            extrema.update(corrected.theta, corrected.dtheta);
        }

        Ok(())
    }

    /// 全格子点を計算する
    ///
    /// # 引数
    /// - `state`: 初期化済みのアンサンブル（格子点 0 のみ有効）
    /// - `controller`: 終了時の停止要求ハンドシェイクに使う
    /// - `observer`: 各ステップ完了時と計算完了時に通知を受ける
    ///
    /// # 戻り値
    /// - 計算したステップ数と最終的な極値
    pub fn run<O: StepObserver + ?Sized>(
        &mut self,
        state: &mut EnsembleState,
        controller: &RunController,
        observer: &mut O,
    ) -> Result<RunSummary, SimError> {
        observer.on_start(state)?;

        let nz = state.nz();
        for i in 0..nz - 1 {
            self.execute_step(state, i)?;
            observer.on_step(i + 1, state)?;
        }

        if controller.stop_requested() {
            warn!("停止要求を受け付けました。計算フラグの解除を待ちます");
            controller.wait_until_idle();
        }
        observer.on_finished(state)?;

        Ok(RunSummary {
            steps: nz - 1,
            extrema: *state.extrema(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn params(h: f64, length: f64, electrons: i64, ar: f64, ai: f64, delta: f64) -> RunParameters {
        RunParameters {
            h,
            length,
            electrons,
            ar,
            ai,
            delta,
            show_phase_space: false,
            show_trajectories: false,
        }
    }

    /// 通知を記録するだけの受け手
    #[derive(Default)]
    struct Recorder {
        started: usize,
        steps: Vec<usize>,
        finished: usize,
        thmax: Vec<f64>,
        thmin: Vec<f64>,
    }

    impl StepObserver for Recorder {
        fn on_start(&mut self, _state: &EnsembleState) -> Result<(), SimError> {
            self.started += 1;
            Ok(())
        }

        fn on_step(&mut self, index: usize, state: &EnsembleState) -> Result<(), SimError> {
            self.steps.push(index);
            self.thmax.push(state.extrema().thmax);
            self.thmin.push(state.extrema().thmin);
            Ok(())
        }

        fn on_finished(&mut self, _state: &EnsembleState) -> Result<(), SimError> {
            self.finished += 1;
            Ok(())
        }
    }

    fn run(p: &RunParameters) -> (EnsembleState, Recorder, RunSummary) {
        let mut state = initialize_ensemble(p).unwrap();
        let controller = RunController::new();
        let mut recorder = Recorder::default();
        let summary = Integrator::new()
            .run(&mut state, &controller, &mut recorder)
            .unwrap();
        (state, recorder, summary)
    }

    #[test]
    fn test_end_to_end_scenario() {
        let (state, recorder, summary) = run(&params(0.01, 1.0, 8, 1.0, 0.0, 0.0));

        assert_eq!(summary.steps, 100);
        assert_eq!(recorder.started, 1);
        assert_eq!(recorder.finished, 1);
        assert_eq!(recorder.steps, (1..=100).collect::<Vec<_>>());

        let driven = state.driven();
        assert_eq!(driven.theta.rows(), 101);
        assert_eq!(driven.theta.cols(), 8);
        assert!(driven.theta.iter_rows().all(|row| row.iter().all(|v| v.is_finite())));
        assert!(driven.dtheta.iter_rows().all(|row| row.iter().all(|v| v.is_finite())));
        assert_eq!(summary.extrema, *state.extrema());
    }

    #[test]
    fn test_single_electron_without_forcing_stays_put() {
        let (state, _, _) = run(&params(0.1, 1.0, 1, 0.0, 0.0, 0.0));
        for i in 0..state.nz() {
            assert_eq!(state.driven().theta.get(i, 0), 0.0);
            assert_eq!(state.driven().dtheta.get(i, 0), 0.0);
        }
    }

    #[test]
    fn test_free_drift_with_velocity_offset() {
        // A = 0 なら θ = θ0 + Δ·z
        let (state, _, _) = run(&params(0.1, 1.0, 2, 0.0, 0.0, 0.5));
        for i in 0..state.nz() {
            for k in 0..2 {
                let expected = state.phase_step() * k as f64 + 0.5 * state.z(i);
                assert!((state.driven().theta.get(i, k) - expected).abs() < 1e-12);
                assert_eq!(state.driven().dtheta.get(i, k), 0.5);
            }
        }
    }

    #[test]
    fn test_first_step_matches_hand_computation() {
        let p = params(0.1, 0.1, 2, 1.0, 0.0, 0.2);
        let (state, _, _) = run(&p);
        let h = 0.1;

        for k in 0..2 {
            let th0 = state.phase_step() * k as f64;
            let f0 = th0.cos();
            let th_pred = th0 + 0.2 * h + h / 2.0 * f0 * h;
            let f1 = th_pred.cos();
            let th1 = th0 + 0.2 * h + h / 6.0 * f0 * h + h / 3.0 * f1 * h;
            let v1 = 0.2 + h / 2.0 * (f0 + f1);

            assert!((state.driven().theta.get(1, k) - th1).abs() < 1e-12);
            assert!((state.driven().dtheta.get(1, k) - v1).abs() < 1e-12);
        }
    }

    #[test]
    fn test_equilibrium_phase_is_stationary() {
        // A = -1 では θ'' = -cos θ。θ0 = 3π/2 の電子は安定平衡点にいる
        let p = params(0.001, 1.0, 4, -1.0, 0.0, 0.0);
        let mut state = initialize_ensemble(&p).unwrap();
        Integrator::new()
            .run(&mut state, &RunController::new(), &mut crate::simulation::NoopObserver)
            .unwrap();
        let last = state.nz() - 1;
        let expected = 1.5 * std::f64::consts::PI;
        assert!((state.driven().theta.get(last, 3) - expected).abs() < 1e-9);
        assert!(state.driven().dtheta.get(last, 3).abs() < 1e-9);
    }

    #[test]
    fn test_determinism() {
        let p = params(0.02, 2.0, 16, 0.8, -0.3, 0.1);
        let (a, _, sa) = run(&p);
        let (b, _, sb) = run(&p);
        assert_eq!(a.driven(), b.driven());
        assert_eq!(sa.extrema, sb.extrema);
    }

    #[test]
    fn test_extrema_monotonic() {
        let (state, recorder, _) = run(&params(0.05, 5.0, 12, 2.0, 1.0, 0.3));
        assert!(recorder.thmax.windows(2).all(|w| w[1] >= w[0]));
        assert!(recorder.thmin.windows(2).all(|w| w[1] <= w[0]));

        let e = state.extrema();
        for row in state.driven().theta.iter_rows() {
            assert!(row.iter().all(|&v| v >= e.thmin && v <= e.thmax));
        }
        for row in state.driven().dtheta.iter_rows() {
            assert!(row.iter().all(|&v| v >= e.dthmin && v <= e.dthmax));
        }
    }

    #[test]
    fn test_single_grid_point_finishes_without_steps() {
        let (_, recorder, summary) = run(&params(2.0, 1.0, 3, 1.0, 0.0, 0.0));
        assert_eq!(summary.steps, 0);
        assert!(recorder.steps.is_empty());
        assert_eq!(recorder.finished, 1);
    }

    #[test]
    fn test_numeric_instability_reported() {
        // z = 2 で θ = 2·f64::MAX となり溢れる
        let p = params(1.0, 3.0, 2, 0.0, 0.0, f64::MAX);
        let mut state = initialize_ensemble(&p).unwrap();
        let mut recorder = Recorder::default();
        let result = Integrator::new().run(&mut state, &RunController::new(), &mut recorder);

        match result {
            Err(SimError::NumericInstability {
                grid_index,
                electron_index,
            }) => {
                assert_eq!(grid_index, 2);
                assert_eq!(electron_index, 0);
            }
            other => panic!("Expected NumericInstability, got {:?}", other),
        }
        assert_eq!(recorder.steps, vec![1]);
        assert_eq!(recorder.finished, 0);
    }

    #[test]
    fn test_forcing_overflow_reported_at_current_index() {
        // Re(A·e^{iθ}) = Ar cos θ - Ai sin θ は θ = 3π/4 (k = 3) で -∞ に溢れる
        let p = params(0.1, 1.0, 8, 1.7e308, 1.7e308, 0.0);
        let mut state = initialize_ensemble(&p).unwrap();
        let mut recorder = Recorder::default();
        let result = Integrator::new().run(&mut state, &RunController::new(), &mut recorder);

        match result {
            Err(SimError::NumericInstability {
                grid_index,
                electron_index,
            }) => {
                assert_eq!(grid_index, 0);
                assert_eq!(electron_index, 3);
            }
            other => panic!("Expected NumericInstability, got {:?}", other),
        }
        assert_eq!(recorder.started, 1);
        assert!(recorder.steps.is_empty());
        assert_eq!(recorder.finished, 0);
    }

    #[test]
    fn test_stop_request_waits_for_calculating_flag() {
        let p = params(0.1, 1.0, 4, 1.0, 0.0, 0.0);
        let mut state = initialize_ensemble(&p).unwrap();
        let controller = Arc::new(RunController::new());
        controller.set_calculating(true);
        controller.set_stop(true);

        let remote = Arc::clone(&controller);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            remote.set_calculating(false);
        });

        let mut recorder = Recorder::default();
        Integrator::new()
            .run(&mut state, &controller, &mut recorder)
            .unwrap();
        handle.join().unwrap();

        assert!(!controller.calculating());
        assert_eq!(recorder.finished, 1);
        assert_eq!(recorder.steps.len(), 10);
    }

    #[test]
    fn test_rerun_after_reset_is_identical() {
        let p = params(0.05, 1.0, 6, 1.0, 0.5, 0.0);
        let mut state = initialize_ensemble(&p).unwrap();
        let controller = RunController::new();
        let mut integrator = Integrator::new();
        let mut noop = crate::simulation::NoopObserver;

        integrator.run(&mut state, &controller, &mut noop).unwrap();
        let first = state.driven().clone();
        let first_extrema = *state.extrema();

        state.reset();
        integrator.run(&mut state, &controller, &mut noop).unwrap();
        assert_eq!(*state.driven(), first);
        assert_eq!(*state.extrema(), first_extrema);
    }
}
