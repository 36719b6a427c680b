// src/simulation/observer.rs

use tracing::{debug, info};

use crate::error::SimError;
use crate::models::EnsembleState;

/// 積分の進行を受け取る側（描画・ファイル出力など）
///
/// 状態は読み取り専用で渡される。
pub trait StepObserver {
    /// 積分開始前（格子点 0 のみ埋まっている）
    fn on_start(&mut self, _state: &EnsembleState) -> Result<(), SimError> {
        Ok(())
    }

    /// 格子点 `index` まで計算が終わった
    fn on_step(&mut self, index: usize, state: &EnsembleState) -> Result<(), SimError>;

    /// 計算が完了した（1 回の実行につき 1 回だけ呼ばれる）
    fn on_finished(&mut self, _state: &EnsembleState) -> Result<(), SimError> {
        Ok(())
    }
}

impl<T: StepObserver + ?Sized> StepObserver for Box<T> {
    fn on_start(&mut self, state: &EnsembleState) -> Result<(), SimError> {
        (**self).on_start(state)
    }

    fn on_step(&mut self, index: usize, state: &EnsembleState) -> Result<(), SimError> {
        (**self).on_step(index, state)
    }

    fn on_finished(&mut self, state: &EnsembleState) -> Result<(), SimError> {
        (**self).on_finished(state)
    }
}

/// 複数の受け手に登録順で配信する
impl StepObserver for Vec<Box<dyn StepObserver>> {
    fn on_start(&mut self, state: &EnsembleState) -> Result<(), SimError> {
        self.iter_mut().try_for_each(|o| o.on_start(state))
    }

    fn on_step(&mut self, index: usize, state: &EnsembleState) -> Result<(), SimError> {
        self.iter_mut().try_for_each(|o| o.on_step(index, state))
    }

    fn on_finished(&mut self, state: &EnsembleState) -> Result<(), SimError> {
        self.iter_mut().try_for_each(|o| o.on_finished(state))
    }
}

/// 何もしない受け手
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _index: usize, _state: &EnsembleState) -> Result<(), SimError> {
        Ok(())
    }
}

/// 進捗をログに出す
#[derive(Debug, Clone, Copy)]
pub struct ProgressLog {
    every: usize,
}

impl ProgressLog {
    /// `every` ステップごとに debug ログを出す（0 は 1 と同じ）
    pub fn new(every: usize) -> Self {
        ProgressLog { every: every.max(1) }
    }
}

impl StepObserver for ProgressLog {
    fn on_step(&mut self, index: usize, state: &EnsembleState) -> Result<(), SimError> {
        if index % self.every == 0 || index + 1 == state.nz() {
            debug!(index, z = state.z(index), nz = state.nz(), "step");
        }
        Ok(())
    }

    fn on_finished(&mut self, state: &EnsembleState) -> Result<(), SimError> {
        let e = state.extrema();
        let j = state.bunching(state.nz() - 1);
        info!(
            thmin = e.thmin,
            thmax = e.thmax,
            dthmin = e.dthmin,
            dthmax = e.dthmax,
            j_re = j.re,
            j_im = j.im,
            "計算が完了しました"
        );
        Ok(())
    }
}
