// src/config/parameters.rs

use serde::Deserialize;

use crate::error::SimError;

/// 計算パラメータ（入力ファイルの並び順と同じ）
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RunParameters {
    pub h: f64, // 空間ステップ
    #[serde(rename = "L")]
    pub length: f64, // 計算領域の長さ
    #[serde(rename = "Ne")]
    pub electrons: i64, // 電子数
    #[serde(rename = "Ar")]
    pub ar: f64, // 振幅 A の実部
    #[serde(rename = "Ai")]
    pub ai: f64, // 振幅 A の虚部
    pub delta: f64, // 位相速度のオフセット Δ
    #[serde(default)]
    pub show_phase_space: bool, // 位相空間を出力するか
    #[serde(default)]
    pub show_trajectories: bool, // 軌道を出力するか
}

/// 検証済みの格子サイズ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSize {
    pub nz: usize,
    pub ne: usize,
}

impl RunParameters {
    /// パラメータを検証し、格子点数 NZ と電子数 Ne を返す
    ///
    /// 配列の確保前に呼び出すこと。
    pub fn validate(&self) -> Result<GridSize, SimError> {
        if !self.h.is_finite() || self.h <= 0.0 {
            return Err(SimError::InvalidConfiguration(format!(
                "h は正の値でなければなりません (h = {})",
                self.h
            )));
        }
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(SimError::InvalidConfiguration(format!(
                "L は正の値でなければなりません (L = {})",
                self.length
            )));
        }
        if self.electrons <= 0 {
            return Err(SimError::InvalidConfiguration(format!(
                "Ne は 1 以上でなければなりません (Ne = {})",
                self.electrons
            )));
        }
        for (name, value) in [("Ar", self.ar), ("Ai", self.ai), ("delta", self.delta)] {
            if !value.is_finite() {
                return Err(SimError::InvalidConfiguration(format!(
                    "{} が有限値ではありません",
                    name
                )));
            }
        }

        let ratio = (self.length / self.h).floor();
        if !ratio.is_finite() || ratio >= usize::MAX as f64 {
            return Err(SimError::InvalidConfiguration(format!(
                "格子点数が大きすぎます (L / h = {})",
                ratio
            )));
        }
        let nz = ratio as usize + 1;
        let ne = usize::try_from(self.electrons)
            .map_err(|_| SimError::InvalidConfiguration("Ne が大きすぎます".to_string()))?;

        // NZ × Ne の f64 配列がアドレス空間に収まること
        let max_cells = isize::MAX as usize / std::mem::size_of::<f64>();
        match nz.checked_mul(ne) {
            Some(cells) if cells <= max_cells => Ok(GridSize { nz, ne }),
            _ => Err(SimError::InvalidConfiguration(format!(
                "配列が大きすぎます (NZ = {}, Ne = {})",
                nz, ne
            ))),
        }
    }
}
