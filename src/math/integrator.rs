// src/math/integrator.rs

/// 予測子・修正子法で扱う 1 電子分の状態
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasePoint {
    pub theta: f64, // 位相 θ
    pub dtheta: f64, // 位相速度 dθ/dz
}

/// 予測子ステップ
///
/// # 引数
/// - `current`: 格子点 i における状態
/// - `f0`: 格子点 i における右辺 F(A, θ_i)
/// - `h`: 空間ステップ
///
/// # 戻り値
/// - 格子点 i+1 の予測値
pub fn predict(current: PhasePoint, f0: f64, h: f64) -> PhasePoint {
    PhasePoint {
        theta: current.theta + current.dtheta * h + h / 2.0 * f0 * h,
        dtheta: current.dtheta + h * f0,
    }
}

/// 修正子ステップ
///
/// # 引数
/// - `current`: 格子点 i における状態
/// - `f0`: 格子点 i における右辺
/// - `f1`: 予測値の位相で再評価した右辺
/// - `h`: 空間ステップ
///
/// # 戻り値
/// - 格子点 i+1 の修正値
pub fn correct(current: PhasePoint, f0: f64, f1: f64, h: f64) -> PhasePoint {
    PhasePoint {
        theta: current.theta + current.dtheta * h + h / 6.0 * f0 * h + h / 3.0 * f1 * h,
        dtheta: current.dtheta + h / 2.0 * (f0 + f1),
    }
}
