// src/math/coupling.rs

use num_complex::Complex64;

/// 位相方程式の右辺 F(A, θ) = Re(A·e^{iθ})
pub fn forcing(amplitude: Complex64, theta: f64) -> f64 {
    (amplitude * (Complex64::i() * theta).exp()).re
}

/// 結合積分（バンチングパラメータ）J = (2/Ne)·Σ e^{-iθ_k}
///
/// # 引数
/// - `phases`: ある格子点における全電子の位相
///
/// # 戻り値
/// - J の値。`phases` が空の場合は 0
pub fn coupling_integral(phases: &[f64]) -> Complex64 {
    if phases.is_empty() {
        return Complex64::new(0.0, 0.0);
    }
    let sum: Complex64 = phases
        .iter()
        .map(|&theta| (-Complex64::i() * theta).exp())
        .sum();
    sum * (2.0 / phases.len() as f64)
}
