// src/models/extrema.rs

/// 位相と位相速度の最小値・最大値（表示スケール用）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrema {
    pub thmin: f64,
    pub thmax: f64,
    pub dthmin: f64,
    pub dthmax: f64,
}

impl Extrema {
    /// 何も記録していない状態
    pub fn empty() -> Self {
        Extrema {
            thmin: f64::INFINITY,
            thmax: f64::NEG_INFINITY,
            dthmin: f64::INFINITY,
            dthmax: f64::NEG_INFINITY,
        }
    }

    /// 1 電子分の値を畳み込む
    pub fn update(&mut self, theta: f64, dtheta: f64) {
        self.thmin = self.thmin.min(theta);
        self.thmax = self.thmax.max(theta);
        self.dthmin = self.dthmin.min(dtheta);
        self.dthmax = self.dthmax.max(dtheta);
    }

    /// 1 行分の値を畳み込む
    pub fn update_row(&mut self, thetas: &[f64], dthetas: &[f64]) {
        for (&theta, &dtheta) in thetas.iter().zip(dthetas) {
            self.update(theta, dtheta);
        }
    }
}

impl Default for Extrema {
    fn default() -> Self {
        Extrema::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_folds_min_max() {
        let mut e = Extrema::empty();
        assert_eq!(e.thmin, f64::INFINITY);
        assert_eq!(e.dthmax, f64::NEG_INFINITY);

        e.update(1.0, -2.0);
        e.update(-3.0, 5.0);
        e.update(0.5, 0.0);

        assert_eq!(e.thmin, -3.0);
        assert_eq!(e.thmax, 1.0);
        assert_eq!(e.dthmin, -2.0);
        assert_eq!(e.dthmax, 5.0);
    }

    #[test]
    fn test_update_row() {
        let mut e = Extrema::empty();
        e.update_row(&[0.0, 1.0, 2.0], &[0.5, 0.5, 0.5]);
        assert_eq!((e.thmin, e.thmax), (0.0, 2.0));
        assert_eq!((e.dthmin, e.dthmax), (0.5, 0.5));
    }
}
