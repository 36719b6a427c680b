// src/models/track.rs

/// 格子点 × 電子 の 2 次元配列（行優先の連続バッファ）
///
/// 不変条件: `data.len() == rows * cols`
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Track {
    /// 全要素を `value` で初期化した配列を確保する
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Track {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// 行 `row` を読み取り専用、行 `row + 1` を書き込み可能として同時に借用する
    pub fn adjacent_rows_mut(&mut self, row: usize) -> (&[f64], &mut [f64]) {
        let cols = self.cols;
        let (head, tail) = self.data.split_at_mut((row + 1) * cols);
        (&head[row * cols..], &mut tail[..cols])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |row| self.row(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_shape() {
        let track = Track::filled(3, 4, 1.5);
        assert_eq!(track.rows(), 3);
        assert_eq!(track.cols(), 4);
        assert_eq!(track.iter_rows().count(), 3);
        assert!(track.iter_rows().all(|row| row.len() == 4 && row.iter().all(|&v| v == 1.5)));
    }

    #[test]
    fn test_row_mut_and_get() {
        let mut track = Track::filled(2, 3, 0.0);
        track.row_mut(1).copy_from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(track.get(1, 2), 3.0);
        assert_eq!(track.row(0), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_adjacent_rows_mut() {
        let mut track = Track::filled(3, 2, 0.0);
        track.row_mut(1).copy_from_slice(&[4.0, 5.0]);
        {
            let (current, next) = track.adjacent_rows_mut(1);
            assert_eq!(current, &[4.0, 5.0]);
            next[0] = current[0] * 2.0;
            next[1] = current[1] * 2.0;
        }
        assert_eq!(track.row(2), &[8.0, 10.0]);
        assert_eq!(track.row(0), &[0.0, 0.0]);
    }
}
