use serde::{Deserialize, Serialize};

/// Row-major dense matrix, the on-disk weight layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix { rows, cols, data: vec![vec![0.0; cols]; rows] }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, |r| r.len()),
            data,
        }
    }

    /// True when `data` really is `rows × cols` and every entry is finite.
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.rows
            && self
                .data
                .iter()
                .all(|row| row.len() == self.cols && row.iter().all(|v| v.is_finite()))
    }

    /// Row vector times matrix: `input (1 × rows) · self (rows × cols)`.
    ///
    /// Callers guarantee `input.len() == self.rows`.
    pub fn left_mul(&self, input: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.cols];
        for (x, row) in input.iter().zip(&self.data) {
            if *x == 0.0 {
                continue;
            }
            for (acc, w) in out.iter_mut().zip(row) {
                *acc += x * w;
            }
        }
        out
    }
}
