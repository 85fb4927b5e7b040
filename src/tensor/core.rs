use rand::distributions::Uniform;
use rand::prelude::Distribution;
use rand::Rng;
use tracing::instrument;

use crate::error::{NetError, Result};
use crate::tensor::kernels;

/// Parameters are initialised to `k * INIT_SCALE` for an integer `k` drawn from
/// the closed range `[-INIT_STEPS, INIT_STEPS]`.
pub const INIT_STEPS: i32 = 10;
pub const INIT_SCALE: f64 = 0.1;

/// Draw `len` values on the initialisation grid: -1.0, -0.9, ..., 0.9, 1.0
pub fn sample_grid_vector<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    let uniform = Uniform::new_inclusive(-INIT_STEPS, INIT_STEPS);
    (0..len)
        .map(|_| f64::from(uniform.sample(rng)) * INIT_SCALE)
        .collect()
}

/// Row-major dense matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a matrix from flattened row-major data
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(NetError::shape("matrix data", rows * cols, data.len()));
        }
        Ok(Matrix { data, rows, cols })
    }

    /// Create a matrix filled with zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Create a matrix from nested rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * cols);
        for row in rows {
            if row.len() != cols {
                return Err(NetError::shape("matrix row", cols, row.len()));
            }
            data.extend(row);
        }
        Ok(Matrix {
            data,
            rows: n_rows,
            cols,
        })
    }

    /// Create a matrix with every entry drawn from the initialisation grid
    #[instrument(skip(rng))]
    pub fn random_grid<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        Matrix {
            data: sample_grid_vector(rows * cols, rng),
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        if i >= self.rows || j >= self.cols {
            return Err(NetError::IndexOutOfRange(format!(
                "({}, {}) in a {}x{} matrix",
                i, j, self.rows, self.cols
            )));
        }
        self.data[i * self.cols + j] = value;
        Ok(())
    }

    /// Incoming weights of output unit `i`
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.rows {
            Some(&self.data[i * self.cols..(i + 1) * self.cols])
        } else {
            None
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }

    /// self @ x
    pub fn matvec(&self, x: &[f64]) -> Vec<f64> {
        kernels::matvec(&self.data, self.shape(), x)
    }

    /// self^T @ x
    pub fn matvec_transposed(&self, x: &[f64]) -> Vec<f64> {
        kernels::matvec_transposed(&self.data, self.shape(), x)
    }

    /// u ⊗ v as a [u.len(), v.len()] matrix
    pub fn outer(u: &[f64], v: &[f64]) -> Self {
        Matrix {
            data: kernels::outer(u, v),
            rows: u.len(),
            cols: v.len(),
        }
    }

    /// self += alpha * other
    pub fn axpy(&mut self, alpha: f64, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(NetError::shape("matrix", self.numel(), other.numel()));
        }
        kernels::axpy(alpha, &other.data, &mut self.data);
        Ok(())
    }
}
