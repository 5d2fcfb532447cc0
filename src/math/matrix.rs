use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A dense, heap-allocated matrix of `f64` values.
///
/// `data` always holds exactly `rows` rows of `cols` values each. The shape is
/// fixed for the lifetime of a value: operations that produce a new shape
/// ([`matmul`](Matrix::matmul), [`transpose`](Matrix::transpose)) return a new
/// matrix, while the in-place operations ([`add`](Matrix::add),
/// [`hadamard`](Matrix::hadamard), [`map`](Matrix::map)) only ever rewrite
/// element values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    /// Creates a `rows` x `cols` matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Result<Matrix> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension { rows, cols });
        }
        Ok(Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        })
    }

    /// Adopts a nested vector as a matrix, taking the shape from its layout.
    ///
    /// Empty input is rejected as `InvalidDimension`, ragged rows as
    /// `DimensionMismatch`.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        if data.is_empty() || data[0].is_empty() {
            return Err(Error::InvalidDimension {
                rows: data.len(),
                cols: 0,
            });
        }
        let cols = data[0].len();
        for row in &data {
            if row.len() != cols {
                return Err(Error::DimensionMismatch {
                    op: "from_data",
                    expected: (1, cols),
                    got: (1, row.len()),
                });
            }
        }
        Ok(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    /// Builds a single-column matrix from a flat slice, one row per value.
    ///
    /// The slice must be non-empty (debug-asserted): a 0 x 1 result would
    /// break the positive-shape rule the checked constructors enforce.
    pub fn from_array(values: &[f64]) -> Matrix {
        debug_assert!(!values.is_empty(), "from_array needs a non-empty slice");
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&v| vec![v]).collect(),
        }
    }

    /// Flattens the matrix into a row-major vector.
    pub fn to_array(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    /// Matrix product `self * rhs` as a new `self.rows` x `rhs.cols` matrix.
    ///
    /// Requires the inner dimensions to agree (`self.cols == rhs.rows`).
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(Error::DimensionMismatch {
                op: "matmul",
                expected: (self.cols, rhs.cols),
                got: (rhs.rows, rhs.cols),
            });
        }
        let mut res = Matrix::zeros(self.rows, rhs.cols)?;
        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }
                res.data[i][j] = sum;
            }
        }
        Ok(res)
    }

    /// Returns a copy of the matrix with every element multiplied by `n`.
    pub fn scale(&self, n: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&v| v * n).collect())
                .collect(),
        }
    }

    /// Element-wise difference `self - rhs` as a new matrix.
    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(Error::DimensionMismatch {
                op: "sub",
                expected: (self.rows, self.cols),
                got: (rhs.rows, rhs.cols),
            });
        }
        let mut res = Matrix::zeros(self.rows, self.cols)?;
        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] - rhs.data[i][j];
            }
        }
        Ok(res)
    }

    /// In-place element-wise sum `self[i][j] += rhs[i][j]`.
    ///
    /// The shape check runs before any element is written.
    pub fn add(&mut self, rhs: &Matrix) -> Result<()> {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(Error::DimensionMismatch {
                op: "add",
                expected: (self.rows, self.cols),
                got: (rhs.rows, rhs.cols),
            });
        }
        for (row, rhs_row) in self.data.iter_mut().zip(&rhs.data) {
            for (v, r) in row.iter_mut().zip(rhs_row) {
                *v += r;
            }
        }
        Ok(())
    }

    /// Adds `n` to every element in place.
    pub fn add_scalar(&mut self, n: f64) {
        for row in &mut self.data {
            for v in row {
                *v += n;
            }
        }
    }

    /// In-place Hadamard (element-wise) product `self[i][j] *= rhs[i][j]`.
    ///
    /// The shape check runs before any element is written.
    pub fn hadamard(&mut self, rhs: &Matrix) -> Result<()> {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(Error::DimensionMismatch {
                op: "hadamard",
                expected: (self.rows, self.cols),
                got: (rhs.rows, rhs.cols),
            });
        }
        for (row, rhs_row) in self.data.iter_mut().zip(&rhs.data) {
            for (v, r) in row.iter_mut().zip(rhs_row) {
                *v *= r;
            }
        }
        Ok(())
    }

    /// Returns the transpose as a new `cols` x `rows` matrix.
    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix {
            rows: self.cols,
            cols: self.rows,
            data: vec![vec![0.0; self.rows]; self.cols],
        };
        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }
        res
    }

    /// Applies `f` to every element in place.
    pub fn map<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        for row in &mut self.data {
            for v in row {
                *v = f(*v);
            }
        }
    }

    /// Fills the matrix in place with independent uniform draws from
    /// `[low, high)`.
    pub fn randomize_uniform(&mut self, low: f64, high: f64) {
        let mut rng = rand::thread_rng();
        for row in &mut self.data {
            for v in row {
                *v = low + rng.gen::<f64>() * (high - low);
            }
        }
    }

    /// Whether `rows`/`cols` are positive and `data` matches them exactly.
    ///
    /// Deserialized matrices arrive unvalidated, so record importers call this
    /// before trusting a shape.
    pub fn is_well_formed(&self) -> bool {
        self.rows > 0
            && self.cols > 0
            && self.data.len() == self.rows
            && self.data.iter().all(|row| row.len() == self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zeros_has_shape_and_is_all_zero() {
        let m = Matrix::zeros(2, 3).unwrap();
        assert_eq!(m.rows, 2);
        assert_eq!(m.cols, 3);
        assert!(m.data.iter().flatten().all(|&v| v == 0.0));
    }

    #[test]
    fn zeros_rejects_empty_dimensions() {
        assert_eq!(
            Matrix::zeros(0, 3),
            Err(Error::InvalidDimension { rows: 0, cols: 3 })
        );
        assert_eq!(
            Matrix::zeros(3, 0),
            Err(Error::InvalidDimension { rows: 3, cols: 0 })
        );
    }

    #[test]
    fn from_data_adopts_shape() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!((m.rows, m.cols), (2, 2));
        assert_eq!(m.data[1][0], 3.0);
    }

    #[test]
    fn from_data_rejects_empty_and_ragged_input() {
        assert!(matches!(
            Matrix::from_data(vec![]),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]),
            Err(Error::DimensionMismatch { op: "from_data", .. })
        ));
    }

    #[test]
    fn matmul_known_product() {
        let a = Matrix::from_data(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let b = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.data, vec![vec![22.0, 28.0], vec![49.0, 64.0]]);
    }

    #[test]
    fn matmul_rejects_inner_dimension_mismatch() {
        let a = Matrix::zeros(2, 3).unwrap();
        let b = Matrix::zeros(2, 2).unwrap();
        assert!(matches!(
            a.matmul(&b),
            Err(Error::DimensionMismatch { op: "matmul", .. })
        ));
    }

    #[test]
    fn transpose_swaps_entries_and_is_involutive() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = m.transpose();
        assert_eq!((t.rows, t.cols), (3, 2));
        assert_eq!(t.data[2][0], 3.0);
        assert_eq!(t.data[0][1], 4.0);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn scale_returns_new_matrix_and_leaves_source_untouched() {
        let m = Matrix::from_data(vec![vec![1.0, -2.0]]).unwrap();
        let doubled = m.scale(2.0);
        assert_eq!(doubled.data, vec![vec![2.0, -4.0]]);
        assert_eq!(m.data, vec![vec![1.0, -2.0]]);
    }

    #[test]
    fn sub_is_elementwise() {
        let a = Matrix::from_data(vec![vec![5.0, 3.0]]).unwrap();
        let b = Matrix::from_data(vec![vec![2.0, 4.0]]).unwrap();
        assert_eq!(a.sub(&b).unwrap().data, vec![vec![3.0, -1.0]]);
    }

    #[test]
    fn add_is_elementwise_and_in_place() {
        let mut a = Matrix::from_data(vec![vec![1.0, 2.0]]).unwrap();
        let b = Matrix::from_data(vec![vec![0.5, -1.0]]).unwrap();
        a.add(&b).unwrap();
        assert_eq!(a.data, vec![vec![1.5, 1.0]]);
    }

    #[test]
    fn add_rejects_mismatch_without_mutating() {
        let mut a = Matrix::from_data(vec![vec![1.0, 2.0]]).unwrap();
        let before = a.clone();
        let b = Matrix::zeros(2, 2).unwrap();
        assert!(a.add(&b).is_err());
        assert_eq!(a, before);
    }

    #[test]
    fn add_scalar_then_inverse_restores_values() {
        let mut m = Matrix::from_data(vec![vec![0.25, -1.5], vec![3.0, 0.0]]).unwrap();
        let before = m.clone();
        m.add_scalar(0.7);
        m.add_scalar(-0.7);
        for (row, before_row) in m.data.iter().zip(&before.data) {
            for (&v, &b) in row.iter().zip(before_row) {
                assert_relative_eq!(v, b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn hadamard_multiplies_elementwise() {
        let mut a = Matrix::from_data(vec![vec![2.0, 3.0]]).unwrap();
        let b = Matrix::from_data(vec![vec![4.0, -1.0]]).unwrap();
        a.hadamard(&b).unwrap();
        assert_eq!(a.data, vec![vec![8.0, -3.0]]);
    }

    #[test]
    fn hadamard_rejects_mismatch_without_mutating() {
        let mut a = Matrix::from_data(vec![vec![2.0, 3.0]]).unwrap();
        let before = a.clone();
        let b = Matrix::zeros(1, 3).unwrap();
        assert!(a.hadamard(&b).is_err());
        assert_eq!(a, before);
    }

    #[test]
    fn map_with_identity_is_a_noop() {
        let mut m = Matrix::from_data(vec![vec![1.0, -2.0], vec![0.5, 4.0]]).unwrap();
        let before = m.clone();
        m.map(|x| x);
        assert_eq!(m, before);
    }

    #[test]
    fn from_array_builds_a_column() {
        let m = Matrix::from_array(&[1.0, 2.0, 3.0]);
        assert_eq!((m.rows, m.cols), (3, 1));
        assert_eq!(m.data, vec![vec![1.0], vec![2.0], vec![3.0]]);
    }

    #[test]
    #[should_panic(expected = "non-empty slice")]
    #[cfg(debug_assertions)]
    fn from_array_rejects_an_empty_slice() {
        let _ = Matrix::from_array(&[]);
    }

    #[test]
    fn to_array_is_row_major() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.to_array(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn randomize_uniform_stays_in_range() {
        let mut m = Matrix::zeros(8, 8).unwrap();
        m.randomize_uniform(-1.0, 1.0);
        assert!(m.data.iter().flatten().all(|&v| (-1.0..1.0).contains(&v)));
        assert!(m.data.iter().flatten().any(|&v| v != 0.0));
    }

    #[test]
    fn is_well_formed_detects_lying_headers() {
        let mut m = Matrix::zeros(2, 2).unwrap();
        assert!(m.is_well_formed());
        m.rows = 3;
        assert!(!m.is_well_formed());
    }
}
