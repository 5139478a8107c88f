//! Dense row-major matrix.
//!
//! Every operation that combines two matrices checks their `(rows, cols)` at the
//! boundary and returns [`Error::ShapeMismatch`] instead of broadcasting.

use std::ops::{Index, IndexMut};

use crate::matmul::{Strides, gemm_f64};
use crate::{Error, Result};

/// A `(rows, cols)` matrix of `f64` stored contiguously in row-major order.
///
/// `data.len() == rows * cols` always holds. Zero rows are allowed (an empty
/// batch); constructors that infer the column count from rows require at least
/// one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Build a matrix from a flat row-major buffer.
    pub fn from_flat(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| Error::ShapeMismatch(format!("({rows}, {cols}) overflows")))?;
        if data.len() != expected {
            return Err(Error::ShapeMismatch(format!(
                "buffer length {} does not match rows * cols ({rows} * {cols})",
                data.len()
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Build a matrix from per-row vectors (copies into contiguous storage).
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| Error::ShapeMismatch("rows must not be empty".to_owned()))?;
        let cols = first.as_ref().len();

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::ShapeMismatch(format!(
                    "row {i} has len {}, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Returns row `idx`.
    ///
    /// Panics if `idx >= rows`.
    #[inline]
    pub fn row(&self, idx: usize) -> &[f64] {
        let start = idx * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |r| self.row(r))
    }

    /// `self · rhs`, shape `(self.rows, rhs.cols)`.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(Error::ShapeMismatch(format!(
                "cannot multiply {:?} by {:?}",
                self.shape(),
                rhs.shape()
            )));
        }
        let mut out = Matrix::zeros(self.rows, rhs.cols);
        gemm_f64(
            self.rows,
            rhs.cols,
            self.cols,
            &self.data,
            Strides::row_major(self.cols),
            &rhs.data,
            Strides::row_major(rhs.cols),
            &mut out.data,
        );
        Ok(out)
    }

    /// `selfᵀ · rhs`, shape `(self.cols, rhs.cols)`, without materializing the transpose.
    pub fn t_matmul(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.rows != rhs.rows {
            return Err(Error::ShapeMismatch(format!(
                "cannot multiply transpose of {:?} by {:?}",
                self.shape(),
                rhs.shape()
            )));
        }
        let mut out = Matrix::zeros(self.cols, rhs.cols);
        gemm_f64(
            self.cols,
            rhs.cols,
            self.rows,
            &self.data,
            Strides::transposed(self.cols),
            &rhs.data,
            Strides::row_major(rhs.cols),
            &mut out.data,
        );
        Ok(out)
    }

    /// Returns a copy with a leading column of ones, shape `(rows, cols + 1)`.
    pub fn with_leading_ones(&self) -> Matrix {
        let cols = self.cols + 1;
        let mut data = Vec::with_capacity(self.rows * cols);
        for row in self.iter_rows() {
            data.push(1.0);
            data.extend_from_slice(row);
        }
        Matrix {
            data,
            rows: self.rows,
            cols,
        }
    }

    /// `self -= alpha * rhs`.
    pub fn scaled_sub_assign(&mut self, alpha: f64, rhs: &Matrix) -> Result<()> {
        if self.shape() != rhs.shape() {
            return Err(Error::ShapeMismatch(format!(
                "cannot subtract {:?} from {:?}",
                rhs.shape(),
                self.shape()
            )));
        }
        for (w, g) in self.data.iter_mut().zip(&rhs.data) {
            *w -= alpha * g;
        }
        Ok(())
    }

    /// Per-column mean. Returns NaNs for a matrix with zero rows.
    pub fn column_means(&self) -> Vec<f64> {
        let mut sums = vec![0.0_f64; self.cols];
        for row in self.iter_rows() {
            for (s, &v) in sums.iter_mut().zip(row) {
                *s += v;
            }
        }
        let inv_m = 1.0 / self.rows as f64;
        sums.iter().map(|s| s * inv_m).collect()
    }

    /// Per-column `max - min`.
    pub fn column_ranges(&self) -> Vec<f64> {
        let mut lo = vec![f64::INFINITY; self.cols];
        let mut hi = vec![f64::NEG_INFINITY; self.cols];
        for row in self.iter_rows() {
            for (c, &v) in row.iter().enumerate() {
                lo[c] = lo[c].min(v);
                hi[c] = hi[c].max(v);
            }
        }
        hi.iter().zip(&lo).map(|(h, l)| h - l).collect()
    }

    /// Index of the largest entry in each row; ties go to the lowest column.
    pub fn argmax_rows(&self) -> Vec<usize> {
        self.iter_rows().map(argmax).collect()
    }

    /// Element-wise `|a - b| <= atol + rtol * |b|` with identical shapes.
    pub fn all_close(&self, other: &Matrix, rtol: f64, atol: f64) -> bool {
        self.shape() == other.shape() && all_close(&self.data, &other.data, rtol, atol)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        assert!(c < self.cols, "column {c} out of bounds for {} cols", self.cols);
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        assert!(c < self.cols, "column {c} out of bounds for {} cols", self.cols);
        &mut self.data[r * self.cols + c]
    }
}

/// Element-wise closeness of two equally long slices.
pub fn all_close(a: &[f64], b: &[f64], rtol: f64, atol: f64) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(&x, &y)| x == y || (x - y).abs() <= atol + rtol * y.abs())
}

#[inline]
fn argmax(xs: &[f64]) -> usize {
    let mut best = 0;
    for (i, &x) in xs.iter().enumerate().skip(1) {
        // Strict comparison keeps the lowest index on ties; NaN never wins.
        if x > xs[best] || (xs[best].is_nan() && !x.is_nan()) {
            best = i;
        }
    }
    best
}
