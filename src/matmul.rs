//! Strided GEMM kernel behind `Matrix` products.
//!
//! - default: a plain triple loop
//! - optional: the `matrixmultiply` backend (feature `matrixmultiply`)
//!
//! Strides let the same kernel read an operand transposed without copying it,
//! which is how `Matrix::t_matmul` computes `Xᵀ · D`.

/// Row/column strides of a row-major or transposed operand.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Strides {
    pub row: usize,
    pub col: usize,
}

impl Strides {
    #[inline]
    pub(crate) fn row_major(cols: usize) -> Self {
        Self { row: cols, col: 1 }
    }

    /// Strides that view a row-major `(rows, cols)` buffer as its `(cols, rows)` transpose.
    #[inline]
    pub(crate) fn transposed(cols: usize) -> Self {
        Self { row: 1, col: cols }
    }
}

/// `c = a · b` for an `(m, k)` operand `a` and a `(k, n)` operand `b`.
///
/// `c` is overwritten and must be row-major `(m, n)`.
#[allow(clippy::too_many_arguments)]
#[inline]
pub(crate) fn gemm_f64(
    m: usize,
    n: usize,
    k: usize,
    a: &[f64],
    sa: Strides,
    b: &[f64],
    sb: Strides,
    c: &mut [f64],
) {
    debug_assert_eq!(c.len(), m * n);
    if m == 0 || n == 0 {
        return;
    }
    if k == 0 {
        c.fill(0.0);
        return;
    }
    debug_assert!((m - 1) * sa.row + (k - 1) * sa.col < a.len());
    debug_assert!((k - 1) * sb.row + (n - 1) * sb.col < b.len());

    #[cfg(feature = "matrixmultiply")]
    {
        // matrixmultiply supports arbitrary strides.
        unsafe {
            matrixmultiply::dgemm(
                m,
                k,
                n,
                1.0,
                a.as_ptr(),
                sa.row as isize,
                sa.col as isize,
                b.as_ptr(),
                sb.row as isize,
                sb.col as isize,
                0.0,
                c.as_mut_ptr(),
                n as isize,
                1,
            );
        }
    }

    #[cfg(not(feature = "matrixmultiply"))]
    for i in 0..m {
        let a0 = i * sa.row;
        for j in 0..n {
            let b0 = j * sb.col;
            let mut acc = 0.0_f64;
            for p in 0..k {
                acc = a[a0 + p * sa.col].mul_add(b[p * sb.row + b0], acc);
            }
            c[i * n + j] = acc;
        }
    }
}
