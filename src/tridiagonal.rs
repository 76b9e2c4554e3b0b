//! Borrowed view of a real symmetric tridiagonal matrix.
//!
//! A symmetric tridiagonal matrix of order n is fully described by its main diagonal
//! (n entries) and a single copy of its off-diagonal (n-1 entries):
//!
//! ```text
//! T = | d_0 e_0  0  ... |
//!     | e_0 d_1 e_1 ... |
//!     |  0  e_1 d_2 ... |
//!     | ... ... ... ... |
//! ```
//!
//! This is exactly the shape of the `T_k` produced by a Lanczos recurrence (`alphas` on the
//! diagonal, `betas` off it). [`TridiagonalRef`] never owns its data; it only validates the
//! lengths once so that the algorithms can index without re-checking.

use crate::error::EigenInverseError;
use faer::Mat;

/// Immutable view over the coefficients of a symmetric tridiagonal matrix.
#[derive(Debug, Clone, Copy)]
pub struct TridiagonalRef<'a> {
    diag: &'a [f64],
    offdiag: &'a [f64],
}

impl<'a> TridiagonalRef<'a> {
    /// Creates a view, checking that `offdiag` has exactly one entry less than `diag`.
    ///
    /// # Errors
    /// Returns an input error for an empty matrix and a dimension mismatch when the
    /// off-diagonal has the wrong length.
    pub fn new(diag: &'a [f64], offdiag: &'a [f64]) -> Result<Self, EigenInverseError> {
        if diag.is_empty() {
            return Err(EigenInverseError::input(
                "The tridiagonal matrix must have at least one row.",
            ));
        }
        if offdiag.len() != diag.len() - 1 {
            return Err(EigenInverseError::dimension_mismatch(
                "offdiag",
                diag.len() - 1,
                offdiag.len(),
            ));
        }
        Ok(Self { diag, offdiag })
    }

    /// Order of the matrix.
    #[inline]
    pub fn dim(&self) -> usize {
        self.diag.len()
    }

    #[inline]
    pub fn diag(&self) -> &'a [f64] {
        self.diag
    }

    #[inline]
    pub fn offdiag(&self) -> &'a [f64] {
        self.offdiag
    }

    /// Computes `out = T * x` without allocating.
    ///
    /// # Panics
    /// Panics if `x` or `out` do not have length [`Self::dim`].
    pub fn apply(&self, x: &[f64], out: &mut [f64]) {
        let n = self.dim();
        assert_eq!(x.len(), n, "Dimension mismatch: x has length {}, expected {n}.", x.len());
        assert_eq!(
            out.len(),
            n,
            "Dimension mismatch: out has length {}, expected {n}.",
            out.len()
        );

        for i in 0..n {
            let mut acc = self.diag[i] * x[i];
            if i > 0 {
                acc += self.offdiag[i - 1] * x[i - 1];
            }
            if i + 1 < n {
                acc += self.offdiag[i] * x[i + 1];
            }
            out[i] = acc;
        }
    }

    /// Assembles the explicit dense matrix.
    ///
    /// Only meant for small reference computations, e.g. handing `T` to faer's
    /// self-adjoint eigendecomposition.
    pub fn to_dense(&self) -> Mat<f64> {
        let n = self.dim();
        let mut t = Mat::zeros(n, n);
        for (i, &d) in self.diag.iter().enumerate() {
            t.as_mut()[(i, i)] = d;
        }
        for (i, &e) in self.offdiag.iter().enumerate() {
            t.as_mut()[(i, i + 1)] = e;
            t.as_mut()[(i + 1, i)] = e;
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_wrong_offdiag_length() {
        let err = TridiagonalRef::new(&[1.0, 2.0, 3.0], &[1.0]).unwrap_err();
        assert_eq!(err, EigenInverseError::dimension_mismatch("offdiag", 2, 1));
    }

    #[test]
    fn test_rejects_empty_matrix() {
        assert!(TridiagonalRef::new(&[], &[]).is_err());
    }

    #[test]
    fn test_single_entry_matrix() {
        let t = TridiagonalRef::new(&[4.0], &[]).unwrap();
        let mut out = [0.0];
        t.apply(&[0.5], &mut out);
        assert_eq!(t.dim(), 1);
        assert_eq!(out, [2.0]);
    }

    #[test]
    fn test_apply_matches_dense_product() {
        let diag = [2.0, -1.0, 3.0, 0.5];
        let offdiag = [1.0, -2.0, 0.25];
        let t = TridiagonalRef::new(&diag, &offdiag).unwrap();
        let x = [1.0, 2.0, -1.0, 4.0];

        let mut out = [0.0; 4];
        t.apply(&x, &mut out);

        let dense = t.to_dense();
        for i in 0..4 {
            let expected: f64 = (0..4).map(|j| dense.as_ref()[(i, j)] * x[j]).sum();
            assert!((out[i] - expected).abs() < 1e-14);
        }
    }

    #[test]
    fn test_to_dense_is_symmetric() {
        let t = TridiagonalRef::new(&[1.0, 2.0, -1.75], &[0.0, 1.0]).unwrap();
        let dense = t.to_dense();
        assert_eq!(dense.as_ref()[(1, 2)], 1.0);
        assert_eq!(dense.as_ref()[(2, 1)], 1.0);
        assert_eq!(dense.as_ref()[(0, 2)], 0.0);
    }

    #[test]
    #[should_panic(expected = "Dimension mismatch: x has length 2, expected 3.")]
    fn test_apply_dimension_mismatch_panic() {
        let t = TridiagonalRef::new(&[1.0, 1.0, 1.0], &[0.0, 0.0]).unwrap();
        let mut out = [0.0; 3];
        t.apply(&[1.0, 2.0], &mut out);
    }
}
