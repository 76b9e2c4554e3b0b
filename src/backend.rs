//! The numeric-primitive boundary of the crate.
//!
//! The inverse-iteration core only ever touches vectors through the six operations of
//! [`NumericPrimitives`]. This keeps the algorithm independent from a particular linear algebra
//! backend and lets tests substitute a recording or failing implementation.
//!
//! [`FaerPrimitives`] is the backend used by the high-level API. The vector kernels (copy, axpy,
//! norm, scaling) go through [`faer`] column views, which checks shapes and gives an
//! overflow-safe Euclidean norm. faer has no kernel for symmetric positive definite tridiagonal
//! systems, so the factorization is written out here: it is the LDLᵀ recurrence of LAPACK's
//! `?pttrf`, and the solve is the matching `?pttrs` sweep.

use crate::error::PrimitiveError;
use faer::{ColMut, ColRef, Scale, unzip, zip};

/// Vector and tridiagonal kernels consumed by the inverse-iteration core.
///
/// The problem size is always the length of the slices. For the tridiagonal operations the
/// off-diagonal slice has one entry less than the diagonal slice.
pub trait NumericPrimitives {
    /// `dst <- src`.
    fn copy(&self, src: &[f64], dst: &mut [f64]);

    /// `y <- a * x + y`.
    fn axpy(&self, a: f64, x: &[f64], y: &mut [f64]);

    /// Factorizes the symmetric tridiagonal matrix given by `diag`/`offdiag` in place.
    ///
    /// On success `diag` holds the pivots of `D` and `offdiag` the sub-diagonal of the unit
    /// lower bidiagonal factor `L` in `T = L D Lᵀ`. On failure the content of both slices is
    /// unspecified.
    fn tridiagonal_factorize(
        &self,
        diag: &mut [f64],
        offdiag: &mut [f64],
    ) -> Result<(), PrimitiveError>;

    /// Solves `T x = rhs` in place using factors produced by
    /// [`NumericPrimitives::tridiagonal_factorize`].
    fn tridiagonal_solve(
        &self,
        diag_fac: &[f64],
        offdiag_fac: &[f64],
        rhs: &mut [f64],
    ) -> Result<(), PrimitiveError>;

    /// Euclidean norm of `x`.
    fn norm2(&self, x: &[f64]) -> f64;

    /// `x <- a * x`.
    fn scale(&self, a: f64, x: &mut [f64]);
}

fn check_tridiagonal_lengths(diag: usize, offdiag: usize) -> Result<(), PrimitiveError> {
    let expected = diag.saturating_sub(1);
    if offdiag != expected {
        return Err(PrimitiveError::LengthMismatch {
            expected,
            actual: offdiag,
        });
    }
    Ok(())
}

/// Default backend built on [`faer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FaerPrimitives;

impl NumericPrimitives for FaerPrimitives {
    #[inline]
    fn copy(&self, src: &[f64], dst: &mut [f64]) {
        ColMut::from_slice_mut(dst).copy_from(ColRef::from_slice(src));
    }

    #[inline]
    fn axpy(&self, a: f64, x: &[f64], y: &mut [f64]) {
        let y = ColMut::from_slice_mut(y);
        let x = ColRef::from_slice(x);
        zip!(y, x).for_each(|unzip!(y, x)| *y += a * *x);
    }

    fn tridiagonal_factorize(
        &self,
        diag: &mut [f64],
        offdiag: &mut [f64],
    ) -> Result<(), PrimitiveError> {
        check_tridiagonal_lengths(diag.len(), offdiag.len())?;
        let n = diag.len();
        if n == 0 {
            return Ok(());
        }

        for i in 0..n - 1 {
            // `!(x > 0.0)` also rejects NaN pivots.
            if !(diag[i] > 0.0) {
                return Err(PrimitiveError::NonPositivePivot { index: i });
            }
            let e = offdiag[i];
            offdiag[i] = e / diag[i];
            diag[i + 1] -= offdiag[i] * e;
        }
        if !(diag[n - 1] > 0.0) {
            return Err(PrimitiveError::NonPositivePivot { index: n - 1 });
        }
        Ok(())
    }

    fn tridiagonal_solve(
        &self,
        diag_fac: &[f64],
        offdiag_fac: &[f64],
        rhs: &mut [f64],
    ) -> Result<(), PrimitiveError> {
        check_tridiagonal_lengths(diag_fac.len(), offdiag_fac.len())?;
        if rhs.len() != diag_fac.len() {
            return Err(PrimitiveError::LengthMismatch {
                expected: diag_fac.len(),
                actual: rhs.len(),
            });
        }
        let n = rhs.len();
        if n == 0 {
            return Ok(());
        }

        // L z = rhs
        for i in 1..n {
            rhs[i] -= rhs[i - 1] * offdiag_fac[i - 1];
        }
        // D Lᵀ x = z
        rhs[n - 1] /= diag_fac[n - 1];
        for i in (0..n - 1).rev() {
            rhs[i] = rhs[i] / diag_fac[i] - rhs[i + 1] * offdiag_fac[i];
        }

        match rhs.iter().position(|x| !x.is_finite()) {
            Some(index) => Err(PrimitiveError::NonFiniteSolution { index }),
            None => Ok(()),
        }
    }

    #[inline]
    fn norm2(&self, x: &[f64]) -> f64 {
        ColRef::from_slice(x).norm_l2()
    }

    #[inline]
    fn scale(&self, a: f64, x: &mut [f64]) {
        let mut col = ColMut::from_slice_mut(x);
        col *= Scale(a);
    }
}
