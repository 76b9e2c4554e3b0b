//! Inverse iteration with an adaptively perturbed shift.
//!
//! ** NOTE: We recommend using the high-level method [`crate::solvers::eigen_inverse`] instead.
//! This module is intended for callers that reuse a workspace across many calls, plug in their
//! own [`NumericPrimitives`] backend, or want to observe every iterate.
//!
//! Given a symmetric tridiagonal `T` and a target eigenvalue `lam_init`, the routine looks for
//! the eigenvector of `T` belonging to `lam_init`. The shifted matrix `T - lam_init * I` is
//! singular exactly when the target is an eigenvalue, so it is factorized only after moving the
//! shift down by a perturbation `pert` taken from a [`PerturbationSchedule`]. The first
//! perturbation for which the LDLᵀ factorization succeeds is kept, and the iteration
//!
//! ```text
//! y      = (T - lam_pert * I)^{-1} eig
//! invnorm = 1 / ||y||
//! eig    = invnorm * y
//! ```
//!
//! runs against that single factorization until `|invnorm - pert| <= tol_abs`. When `eig`
//! aligns with the eigenvector, `||y||` tends to `1 / (lambda - lam_pert)`, so the test is the
//! same as `|lam_pert + invnorm - lam_init| <= tol_abs`: the refined eigenvalue agrees with the
//! target.

use super::{
    InverseIterationCallback, InverseIterationOptions, InverseIterationReport,
    InverseIterationWorkspace, IterationSnapshot, PerturbationSchedule, Termination,
};
use crate::{
    backend::NumericPrimitives,
    error::EigenInverseError,
    tridiagonal::TridiagonalRef,
    utils::perf::{Stopwatch, Timing},
};

/// Computes the eigenvector of `matrix` associated with `lam_init` by perturbed inverse
/// iteration.
///
/// # Arguments
/// * `backend`: The numeric primitives used for every vector and tridiagonal operation.
/// * `matrix`: The symmetric tridiagonal matrix `T`.
/// * `lam_init`: The targeted eigenvalue.
/// * `options`: Iteration budget, tolerance and instrumentation switches.
/// * `workspace`: Buffers for the factorization. Must have the dimension of `matrix`.
/// * `eig`: On entry the starting direction, on exit the unit-norm iterate. Left untouched if
///   the shift search fails, unspecified if a solve fails.
/// * `callback`: An optional observer invoked after every normalization of `eig`.
///
/// # Returns
/// An [`InverseIterationReport`] whose [`Termination`] tells how the iteration ended. An
/// `Err` is only returned for malformed input, in which case nothing has been modified.
pub fn perturbed_inverse_iteration<B>(
    backend: &B,
    matrix: TridiagonalRef<'_>,
    lam_init: f64,
    options: &InverseIterationOptions,
    workspace: &mut InverseIterationWorkspace,
    eig: &mut [f64],
    mut callback: Option<&mut InverseIterationCallback<'_>>,
) -> Result<InverseIterationReport, EigenInverseError>
where
    B: NumericPrimitives + ?Sized,
{
    let n = matrix.dim();
    if workspace.dim() != n {
        return Err(EigenInverseError::dimension_mismatch(
            "workspace",
            n,
            workspace.dim(),
        ));
    }
    if eig.len() != n {
        return Err(EigenInverseError::dimension_mismatch("eig", n, eig.len()));
    }
    if !lam_init.is_finite() {
        return Err(EigenInverseError::input(format!(
            "The target eigenvalue must be finite, got {lam_init}."
        )));
    }
    if !(options.tol_abs >= 0.0) {
        return Err(EigenInverseError::input(format!(
            "The tolerance must be non-negative, got {}.",
            options.tol_abs
        )));
    }
    let eig_norm = backend.norm2(eig);
    if !(eig_norm > 0.0 && eig_norm.is_finite()) {
        return Err(EigenInverseError::input(
            "The starting vector `eig` must be non-zero and finite.",
        ));
    }

    let prefix = options.log_prefix.as_str();
    let stopwatch = Stopwatch::new(options.measure_time);
    let very_start = stopwatch.start();
    let mut timing = Timing::default();

    log::debug!("{prefix}Inverse iteration on n = {n} targeting lam = {lam_init:e}");

    // --- SHIFT SEARCH ---
    // diag_fac <- diag - (lam_init - pert) * ones, perturbing until LDLᵀ exists.
    let mut accepted = None;
    let mut pert = 0.0;
    let mut shift_attempts = 0;
    for candidate in PerturbationSchedule::new(lam_init) {
        shift_attempts += 1;
        pert = candidate;
        let minus_lam = candidate - lam_init;

        backend.copy(matrix.diag(), &mut workspace.diag_fac);
        backend.axpy(minus_lam, &workspace.ones, &mut workspace.diag_fac);
        backend.copy(matrix.offdiag(), &mut workspace.offdiag_fac);

        let started = stopwatch.start();
        let status =
            backend.tridiagonal_factorize(&mut workspace.diag_fac, &mut workspace.offdiag_fac);
        stopwatch.lap(started, &mut timing.factorization);

        match status {
            Ok(()) => {
                accepted = Some(-minus_lam);
                break;
            }
            Err(err) => log::trace!("{prefix}Shift with pert = {candidate:e} rejected: {err}"),
        }
    }

    let Some(lam_pert) = accepted else {
        log::warn!(
            "{prefix}Failure on factorizing in inverse correction after {shift_attempts} shifts."
        );
        stopwatch.lap(very_start, &mut timing.total);
        return Ok(InverseIterationReport {
            termination: Termination::FactorizationFailed,
            iterations: 0,
            shift_attempts,
            lam_pert: lam_init - pert,
            pert,
            refined_eigenvalue: None,
            timing: options.measure_time.then_some(timing),
        });
    };
    log::debug!("{prefix}Accepted pert = {pert:e} after {shift_attempts} attempt(s)");

    // --- INITIAL NORMALIZATION ---
    let invnorm = 1.0 / eig_norm;
    backend.scale(invnorm, eig);
    if let Some(ref mut cb) = callback {
        cb(&IterationSnapshot {
            iteration: 0,
            eig: &*eig,
            invnorm,
            convergence_gap: None,
        });
    }

    // --- INVERSE ITERATION ---
    // Every solve reuses the factorization accepted above.
    let mut iterations = 0;
    let mut last_invnorm = None;
    let termination = loop {
        if iterations >= options.itmax {
            break Termination::IterationLimit;
        }
        iterations += 1;

        let started = stopwatch.start();
        let status = backend.tridiagonal_solve(&workspace.diag_fac, &workspace.offdiag_fac, eig);
        stopwatch.lap(started, &mut timing.solve);
        if let Err(err) = status {
            log::warn!("{prefix}Failure on solving inverse correction: {err}");
            break Termination::LinearSolveFailed;
        }

        let invnorm = 1.0 / backend.norm2(eig);
        backend.scale(invnorm, eig);
        last_invnorm = Some(invnorm);

        let gap = (invnorm - pert).abs();
        log::trace!("{prefix}iter {iterations:>3}: invnorm = {invnorm:e}, gap = {gap:e}");

        if let Some(ref mut cb) = callback {
            cb(&IterationSnapshot {
                iteration: iterations,
                eig: &*eig,
                invnorm,
                convergence_gap: Some(gap),
            });
        }

        if gap <= options.tol_abs {
            break Termination::Converged;
        }
    };

    log::debug!("{prefix}Inverse iteration finished: {termination:?} after {iterations} solve(s)");
    stopwatch.lap(very_start, &mut timing.total);

    Ok(InverseIterationReport {
        termination,
        iterations,
        shift_attempts,
        lam_pert,
        pert,
        refined_eigenvalue: last_invnorm.map(|invnorm| lam_pert + invnorm),
        timing: options.measure_time.then_some(timing),
    })
}
