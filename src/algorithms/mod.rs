//! Building blocks of the perturbed inverse iteration.
//!
//! The algorithm itself lives in [`inverse_iteration`]. This module holds the types shared
//! between the core and its callers: the perturbation schedule of the shift search, the
//! terminal outcomes, the caller-owned workspace and the per-iteration observer hook.

pub mod inverse_iteration;

use crate::utils::perf::Timing;

/// Upper bound on the perturbation tried by the shift search, `1/ε`.
pub const PERTURBATION_LIMIT: f64 = 1.0 / f64::EPSILON;

/// Sequence of perturbations tried by the shift search.
///
/// The first value is `0` so that an already usable eigenvalue estimate is kept untouched.
/// The second is `ε^{1/4} · max(1, -lam_init)`, scaled both to machine precision and to the
/// magnitude of the target. Every following value is ten times the previous one. The schedule
/// ends with the last value not exceeding [`PERTURBATION_LIMIT`], so it is always finite.
#[derive(Debug, Clone)]
pub struct PerturbationSchedule {
    next: Option<f64>,
    first_bump: f64,
}

impl PerturbationSchedule {
    /// Starts the schedule for the target eigenvalue `lam_init`.
    pub fn new(lam_init: f64) -> Self {
        // sqrt is correctly rounded, so this is exactly 2^-13 for f64.
        let eps_pow_4 = f64::EPSILON.sqrt().sqrt();
        Self {
            next: Some(0.0),
            first_bump: eps_pow_4 * f64::max(1.0, -lam_init),
        }
    }
}

impl Iterator for PerturbationSchedule {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let current = self.next.take()?;
        let following = if current == 0.0 {
            self.first_bump
        } else {
            10.0 * current
        };
        if following <= PERTURBATION_LIMIT {
            self.next = Some(following);
        }
        Some(current)
    }
}

/// Terminal outcome of a perturbed inverse iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// `|invnorm - pert| <= tol_abs` was reached.
    Converged,
    /// No perturbation up to [`PERTURBATION_LIMIT`] made the shifted matrix factorizable.
    FactorizationFailed,
    /// A solve against an accepted factorization failed.
    LinearSolveFailed,
    /// `itmax` solves were performed without meeting the tolerance. The iterate is still a
    /// usable approximation.
    IterationLimit,
}

impl Termination {
    /// Short lowercase label, used by the experiment runner's CSV output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::Converged => "converged",
            Termination::FactorizationFailed => "factorization_failed",
            Termination::LinearSolveFailed => "linear_solve_failed",
            Termination::IterationLimit => "iteration_limit",
        }
    }
}

/// Everything a call to the inverse iteration reports besides the iterate itself.
#[derive(Debug, Clone, PartialEq)]
pub struct InverseIterationReport {
    pub termination: Termination,
    /// Number of solves performed. Zero when the shift search failed.
    pub iterations: usize,
    /// Number of factorization attempts made by the shift search.
    pub shift_attempts: usize,
    /// The shift actually applied, `lam_init - pert`.
    pub lam_pert: f64,
    /// The accepted perturbation, or the last one attempted if the shift search failed.
    pub pert: f64,
    /// `lam_pert + invnorm` after the last normalization: the eigenvalue of `T` associated with
    /// the current iterate. `None` if no solve completed.
    pub refined_eigenvalue: Option<f64>,
    /// Present only when [`InverseIterationOptions::measure_time`] is set.
    pub timing: Option<Timing>,
}

impl InverseIterationReport {
    #[inline]
    pub fn is_converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Tuning knobs of the inverse iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct InverseIterationOptions {
    /// Maximum number of solves.
    pub itmax: usize,
    /// Absolute tolerance of the convergence test `|invnorm - pert| <= tol_abs`.
    pub tol_abs: f64,
    /// Collect wall-clock timings into [`InverseIterationReport::timing`].
    pub measure_time: bool,
    /// Prepended to every log line emitted by the call.
    pub log_prefix: String,
}

impl Default for InverseIterationOptions {
    fn default() -> Self {
        Self {
            itmax: 10,
            tol_abs: f64::EPSILON.sqrt(),
            measure_time: false,
            log_prefix: String::new(),
        }
    }
}

impl InverseIterationOptions {
    /// Sets the maximum number of inverse-iteration solves.
    pub fn with_itmax(mut self, itmax: usize) -> Self {
        self.itmax = itmax;
        self
    }

    /// Sets the absolute tolerance of the convergence test `|invnorm - pert| <= tol_abs`.
    pub fn with_tol_abs(mut self, tol_abs: f64) -> Self {
        self.tol_abs = tol_abs;
        self
    }

    /// Enables or disables the wall-clock breakdown in [`InverseIterationReport::timing`].
    pub fn with_timing(mut self, measure_time: bool) -> Self {
        self.measure_time = measure_time;
        self
    }

    /// Sets the prefix prepended to every log record emitted by the routine.
    pub fn with_log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_prefix = prefix.into();
        self
    }
}

/// Caller-owned buffers of the inverse iteration.
///
/// Allocating these once and reusing them across calls keeps the algorithmic path free of
/// allocations. After a call whose shift search succeeded, [`Self::diag_fac`] and
/// [`Self::offdiag_fac`] hold the LDLᵀ factors of `T - lam_pert * I`.
#[derive(Debug, Clone)]
pub struct InverseIterationWorkspace {
    pub(crate) ones: Vec<f64>,
    pub(crate) diag_fac: Vec<f64>,
    pub(crate) offdiag_fac: Vec<f64>,
}

impl InverseIterationWorkspace {
    /// Allocates a workspace for matrices of order `n`.
    pub fn new(n: usize) -> Self {
        Self {
            ones: vec![1.0; n],
            diag_fac: vec![0.0; n],
            offdiag_fac: vec![0.0; n.saturating_sub(1)],
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.diag_fac.len()
    }

    #[inline]
    pub fn diag_fac(&self) -> &[f64] {
        &self.diag_fac
    }

    #[inline]
    pub fn offdiag_fac(&self) -> &[f64] {
        &self.offdiag_fac
    }
}

/// State of the iterate right after a normalization.
#[derive(Debug, Clone, Copy)]
pub struct IterationSnapshot<'a> {
    /// `0` for the initial normalization, then the number of solves performed so far.
    pub iteration: usize,
    /// The unit-norm iterate.
    pub eig: &'a [f64],
    /// The factor that was applied to normalize `eig`.
    pub invnorm: f64,
    /// `|invnorm - pert|`, absent for the initial normalization.
    pub convergence_gap: Option<f64>,
}

/// Observer invoked after every normalization of the iterate.
pub type InverseIterationCallback<'a> = dyn FnMut(&IterationSnapshot<'_>) + 'a;
