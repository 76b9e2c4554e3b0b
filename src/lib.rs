//! Perturbed inverse iteration for eigenvectors of symmetric tridiagonal matrices.
//!
//! Trust-region and Lanczos-type solvers project a large symmetric operator onto a small
//! symmetric tridiagonal matrix T. In the so-called *hard case* the solution formula of such a
//! solver breaks down and an explicit eigenvector of T for its leftmost eigenvalue is needed.
//! This crate computes that eigenvector, together with a refined eigenvalue estimate, by inverse
//! iteration.
//!
//! The difficulty is that `T - λI` is singular exactly when λ is an eigenvalue. The routine
//! therefore factorizes `T - (λ - pert)I` with `pert` taken from a short, bounded schedule
//! (`0`, then `ε^{1/4}·max(1, -λ)`, then ten times larger on each retry) and iterates against
//! the first factorization that exists. See [`algorithms::inverse_iteration`] for the details.
//!
//! ## Layout
//!
//! - [`solvers`]: the high-level entry point [`eigen_inverse`].
//! - [`algorithms`]: the core routine, its options, workspace, report and perturbation schedule.
//! - [`backend`]: the [`backend::NumericPrimitives`] trait and its [`faer`]-based implementation.
//! - [`tridiagonal`]: the borrowed [`tridiagonal::TridiagonalRef`] matrix view.
//! - [`error`]: error types built with [`thiserror`].
//!
//! Diagnostics are emitted through the [`log`] facade; nothing is printed unless the
//! application installs a logger.
//!
//! ## Example Usage
//!
//! The matrix below is block diagonal, `[1] ⊕ [[2, 1], [1, -1.75]]`, with eigenvalues
//! `1`, `-2` and `2.25`. Targeting `-2` makes `T + 2I` singular, so the first factorization
//! attempt fails and the routine moves on to a small perturbation.
//!
//! ```rust
//! use tridiag_eigen::{InverseIterationOptions, Termination, eigen_inverse};
//!
//! let diag = [1.0, 2.0, -1.75];
//! let offdiag = [0.0, 1.0];
//! let mut eig = [0.0, 1.0, 1.0];
//!
//! let report = eigen_inverse(&diag, &offdiag, -2.0, &mut eig, &InverseIterationOptions::default())
//!     .unwrap();
//!
//! assert_eq!(report.termination, Termination::Converged);
//! assert!(report.pert > 0.0);
//! assert!((report.refined_eigenvalue.unwrap() + 2.0).abs() < 1e-8);
//!
//! // The eigenvector for -2 is (0, 1, -4) / sqrt(17).
//! let ratio = eig[2] / eig[1];
//! assert!((ratio + 4.0).abs() < 1e-6);
//! assert!(eig[0].abs() < 1e-8);
//! ```

pub mod algorithms;
pub mod backend;
pub mod error;
pub mod solvers;
pub mod tridiagonal;
pub mod utils;

// Re-export the main API for convenient access.
pub use algorithms::{
    InverseIterationOptions, InverseIterationReport, InverseIterationWorkspace, Termination,
};
pub use solvers::eigen_inverse;
