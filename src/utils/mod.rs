//! Supporting utilities.
//!
//! - **`perf`**: opt-in wall-clock instrumentation of the inverse iteration
//!   (factorization time, solve time, total time).

pub mod perf;
