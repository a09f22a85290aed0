//! Calendar satisfaction problem solver.
//!
//! Schedules `n` meetings within an inclusive date range so that a set of
//! unary (variable-vs-literal) and binary (variable-vs-variable) date
//! comparisons all hold: a classic finite-domain CSP over discrete,
//! totally ordered dates.
//!
//! # Pipeline
//!
//! - **Node consistency**: each variable's domain is filtered by its
//!   unary constraints.
//! - **Arc consistency (AC-3)**: a work-queue fixed point removes every
//!   domain value lacking a supporting partner value across each binary
//!   constraint.
//! - **Backtracking search**: depth-first assignment over the filtered
//!   domains, checking constraints incrementally and undoing failed
//!   choices, returning the first complete solution.
//!
//! An empty domain at any stage proves the instance unsatisfiable, and
//! [`solve`] reports it as `None` without distinguishing early from late
//! failure.
//!
//! # Features
//!
//! - `parallel`: compute domain-filtering removal sets on rayon
//!   (mutation stays sequential; results are identical).
//! - `serde`: `Serialize`/`Deserialize` on the constraint model.
//!
//! # Examples
//!
//! ```
//! use calsat::{solve, satisfies, CompOp, DateConstraint};
//! use chrono::NaiveDate;
//!
//! let jan = |d| NaiveDate::from_ymd_opt(2019, 1, d).unwrap();
//! let constraints = [
//!     DateConstraint::unary(0, CompOp::Le, jan(2)),
//!     DateConstraint::unary(1, CompOp::Le, jan(2)),
//!     DateConstraint::binary(0, CompOp::Ne, 1).unwrap(),
//! ];
//!
//! let schedule = solve(2, jan(1), jan(5), &constraints).unwrap();
//! assert!(satisfies(&schedule, &constraints));
//! ```
//!
//! # References
//!
//! Russell & Norvig, *Artificial Intelligence: A Modern Approach*,
//! ch. 6 (constraint satisfaction, AC-3, backtracking search).

mod constraint;
mod domain;
mod error;
mod propagation;
mod search;
mod solver;

pub use constraint::{BinaryDateConstraint, CompOp, DateConstraint, UnaryDateConstraint};
pub use error::CspError;
pub use solver::{satisfies, solve, solve_with_config, SolveConfig};
