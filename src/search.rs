//! Backtracking search over filtered domains.
//!
//! Plain depth-first search with chronological backtracking: pick the
//! first unassigned variable by id, try its remaining domain values in
//! ascending order, check the constraints that just became fully
//! assigned, and undo the tentative choice on every failing path. The
//! fixed variable and value orders are a deliberate simplicity choice
//! that keeps the output deterministic; there is no MRV or degree
//! heuristic.

use crate::constraint::DateConstraint;
use crate::domain::DomainStore;
use chrono::NaiveDate;
use log::trace;

/// Searches for the first complete assignment satisfying all constraints.
///
/// Expects node- and arc-consistent domains. Returns the assigned dates
/// ordered by variable id, or `None` after exhausting every branch.
pub(crate) fn search(
    store: &DomainStore,
    constraints: &[DateConstraint],
) -> Option<Vec<NaiveDate>> {
    let mut assignment: Vec<Option<NaiveDate>> = vec![None; store.len()];
    if extend(store, constraints, &mut assignment) {
        // Complete: every slot is Some, in variable-id order.
        Some(assignment.into_iter().flatten().collect())
    } else {
        None
    }
}

/// Tries to complete the partial assignment, leaving it untouched on
/// failure.
fn extend(
    store: &DomainStore,
    constraints: &[DateConstraint],
    assignment: &mut Vec<Option<NaiveDate>>,
) -> bool {
    let var = match assignment.iter().position(Option::is_none) {
        // All variables assigned; every constraint was checked when its
        // last operand got its value.
        None => return true,
        Some(var) => var,
    };

    for &value in store.domain(var) {
        assignment[var] = Some(value);
        if consistent_after(assignment, constraints, var)
            && extend(store, constraints, assignment)
        {
            return true;
        }
        assignment[var] = None;
    }

    trace!("variable {var} exhausted its domain, backtracking");
    false
}

/// Checks the constraints involving `var` that are now fully assigned.
///
/// Constraints with an unassigned operand are vacuously satisfied at this
/// stage and skipped; constraints not involving `var` were already checked
/// when their own operands were assigned.
fn consistent_after(
    assignment: &[Option<NaiveDate>],
    constraints: &[DateConstraint],
    var: usize,
) -> bool {
    constraints.iter().all(|c| match c {
        DateConstraint::Unary(u) => {
            u.var() != var || !matches!(assignment[u.var()], Some(d) if !u.op().holds(d, u.date()))
        }
        DateConstraint::Binary(b) => {
            (b.left() != var && b.right() != var)
                || match (assignment[b.left()], assignment[b.right()]) {
                    (Some(l), Some(r)) => b.op().holds(l, r),
                    _ => true,
                }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::CompOp;
    use crate::propagation::{arc_consistency, node_consistency};

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, d).unwrap()
    }

    fn filtered(n: usize, last_day: u32, constraints: &[DateConstraint]) -> DomainStore {
        let mut store = DomainStore::new(n, jan(1), jan(last_day), constraints);
        assert!(node_consistency(&mut store, constraints, false));
        assert!(arc_consistency(&mut store, false));
        store
    }

    #[test]
    fn test_unconstrained_picks_first_dates() {
        let store = filtered(2, 5, &[]);
        // First unassigned variable, ascending values: both get day one.
        assert_eq!(search(&store, &[]), Some(vec![jan(1), jan(1)]));
    }

    #[test]
    fn test_binary_ne_forces_backtrack() {
        let constraints = [DateConstraint::binary(0, CompOp::Ne, 1).unwrap()];
        let store = filtered(2, 2, &constraints);
        assert_eq!(search(&store, &constraints), Some(vec![jan(1), jan(2)]));
    }

    #[test]
    fn test_pigeonhole_exhausts_all_branches() {
        let constraints = [
            DateConstraint::binary(0, CompOp::Ne, 1).unwrap(),
            DateConstraint::binary(0, CompOp::Ne, 2).unwrap(),
            DateConstraint::binary(1, CompOp::Ne, 2).unwrap(),
        ];
        let store = filtered(3, 2, &constraints);
        assert_eq!(search(&store, &constraints), None);
    }

    #[test]
    fn test_empty_domain_yields_no_solution() {
        // Inverted range, never filtered: the first variable has no values.
        let store = DomainStore::new(1, jan(5), jan(1), &[]);
        assert_eq!(search(&store, &[]), None);
    }

    #[test]
    fn test_zero_variables_is_trivially_complete() {
        let store = filtered(0, 5, &[]);
        assert_eq!(search(&store, &[]), Some(vec![]));
    }

    #[test]
    fn test_deterministic_across_runs() {
        let constraints = [
            DateConstraint::binary(0, CompOp::Ne, 1).unwrap(),
            DateConstraint::binary(1, CompOp::Gt, 2).unwrap(),
        ];
        let store = filtered(3, 4, &constraints);
        let first = search(&store, &constraints);
        assert!(first.is_some());
        assert_eq!(search(&store, &constraints), first);
    }
}
