//! Domain filtering: node consistency and AC-3 arc consistency.
//!
//! Both passes only ever remove values. Node consistency applies the unary
//! constraints; arc consistency then drives the binary-constraint graph to
//! a fixed point with the classic AC-3 work queue. Either pass reports
//! failure as soon as some variable's domain empties, which proves the
//! whole problem unsatisfiable.
//!
//! With the `parallel` feature enabled and requested, the read-only parts
//! (per-variable unary filtering, per-arc removal-set computation) run on
//! rayon; domain mutation is always applied sequentially afterwards, so
//! the result is identical either way.

use crate::constraint::{CompOp, DateConstraint, UnaryDateConstraint};
use crate::domain::DomainStore;
use chrono::NaiveDate;
use log::trace;
use std::collections::VecDeque;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Filters every unary-constrained variable's domain down to the values
/// satisfying all of its unary constraints.
///
/// Multiple unary constraints on one variable compose as an intersection,
/// so filtering order does not matter. Returns `false` as soon as a domain
/// empties.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
pub(crate) fn node_consistency(
    store: &mut DomainStore,
    constraints: &[DateConstraint],
    parallel: bool,
) -> bool {
    let unary: Vec<&UnaryDateConstraint> = constraints
        .iter()
        .filter_map(|c| match c {
            DateConstraint::Unary(u) => Some(u),
            DateConstraint::Binary(_) => None,
        })
        .collect();

    #[cfg(feature = "parallel")]
    {
        if parallel {
            store
                .domains_mut()
                .par_iter_mut()
                .enumerate()
                .for_each(|(var, domain)| {
                    domain.retain(|&d| {
                        unary
                            .iter()
                            .filter(|u| u.var() == var)
                            .all(|u| u.op().holds(d, u.date()))
                    });
                });
            return unary.iter().all(|u| !store.domain(u.var()).is_empty());
        }
    }

    for u in unary {
        let domain = &mut store.domains_mut()[u.var()];
        domain.retain(|&d| u.op().holds(d, u.date()));
        if domain.is_empty() {
            trace!("node consistency emptied variable {} via {u}", u.var());
            return false;
        }
    }
    true
}

/// Runs AC-3 over the binary-constraint graph to a fixed point.
///
/// The work queue holds directed arcs `(tail, head, op)`, seeded with both
/// directions of every binary constraint. For each arc, the subset of
/// `domain(tail)` with no supporting value in `domain(head)` is computed
/// against a read snapshot and then removed; a non-empty removal
/// re-enqueues `(neighbor, tail)` for every edge of `tail` except the one
/// just processed, since the shrink can invalidate previously established
/// support. Returns `false` as soon as a domain empties.
pub(crate) fn arc_consistency(store: &mut DomainStore, parallel: bool) -> bool {
    let mut queue: VecDeque<(usize, usize, CompOp)> = VecDeque::new();
    for var in 0..store.len() {
        for &(neighbor, op) in store.neighbors(var) {
            queue.push_back((var, neighbor, op));
        }
    }

    while let Some((tail, head, op)) = queue.pop_front() {
        let removals = unsupported(store.domain(tail), store.domain(head), op, parallel);
        if removals.is_empty() {
            continue;
        }

        trace!(
            "arc ({tail} {op} {head}): removing {} unsupported value(s) from {tail}",
            removals.len()
        );
        store.remove_all(tail, &removals);
        if store.domain(tail).is_empty() {
            return false;
        }

        // The tail->neighbor label inverts to label the neighbor->tail arc.
        // Only the arc derived from the edge just processed may be skipped:
        // a pair linked by a second, differently-labeled edge can lose
        // support under that other operator and must be re-checked.
        for &(neighbor, label) in store.neighbors(tail) {
            if neighbor != head || label != op {
                queue.push_back((neighbor, tail, label.inverse()));
            }
        }
    }
    true
}

/// The values of `tail` with no supporting value in `head` under `op`,
/// in `tail`'s (ascending) order.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
fn unsupported(
    tail: &[NaiveDate],
    head: &[NaiveDate],
    op: CompOp,
    parallel: bool,
) -> Vec<NaiveDate> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return tail
                .par_iter()
                .copied()
                .filter(|&t| !head.iter().any(|&h| op.holds(t, h)))
                .collect();
        }
    }
    tail.iter()
        .copied()
        .filter(|&t| !head.iter().any(|&h| op.holds(t, h)))
        .collect()
}
