//! Variable and domain storage.
//!
//! [`DomainStore`] owns one candidate-date domain per meeting variable,
//! plus the neighbor adjacency derived from the binary constraints. Domains
//! are ascending and duplicate-free, and only ever shrink over the lifetime
//! of a solve call; the ascending enumeration order is what makes the
//! search engine's output reproducible.

use crate::constraint::{CompOp, DateConstraint};
use chrono::NaiveDate;

/// Per-variable domains and the binary-constraint neighbor graph.
///
/// The adjacency is keyed by variable index rather than by object
/// identity: `neighbors(v)` yields `(w, op)` pairs where `op` labels the
/// directed edge `v -> w`. Each binary constraint `(l, op, r)` contributes
/// the edge `l -> r` labeled `op` and the edge `r -> l` labeled
/// `op.inverse()`.
#[derive(Debug, Clone)]
pub(crate) struct DomainStore {
    domains: Vec<Vec<NaiveDate>>,
    neighbors: Vec<Vec<(usize, CompOp)>>,
}

impl DomainStore {
    /// Builds `n` variables with full domains over the inclusive range and
    /// wires the neighbor graph from the binary constraints.
    ///
    /// Every constraint must satisfy `mentions_only(n)`. An inverted range
    /// (`range_end < range_start`) yields empty domains.
    pub(crate) fn new(
        n: usize,
        range_start: NaiveDate,
        range_end: NaiveDate,
        constraints: &[DateConstraint],
    ) -> Self {
        let full = date_range(range_start, range_end);
        let mut neighbors = vec![Vec::new(); n];
        for constraint in constraints {
            if let DateConstraint::Binary(b) = constraint {
                neighbors[b.left()].push((b.right(), b.op()));
                neighbors[b.right()].push((b.left(), b.op().inverse()));
            }
        }
        Self {
            domains: vec![full; n],
            neighbors,
        }
    }

    /// Number of variables.
    pub(crate) fn len(&self) -> usize {
        self.domains.len()
    }

    /// The current domain of `var`, ascending and duplicate-free.
    pub(crate) fn domain(&self, var: usize) -> &[NaiveDate] {
        &self.domains[var]
    }

    /// Mutable access to all domains, for per-variable filtering.
    pub(crate) fn domains_mut(&mut self) -> &mut [Vec<NaiveDate>] {
        &mut self.domains
    }

    /// Outgoing edges of `var` in the neighbor graph.
    pub(crate) fn neighbors(&self, var: usize) -> &[(usize, CompOp)] {
        &self.neighbors[var]
    }

    /// Removes every date in `removals` from the domain of `var`.
    ///
    /// `removals` must be sorted ascending (removal sets are computed in
    /// domain order, so they already are).
    pub(crate) fn remove_all(&mut self, var: usize, removals: &[NaiveDate]) {
        self.domains[var].retain(|d| removals.binary_search(d).is_err());
    }

    /// Whether any variable has run out of candidate dates.
    pub(crate) fn has_empty_domain(&self) -> bool {
        self.domains.iter().any(Vec::is_empty)
    }

    /// Domain sizes indexed by variable, for stage-boundary logging.
    pub(crate) fn domain_sizes(&self) -> Vec<usize> {
        self.domains.iter().map(Vec::len).collect()
    }
}

/// Every date in `[start, end]` inclusive, ascending. Empty if `end < start`.
fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut cur = start;
    while cur <= end {
        dates.push(cur);
        match cur.succ_opt() {
            Some(next) => cur = next,
            None => break,
        }
    }
    dates
}
