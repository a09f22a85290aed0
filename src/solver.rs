//! Top-level solve pipeline.
//!
//! [`solve`] wires the stages together: full domains over the date range,
//! node consistency, AC-3 arc consistency, then backtracking search. The
//! first two stages short-circuit with "no solution" as soon as any
//! domain empties. Unsatisfiability detected early (empty domain) and
//! late (exhausted search) surface identically as `None`; the caller is
//! never told why no solution exists, because the answer is definitive
//! either way.

use crate::constraint::DateConstraint;
use crate::domain::DomainStore;
use crate::propagation::{arc_consistency, node_consistency};
use crate::search::search;
use chrono::NaiveDate;
use log::debug;

/// Options for a solve call.
///
/// # Examples
///
/// ```
/// use calsat::SolveConfig;
///
/// let config = SolveConfig::default().with_parallel(true);
/// assert!(config.parallel);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SolveConfig {
    /// Compute node-consistency filters and AC-3 removal sets on rayon.
    ///
    /// Only effective with the `parallel` cargo feature; without it the
    /// flag is accepted and ignored. Domain mutation is applied
    /// sequentially in both modes, so the result is identical either way.
    pub parallel: bool,
}

impl SolveConfig {
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Schedules `n_meetings` dates within `[range_start, range_end]`
/// (inclusive on both ends) subject to the given constraints.
///
/// Returns the scheduled dates indexed by meeting variable, or `None` if
/// no assignment satisfies every constraint. The result is deterministic:
/// first unassigned variable by id, candidate dates in ascending order.
///
/// A constraint mentioning a variable id `>= n_meetings` makes the
/// instance unsatisfiable (`None`), since no such meeting exists to
/// schedule. `n_meetings == 0` with no such constraint yields an empty
/// schedule.
///
/// # Examples
///
/// ```
/// use calsat::{solve, CompOp, DateConstraint};
/// use chrono::NaiveDate;
///
/// let jan = |d| NaiveDate::from_ymd_opt(2019, 1, d).unwrap();
/// let constraints = [DateConstraint::unary(0, CompOp::Eq, jan(3))];
/// assert_eq!(solve(1, jan(1), jan(5), &constraints), Some(vec![jan(3)]));
/// ```
pub fn solve(
    n_meetings: usize,
    range_start: NaiveDate,
    range_end: NaiveDate,
    constraints: &[DateConstraint],
) -> Option<Vec<NaiveDate>> {
    solve_with_config(
        n_meetings,
        range_start,
        range_end,
        constraints,
        SolveConfig::default(),
    )
}

/// Like [`solve`], with explicit options.
pub fn solve_with_config(
    n_meetings: usize,
    range_start: NaiveDate,
    range_end: NaiveDate,
    constraints: &[DateConstraint],
    config: SolveConfig,
) -> Option<Vec<NaiveDate>> {
    if constraints.iter().any(|c| !c.mentions_only(n_meetings)) {
        debug!("constraint mentions a variable >= {n_meetings}; unsatisfiable");
        return None;
    }

    let mut store = DomainStore::new(n_meetings, range_start, range_end, constraints);
    if store.has_empty_domain() {
        debug!("date range {range_start}..={range_end} is empty; no solution");
        return None;
    }

    if !node_consistency(&mut store, constraints, config.parallel) {
        debug!("node consistency emptied a domain; no solution");
        return None;
    }
    debug!("domain sizes after node consistency: {:?}", store.domain_sizes());

    if !arc_consistency(&mut store, config.parallel) {
        debug!("arc consistency emptied a domain; no solution");
        return None;
    }
    debug!("domain sizes after arc consistency: {:?}", store.domain_sizes());

    search(&store, constraints)
}

/// Whether `solution` satisfies every constraint.
///
/// A constraint mentioning a variable beyond `solution`'s length is
/// unsatisfied. Useful for auditing a schedule produced elsewhere; every
/// `Some` result of [`solve`] passes this check.
pub fn satisfies(solution: &[NaiveDate], constraints: &[DateConstraint]) -> bool {
    constraints.iter().all(|c| match c {
        DateConstraint::Unary(u) => solution
            .get(u.var())
            .is_some_and(|&d| u.op().holds(d, u.date())),
        DateConstraint::Binary(b) => match (solution.get(b.left()), solution.get(b.right())) {
            (Some(&l), Some(&r)) => b.op().holds(l, r),
            _ => false,
        },
    })
}
