//! Tolerance search — widen the grouping window until the dollar slop budget
//! is spent.
//!
//! The only epsilon values worth visiting are the inter-weight gaps the
//! epsilon-0 run actually observed: growing the window by anything less than
//! the next real gap cannot change the plan shape. The search is a monotone
//! one-directional walk, not a binary search — every intermediate plan whose
//! slop grew is reported, not just the final one.

use crate::domain::{Allocation, PurchasePlan};
use crate::engine::decompose::decompose;
use std::collections::VecDeque;

/// Absorbs float noise when comparing dollar slop against the budget.
const MONEY_EPS: f64 = 1e-6;

/// One plan the search chose to report: its slop strictly exceeded the
/// previous iteration's, so widening epsilon visibly changed the output.
#[derive(Debug, Clone, PartialEq)]
pub struct ToleranceReport {
    pub epsilon: f64,
    pub slop: f64,
    pub plan: PurchasePlan,
}

/// Outcome of a tolerance search.
#[derive(Debug, Clone, PartialEq)]
pub struct ToleranceSearch {
    /// Reported plans in increasing-epsilon order (the epsilon-0 baseline is
    /// always first).
    pub reports: Vec<ToleranceReport>,
    /// The coarsest plan whose slop stayed within the budget.
    pub best: PurchasePlan,
    pub best_slop: f64,
}

/// Drive the decomposition with a growing tolerance window, looking for the
/// coarsest grouping whose total cost stays within `slop_budget` dollars of
/// `investment`.
///
/// Epsilon grows by the baseline plan's step weights, smallest first; the
/// walk stops when the slop overruns the budget (the prior plan wins) or the
/// increments run out.
pub fn search_tolerance(
    allocation: &Allocation,
    investment: f64,
    slop_budget: f64,
) -> ToleranceSearch {
    let baseline = decompose(allocation, 0.0);

    // The baseline step weights are the legal epsilon increments.
    let mut increments: VecDeque<f64> = {
        let mut weights: Vec<f64> = baseline.steps.iter().map(|s| s.weight).collect();
        weights.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        weights.into()
    };

    let mut epsilon = 0.0;
    let mut last_slop = f64::NEG_INFINITY;
    let mut reports = Vec::new();
    let mut best: Option<(PurchasePlan, f64)> = None;

    loop {
        let plan = if epsilon == 0.0 {
            baseline.clone()
        } else {
            decompose(allocation, epsilon)
        };
        let slop = plan.slop(investment);

        // Suppress plans where widening epsilon changed nothing yet.
        if slop > last_slop {
            reports.push(ToleranceReport {
                epsilon,
                slop,
                plan: plan.clone(),
            });
        }
        last_slop = slop;

        if slop > slop_budget + MONEY_EPS {
            break;
        }
        best = Some((plan, slop));

        // Keep the last increment in reserve: adding it collapses everything
        // into the single-step equal grouping, which the walk has already
        // reached by then.
        if increments.len() <= 1 {
            break;
        }
        epsilon += increments.pop_front().unwrap_or(0.0);
    }

    // An over-budget baseline leaves no acceptable plan; fall back to the
    // baseline itself, which is the most faithful decomposition available.
    let (best, best_slop) = best.unwrap_or_else(|| {
        let slop = baseline.slop(investment);
        (baseline, slop)
    });

    ToleranceSearch {
        reports,
        best,
        best_slop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Allocation;

    fn alloc(weights: &[(&str, f64)]) -> Allocation {
        Allocation::from_weights(weights.iter().map(|&(s, w)| (s, w)))
    }

    #[test]
    fn zero_budget_keeps_the_exact_plan() {
        let a = alloc(&[("A", 50.0), ("B", 30.0), ("C", 20.0)]);
        let search = search_tolerance(&a, 1000.0, 0.0);

        assert_eq!(search.best.epsilon, 0.0);
        assert_eq!(search.best.step_count(), 3);
        assert!(search.best_slop < 1e-6);
    }

    #[test]
    fn baseline_is_always_reported_first() {
        let a = alloc(&[("A", 50.0), ("B", 30.0), ("C", 20.0)]);
        let search = search_tolerance(&a, 1000.0, 0.0);

        assert!(!search.reports.is_empty());
        assert_eq!(search.reports[0].epsilon, 0.0);
    }

    #[test]
    fn generous_budget_coarsens_the_plan() {
        let a = alloc(&[("A", 50.0), ("B", 30.0), ("C", 20.0)]);
        // Budget large enough to accept any grouping.
        let search = search_tolerance(&a, 1000.0, 10_000.0);

        assert!(search.best.step_count() < 3);
        assert!(search.best.epsilon > 0.0);
    }

    #[test]
    fn epsilon_and_slop_grow_monotonically_across_reports() {
        let a = alloc(&[
            ("A", 35.0),
            ("B", 25.0),
            ("C", 20.0),
            ("D", 15.0),
            ("E", 5.0),
        ]);
        let search = search_tolerance(&a, 10_000.0, 10_000.0);

        for pair in search.reports.windows(2) {
            assert!(pair[1].epsilon > pair[0].epsilon);
            assert!(pair[1].slop > pair[0].slop);
            assert!(pair[1].plan.step_count() <= pair[0].plan.step_count());
        }
    }

    #[test]
    fn tight_budget_stops_before_overrun() {
        let a = alloc(&[
            ("A", 35.0),
            ("B", 25.0),
            ("C", 20.0),
            ("D", 15.0),
            ("E", 5.0),
        ]);
        let budget = 50.0;
        let search = search_tolerance(&a, 1000.0, budget);

        assert!(search.best_slop <= budget + 1e-6);
    }

    #[test]
    fn best_is_the_coarsest_plan_within_budget() {
        let a = alloc(&[("A", 40.0), ("B", 35.0), ("C", 25.0)]);
        let search = search_tolerance(&a, 1000.0, 1_000_000.0);

        // Nothing can overrun a budget that large, so the walk runs until the
        // increments are exhausted and the plan collapses.
        assert_eq!(search.best.step_count(), 1);
    }

    #[test]
    fn single_symbol_search_is_trivial() {
        let a = alloc(&[("A", 100.0)]);
        let search = search_tolerance(&a, 500.0, 0.0);

        assert_eq!(search.best.step_count(), 1);
        assert!(search.best_slop < 1e-6);
        assert_eq!(search.reports.len(), 1);
    }
}
