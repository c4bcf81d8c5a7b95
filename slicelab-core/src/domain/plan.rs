//! Purchase plan — the ordered step list produced by one decomposition run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One uniform-spend purchase step.
///
/// The step extracts `weight` percent from every symbol in `active`; the
/// symbols in `dropped` hit zero residual weight as a result and leave the
/// basket before the next step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based ordinal within the plan.
    pub index: usize,
    /// Per-unit weight (percent of the investment) spent in this step.
    pub weight: f64,
    /// Symbols still active when the step executes.
    pub active: Vec<String>,
    /// Symbols whose residual weight reached zero in this step.
    pub dropped: Vec<String>,
}

impl Step {
    /// Dollar cost of this slice for a single symbol at the given investment.
    pub fn cost(&self, investment: f64) -> f64 {
        investment * self.weight / 100.0
    }
}

/// The full ordered step list for one decomposition run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasePlan {
    /// Tolerance window the plan was decomposed with.
    pub epsilon: f64,
    pub steps: Vec<Step>,
}

impl PurchasePlan {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Realized total cost at the given investment.
    ///
    /// Each slice is a single combined order priced once per active symbol,
    /// so a step costs `investment * weight/100 * |active|`.
    pub fn total_cost(&self, investment: f64) -> f64 {
        self.steps
            .iter()
            .map(|s| s.cost(investment) * s.active.len() as f64)
            .sum()
    }

    /// Absolute dollar deviation between realized total cost and the intended
    /// investment.
    pub fn slop(&self, investment: f64) -> f64 {
        (investment - self.total_cost(investment)).abs()
    }

    /// Cumulative dollars per symbol across all steps.
    ///
    /// Charges the full slice cost to every symbol active in the step: "this
    /// slice, bought as one combined order, costs this much per symbol". This
    /// is NOT a per-head split of one order.
    pub fn spend_per_symbol(&self, investment: f64) -> BTreeMap<String, f64> {
        let mut spend = BTreeMap::new();
        for step in &self.steps {
            let cost = step.cost(investment);
            for symbol in &step.active {
                *spend.entry(symbol.clone()).or_insert(0.0) += cost;
            }
        }
        spend
    }

    /// Sum of step weights over the steps in which `symbol` was active.
    ///
    /// For an epsilon-0 plan this reproduces the symbol's original target
    /// weight — the reconstruction law the engine exists to satisfy.
    pub fn reconstructed_weight(&self, symbol: &str) -> f64 {
        self.steps
            .iter()
            .filter(|s| s.active.iter().any(|a| a == symbol))
            .map(|s| s.weight)
            .sum()
    }
}
