//! Allocation — target percentage weight per asset, summing to 100.
//!
//! Backed by a `BTreeMap` so iteration order, minimum-finding, and every plan
//! derived from an allocation are deterministic across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Absolute tolerance on the sum-to-100 invariant.
pub const SUM_TOLERANCE: f64 = 0.1;

/// Floating-point guard used in every residual-weight comparison.
///
/// "Weight reaches zero" always means "within this of zero", never exact
/// equality — otherwise a symbol can fail to drop and the decomposition
/// loop never terminates.
pub const WEIGHT_EPS: f64 = 1e-9;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AllocationError {
    #[error("allocation is empty")]
    Empty,

    #[error("symbol {symbol} has negative weight {weight}")]
    NegativeWeight { symbol: String, weight: f64 },

    #[error("weights sum to {sum:.4}, expected 100 ± {SUM_TOLERANCE}")]
    BadSum { sum: f64 },

    #[error("investment must be positive, got {amount}")]
    NonPositiveInvestment { amount: f64 },
}

/// A validated basket: unique symbol → target weight (percent).
///
/// Immutable once constructed; the engine works on private copies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation {
    weights: BTreeMap<String, f64>,
}

impl Allocation {
    /// Build without checking invariants. For input that has already been
    /// validated (or for synthetic allocations produced by the engine itself).
    pub fn from_weights<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            weights: weights.into_iter().map(|(s, w)| (s.into(), w)).collect(),
        }
    }

    /// Build and enforce the full input contract: non-empty, no negative
    /// weights, sum within `100 ± SUM_TOLERANCE`.
    pub fn validated<I, S>(weights: I) -> Result<Self, AllocationError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let alloc = Self::from_weights(weights);
        if alloc.is_empty() {
            return Err(AllocationError::Empty);
        }
        for (symbol, &weight) in &alloc.weights {
            if weight < 0.0 {
                return Err(AllocationError::NegativeWeight {
                    symbol: symbol.clone(),
                    weight,
                });
            }
        }
        let sum = alloc.total_weight();
        if (sum - 100.0).abs() > SUM_TOLERANCE {
            return Err(AllocationError::BadSum { sum });
        }
        Ok(alloc)
    }

    /// Rescale any positive-sum basket so the weights sum to exactly 100.
    ///
    /// Rejects empty baskets, negative weights, and zero-sum baskets (nothing
    /// to scale against).
    pub fn auto_scaled<I, S>(weights: I) -> Result<Self, AllocationError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut alloc = Self::from_weights(weights);
        if alloc.is_empty() {
            return Err(AllocationError::Empty);
        }
        for (symbol, &weight) in &alloc.weights {
            if weight < 0.0 {
                return Err(AllocationError::NegativeWeight {
                    symbol: symbol.clone(),
                    weight,
                });
            }
        }
        let sum = alloc.total_weight();
        if sum <= 0.0 {
            return Err(AllocationError::BadSum { sum });
        }
        let factor = 100.0 / sum;
        for weight in alloc.weights.values_mut() {
            *weight *= factor;
        }
        Ok(alloc)
    }

    /// The even split: every symbol weighted `100 / n`.
    pub fn even_split<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        let n = symbols.len();
        if n == 0 {
            return Self::default();
        }
        let share = 100.0 / n as f64;
        Self::from_weights(symbols.into_iter().map(|s| (s, share)))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.weights.get(symbol).copied()
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Iterate symbol → weight in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(s, &w)| (s.as_str(), w))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Symbols by descending weight. Exact-weight ties are adjacent; their
    /// relative order (symbol name) carries no meaning and callers must not
    /// rely on it.
    pub fn priority_order(&self) -> Vec<String> {
        let mut order: Vec<(&String, f64)> =
            self.weights.iter().map(|(s, &w)| (s, w)).collect();
        order.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        order.into_iter().map(|(s, _)| s.clone()).collect()
    }

    /// Number of distinct weight values, grouping values within `epsilon` of
    /// each other. Bounds the step count of a decomposition.
    pub fn distinct_weights(&self, epsilon: f64) -> usize {
        let mut sorted: Vec<f64> = self.weights.values().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mut count = 0;
        let mut last = f64::NEG_INFINITY;
        for w in sorted {
            if (w - last).abs() > epsilon + WEIGHT_EPS {
                count += 1;
                last = w;
            }
        }
        count
    }
}

/// Validate an investment amount (currency units).
pub fn validate_investment(amount: f64) -> Result<f64, AllocationError> {
    if amount > 0.0 && amount.is_finite() {
        Ok(amount)
    } else {
        Err(AllocationError::NonPositiveInvestment { amount })
    }
}
