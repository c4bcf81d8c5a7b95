//! Slice decomposition — greedy reduction of an allocation into uniform-spend
//! purchase steps.
//!
//! Each step extracts the smallest residual weight among still-active symbols
//! and spends it across all of them; symbols whose residual lands within the
//! tolerance window of the extracted slice are fully consumed and retired.
//! The minimum-achieving symbol always retires, so the loop runs at most
//! `|allocation|` iterations.

use crate::domain::{Allocation, PurchasePlan, Step, WEIGHT_EPS};
use std::collections::BTreeMap;

/// Decompose `allocation` into an ordered purchase plan.
///
/// `epsilon` is the tolerance window: two residual weights within `epsilon`
/// of each other are treated as the same slice and retire together. Epsilon 0
/// gives the exact decomposition (one step per distinct weight value); a
/// negative epsilon is treated as zero.
///
/// An empty allocation yields an empty plan.
pub fn decompose(allocation: &Allocation, epsilon: f64) -> PurchasePlan {
    // A negative window could never retire a symbol and the loop would not
    // terminate; treat anything below zero as the exact decomposition.
    let epsilon = epsilon.max(0.0);

    let mut residual: BTreeMap<String, f64> =
        allocation.iter().map(|(s, w)| (s.to_string(), w)).collect();
    let mut steps = Vec::new();

    while !residual.is_empty() {
        let slice = residual
            .values()
            .fold(f64::INFINITY, |min, &w| min.min(w));

        let active: Vec<String> = residual.keys().cloned().collect();
        let mut dropped = Vec::new();

        for symbol in &active {
            let weight = residual[symbol];
            // The slice is the minimum, so weight - slice >= 0 up to float
            // noise; WEIGHT_EPS keeps "reaches zero" from requiring exact
            // equality.
            if weight - slice <= epsilon + WEIGHT_EPS {
                residual.remove(symbol);
                dropped.push(symbol.clone());
            } else {
                *residual.get_mut(symbol).expect("symbol is active") -= slice;
            }
        }

        steps.push(Step {
            index: steps.len() + 1,
            weight: slice,
            active,
            dropped,
        });
    }

    PurchasePlan { epsilon, steps }
}
