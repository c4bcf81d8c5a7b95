//! Interpolation planner — a migration path from an even split to the exact
//! target allocation.
//!
//! Element `j` of the sequence pins the `j` highest-priority symbols at their
//! exact target weights and splits the leftover weight evenly across the
//! rest. The first element is the pure even split; the last equals the target
//! allocation; the degenerate all-pinned duplicate is not emitted.

use crate::domain::Allocation;

/// Produce the ordered sequence of intermediate allocations walking from an
/// even split to `allocation`, one fixed point at a time.
///
/// An empty allocation produces an empty sequence; a single-symbol allocation
/// produces one element (the even split already equals the target).
pub fn interpolate(allocation: &Allocation) -> Vec<Allocation> {
    let order = allocation.priority_order();
    let n = order.len();
    let mut sequence = Vec::with_capacity(n);

    for fixed in 0..n {
        let remaining = n - fixed;
        let pinned: f64 = order[..fixed]
            .iter()
            .map(|s| allocation.get(s).unwrap_or(0.0))
            .sum();
        let share = (100.0 - pinned) / remaining as f64;

        let weights = order.iter().enumerate().map(|(i, symbol)| {
            let target = allocation.get(symbol).unwrap_or(0.0);
            // A lone unpinned symbol takes its exact target weight, not the
            // computed remainder, so the final element matches the target
            // allocation without float drift.
            let weight = if i < fixed || remaining == 1 {
                target
            } else {
                share
            };
            (symbol.clone(), weight)
        });
        sequence.push(Allocation::from_weights(weights));
    }

    sequence
}
