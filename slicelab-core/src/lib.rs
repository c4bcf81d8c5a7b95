//! SliceLab Core — slice decomposition engine for basket allocations.
//!
//! Converts a target percentage allocation across a small set of assets into
//! an ordered sequence of discrete, uniform-spend purchase steps that
//! reconstruct the target allocation, subject to a brokerage minimum order
//! size and an optional dollar-slop budget.
//!
//! Three independent contracts:
//! - [`engine::decompose`] — the greedy slice decomposition: repeatedly
//!   extract the smallest residual weight shared by all active symbols,
//!   retiring symbols whose residual reaches zero.
//! - [`engine::search_tolerance`] — wrap the decomposition in a growing
//!   tolerance window, trading step count against dollar slop.
//! - [`engine::interpolate`] — a migration path from an even split to the
//!   exact target, one fixed point at a time.
//!
//! Everything is synchronous, side-effect-free, and bounded by the basket
//! size; input validation and report rendering live in the CLI crate.

pub mod domain;
pub mod engine;
pub mod pricing;

pub use domain::{Allocation, AllocationError, PurchasePlan, Step};
pub use engine::{decompose, interpolate, search_tolerance, ToleranceSearch};
pub use pricing::{price_plan, PricedPlan, MIN_ORDER_DOLLARS};
