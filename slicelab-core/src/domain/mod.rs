//! Domain types: allocations, purchase steps, plans.

pub mod allocation;
pub mod plan;

pub use allocation::{
    validate_investment, Allocation, AllocationError, SUM_TOLERANCE, WEIGHT_EPS,
};
pub use plan::{PurchasePlan, Step};
