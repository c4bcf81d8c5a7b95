//! The three engine contracts: decomposition, tolerance search,
//! interpolation.

pub mod decompose;
pub mod interpolate;
pub mod tolerance;

pub use decompose::decompose;
pub use interpolate::interpolate;
pub use tolerance::{search_tolerance, ToleranceReport, ToleranceSearch};
