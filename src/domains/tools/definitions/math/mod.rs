//! Math tools module.
//!
//! - `calculate`: Evaluate arithmetic expressions
//! - `expr`: The restricted expression grammar behind `calculate`

pub mod calculate;
pub mod expr;

pub use calculate::{CalculateParams, CalculateTool};
