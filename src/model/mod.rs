//! Data model shared by every operator and algorithm.
//!
//! - [`Variable`] / [`VariableKind`]: a single decision value and its tag
//! - [`Solution`]: genotype, objective vector and ranking annotations
//! - [`Population`]: the unit passed between pipeline stages
//! - [`Problem`] / [`Bounds`]: the caller-supplied search space and evaluator

mod population;
mod problem;
mod solution;
mod variable;

pub use population::Population;
pub use problem::{Bounds, Problem};
pub use solution::Solution;
pub use variable::{Variable, VariableKind};
