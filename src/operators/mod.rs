//! Variation and selection operators.
//!
//! Operators are plain enums dispatching on the variable kind of each gene,
//! in the same spirit as [`Selection`]: no per-kind type hierarchy.
//!
//! - [`Selection`]: binary tournament, k-tournament, uniform random
//! - [`Crossover`]: SBX (real), single-point (integer / any), cycle (permutation)
//! - [`Mutation`]: polynomial, non-uniform, integer flip, boolean flip, swap
//! - [`SolutionComparator`]: the orderings selection and reduction plug in
//!
//! Every stochastic operator draws exclusively from the
//! [`RandomSource`](crate::RandomSource) it is given.
//!
//! # References
//!
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous Search Space"
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS)"
//! - Michalewicz (1996), *Genetic Algorithms + Data Structures = Evolution Programs*
//! - Oliver, Smith & Holland (1987), "A study of permutation crossover operators"

mod comparator;
mod crossover;
mod mutation;
mod selection;

pub use comparator::SolutionComparator;
pub use crossover::Crossover;
pub use mutation::Mutation;
pub use selection::Selection;
