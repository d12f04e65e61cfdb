//! Pareto ranking and diversity estimation.
//!
//! Domain-agnostic building blocks for elitist multi-objective selection:
//!
//! - [`dominance`]: Pareto dominance comparison (minimization)
//! - [`non_dominated_sort`] / [`assign_ranks`]: fast non-dominated sorting
//! - [`crowding_distance`] / [`rank_and_crowd`]: crowding distance per front
//! - [`assign_strength_fitness`] / [`spea2_select`]: SPEA2 strength fitness
//!   and archive truncation
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II",
//!   IEEE Transactions on Evolutionary Computation, 6(2), 182-197
//! - Zitzler, Laumanns & Thiele (2001), "SPEA2: Improving the Strength Pareto
//!   Evolutionary Algorithm", TIK-Report 103

mod crowding;
mod dominance;
mod sorting;
mod strength;

pub use crowding::{
    assign_crowding_distance, crowding_distance, nsga2_truncate, rank_and_crowd, rank_crowding_cmp,
};
pub use dominance::{dominance, dominates, epsilon_dominance};
pub use sorting::{assign_ranks, non_dominated_sort, NondominatedSortResult};
pub use strength::{assign_strength_fitness, spea2_select};
