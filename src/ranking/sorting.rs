//! Fast non-dominated sorting.

use super::dominance::dominance;
use crate::error::{EvoError, EvoResult};
use crate::model::Population;
use std::cmp::Ordering;

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Fast non-dominated sorting.
///
/// Partitions solutions into fronts `F0, F1, ...` where every member of
/// `Fi` (i > 0) is dominated by at least one member of `F(i-1)` and no two
/// members of the same front dominate each other. All objectives are
/// **minimized**.
///
/// # Algorithm (Deb et al., 2002)
///
/// 1. For every pair, record who dominates whom: each solution gets a
///    domination count and the set of solutions it dominates
/// 2. Solutions with a zero count form front 0
/// 3. Peel: for each member of the current front, decrement the counts of
///    its dominated set; those reaching zero form the next front
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of solutions
///
/// An empty input yields an empty result.
///
/// # Example
///
/// ```
/// use u_evo::ranking::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],  // A
///     vec![3.0, 3.0],  // B
///     vec![5.0, 1.0],  // C
///     vec![4.0, 4.0],  // D, dominated by B
/// ];
///
/// let result = non_dominated_sort(&objectives);
///
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// assert_eq!(result.fronts, vec![vec![0, 1, 2], vec![3]]);
/// ```
pub fn non_dominated_sort<O: AsRef<[f64]>>(objectives: &[O]) -> NondominatedSortResult {
    let n = objectives.len();
    if n == 0 {
        return NondominatedSortResult::default();
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_set: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            match dominance(objectives[i].as_ref(), objectives[j].as_ref()) {
                Ordering::Less => {
                    dominated_set[i].push(j);
                    domination_count[j] += 1;
                }
                Ordering::Greater => {
                    dominated_set[j].push(i);
                    domination_count[i] += 1;
                }
                Ordering::Equal => {}
            }
        }
    }

    let mut ranks = vec![0usize; n];
    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut fronts = Vec::new();

    while !current.is_empty() {
        let rank = fronts.len();
        let mut next = Vec::new();
        for &i in &current {
            ranks[i] = rank;
            for &j in &dominated_set[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next.push(j);
                }
            }
        }
        fronts.push(current);
        current = next;
    }

    NondominatedSortResult { ranks, fronts }
}

/// Sorts `population` into fronts and records each solution's rank.
///
/// Returns the fronts as index lists into `population`.
///
/// # Errors
///
/// [`EvoError::EmptyPopulation`] if `population` is empty.
pub fn assign_ranks(population: &mut Population) -> EvoResult<Vec<Vec<usize>>> {
    if population.is_empty() {
        return Err(EvoError::EmptyPopulation("non-dominated sort"));
    }

    let result = non_dominated_sort(&population.objectives());
    for (solution, &rank) in population.iter_mut().zip(&result.ranks) {
        solution.rank = Some(rank);
    }
    Ok(result.fronts)
}
