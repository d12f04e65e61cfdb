//! Crowding distance and NSGA-II survivor selection.

use super::sorting::assign_ranks;
use crate::error::EvoResult;
use crate::model::{Population, Solution};
use log::trace;
use std::cmp::Ordering;

/// Crowding distance assignment for diversity preservation.
///
/// Computes the crowding distance for each solution of a single front,
/// measuring how isolated it is in objective space. Higher distance means
/// more isolated (more valuable for diversity).
///
/// Fronts of one or two solutions get `f64::INFINITY` for every member.
/// Otherwise, per objective, the minimum and maximum solutions receive
/// infinity and interior solutions accumulate
/// `(next - prev) / (max - min)`. An objective with zero range contributes
/// nothing.
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use u_evo::ranking::crowding_distance;
///
/// let objectives = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
/// ];
///
/// let distances = crowding_distance(&objectives);
///
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// assert_eq!(distances[1], 2.0);
/// ```
pub fn crowding_distance<O: AsRef<[f64]>>(objectives: &[O]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives
        .iter()
        .map(|o| o.as_ref().len())
        .min()
        .unwrap_or(0);
    let value = |i: usize, k: usize| objectives[i].as_ref()[k];
    let mut distances = vec![0.0f64; n];
    let mut indices: Vec<usize> = (0..n).collect();

    for k in 0..m {
        indices.sort_by(|&a, &b| value(a, k).total_cmp(&value(b, k)));

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let range = value(indices[n - 1], k) - value(indices[0], k);
        if range > 0.0 {
            for i in 1..(n - 1) {
                let prev = value(indices[i - 1], k);
                let next = value(indices[i + 1], k);
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

/// Computes crowding distances for the solutions at `front` (indices into
/// `population`) and stores them on each solution.
pub fn assign_crowding_distance(population: &mut Population, front: &[usize]) {
    let objectives: Vec<&[f64]> = front
        .iter()
        .map(|&i| population[i].objectives.as_slice())
        .collect();
    let distances = crowding_distance(&objectives);
    for (&i, d) in front.iter().zip(distances) {
        population[i].crowding_distance = Some(d);
    }
}

/// Assigns rank and crowding distance to every solution of `population`.
///
/// Returns the fronts as index lists.
///
/// # Errors
///
/// [`EmptyPopulation`](crate::EvoError::EmptyPopulation) if `population` is empty.
pub fn rank_and_crowd(population: &mut Population) -> EvoResult<Vec<Vec<usize>>> {
    let fronts = assign_ranks(population)?;
    for front in &fronts {
        assign_crowding_distance(population, front);
    }
    Ok(fronts)
}

/// NSGA-II ordering: ascending rank, then descending crowding distance.
///
/// Missing ranks sort last; a missing crowding distance counts as zero.
pub fn rank_crowding_cmp(a: &Solution, b: &Solution) -> Ordering {
    let rank_a = a.rank.unwrap_or(usize::MAX);
    let rank_b = b.rank.unwrap_or(usize::MAX);
    rank_a.cmp(&rank_b).then_with(|| {
        let da = a.crowding_distance.unwrap_or(0.0);
        let db = b.crowding_distance.unwrap_or(0.0);
        db.total_cmp(&da)
    })
}

/// Truncates `population` to its best `size` members by NSGA-II ordering.
///
/// Ranks and crowding distances are computed over the whole input first, so
/// survivors keep annotations consistent with the merged population.
///
/// # Errors
///
/// [`EmptyPopulation`](crate::EvoError::EmptyPopulation) if `population` is empty.
pub fn nsga2_truncate(mut population: Population, size: usize) -> EvoResult<Population> {
    let fronts = rank_and_crowd(&mut population)?;
    trace!(
        "nsga2 truncation: {} solutions in {} fronts -> {}",
        population.len(),
        fronts.len(),
        size
    );
    population.sort_by(rank_crowding_cmp);
    population.truncate(size);
    Ok(population)
}
