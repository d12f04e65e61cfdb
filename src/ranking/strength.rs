//! SPEA2 strength fitness and archive truncation.

use super::dominance::dominance;
use crate::error::{EvoError, EvoResult};
use crate::model::Population;
use std::cmp::Ordering;

/// Assigns SPEA2 fitness to every solution of `population`.
///
/// For each solution `i`:
///
/// - strength `S(i)`: number of solutions `i` dominates
/// - raw fitness `R(i)`: sum of `S(j)` over every `j` dominating `i`
/// - density `D(i) = 1 / (sigma_k + 2)` where `sigma_k` is the Euclidean
///   objective-space distance to the k-th nearest neighbour,
///   `k = floor(sqrt(n))`
///
/// The stored fitness is `R(i) + D(i)`; non-dominated solutions always have
/// fitness below 1.
///
/// # Complexity
///
/// O(n² * (m + log n))
///
/// # Errors
///
/// [`EvoError::EmptyPopulation`] if `population` is empty.
pub fn assign_strength_fitness(population: &mut Population) -> EvoResult<()> {
    let n = population.len();
    if n == 0 {
        return Err(EvoError::EmptyPopulation("strength fitness"));
    }

    let objectives = population.objectives();
    let mut strength = vec![0usize; n];
    let mut dominators: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            match dominance(objectives[i], objectives[j]) {
                Ordering::Less => {
                    strength[i] += 1;
                    dominators[j].push(i);
                }
                Ordering::Greater => {
                    strength[j] += 1;
                    dominators[i].push(j);
                }
                Ordering::Equal => {}
            }
        }
    }

    let distances = distance_matrix(&objectives);
    let k = (n as f64).sqrt().floor() as usize;
    let fitness: Vec<f64> = (0..n)
        .map(|i| {
            let raw: usize = dominators[i].iter().map(|&j| strength[j]).sum();
            let mut neighbours: Vec<f64> = (0..n)
                .filter(|&j| j != i)
                .map(|j| distances[i][j])
                .collect();
            neighbours.sort_by(f64::total_cmp);
            let sigma = if neighbours.is_empty() {
                0.0
            } else {
                neighbours[k.clamp(1, neighbours.len()) - 1]
            };
            raw as f64 + 1.0 / (sigma + 2.0)
        })
        .collect();

    for (solution, f) in population.iter_mut().zip(fitness) {
        solution.strength_fitness = Some(f);
    }
    Ok(())
}

/// SPEA2 environmental selection: reduces `population` to `archive_size`
/// members.
///
/// 1. Compute strength fitness for every member
/// 2. Keep every non-dominated member (fitness < 1)
/// 3. If that is too few, fill with the best remaining members by fitness
/// 4. If that is too many, repeatedly remove the member whose sorted
///    distance list to the other kept members is lexicographically smallest
///
/// # Errors
///
/// [`EvoError::EmptyPopulation`] if `population` is empty.
pub fn spea2_select(mut population: Population, archive_size: usize) -> EvoResult<Population> {
    assign_strength_fitness(&mut population)?;

    let fitness = |s: &crate::model::Solution| s.strength_fitness.unwrap_or(f64::INFINITY);
    let (mut archive, mut rest): (Vec<_>, Vec<_>) =
        population.into_iter().partition(|s| fitness(s) < 1.0);

    if archive.len() < archive_size {
        rest.sort_by(|a, b| fitness(a).total_cmp(&fitness(b)));
        let missing = archive_size - archive.len();
        archive.extend(rest.into_iter().take(missing));
    } else if archive.len() > archive_size {
        truncate_by_density(&mut archive, archive_size);
    }

    Ok(archive.into())
}

/// Removes the most crowded members of `archive` until `size` remain.
fn truncate_by_density(archive: &mut Vec<crate::model::Solution>, size: usize) {
    let objectives: Vec<&[f64]> = archive.iter().map(|s| s.objectives.as_slice()).collect();
    let distances = distance_matrix(&objectives);
    let mut alive: Vec<usize> = (0..archive.len()).collect();

    while alive.len() > size {
        let mut victim = 0;
        let mut victim_list: Option<Vec<f64>> = None;
        for (pos, &i) in alive.iter().enumerate() {
            let mut list: Vec<f64> = alive
                .iter()
                .filter(|&&j| j != i)
                .map(|&j| distances[i][j])
                .collect();
            list.sort_by(f64::total_cmp);
            let closer = match &victim_list {
                None => true,
                Some(best) => lexicographic_cmp(&list, best) == Ordering::Less,
            };
            if closer {
                victim = pos;
                victim_list = Some(list);
            }
        }
        alive.remove(victim);
    }

    let mut keep = vec![false; archive.len()];
    for &i in &alive {
        keep[i] = true;
    }
    let mut flags = keep.into_iter();
    archive.retain(|_| flags.next().unwrap_or(false));
}

fn lexicographic_cmp(a: &[f64], b: &[f64]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match x.total_cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

fn distance_matrix(objectives: &[&[f64]]) -> Vec<Vec<f64>> {
    let n = objectives.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = objectives[i]
                .iter()
                .zip(objectives[j])
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt();
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Solution, Variable};

    fn population(objs: &[[f64; 2]]) -> Population {
        objs.iter()
            .map(|o| {
                let mut s = Solution::new(vec![Variable::Real(o[0])], 2);
                s.objectives = o.to_vec();
                s
            })
            .collect()
    }

    #[test]
    fn test_non_dominated_fitness_below_one() {
        let mut pop = population(&[[1.0, 5.0], [3.0, 3.0], [5.0, 1.0], [4.0, 4.0], [6.0, 6.0]]);
        assign_strength_fitness(&mut pop).expect("non-empty");
        for s in pop.iter().take(3) {
            assert!(s.strength_fitness.expect("assigned") < 1.0);
        }
        // (4,4) is dominated by (3,3) which dominates 2 solutions
        let f = pop[3].strength_fitness.expect("assigned");
        assert!((2.0..3.0).contains(&f), "got {f}");
        // (6,6) is dominated by all four others
        assert!(pop[4].strength_fitness.expect("assigned") > f);
    }

    #[test]
    fn test_single_solution_density() {
        let mut pop = population(&[[1.0, 1.0]]);
        assign_strength_fitness(&mut pop).expect("non-empty");
        assert_eq!(pop[0].strength_fitness, Some(0.5));
    }

    #[test]
    fn test_empty_population() {
        let mut pop = Population::new();
        assert!(assign_strength_fitness(&mut pop).is_err());
        assert!(spea2_select(Population::new(), 3).is_err());
    }

    #[test]
    fn test_select_fills_with_dominated() {
        let pop = population(&[[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]]);
        let archive = spea2_select(pop, 3).expect("non-empty");
        assert_eq!(archive.len(), 3);
        assert!(archive.iter().all(|s| s.objectives != vec![4.0, 4.0]));
    }

    #[test]
    fn test_select_truncates_crowded_members() {
        let pop = population(&[[0.0, 10.0], [4.9, 5.1], [5.0, 5.0], [10.0, 0.0]]);
        let archive = spea2_select(pop, 3).expect("non-empty");
        assert_eq!(archive.len(), 3);
        // extremes survive; one of the two near-duplicates is removed
        assert!(archive.iter().any(|s| s.objectives == vec![0.0, 10.0]));
        assert!(archive.iter().any(|s| s.objectives == vec![10.0, 0.0]));
    }

    #[test]
    fn test_select_exact_size_keeps_front() {
        let pop = population(&[[1.0, 3.0], [3.0, 1.0], [4.0, 4.0]]);
        let archive = spea2_select(pop, 2).expect("non-empty");
        assert_eq!(archive.len(), 2);
        assert!(archive.iter().all(|s| s.objectives != vec![4.0, 4.0]));
    }
}
