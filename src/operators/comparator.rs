//! Solution orderings used by selection and reduction.

use crate::model::Solution;
use crate::ranking::{epsilon_dominance, rank_crowding_cmp};
use std::cmp::Ordering;

/// How two solutions are compared. `Less` means "left is better".
///
/// All objectives are minimized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolutionComparator {
    /// Ascending value of objective `i` (single-objective compare).
    ///
    /// A solution lacking objective `i` compares as `+inf`.
    Objective(usize),

    /// Pareto dominance. Not a total order: mutually non-dominated
    /// solutions compare `Equal`.
    Dominance,

    /// Pareto dominance where differences within `epsilon` are ties.
    EpsilonDominance(f64),

    /// Ascending rank, then descending crowding distance (NSGA-II).
    RankCrowding,

    /// Ascending SPEA2 strength fitness; missing fitness sorts last.
    StrengthFitness,
}

impl Default for SolutionComparator {
    fn default() -> Self {
        SolutionComparator::Dominance
    }
}

impl SolutionComparator {
    /// Compares two solutions.
    pub fn compare(&self, a: &Solution, b: &Solution) -> Ordering {
        match *self {
            SolutionComparator::Objective(i) => {
                let va = a.objective(i).unwrap_or(f64::INFINITY);
                let vb = b.objective(i).unwrap_or(f64::INFINITY);
                va.total_cmp(&vb)
            }
            SolutionComparator::Dominance => epsilon_dominance(&a.objectives, &b.objectives, 0.0),
            SolutionComparator::EpsilonDominance(epsilon) => {
                epsilon_dominance(&a.objectives, &b.objectives, epsilon)
            }
            SolutionComparator::RankCrowding => rank_crowding_cmp(a, b),
            SolutionComparator::StrengthFitness => {
                let fa = a.strength_fitness.unwrap_or(f64::INFINITY);
                let fb = b.strength_fitness.unwrap_or(f64::INFINITY);
                fa.total_cmp(&fb)
            }
        }
    }

    /// Whether [`compare`](Self::compare) is a total order and can drive a sort.
    pub fn is_total_order(&self) -> bool {
        !matches!(
            self,
            SolutionComparator::Dominance | SolutionComparator::EpsilonDominance(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Variable;

    fn with_objectives(objs: &[f64]) -> Solution {
        let mut s = Solution::new(vec![Variable::Real(0.0)], objs.len());
        s.objectives = objs.to_vec();
        s
    }

    #[test]
    fn test_objective_compare() {
        let a = with_objectives(&[1.0, 9.0]);
        let b = with_objectives(&[2.0, 0.0]);
        assert_eq!(SolutionComparator::Objective(0).compare(&a, &b), Ordering::Less);
        assert_eq!(SolutionComparator::Objective(1).compare(&a, &b), Ordering::Greater);
        assert_eq!(SolutionComparator::Objective(5).compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_dominance_compare() {
        let a = with_objectives(&[1.0, 1.0]);
        let b = with_objectives(&[2.0, 1.0]);
        let c = with_objectives(&[0.0, 3.0]);
        assert_eq!(SolutionComparator::Dominance.compare(&a, &b), Ordering::Less);
        assert_eq!(SolutionComparator::Dominance.compare(&a, &c), Ordering::Equal);
        assert_eq!(
            SolutionComparator::EpsilonDominance(2.0).compare(&a, &c),
            Ordering::Equal
        );
    }

    #[test]
    fn test_strength_fitness_compare() {
        let mut a = with_objectives(&[0.0]);
        let mut b = with_objectives(&[0.0]);
        a.strength_fitness = Some(0.3);
        b.strength_fitness = None;
        assert_eq!(SolutionComparator::StrengthFitness.compare(&a, &b), Ordering::Less);
        b.strength_fitness = Some(0.1);
        assert_eq!(SolutionComparator::StrengthFitness.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_total_order_flags() {
        assert!(SolutionComparator::Objective(0).is_total_order());
        assert!(SolutionComparator::RankCrowding.is_total_order());
        assert!(!SolutionComparator::Dominance.is_total_order());
    }
}
