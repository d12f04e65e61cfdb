//! Environmental selection: trimming a population down to its survivors.
//!
//! [`Reduction`] removes the weakest members of a population. How many are
//! removed is set by [`ReductionMode`]; what "weakest" means is set by
//! [`ReductionOrder`].

use crate::error::{check_probability, EvoError, EvoResult};
use crate::model::{Population, Solution};
use crate::operators::SolutionComparator;
use crate::ranking::{dominance, rank_and_crowd, rank_crowding_cmp};
use log::trace;
use std::cmp::Ordering;

/// How many solutions a reduction removes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReductionMode {
    /// Remove the whole population (it is replaced by offspring).
    Generational,
    /// Remove a single weakest solution per call.
    SteadyState,
    /// Remove `round(len * d)` weakest solutions, `d` in `[0, 1]`.
    Fraction(f64),
}

/// Ordering used to decide which solutions are weakest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReductionOrder {
    /// Pareto dominance. Solutions are ordered by how many others dominate
    /// them, which is consistent with dominance and total.
    Dominance,
    /// NSGA-II rank, then crowding distance (computed on the input).
    RankCrowding,
    /// Any total-order comparator.
    Comparator(SolutionComparator),
}

impl Default for ReductionOrder {
    fn default() -> Self {
        ReductionOrder::Dominance
    }
}

/// Removes the weakest solutions of a population.
///
/// # Examples
///
/// ```
/// use u_evo::operators::SolutionComparator;
/// use u_evo::reduction::{Reduction, ReductionOrder};
///
/// let steady = Reduction::steady_state(ReductionOrder::Dominance).unwrap();
/// assert_eq!(steady.reduction_size(10), 1);
///
/// let tenth = Reduction::fraction(0.1, ReductionOrder::RankCrowding).unwrap();
/// assert_eq!(tenth.reduction_size(25), 3);
///
/// assert!(Reduction::fraction(1.5, ReductionOrder::Dominance).is_err());
///
/// // dominance is a partial order and cannot rank a whole population
/// let partial = ReductionOrder::Comparator(SolutionComparator::Dominance);
/// assert!(Reduction::generational(partial).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reduction {
    mode: ReductionMode,
    order: ReductionOrder,
}

impl Reduction {
    /// Generational reduction: every solution is removed.
    ///
    /// # Errors
    ///
    /// [`EvoError::Configuration`] if `order` is a comparator that is not a
    /// total order.
    pub fn generational(order: ReductionOrder) -> EvoResult<Self> {
        check_order(order)?;
        Ok(Self {
            mode: ReductionMode::Generational,
            order,
        })
    }

    /// Steady-state reduction: one solution is removed per call.
    ///
    /// # Errors
    ///
    /// [`EvoError::Configuration`] if `order` is a comparator that is not a
    /// total order.
    pub fn steady_state(order: ReductionOrder) -> EvoResult<Self> {
        check_order(order)?;
        Ok(Self {
            mode: ReductionMode::SteadyState,
            order,
        })
    }

    /// Fractional reduction.
    ///
    /// # Errors
    ///
    /// [`EvoError::Configuration`] if `fraction` is outside `[0, 1]` or
    /// `order` is a comparator that is not a total order.
    pub fn fraction(fraction: f64, order: ReductionOrder) -> EvoResult<Self> {
        check_probability("reduction fraction", fraction)?;
        check_order(order)?;
        Ok(Self {
            mode: ReductionMode::Fraction(fraction),
            order,
        })
    }

    /// Removal mode.
    pub fn mode(&self) -> ReductionMode {
        self.mode
    }

    /// Weakness ordering.
    pub fn order(&self) -> ReductionOrder {
        self.order
    }

    /// Number of solutions removed from a population of `len`.
    pub fn reduction_size(&self, len: usize) -> usize {
        match self.mode {
            ReductionMode::Generational => len,
            ReductionMode::SteadyState => len.min(1),
            ReductionMode::Fraction(d) => ((len as f64 * d).round() as usize).min(len),
        }
    }

    /// Returns the survivors, best first.
    ///
    /// The result has exactly `len - reduction_size(len)` members.
    ///
    /// # Errors
    ///
    /// [`EvoError::EmptyPopulation`] if `population` is empty.
    pub fn execute(&self, mut population: Population) -> EvoResult<Population> {
        if population.is_empty() {
            return Err(EvoError::EmptyPopulation("reduction"));
        }
        let removed = self.reduction_size(population.len());
        sort_best_first(&mut population, self.order)?;
        population.remove_last(removed);
        trace!("reduction removed {removed}, {} remain", population.len());
        Ok(population)
    }
}

/// Sorts `population` best first under `order`.
///
/// # Errors
///
/// [`EvoError::Configuration`] for a comparator that is not a total order.
pub fn sort_best_first(population: &mut Population, order: ReductionOrder) -> EvoResult<()> {
    match order {
        ReductionOrder::Dominance => {
            let counts = domination_counts(population);
            let mut keyed: Vec<(usize, Solution)> =
                counts.into_iter().zip(std::mem::take(population)).collect();
            keyed.sort_by_key(|(count, _)| *count);
            *population = keyed.into_iter().map(|(_, s)| s).collect();
        }
        ReductionOrder::RankCrowding => {
            if !population.is_empty() {
                rank_and_crowd(population)?;
            }
            population.sort_by(rank_crowding_cmp);
        }
        ReductionOrder::Comparator(comparator) => {
            check_order(order)?;
            population.sort_by(|a, b| comparator.compare(a, b));
        }
    }
    Ok(())
}

/// Rejects comparator orders that cannot drive a sort.
fn check_order(order: ReductionOrder) -> EvoResult<()> {
    match order {
        ReductionOrder::Comparator(comparator) if !comparator.is_total_order() => {
            Err(EvoError::Configuration(format!(
                "{comparator:?} is not a total order; use ReductionOrder::Dominance"
            )))
        }
        _ => Ok(()),
    }
}

/// Number of members dominating each solution.
fn domination_counts(population: &Population) -> Vec<usize> {
    let objectives = population.objectives();
    objectives
        .iter()
        .map(|candidate| {
            objectives
                .iter()
                .filter(|other| dominance(other, candidate) == Ordering::Less)
                .count()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Variable;

    fn population(objs: &[&[f64]]) -> Population {
        objs.iter()
            .map(|o| {
                let mut s = Solution::new(vec![Variable::Real(o[0])], o.len());
                s.objectives = o.to_vec();
                s
            })
            .collect()
    }

    #[test]
    fn test_reduction_sizes() {
        let order = ReductionOrder::Dominance;
        let all = Reduction::generational(order).expect("total order");
        assert_eq!(all.reduction_size(8), 8);
        let one = Reduction::steady_state(order).expect("total order");
        assert_eq!(one.reduction_size(8), 1);
        assert_eq!(one.reduction_size(0), 0);
        let half = Reduction::fraction(0.5, order).expect("valid fraction");
        assert_eq!(half.reduction_size(7), 4); // round(3.5)
        let none = Reduction::fraction(0.0, order).expect("valid fraction");
        assert_eq!(none.reduction_size(7), 0);
    }

    #[test]
    fn test_default_order_is_dominance() {
        assert_eq!(ReductionOrder::default(), ReductionOrder::Dominance);
    }

    #[test]
    fn test_fraction_out_of_range() {
        assert!(Reduction::fraction(-0.1, ReductionOrder::Dominance).is_err());
        assert!(Reduction::fraction(1.1, ReductionOrder::Dominance).is_err());
        assert!(Reduction::fraction(1.0, ReductionOrder::Dominance).is_ok());
    }

    #[test]
    fn test_size_law() {
        let pop = population(&[&[1.0], &[2.0], &[3.0], &[4.0], &[5.0]]);
        for reduction in [
            Reduction::generational(ReductionOrder::Dominance).expect("valid"),
            Reduction::steady_state(ReductionOrder::Dominance).expect("valid"),
            Reduction::fraction(0.4, ReductionOrder::RankCrowding).expect("valid"),
            Reduction::fraction(1.0, ReductionOrder::Comparator(SolutionComparator::Objective(0)))
                .expect("valid"),
        ] {
            let n = pop.len();
            let survivors = reduction.execute(pop.clone()).expect("non-empty");
            assert_eq!(survivors.len(), n - reduction.reduction_size(n));
        }
    }

    #[test]
    fn test_steady_state_removes_weakest() {
        let pop = population(&[&[3.0, 3.0], &[1.0, 1.0], &[5.0, 5.0], &[2.0, 2.0]]);
        let survivors = Reduction::steady_state(ReductionOrder::Dominance)
            .expect("valid")
            .execute(pop)
            .expect("non-empty");
        assert_eq!(survivors.len(), 3);
        assert!(survivors.iter().all(|s| s.objectives != vec![5.0, 5.0]));
        assert_eq!(survivors[0].objectives, vec![1.0, 1.0]);
    }

    #[test]
    fn test_rank_crowding_fraction() {
        let pop = population(&[
            &[0.0, 10.0],
            &[1.0, 9.0],
            &[5.0, 5.0],
            &[10.0, 0.0],
            &[11.0, 11.0],
        ]);
        let survivors = Reduction::fraction(0.4, ReductionOrder::RankCrowding)
            .expect("valid")
            .execute(pop)
            .expect("non-empty");
        assert_eq!(survivors.len(), 3);
        assert!(survivors.iter().all(|s| s.rank == Some(0)));
        assert!(survivors.iter().all(|s| s.objectives != vec![1.0, 9.0]));
    }

    #[test]
    fn test_non_total_comparator_rejected_at_construction() {
        for comparator in [
            SolutionComparator::Dominance,
            SolutionComparator::EpsilonDominance(0.1),
        ] {
            let order = ReductionOrder::Comparator(comparator);
            assert!(matches!(Reduction::generational(order), Err(EvoError::Configuration(_))));
            assert!(matches!(Reduction::steady_state(order), Err(EvoError::Configuration(_))));
            assert!(matches!(Reduction::fraction(0.5, order), Err(EvoError::Configuration(_))));
        }
        let total = ReductionOrder::Comparator(SolutionComparator::Objective(0));
        assert!(Reduction::steady_state(total).is_ok());
    }

    #[test]
    fn test_sort_best_first_rejects_non_total_comparator() {
        let mut pop = population(&[&[1.0], &[2.0]]);
        let order = ReductionOrder::Comparator(SolutionComparator::Dominance);
        assert!(matches!(sort_best_first(&mut pop, order), Err(EvoError::Configuration(_))));
    }

    #[test]
    fn test_empty_population() {
        let reduction = Reduction::steady_state(ReductionOrder::Dominance).expect("valid");
        assert_eq!(
            reduction.execute(Population::new()),
            Err(EvoError::EmptyPopulation("reduction"))
        );
    }
}
