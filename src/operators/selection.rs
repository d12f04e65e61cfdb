//! Parent selection strategies.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::comparator::SolutionComparator;
use crate::error::{EvoError, EvoResult};
use crate::model::Population;
use crate::random::RandomSource;
use std::cmp::Ordering;

/// Selection strategy for choosing parents.
///
/// Selection never modifies the population it draws from.
///
/// # Examples
///
/// ```
/// use u_evo::operators::{Selection, SolutionComparator};
///
/// // NSGA-II mating selection
/// let sel = Selection::BinaryTournament(SolutionComparator::RankCrowding);
///
/// // Stronger pressure on a single objective
/// let sel = Selection::Tournament { size: 4, comparator: SolutionComparator::Objective(0) };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// Draw two solutions uniformly (with replacement) and keep the better
    /// one under the comparator. Ties are broken by a fair coin flip.
    BinaryTournament(SolutionComparator),

    /// Draw `size` solutions uniformly (with replacement) and keep the best.
    ///
    /// Ties keep the earliest draw.
    Tournament {
        /// Number of contestants (at least 1).
        size: usize,
        /// Ordering used to pick the winner.
        comparator: SolutionComparator,
    },

    /// Uniform random draw. Used by evolution strategies.
    Random,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::BinaryTournament(SolutionComparator::default())
    }
}

impl Selection {
    /// k-tournament with the default size of 2.
    pub fn tournament(comparator: SolutionComparator) -> Self {
        Selection::Tournament {
            size: 2,
            comparator,
        }
    }

    /// Checks operator parameters.
    pub fn validate(&self) -> EvoResult<()> {
        if let Selection::Tournament { size: 0, .. } = self {
            return Err(EvoError::Configuration(
                "tournament size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Selects a parent and returns its index in `population`.
    ///
    /// # Errors
    ///
    /// [`EvoError::EmptyPopulation`] if `population` is empty.
    pub fn select(&self, population: &Population, rng: &mut RandomSource) -> EvoResult<usize> {
        let n = population.len();
        if n == 0 {
            return Err(EvoError::EmptyPopulation("selection"));
        }

        let index = match *self {
            Selection::BinaryTournament(comparator) => {
                let i = rng.next_index(n);
                let j = rng.next_index(n);
                match comparator.compare(&population[i], &population[j]) {
                    Ordering::Less => i,
                    Ordering::Greater => j,
                    Ordering::Equal => {
                        if rng.next_bool() {
                            i
                        } else {
                            j
                        }
                    }
                }
            }
            Selection::Tournament { size, comparator } => {
                let mut best = rng.next_index(n);
                for _ in 1..size.max(1) {
                    let idx = rng.next_index(n);
                    if comparator.compare(&population[idx], &population[best]) == Ordering::Less {
                        best = idx;
                    }
                }
                best
            }
            Selection::Random => rng.next_index(n),
        };
        Ok(index)
    }

    /// Selects a parent and returns a copy of it as a one-member population.
    ///
    /// # Errors
    ///
    /// [`EvoError::EmptyPopulation`] if `population` is empty.
    pub fn execute(&self, population: &Population, rng: &mut RandomSource) -> EvoResult<Population> {
        let index = self.select(population, rng)?;
        Ok(vec![population[index].clone()].into())
    }
}
