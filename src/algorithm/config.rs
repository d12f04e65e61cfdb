//! Algorithm configuration.
//!
//! [`AlgorithmConfig`] holds every parameter of the generational loop.

use crate::error::{EvoError, EvoResult};
use crate::operators::{Crossover, Mutation, Selection, SolutionComparator};

/// Survivor-selection scheme of the generational loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Survivors are the best solutions by objective 0.
    SimpleGa,

    /// NSGA-II: ranks and crowding distances on the merged population,
    /// truncation by rank then crowding distance.
    Nsga2,

    /// SPEA2: a separate archive of `archive_size` members, refreshed by
    /// strength fitness and density truncation. Mating draws from the
    /// archive.
    Spea2 {
        /// Archive capacity.
        archive_size: usize,
    },

    /// `(mu + lambda)` when elitist, `(mu, lambda)` otherwise. Survivors
    /// are the best solutions by objective 0.
    EvolutionStrategy,
}

impl Default for Variant {
    fn default() -> Self {
        Variant::SimpleGa
    }
}

/// Configuration for [`Algorithm`](super::Algorithm).
///
/// # Defaults
///
/// ```
/// use u_evo::AlgorithmConfig;
///
/// let config = AlgorithmConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 250);
/// assert!(config.elitism);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evo::operators::{Crossover, Mutation, Selection, SolutionComparator};
/// use u_evo::AlgorithmConfig;
///
/// let config = AlgorithmConfig::nsga2()
///     .with_population_size(40)
///     .with_crossover(Crossover::sbx(0.8, 15.0))
///     .with_mutation(Mutation::polynomial(0.05, 20.0))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmConfig {
    /// Number of solutions kept between generations (`mu`).
    pub population_size: usize,

    /// Number of generations [`execute`](super::Algorithm::execute) runs.
    pub max_generations: usize,

    /// Whether parents compete with offspring for survival.
    ///
    /// When `false` the offspring replace the population entirely.
    pub elitism: bool,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Recombination operator. `None` makes every child a copy of one
    /// parent (mutation only).
    pub crossover: Option<Crossover>,

    /// Mutation operator applied to every child.
    pub mutation: Mutation,

    /// Survivor-selection scheme.
    pub variant: Variant,

    /// Children produced per generation (`lambda`).
    ///
    /// `None` produces `population_size` children.
    pub offspring_size: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a seed, which is reported in the run result.
    pub seed: Option<u64>,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 250,
            elitism: true,
            selection: Selection::BinaryTournament(SolutionComparator::Dominance),
            crossover: Some(Crossover::sbx(0.9, 20.0)),
            mutation: Mutation::polynomial(0.1, 20.0),
            variant: Variant::SimpleGa,
            offspring_size: None,
            seed: None,
        }
    }
}

impl AlgorithmConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Enables or disables elitism.
    pub fn with_elitism(mut self, elitism: bool) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = Some(crossover);
        self
    }

    /// Disables crossover.
    pub fn without_crossover(mut self) -> Self {
        self.crossover = None;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the survivor-selection scheme.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the number of children per generation.
    pub fn with_offspring_size(mut self, n: usize) -> Self {
        self.offspring_size = Some(n);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Convenience builder for a k-tournament on `comparator`.
    pub fn with_tournament_size(self, size: usize, comparator: SolutionComparator) -> Self {
        self.with_selection(Selection::Tournament { size, comparator })
    }

    /// Children produced per generation.
    pub fn offspring_count(&self) -> usize {
        self.offspring_size.unwrap_or(self.population_size)
    }

    /// Single-objective elitist GA with binary tournament on objective 0.
    pub fn simple_ga() -> Self {
        Self {
            selection: Selection::BinaryTournament(SolutionComparator::Objective(0)),
            ..Self::default()
        }
    }

    /// NSGA-II with binary tournament on rank and crowding distance.
    pub fn nsga2() -> Self {
        Self {
            selection: Selection::BinaryTournament(SolutionComparator::RankCrowding),
            variant: Variant::Nsga2,
            ..Self::default()
        }
    }

    /// SPEA2 with an archive of `archive_size` members.
    pub fn spea2(archive_size: usize) -> Self {
        Self {
            selection: Selection::BinaryTournament(SolutionComparator::StrengthFitness),
            variant: Variant::Spea2 { archive_size },
            ..Self::default()
        }
    }

    /// `(mu + lambda)` evolution strategy driven by mutation alone.
    ///
    /// Call [`with_elitism(false)`](Self::with_elitism) for `(mu, lambda)`.
    pub fn evolution_strategy(mu: usize, lambda: usize) -> Self {
        Self {
            population_size: mu,
            offspring_size: Some(lambda),
            selection: Selection::Random,
            crossover: None,
            mutation: Mutation::polynomial(1.0, 20.0),
            variant: Variant::EvolutionStrategy,
            ..Self::default()
        }
    }

    /// Validates the configuration and every operator in it.
    ///
    /// # Errors
    ///
    /// [`EvoError::Configuration`] naming the first invalid parameter.
    pub fn validate(&self) -> EvoResult<()> {
        if self.population_size == 0 {
            return Err(EvoError::Configuration(
                "population_size must be at least 1".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(EvoError::Configuration(
                "max_generations must be at least 1".into(),
            ));
        }
        self.selection.validate()?;
        if let Some(crossover) = &self.crossover {
            crossover.validate()?;
        }
        self.mutation.validate()?;

        let lambda = self.offspring_count();
        if lambda == 0 {
            return Err(EvoError::Configuration(
                "offspring_size must be at least 1".into(),
            ));
        }
        match self.variant {
            Variant::EvolutionStrategy => {
                if !self.elitism && lambda < self.population_size {
                    return Err(EvoError::Configuration(format!(
                        "comma strategy needs lambda >= mu, got lambda={lambda}, mu={}",
                        self.population_size
                    )));
                }
            }
            Variant::Spea2 { archive_size: 0 } => {
                return Err(EvoError::Configuration(
                    "archive_size must be at least 1".into(),
                ));
            }
            _ => {
                if !self.elitism && lambda != self.population_size {
                    return Err(EvoError::Configuration(format!(
                        "generational replacement needs offspring_size == population_size, got {lambda} != {}",
                        self.population_size
                    )));
                }
            }
        }
        Ok(())
    }
}
