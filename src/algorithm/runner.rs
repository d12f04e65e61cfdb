//! Generational loop execution.
//!
//! [`Algorithm`] drives the evolutionary process as a state machine:
//! `Created → Initialized → Stepping → Terminated`.
//!
//! Each [`step`](Algorithm::step) runs one generation: selection →
//! crossover → mutation → evaluation → survivor selection.

use super::config::{AlgorithmConfig, Variant};
use crate::error::{EvoError, EvoResult};
use crate::model::{Population, Problem, Solution};
use crate::operators::SolutionComparator;
use crate::random::RandomSource;
use crate::ranking::{non_dominated_sort, nsga2_truncate, rank_and_crowd, spea2_select};
use crate::reduction::{sort_best_first, ReductionOrder};
use log::{debug, info};

/// Lifecycle of an [`Algorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmState {
    /// Constructed; no population yet.
    Created,
    /// Initial population evaluated.
    Initialized,
    /// At least one generation completed.
    Stepping,
    /// [`execute`](Algorithm::execute) finished; no further steps.
    Terminated,
}

impl AlgorithmState {
    /// Lower-case state name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmState::Created => "created",
            AlgorithmState::Initialized => "initialized",
            AlgorithmState::Stepping => "stepping",
            AlgorithmState::Terminated => "terminated",
        }
    }
}

/// Summary of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Generation index; 0 is the initial population.
    pub generation: usize,

    /// Per-objective minimum over the current population (the archive for
    /// SPEA2).
    pub best_objectives: Vec<f64>,

    /// Number of mutually non-dominated solutions in that population.
    pub first_front_size: usize,
}

/// Result of [`Algorithm::execute`].
#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    /// Final population, or the non-dominated archive members for SPEA2.
    pub population: Population,

    /// Number of generations executed.
    pub generations: usize,

    /// Seed the run used. Passing it back through
    /// [`AlgorithmConfig::with_seed`] replays the run.
    pub seed: u64,

    /// One entry per generation, starting with generation 0.
    pub history: Vec<GenerationStats>,
}

impl AlgorithmResult {
    /// Solution with the lowest value of `objective`.
    pub fn best(&self, objective: usize) -> Option<&Solution> {
        self.population.best(objective)
    }
}

/// Generational evolutionary algorithm over a borrowed [`Problem`].
///
/// # Usage
///
/// ```
/// use u_evo::{Algorithm, AlgorithmConfig, Bounds, Problem, Solution};
///
/// struct Sphere(Bounds);
///
/// impl Problem for Sphere {
///     fn bounds(&self) -> &Bounds {
///         &self.0
///     }
///     fn number_of_objectives(&self) -> usize {
///         1
///     }
///     fn evaluate(&self, s: &mut Solution) {
///         s.objectives[0] = s.variables.iter().map(|v| v.as_f64().powi(2)).sum();
///     }
/// }
///
/// let problem = Sphere(Bounds::uniform(3, -5.0, 5.0));
/// let config = AlgorithmConfig::simple_ga()
///     .with_population_size(20)
///     .with_max_generations(30)
///     .with_seed(42);
///
/// let mut algorithm = Algorithm::new(&problem, config).unwrap();
/// let result = algorithm.execute().unwrap();
/// assert_eq!(result.generations, 30);
/// assert_eq!(result.history.len(), 31);
/// ```
#[derive(Debug)]
pub struct Algorithm<'a, P: Problem + ?Sized> {
    problem: &'a P,
    config: AlgorithmConfig,
    rng: RandomSource,
    population: Population,
    archive: Population,
    state: AlgorithmState,
    generation: usize,
    history: Vec<GenerationStats>,
}

impl<'a, P: Problem + ?Sized> Algorithm<'a, P> {
    /// Creates an algorithm in the `Created` state.
    ///
    /// # Errors
    ///
    /// [`EvoError::Configuration`] if `config` does not validate.
    pub fn new(problem: &'a P, config: AlgorithmConfig) -> EvoResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => RandomSource::new(seed),
            None => RandomSource::from_entropy(),
        };
        Ok(Self {
            problem,
            rng,
            population: Population::new(),
            archive: Population::new(),
            state: AlgorithmState::Created,
            generation: 0,
            history: Vec::new(),
            config,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AlgorithmState {
        self.state
    }

    /// Completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// SPEA2 archive. Empty for the other variants.
    pub fn archive(&self) -> &Population {
        &self.archive
    }

    /// Configuration in use, including operator iteration counters.
    pub fn config(&self) -> &AlgorithmConfig {
        &self.config
    }

    /// Seed of the random stream.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Statistics recorded so far.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Creates and evaluates a random initial population.
    ///
    /// # Errors
    ///
    /// [`EvoError::InvalidState`] unless the algorithm is `Created`.
    pub fn initialize(&mut self) -> EvoResult<()> {
        self.expect_state(AlgorithmState::Created)?;
        let population = self
            .problem
            .new_random_set_of_solutions(self.config.population_size, &mut self.rng);
        self.initialize_with(population)
    }

    /// Starts from a caller-supplied population, which is evaluated here.
    ///
    /// # Errors
    ///
    /// - [`EvoError::InvalidState`] unless the algorithm is `Created`
    /// - [`EvoError::EmptyPopulation`] if `population` is empty
    pub fn initialize_with(&mut self, mut population: Population) -> EvoResult<()> {
        self.expect_state(AlgorithmState::Created)?;
        if population.is_empty() {
            return Err(EvoError::EmptyPopulation("seed population"));
        }

        self.problem.evaluate_population(&mut population);
        match self.config.variant {
            Variant::Nsga2 => {
                rank_and_crowd(&mut population)?;
            }
            Variant::Spea2 { archive_size } => {
                self.archive = spea2_select(population.clone(), archive_size)?;
            }
            Variant::SimpleGa | Variant::EvolutionStrategy => {}
        }
        self.population = population;
        self.generation = 0;
        self.history.clear();
        self.record();

        self.state = AlgorithmState::Initialized;
        info!(
            "initialized {:?} with {} solutions (seed {})",
            self.config.variant,
            self.population.len(),
            self.rng.seed()
        );
        Ok(())
    }

    /// Runs exactly one generation.
    ///
    /// Iteration-aware mutation operators are advanced once per call.
    ///
    /// # Errors
    ///
    /// [`EvoError::InvalidState`] before initialization or after
    /// termination.
    pub fn step(&mut self) -> EvoResult<()> {
        match self.state {
            AlgorithmState::Initialized | AlgorithmState::Stepping => {}
            other => {
                return Err(EvoError::InvalidState {
                    expected: AlgorithmState::Initialized.name(),
                    actual: other.name(),
                })
            }
        }

        self.config.mutation.set_current_iteration(self.generation);
        let offspring = self.breed()?;

        let mu = self.config.population_size;
        match self.config.variant {
            Variant::Spea2 { archive_size } => {
                let mut union = std::mem::take(&mut self.archive);
                union.union(offspring.clone());
                self.archive = spea2_select(union, archive_size)?;
                self.population = offspring;
            }
            Variant::Nsga2 => {
                let merged = self.merge(offspring);
                self.population = nsga2_truncate(merged, mu)?;
            }
            Variant::SimpleGa | Variant::EvolutionStrategy => {
                let mut merged = self.merge(offspring);
                sort_best_first(
                    &mut merged,
                    ReductionOrder::Comparator(SolutionComparator::Objective(0)),
                )?;
                merged.truncate(mu);
                self.population = merged;
            }
        }

        self.generation += 1;
        self.state = AlgorithmState::Stepping;
        self.record();
        if let Some(stats) = self.history.last() {
            debug!(
                "generation {}: {} solutions, best {:?}, first front {}",
                stats.generation,
                self.population.len(),
                stats.best_objectives,
                stats.first_front_size
            );
        }
        Ok(())
    }

    /// Initializes if needed, then steps until the generation budget is
    /// exhausted.
    ///
    /// Returns the final population; SPEA2 returns the non-dominated
    /// members of its archive.
    ///
    /// # Errors
    ///
    /// [`EvoError::InvalidState`] if the algorithm already terminated, or
    /// any error raised by a generation.
    pub fn execute(&mut self) -> EvoResult<AlgorithmResult> {
        if self.state == AlgorithmState::Created {
            self.initialize()?;
        }
        while self.generation < self.config.max_generations {
            self.step()?;
        }
        self.state = AlgorithmState::Terminated;

        let population = match self.config.variant {
            Variant::Spea2 { .. } => self.archive.non_dominated(),
            _ => self.population.clone(),
        };
        info!(
            "terminated after {} generations with {} solutions",
            self.generation,
            population.len()
        );
        Ok(AlgorithmResult {
            population,
            generations: self.generation,
            seed: self.rng.seed(),
            history: self.history.clone(),
        })
    }

    /// Produces and evaluates one generation of children.
    fn breed(&mut self) -> EvoResult<Population> {
        let lambda = self.config.offspring_count();
        let selection = self.config.selection;
        let crossover = self.config.crossover;
        let mutation = self.config.mutation;
        let bounds = self.problem.bounds();
        let pool = match self.config.variant {
            Variant::Spea2 { .. } => &self.archive,
            _ => &self.population,
        };

        let mut offspring = Population::with_capacity(lambda);
        while offspring.len() < lambda {
            let first = selection.select(pool, &mut self.rng)?;
            let children = match crossover {
                Some(crossover) => {
                    let second = selection.select(pool, &mut self.rng)?;
                    crossover.execute(&pool[first], &pool[second], bounds, &mut self.rng)
                }
                None => Population::from(vec![pool[first].offspring()]),
            };
            for mut child in children {
                if offspring.len() >= lambda {
                    break;
                }
                mutation.execute(&mut child, bounds, &mut self.rng);
                offspring.push(child);
            }
        }

        self.problem.evaluate_population(&mut offspring);
        Ok(offspring)
    }

    /// Parents plus offspring when elitist, offspring alone otherwise.
    fn merge(&mut self, offspring: Population) -> Population {
        if self.config.elitism {
            let mut merged = std::mem::take(&mut self.population);
            merged.union(offspring);
            merged
        } else {
            offspring
        }
    }

    fn record(&mut self) {
        let current = match self.config.variant {
            Variant::Spea2 { .. } => &self.archive,
            _ => &self.population,
        };
        let objectives = current.objectives();
        let m = objectives.iter().map(|o| o.len()).min().unwrap_or(0);
        let best_objectives = (0..m)
            .map(|i| {
                objectives
                    .iter()
                    .map(|o| o[i])
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let first_front_size = non_dominated_sort(&objectives)
            .fronts
            .first()
            .map_or(0, Vec::len);

        self.history.push(GenerationStats {
            generation: self.generation,
            best_objectives,
            first_front_size,
        });
    }

    fn expect_state(&self, expected: AlgorithmState) -> EvoResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(EvoError::InvalidState {
                expected: expected.name(),
                actual: self.state.name(),
            })
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
