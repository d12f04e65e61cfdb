//! Generational evolutionary engine for single- and multi-objective
//! optimization.
//!
//! Provides the core shared by population-based metaheuristics:
//!
//! - **Data model**: [`Variable`], [`Solution`], [`Population`] and the
//!   caller-implemented [`Problem`] contract.
//! - **Operators**: selection, crossover (SBX, single-point, cycle) and
//!   mutation (polynomial, non-uniform, integer, boolean, swap).
//! - **Ranking**: Pareto dominance, fast non-dominated sorting, crowding
//!   distance and SPEA2 strength fitness.
//! - **Reduction**: environmental selection down to the survivors.
//! - **Algorithm**: a `Created → Initialized → Stepping → Terminated` state
//!   machine; simple GA, NSGA-II, SPEA2 and evolution strategies are
//!   configurations of the same loop.
//!
//! All objectives are minimized. Every stochastic component draws from one
//! seedable [`RandomSource`], so identical seeds reproduce identical runs.
//!
//! # Example
//!
//! ```
//! use u_evo::{Algorithm, AlgorithmConfig, Bounds, Problem, Solution};
//!
//! // f1 = x^2, f2 = (x - 2)^2
//! struct Schaffer(Bounds);
//!
//! impl Problem for Schaffer {
//!     fn bounds(&self) -> &Bounds {
//!         &self.0
//!     }
//!     fn number_of_objectives(&self) -> usize {
//!         2
//!     }
//!     fn evaluate(&self, s: &mut Solution) {
//!         let x = s.variables[0].as_f64();
//!         s.objectives[0] = x * x;
//!         s.objectives[1] = (x - 2.0) * (x - 2.0);
//!     }
//! }
//!
//! let problem = Schaffer(Bounds::uniform(1, -10.0, 10.0));
//! let config = AlgorithmConfig::nsga2()
//!     .with_population_size(20)
//!     .with_max_generations(20)
//!     .with_seed(42);
//! let result = Algorithm::new(&problem, config).unwrap().execute().unwrap();
//! assert_eq!(result.population.len(), 20);
//! ```

pub mod algorithm;
pub mod error;
pub mod model;
pub mod operators;
pub mod random;
pub mod ranking;
pub mod reduction;

pub use algorithm::{
    Algorithm, AlgorithmConfig, AlgorithmResult, AlgorithmState, GenerationStats, Variant,
};
pub use error::{EvoError, EvoResult};
pub use model::{Bounds, Population, Problem, Solution, Variable, VariableKind};
pub use random::RandomSource;
pub use reduction::{Reduction, ReductionMode, ReductionOrder};
