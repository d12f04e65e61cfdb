//! Generational evolutionary engine.
//!
//! One state machine wires a [`Problem`](crate::Problem), the operators and
//! the ranking functions into a generational loop. The concrete algorithms
//! are configurations of that loop, selected by [`Variant`]:
//!
//! - [`Variant::SimpleGa`]: single-objective elitist or generational GA
//! - [`Variant::Nsga2`]: rank + crowding survivor selection
//! - [`Variant::Spea2`]: strength fitness with a bounded archive
//! - [`Variant::EvolutionStrategy`]: `(mu + lambda)` / `(mu, lambda)`
//!
//! # Key Types
//!
//! - [`AlgorithmConfig`]: loop parameters, operators and presets
//! - [`Algorithm`]: the `Created → Initialized → Stepping → Terminated`
//!   state machine
//! - [`AlgorithmResult`]: final population and per-generation statistics
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Beyer & Schwefel (2002), "Evolution strategies: A comprehensive introduction"
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*
//! - Zitzler, Laumanns & Thiele (2001), *SPEA2*

mod config;
mod runner;

pub use config::{AlgorithmConfig, Variant};
pub use runner::{Algorithm, AlgorithmResult, AlgorithmState, GenerationStats};
