//! Candidate solutions.

use super::variable::Variable;

/// A candidate solution: genotype, objective vector and ranking annotations.
///
/// Objectives are placeholders (`0.0`) until the problem evaluates the
/// solution. The annotation fields are `None` until a ranking pass computes
/// them, and are reset whenever the genotype is copied into an offspring.
///
/// All objectives are **minimized**.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Ordered decision variables (the genotype).
    pub variables: Vec<Variable>,

    /// Ordered objective values, one per declared objective.
    pub objectives: Vec<f64>,

    /// Index of the non-dominated front this solution belongs to (0 = best).
    pub rank: Option<usize>,

    /// Crowding distance within its front. Larger is more isolated.
    pub crowding_distance: Option<f64>,

    /// SPEA2 fitness (raw fitness + density). Lower is better.
    pub strength_fitness: Option<f64>,
}

impl Solution {
    /// Creates an unevaluated solution with `number_of_objectives` zeroed
    /// objective values.
    pub fn new(variables: Vec<Variable>, number_of_objectives: usize) -> Self {
        Self {
            variables,
            objectives: vec![0.0; number_of_objectives],
            rank: None,
            crowding_distance: None,
            strength_fitness: None,
        }
    }

    /// Copies the genotype into a fresh, unevaluated solution.
    ///
    /// Objective values are kept as placeholders of the same length and all
    /// ranking annotations are cleared.
    pub fn offspring(&self) -> Self {
        Self::new(self.variables.clone(), self.objectives.len())
    }

    /// Number of decision variables.
    pub fn number_of_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of objective values.
    pub fn number_of_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Objective `index`, or `None` when out of range.
    pub fn objective(&self, index: usize) -> Option<f64> {
        self.objectives.get(index).copied()
    }

    /// Clears rank, crowding distance and strength fitness.
    pub fn clear_annotations(&mut self) {
        self.rank = None;
        self.crowding_distance = None;
        self.strength_fitness = None;
    }
}

/// Two solutions are equal when their genotypes and objectives are equal.
/// Ranking annotations do not take part in the comparison.
impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.variables == other.variables && self.objectives == other.objectives
    }
}
