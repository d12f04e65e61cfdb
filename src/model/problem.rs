//! The problem contract between the engine and the caller.

use super::population::Population;
use super::solution::Solution;
use super::variable::{Variable, VariableKind};
use crate::error::{EvoError, EvoResult};
use crate::random::RandomSource;

/// Per-variable lower and upper bounds.
///
/// Bounds own their arrays, so cloning is a deep copy: an operator holding a
/// clone is independent of the problem it came from.
///
/// # Examples
///
/// ```
/// use u_evo::Bounds;
///
/// let bounds = Bounds::uniform(2, -5.0, 5.0);
/// assert_eq!(bounds.len(), 2);
/// assert_eq!(bounds.clamp(0, 7.5), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates bounds from explicit arrays.
    ///
    /// Fails if the arrays differ in length or any `lower[i] > upper[i]`.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> EvoResult<Self> {
        if lower.len() != upper.len() {
            return Err(EvoError::Configuration(format!(
                "bounds length mismatch: {} lower vs {} upper",
                lower.len(),
                upper.len()
            )));
        }
        if let Some(i) = (0..lower.len()).find(|&i| lower[i] > upper[i]) {
            return Err(EvoError::Configuration(format!(
                "lower bound {} exceeds upper bound {} at variable {i}",
                lower[i], upper[i]
            )));
        }
        Ok(Self { lower, upper })
    }

    /// `n` variables sharing the same `[lower, upper]` range.
    pub fn uniform(n: usize, lower: f64, upper: f64) -> Self {
        Self {
            lower: vec![lower; n],
            upper: vec![upper; n],
        }
    }

    /// No bounds at all (permutation or boolean genotypes).
    pub fn unbounded() -> Self {
        Self {
            lower: Vec::new(),
            upper: Vec::new(),
        }
    }

    /// Number of bounded variables.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Whether no variable is bounded.
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Lower bound of variable `i`; `-inf` when `i` is not bounded.
    pub fn lower(&self, i: usize) -> f64 {
        self.lower.get(i).copied().unwrap_or(f64::NEG_INFINITY)
    }

    /// Upper bound of variable `i`; `+inf` when `i` is not bounded.
    pub fn upper(&self, i: usize) -> f64 {
        self.upper.get(i).copied().unwrap_or(f64::INFINITY)
    }

    /// Clips `value` into `[lower(i), upper(i)]`.
    pub fn clamp(&self, i: usize, value: f64) -> f64 {
        value.max(self.lower(i)).min(self.upper(i))
    }
}

/// Defines an optimization problem.
///
/// The caller constructs the problem once; the engine never mutates it.
/// All objectives are **minimized**.
///
/// # Implementing
///
/// ```
/// use u_evo::{Bounds, Problem, Solution};
///
/// struct Sphere {
///     bounds: Bounds,
/// }
///
/// impl Problem for Sphere {
///     fn bounds(&self) -> &Bounds {
///         &self.bounds
///     }
///
///     fn number_of_objectives(&self) -> usize {
///         1
///     }
///
///     fn evaluate(&self, solution: &mut Solution) {
///         solution.objectives[0] = solution.variables.iter().map(|v| v.as_f64().powi(2)).sum();
///     }
/// }
/// ```
pub trait Problem {
    /// Per-variable bounds.
    fn bounds(&self) -> &Bounds;

    /// Number of objectives every evaluation produces.
    fn number_of_objectives(&self) -> usize;

    /// Computes the objective values of `solution`.
    ///
    /// Must write exactly [`number_of_objectives`](Problem::number_of_objectives)
    /// values into `solution.objectives`, in a fixed order.
    fn evaluate(&self, solution: &mut Solution);

    /// Number of decision variables. Defaults to the number of bounds.
    fn number_of_variables(&self) -> usize {
        self.bounds().len()
    }

    /// Value kind of every decision variable. Defaults to real.
    fn variable_kind(&self) -> VariableKind {
        VariableKind::Real
    }

    /// Lower bound of variable `i`.
    fn lower_bound(&self, i: usize) -> f64 {
        self.bounds().lower(i)
    }

    /// Upper bound of variable `i`.
    fn upper_bound(&self, i: usize) -> f64 {
        self.bounds().upper(i)
    }

    /// Creates a random, unevaluated solution.
    ///
    /// The default draws uniformly inside the bounds for real and integer
    /// kinds, flips a fair coin for booleans, and shuffles `[0, n)` for
    /// permutations.
    fn new_random_solution(&self, rng: &mut RandomSource) -> Solution {
        let n = self.number_of_variables();
        let variables: Vec<Variable> = match self.variable_kind() {
            VariableKind::Real => (0..n)
                .map(|i| Variable::Real(rng.next_double_in(self.lower_bound(i), self.upper_bound(i))))
                .collect(),
            VariableKind::Integer => (0..n)
                .map(|i| {
                    let lo = self.lower_bound(i).round() as i64;
                    let hi = self.upper_bound(i).round() as i64;
                    Variable::Integer(rng.next_int(lo, hi.saturating_add(1)))
                })
                .collect(),
            VariableKind::Boolean => (0..n).map(|_| Variable::Boolean(rng.next_bool())).collect(),
            VariableKind::Permutation => rng
                .permutation(n)
                .into_iter()
                .map(Variable::Permutation)
                .collect(),
        };
        Solution::new(variables, self.number_of_objectives())
    }

    /// Creates `size` random, unevaluated solutions.
    fn new_random_set_of_solutions(&self, size: usize, rng: &mut RandomSource) -> Population {
        (0..size).map(|_| self.new_random_solution(rng)).collect()
    }

    /// Evaluates every member of `population`.
    fn evaluate_population(&self, population: &mut Population) {
        for solution in population.iter_mut() {
            self.evaluate(solution);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Fixture {
        bounds: Bounds,
        kind: VariableKind,
    }

    impl Problem for Fixture {
        fn bounds(&self) -> &Bounds {
            &self.bounds
        }

        fn number_of_objectives(&self) -> usize {
            2
        }

        fn variable_kind(&self) -> VariableKind {
            self.kind
        }

        fn evaluate(&self, solution: &mut Solution) {
            let sum: f64 = solution.variables.iter().map(Variable::as_f64).sum();
            solution.objectives = vec![sum, -sum];
        }
    }

    #[test]
    fn test_bounds_validation() {
        assert!(Bounds::new(vec![0.0], vec![1.0, 2.0]).is_err());
        assert!(Bounds::new(vec![2.0], vec![1.0]).is_err());
        let b = Bounds::new(vec![-1.0, 0.0], vec![1.0, 10.0]).expect("valid bounds");
        assert_eq!(b.lower(1), 0.0);
        assert_eq!(b.upper(1), 10.0);
        assert_eq!(b.lower(5), f64::NEG_INFINITY);
        assert_eq!(b.clamp(0, -3.0), -1.0);
    }

    #[test]
    fn test_bounds_clone_is_deep() {
        let original = Bounds::uniform(3, 0.0, 1.0);
        let copy = original.clone();
        drop(original);
        assert_eq!(copy.upper(2), 1.0);
    }

    #[test]
    fn test_random_real_solutions_within_bounds() {
        let problem = Fixture {
            bounds: Bounds::uniform(4, -5.0, 5.0),
            kind: VariableKind::Real,
        };
        let mut rng = RandomSource::new(42);
        let pop = problem.new_random_set_of_solutions(50, &mut rng);
        assert_eq!(pop.len(), 50);
        for s in &pop {
            assert_eq!(s.objectives.len(), 2);
            for v in &s.variables {
                let x = v.as_real().expect("real variable");
                assert!((-5.0..5.0).contains(&x));
            }
        }
    }

    #[test]
    fn test_random_integer_solutions_inclusive() {
        let problem = Fixture {
            bounds: Bounds::uniform(1, 0.4, 2.6),
            kind: VariableKind::Integer,
        };
        let mut rng = RandomSource::new(42);
        let seen: HashSet<i64> = (0..300)
            .filter_map(|_| problem.new_random_solution(&mut rng).variables[0].as_integer())
            .collect();
        // round(0.4) = 0 and round(2.6) = 3, both inclusive
        assert_eq!(seen, (0..=3).collect::<HashSet<i64>>());
    }

    #[test]
    fn test_random_permutation_solution() {
        let problem = Fixture {
            bounds: Bounds::uniform(6, 0.0, 5.0),
            kind: VariableKind::Permutation,
        };
        let mut rng = RandomSource::new(3);
        let s = problem.new_random_solution(&mut rng);
        let set: HashSet<usize> = s.variables.iter().filter_map(Variable::as_index).collect();
        assert_eq!(set, (0..6).collect());
    }

    #[test]
    fn test_evaluate_population() {
        let problem = Fixture {
            bounds: Bounds::uniform(2, 1.0, 1.0),
            kind: VariableKind::Real,
        };
        let mut rng = RandomSource::new(1);
        let mut pop = problem.new_random_set_of_solutions(3, &mut rng);
        problem.evaluate_population(&mut pop);
        for s in &pop {
            assert_eq!(s.objectives, vec![2.0, -2.0]);
        }
    }
}
