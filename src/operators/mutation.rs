//! Mutation operators.

use crate::error::{check_probability, EvoError, EvoResult};
use crate::model::{Bounds, Solution, Variable};
use crate::random::RandomSource;

/// Mutation operator applied in place to one solution.
///
/// Real and integer results are always clipped into the variable bounds.
/// Genes of a kind the operator does not handle are left untouched.
///
/// # Examples
///
/// ```
/// use u_evo::operators::Mutation;
/// use u_evo::{Bounds, RandomSource, Solution, Variable};
///
/// let bounds = Bounds::uniform(2, -1.0, 1.0);
/// let mut rng = RandomSource::new(42);
/// let mut s = Solution::new(vec![Variable::Real(0.0), Variable::Real(0.5)], 1);
///
/// Mutation::polynomial(1.0, 20.0).execute(&mut s, &bounds, &mut rng);
/// assert!(s.variables.iter().all(|v| (-1.0..=1.0).contains(&v.as_f64())));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mutation {
    /// Polynomial mutation for real-coded genes.
    ///
    /// Each gene mutates with probability `probability`; the perturbation
    /// follows a polynomial distribution of index `distribution_index`,
    /// scaled by the bound range.
    Polynomial {
        /// Per-gene mutation probability.
        probability: f64,
        /// Distribution index `eta_m`; larger keeps mutants near the parent.
        distribution_index: f64,
    },

    /// Non-uniform mutation for real-coded genes.
    ///
    /// The perturbation `y * (1 - r^((1 - t)^b))` shrinks as the current
    /// iteration `t = current_iteration / max_iterations` approaches 1. The
    /// driving algorithm advances `current_iteration` once per generation
    /// through [`Mutation::set_current_iteration`].
    NonUniform {
        /// Per-gene mutation probability.
        probability: f64,
        /// Shape exponent `b`.
        perturbation: f64,
        /// Iteration at which perturbations vanish.
        max_iterations: usize,
        /// Current iteration.
        current_iteration: usize,
    },

    /// Replaces integer genes with a uniform integer in
    /// `[round(lower), round(upper)]`.
    IntegerFlip {
        /// Per-gene mutation probability.
        probability: f64,
    },

    /// Flips boolean genes.
    BooleanFlip {
        /// Per-gene mutation probability.
        probability: f64,
    },

    /// Swaps two distinct positions of the genotype.
    ///
    /// With `restrict_to_half`, a coin flip first picks the lower or upper
    /// half of the genotype and both positions are drawn from it. A half
    /// shorter than two genes falls back to the whole genotype.
    Swap {
        /// Probability of performing the swap.
        probability: f64,
        /// Restrict the swap to one half of the genotype.
        restrict_to_half: bool,
    },
}

impl Default for Mutation {
    fn default() -> Self {
        Mutation::polynomial(0.1, 20.0)
    }
}

impl Mutation {
    /// Polynomial mutation with the given per-gene probability and index.
    pub fn polynomial(probability: f64, distribution_index: f64) -> Self {
        Mutation::Polynomial {
            probability,
            distribution_index,
        }
    }

    /// Non-uniform mutation starting at iteration 0.
    pub fn non_uniform(probability: f64, perturbation: f64, max_iterations: usize) -> Self {
        Mutation::NonUniform {
            probability,
            perturbation,
            max_iterations,
            current_iteration: 0,
        }
    }

    /// Mutation probability.
    pub fn probability(&self) -> f64 {
        match *self {
            Mutation::Polynomial { probability, .. }
            | Mutation::NonUniform { probability, .. }
            | Mutation::IntegerFlip { probability }
            | Mutation::BooleanFlip { probability }
            | Mutation::Swap { probability, .. } => probability,
        }
    }

    /// Advances iteration-aware operators. No effect on the others.
    pub fn set_current_iteration(&mut self, iteration: usize) {
        if let Mutation::NonUniform {
            current_iteration, ..
        } = self
        {
            *current_iteration = iteration;
        }
    }

    /// Checks operator parameters.
    pub fn validate(&self) -> EvoResult<()> {
        check_probability("mutation probability", self.probability())?;
        match *self {
            Mutation::Polynomial {
                distribution_index, ..
            } if distribution_index.is_nan() || distribution_index < 0.0 => {
                Err(EvoError::Configuration(format!(
                    "polynomial distribution index must be non-negative, got {distribution_index}"
                )))
            }
            Mutation::NonUniform { max_iterations: 0, .. } => Err(EvoError::Configuration(
                "non-uniform mutation needs max_iterations >= 1".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Mutates `solution` in place and returns it for chaining.
    pub fn execute<'a>(
        &self,
        solution: &'a mut Solution,
        bounds: &Bounds,
        rng: &mut RandomSource,
    ) -> &'a mut Solution {
        let genes = &mut solution.variables;
        match *self {
            Mutation::Polynomial {
                probability,
                distribution_index,
            } => polynomial(genes, probability, distribution_index, bounds, rng),
            Mutation::NonUniform {
                probability,
                perturbation,
                max_iterations,
                current_iteration,
            } => {
                let t = (current_iteration as f64 / max_iterations.max(1) as f64).min(1.0);
                non_uniform(genes, probability, perturbation, t, bounds, rng)
            }
            Mutation::IntegerFlip { probability } => integer_flip(genes, probability, bounds, rng),
            Mutation::BooleanFlip { probability } => {
                for gene in genes.iter_mut() {
                    if let Variable::Boolean(b) = gene {
                        if rng.hit(probability) {
                            *b = !*b;
                        }
                    }
                }
            }
            Mutation::Swap {
                probability,
                restrict_to_half,
            } => swap(genes, probability, restrict_to_half, rng),
        }
        solution
    }
}

fn bounded_range(bounds: &Bounds, i: usize) -> Option<(f64, f64)> {
    let (lo, hi) = (bounds.lower(i), bounds.upper(i));
    (lo.is_finite() && hi.is_finite() && hi > lo).then_some((lo, hi))
}

fn polynomial(
    genes: &mut [Variable],
    probability: f64,
    eta: f64,
    bounds: &Bounds,
    rng: &mut RandomSource,
) {
    let exponent = 1.0 / (eta + 1.0);
    for (i, gene) in genes.iter_mut().enumerate() {
        let Variable::Real(y) = *gene else {
            continue;
        };
        if !rng.hit(probability) {
            continue;
        }
        let Some((lo, hi)) = bounded_range(bounds, i) else {
            continue;
        };

        let delta1 = (y - lo) / (hi - lo);
        let delta2 = (hi - y) / (hi - lo);
        let u = rng.next_double();
        let deltaq = if u < 0.5 {
            let xy = 1.0 - delta1;
            let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
            val.powf(exponent) - 1.0
        } else {
            let xy = 1.0 - delta2;
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(exponent)
        };

        *gene = Variable::Real(bounds.clamp(i, y + deltaq * (hi - lo)));
    }
}

fn non_uniform(
    genes: &mut [Variable],
    probability: f64,
    b: f64,
    t: f64,
    bounds: &Bounds,
    rng: &mut RandomSource,
) {
    let shrink = (1.0 - t).powf(b);
    for (i, gene) in genes.iter_mut().enumerate() {
        let Variable::Real(x) = *gene else {
            continue;
        };
        if !rng.hit(probability) {
            continue;
        }
        let Some((lo, hi)) = bounded_range(bounds, i) else {
            continue;
        };

        let r = rng.next_double();
        let delta = |y: f64| y * (1.0 - r.powf(shrink));
        let mutated = if rng.next_bool() {
            x + delta(hi - x)
        } else {
            x - delta(x - lo)
        };
        *gene = Variable::Real(bounds.clamp(i, mutated));
    }
}

fn integer_flip(genes: &mut [Variable], probability: f64, bounds: &Bounds, rng: &mut RandomSource) {
    for (i, gene) in genes.iter_mut().enumerate() {
        let Variable::Integer(_) = *gene else {
            continue;
        };
        if !rng.hit(probability) {
            continue;
        }
        let (lo, hi) = (bounds.lower(i), bounds.upper(i));
        if !(lo.is_finite() && hi.is_finite()) {
            continue;
        }
        let lo = lo.round() as i64;
        let hi = hi.round() as i64;
        *gene = Variable::Integer(rng.next_int(lo, hi.saturating_add(1)));
    }
}

fn swap(genes: &mut [Variable], probability: f64, restrict_to_half: bool, rng: &mut RandomSource) {
    let n = genes.len();
    if n < 2 || !rng.hit(probability) {
        return;
    }

    let (start, end) = if restrict_to_half {
        let mid = n / 2;
        let half = if rng.next_bool() { (0, mid) } else { (mid, n) };
        // a half with fewer than two genes cannot hold a swap
        if half.1 - half.0 < 2 {
            (0, n)
        } else {
            half
        }
    } else {
        (0, n)
    };

    let len = end - start;
    let i = start + rng.next_index(len);
    let mut j = start + rng.next_index(len - 1);
    if j >= i {
        j += 1;
    }
    genes.swap(i, j);
}
