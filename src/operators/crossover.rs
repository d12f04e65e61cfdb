//! Recombination operators.

use crate::error::{check_probability, EvoError, EvoResult};
use crate::model::{Bounds, Population, Solution, Variable};
use crate::random::RandomSource;

/// Differences below this are treated as identical parent genes by SBX.
const SBX_EPSILON: f64 = 1.0e-14;

/// Crossover operator producing two offspring from two parents.
///
/// Parents are never modified. Offspring are unevaluated copies (see
/// [`Solution::offspring`]). The crossover probability is checked exactly
/// once per invocation; when the check fails both offspring are exact
/// copies of the parents.
///
/// # Examples
///
/// ```
/// use u_evo::operators::Crossover;
///
/// let sbx = Crossover::sbx(0.9, 20.0);
/// assert!(sbx.validate().is_ok());
/// assert!(Crossover::Cycle { probability: 1.5 }.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossover {
    /// Simulated binary crossover for real-coded genes.
    ///
    /// Each gene pair `(x1, x2)` yields children symmetric around the
    /// parents' midpoint, spread by a factor drawn from a polynomial
    /// distribution of index `distribution_index`. Children are clipped to
    /// the variable bounds. Non-real genes are copied.
    Sbx {
        /// Probability of recombining the pair at all.
        probability: f64,
        /// Distribution index `eta_c`; larger keeps children near parents.
        distribution_index: f64,
    },

    /// Single-point crossover: swap the tails after one cut index.
    ///
    /// Works on any gene kind; genotypes may differ in length (tails are
    /// swapped whole).
    SinglePoint {
        /// Probability of recombining the pair at all.
        probability: f64,
        /// Fixed cut index, or `None` for a random cut in `[1, len)`.
        cut_point: Option<usize>,
        /// When `false`, a cut producing a child identical to a parent is
        /// replaced by the next cut that does not, if any.
        allow_repetition: bool,
    },

    /// Cycle crossover for permutation genotypes.
    ///
    /// Positions on the cycle starting at index 0 keep each parent's
    /// alleles; all other positions are swapped.
    Cycle {
        /// Probability of recombining the pair at all.
        probability: f64,
    },
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::sbx(0.9, 20.0)
    }
}

impl Crossover {
    /// SBX with the given probability and distribution index.
    pub fn sbx(probability: f64, distribution_index: f64) -> Self {
        Crossover::Sbx {
            probability,
            distribution_index,
        }
    }

    /// Single-point crossover with a random cut and repetition allowed.
    pub fn single_point(probability: f64) -> Self {
        Crossover::SinglePoint {
            probability,
            cut_point: None,
            allow_repetition: true,
        }
    }

    /// Probability of recombining a pair.
    pub fn probability(&self) -> f64 {
        match *self {
            Crossover::Sbx { probability, .. }
            | Crossover::SinglePoint { probability, .. }
            | Crossover::Cycle { probability } => probability,
        }
    }

    /// Checks operator parameters.
    pub fn validate(&self) -> EvoResult<()> {
        check_probability("crossover probability", self.probability())?;
        if let Crossover::Sbx {
            distribution_index, ..
        } = *self
        {
            if distribution_index.is_nan() || distribution_index < 0.0 {
                return Err(EvoError::Configuration(format!(
                    "SBX distribution index must be non-negative, got {distribution_index}"
                )));
            }
        }
        Ok(())
    }

    /// Recombines two parents into two offspring.
    pub fn execute(
        &self,
        parent1: &Solution,
        parent2: &Solution,
        bounds: &Bounds,
        rng: &mut RandomSource,
    ) -> Population {
        let mut child1 = parent1.offspring();
        let mut child2 = parent2.offspring();

        if rng.hit(self.probability()) {
            let (g1, g2) = (&mut child1.variables, &mut child2.variables);
            match *self {
                Crossover::Sbx {
                    distribution_index, ..
                } => sbx(g1, g2, distribution_index, bounds, rng),
                Crossover::SinglePoint {
                    cut_point,
                    allow_repetition,
                    ..
                } => single_point(g1, g2, cut_point, allow_repetition, rng),
                Crossover::Cycle { .. } => cycle(g1, g2),
            }
        }

        vec![child1, child2].into()
    }
}

fn sbx(
    g1: &mut [Variable],
    g2: &mut [Variable],
    eta: f64,
    bounds: &Bounds,
    rng: &mut RandomSource,
) {
    let exponent = 1.0 / (eta + 1.0);
    for (i, (v1, v2)) in g1.iter_mut().zip(g2.iter_mut()).enumerate() {
        let (Variable::Real(x1), Variable::Real(x2)) = (*v1, *v2) else {
            continue;
        };
        if (x1 - x2).abs() <= SBX_EPSILON {
            continue;
        }

        let u = rng.next_double();
        let beta = if u <= 0.5 {
            (2.0 * u).powf(exponent)
        } else {
            (1.0 / (2.0 * (1.0 - u))).powf(exponent)
        };

        let c1 = 0.5 * ((1.0 + beta) * x1 + (1.0 - beta) * x2);
        let c2 = 0.5 * ((1.0 - beta) * x1 + (1.0 + beta) * x2);
        *v1 = Variable::Real(bounds.clamp(i, c1));
        *v2 = Variable::Real(bounds.clamp(i, c2));
    }
}

fn single_point(
    g1: &mut Vec<Variable>,
    g2: &mut Vec<Variable>,
    cut_point: Option<usize>,
    allow_repetition: bool,
    rng: &mut RandomSource,
) {
    let shortest = g1.len().min(g2.len());
    if shortest < 2 {
        return;
    }

    let mut cut = match cut_point {
        Some(c) => c.clamp(1, shortest - 1),
        None => rng.next_int(1, shortest as i64) as usize,
    };

    if !allow_repetition {
        let repeats = |cut: usize| g1[cut..] == g2[cut..] || g1[..cut] == g2[..cut];
        if repeats(cut) {
            if let Some(other) = (1..shortest)
                .map(|offset| 1 + (cut - 1 + offset) % (shortest - 1))
                .find(|&c| !repeats(c))
            {
                cut = other;
            }
        }
    }

    let tail1 = g1.split_off(cut);
    let tail2 = g2.split_off(cut);
    g1.extend(tail2);
    g2.extend(tail1);
}

fn cycle(g1: &mut [Variable], g2: &mut [Variable]) {
    let n = g1.len();
    if n == 0 || n != g2.len() {
        return;
    }

    let mut in_cycle = vec![false; n];
    let mut pos = 0;
    loop {
        in_cycle[pos] = true;
        let value = g2[pos];
        match g1.iter().position(|v| *v == value) {
            Some(next) if !in_cycle[next] => pos = next,
            _ => break,
        }
    }

    for i in (0..n).filter(|&i| !in_cycle[i]) {
        std::mem::swap(&mut g1[i], &mut g2[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn reals(values: &[f64]) -> Solution {
        Solution::new(values.iter().map(|&v| Variable::Real(v)).collect(), 1)
    }

    fn ints(values: &[i64]) -> Solution {
        Solution::new(values.iter().map(|&v| Variable::Integer(v)).collect(), 1)
    }

    fn perm(values: &[usize]) -> Solution {
        Solution::new(values.iter().map(|&v| Variable::Permutation(v)).collect(), 1)
    }

    fn indices(s: &Solution) -> Vec<usize> {
        s.variables.iter().filter_map(Variable::as_index).collect()
    }

    #[test]
    fn test_sbx_children_symmetric_around_midpoint() {
        let bounds = Bounds::uniform(3, -100.0, 100.0);
        let p1 = reals(&[1.0, -2.0, 3.0]);
        let p2 = reals(&[4.0, 5.0, -6.0]);
        let mut rng = RandomSource::new(42);

        for _ in 0..50 {
            let children = Crossover::sbx(1.0, 20.0).execute(&p1, &p2, &bounds, &mut rng);
            assert_eq!(children.len(), 2);
            for i in 0..3 {
                let c1 = children[0].variables[i].as_f64();
                let c2 = children[1].variables[i].as_f64();
                let p = p1.variables[i].as_f64() + p2.variables[i].as_f64();
                assert!((c1 + c2 - p).abs() < 1e-9, "gene {i}: {c1} + {c2} != {p}");
            }
        }
    }

    #[test]
    fn test_probability_zero_clones_parents() {
        let bounds = Bounds::uniform(2, 0.0, 10.0);
        let p1 = reals(&[1.0, 2.0]);
        let p2 = reals(&[8.0, 9.0]);
        let mut rng = RandomSource::new(42);
        let children = Crossover::sbx(0.0, 20.0).execute(&p1, &p2, &bounds, &mut rng);
        assert_eq!(children[0].variables, p1.variables);
        assert_eq!(children[1].variables, p2.variables);
    }

    #[test]
    fn test_parents_untouched_and_children_unevaluated() {
        let bounds = Bounds::uniform(2, 0.0, 10.0);
        let mut p1 = reals(&[1.0, 2.0]);
        p1.objectives[0] = 42.0;
        p1.rank = Some(0);
        let p2 = reals(&[8.0, 9.0]);
        let snapshot = p1.clone();
        let mut rng = RandomSource::new(1);
        let children = Crossover::default().execute(&p1, &p2, &bounds, &mut rng);
        assert_eq!(p1, snapshot);
        assert_eq!(children[0].objectives, vec![0.0]);
        assert!(children[0].rank.is_none());
    }

    #[test]
    fn test_single_point_fixed_cut() {
        let p1 = ints(&[1, 2, 3, 4, 5]);
        let p2 = ints(&[6, 7, 8, 9, 10]);
        let mut rng = RandomSource::new(42);
        let op = Crossover::SinglePoint {
            probability: 1.0,
            cut_point: Some(2),
            allow_repetition: true,
        };
        let children = op.execute(&p1, &p2, &Bounds::unbounded(), &mut rng);
        assert_eq!(children[0], ints(&[1, 2, 8, 9, 10]));
        assert_eq!(children[1], ints(&[6, 7, 3, 4, 5]));
    }

    #[test]
    fn test_single_point_different_lengths() {
        let p1 = ints(&[1, 2, 3]);
        let p2 = ints(&[4, 5, 6, 7, 8]);
        let mut rng = RandomSource::new(42);
        let op = Crossover::SinglePoint {
            probability: 1.0,
            cut_point: Some(1),
            allow_repetition: true,
        };
        let children = op.execute(&p1, &p2, &Bounds::unbounded(), &mut rng);
        assert_eq!(children[0], ints(&[1, 5, 6, 7, 8]));
        assert_eq!(children[1], ints(&[4, 2, 3]));
    }

    #[test]
    fn test_single_point_avoids_repetition() {
        // cutting at 3 would swap identical tails and reproduce the parents
        let p1 = ints(&[1, 2, 3, 0]);
        let p2 = ints(&[4, 5, 6, 0]);
        let mut rng = RandomSource::new(42);
        let op = Crossover::SinglePoint {
            probability: 1.0,
            cut_point: Some(3),
            allow_repetition: false,
        };
        let children = op.execute(&p1, &p2, &Bounds::unbounded(), &mut rng);
        assert_ne!(children[0], p1);
        assert_ne!(children[0], p2);
    }

    #[test]
    fn test_cycle_crossover_classic_example() {
        let p1 = perm(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let p2 = perm(&[7, 4, 6, 2, 0, 1, 3, 5]);
        let mut rng = RandomSource::new(42);
        let children = Crossover::Cycle { probability: 1.0 }.execute(&p1, &p2, &Bounds::unbounded(), &mut rng);
        // cycle from 0: p2[0]=7 -> pos 7, p2[7]=5 -> pos 5, p2[5]=1 -> pos 1, p2[1]=4 -> pos 4, p2[4]=0 -> pos 0
        assert_eq!(indices(&children[0]), vec![0, 1, 6, 2, 4, 5, 3, 7]);
        assert_eq!(indices(&children[1]), vec![7, 4, 2, 3, 0, 1, 6, 5]);
    }

    #[test]
    fn test_cycle_crossover_coin_failure_clones() {
        let p1 = perm(&[0, 1, 2, 3]);
        let p2 = perm(&[3, 2, 1, 0]);
        let mut rng = RandomSource::new(42);
        let children = Crossover::Cycle { probability: 0.0 }.execute(&p1, &p2, &Bounds::unbounded(), &mut rng);
        assert_eq!(children[0].variables, p1.variables);
        assert_eq!(children[1].variables, p2.variables);
    }

    #[test]
    fn test_validate() {
        assert!(Crossover::default().validate().is_ok());
        assert!(Crossover::sbx(-0.1, 20.0).validate().is_err());
        assert!(Crossover::sbx(0.9, -1.0).validate().is_err());
        assert!(Crossover::single_point(1.1).validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_sbx_respects_bounds(
            x1 in prop::collection::vec(-5.0f64..=5.0, 4),
            x2 in prop::collection::vec(-5.0f64..=5.0, 4),
            seed in any::<u64>(),
        ) {
            let bounds = Bounds::uniform(4, -5.0, 5.0);
            let mut rng = RandomSource::new(seed);
            let children = Crossover::sbx(1.0, 2.0).execute(&reals(&x1), &reals(&x2), &bounds, &mut rng);
            for child in &children {
                for v in &child.variables {
                    let x = v.as_f64();
                    prop_assert!((-5.0..=5.0).contains(&x));
                }
            }
        }

        #[test]
        fn prop_cycle_preserves_permutations(seed in any::<u64>(), n in 1usize..20) {
            let mut rng = RandomSource::new(seed);
            let p1 = perm(&rng.permutation(n));
            let p2 = perm(&rng.permutation(n));
            let children = Crossover::Cycle { probability: 1.0 }.execute(&p1, &p2, &Bounds::unbounded(), &mut rng);
            for child in &children {
                let set: HashSet<usize> = indices(child).into_iter().collect();
                prop_assert_eq!(set.len(), n);
                prop_assert!(indices(child).iter().all(|&v| v < n));
            }
        }
    }
}
