//! Pareto dominance comparison.

use log::warn;
use std::cmp::Ordering;

/// Compares two objective vectors for Pareto dominance (minimization).
///
/// Returns [`Ordering::Less`] if `a` dominates `b` (never worse, strictly
/// better somewhere), [`Ordering::Greater`] if `b` dominates `a`, and
/// [`Ordering::Equal`] otherwise (identical or mutually non-dominated).
///
/// The scan stops as soon as both "better" and "worse" indices have been
/// seen; the result is identical to a full scan.
///
/// Vectors of different lengths are compared over the shorter length and a
/// warning is logged, since this usually means solutions from different
/// problems are being mixed.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use u_evo::ranking::dominance;
///
/// assert_eq!(dominance(&[1.0, 1.0], &[2.0, 1.0]), Ordering::Less);
/// assert_eq!(dominance(&[1.0, 3.0], &[3.0, 1.0]), Ordering::Equal);
/// ```
pub fn dominance(a: &[f64], b: &[f64]) -> Ordering {
    epsilon_dominance(a, b, 0.0)
}

/// Dominance where per-objective differences within `epsilon` are ties.
///
/// With `epsilon == 0.0` this is plain [`dominance`].
pub fn epsilon_dominance(a: &[f64], b: &[f64], epsilon: f64) -> Ordering {
    if a.len() != b.len() {
        warn!(
            "comparing objective vectors of different lengths ({} vs {}); using the shorter",
            a.len(),
            b.len()
        );
    }

    let mut a_better_in_some = false;
    let mut a_worse_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        let diff = va - vb;
        if diff < -epsilon {
            a_better_in_some = true;
        } else if diff > epsilon {
            a_worse_in_some = true;
        }
        if a_better_in_some && a_worse_in_some {
            return Ordering::Equal;
        }
    }

    match (a_better_in_some, a_worse_in_some) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Whether `a` Pareto-dominates `b`.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    dominance(a, b) == Ordering::Less
}
