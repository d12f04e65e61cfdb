//! Populations of candidate solutions.

use super::solution::Solution;
use crate::ranking::dominance;
use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

/// An ordered collection of solutions. Duplicates are allowed.
///
/// A population exclusively owns its solutions: moving a solution into
/// another population either moves or clones it, never shares it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    solutions: Vec<Solution>,
}

impl Population {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty population with room for `capacity` solutions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            solutions: Vec::with_capacity(capacity),
        }
    }

    /// Appends a solution.
    pub fn push(&mut self, solution: Solution) {
        self.solutions.push(solution);
    }

    /// Number of solutions.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Whether the population holds no solutions.
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Solution at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Solution> {
        self.solutions.get(index)
    }

    /// Mutable solution at `index`, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Solution> {
        self.solutions.get_mut(index)
    }

    /// Iterates over the solutions in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    /// Iterates mutably over the solutions in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Solution> {
        self.solutions.iter_mut()
    }

    /// The solutions as a slice.
    pub fn as_slice(&self) -> &[Solution] {
        &self.solutions
    }

    /// The solutions as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [Solution] {
        &mut self.solutions
    }

    /// Consumes the population, returning its solutions.
    pub fn into_vec(self) -> Vec<Solution> {
        self.solutions
    }

    /// Objective vectors of every solution, in order.
    pub fn objectives(&self) -> Vec<&[f64]> {
        self.solutions.iter().map(|s| s.objectives.as_slice()).collect()
    }

    /// Stable in-place sort by `compare`.
    ///
    /// `compare` must be a total order.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Solution, &Solution) -> Ordering,
    {
        self.solutions.sort_by(compare);
    }

    /// Keeps the first `len` solutions.
    pub fn truncate(&mut self, len: usize) {
        self.solutions.truncate(len);
    }

    /// Removes the last `count` solutions (saturating).
    pub fn remove_last(&mut self, count: usize) {
        let keep = self.solutions.len().saturating_sub(count);
        self.solutions.truncate(keep);
    }

    /// Merges `other` into this population (multiset union).
    pub fn union(&mut self, other: Population) {
        self.solutions.extend(other.solutions);
    }

    /// Solutions of this population that do not appear in `other`.
    ///
    /// Membership uses [`Solution`] equality (genotype and objectives).
    pub fn difference(&self, other: &Population) -> Population {
        self.solutions
            .iter()
            .filter(|s| !other.solutions.contains(s))
            .cloned()
            .collect()
    }

    /// Removes every solution dominated by another member.
    ///
    /// Mutually non-dominated duplicates are all kept.
    pub fn reduce_to_non_dominated(&mut self) {
        let keep: Vec<bool> = self
            .solutions
            .iter()
            .map(|candidate| {
                !self.solutions.iter().any(|other| {
                    dominance(&other.objectives, &candidate.objectives) == Ordering::Less
                })
            })
            .collect();
        let mut flags = keep.into_iter();
        self.solutions.retain(|_| flags.next().unwrap_or(true));
    }

    /// Non-dominated subset of this population.
    pub fn non_dominated(&self) -> Population {
        let mut front = self.clone();
        front.reduce_to_non_dominated();
        front
    }

    /// Solution with the lowest value of objective `index`.
    ///
    /// Solutions lacking that objective are ignored.
    pub fn best(&self, index: usize) -> Option<&Solution> {
        self.solutions
            .iter()
            .filter_map(|s| s.objective(index).map(|v| (s, v)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(s, _)| s)
    }

    /// Clears the ranking annotations of every solution.
    pub fn clear_annotations(&mut self) {
        for s in &mut self.solutions {
            s.clear_annotations();
        }
    }
}

impl From<Vec<Solution>> for Population {
    fn from(solutions: Vec<Solution>) -> Self {
        Self { solutions }
    }
}

impl FromIterator<Solution> for Population {
    fn from_iter<T: IntoIterator<Item = Solution>>(iter: T) -> Self {
        Self {
            solutions: iter.into_iter().collect(),
        }
    }
}

impl Extend<Solution> for Population {
    fn extend<T: IntoIterator<Item = Solution>>(&mut self, iter: T) {
        self.solutions.extend(iter);
    }
}

impl IntoIterator for Population {
    type Item = Solution;
    type IntoIter = std::vec::IntoIter<Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

impl Index<usize> for Population {
    type Output = Solution;

    fn index(&self, index: usize) -> &Solution {
        &self.solutions[index]
    }
}

impl IndexMut<usize> for Population {
    fn index_mut(&mut self, index: usize) -> &mut Solution {
        &mut self.solutions[index]
    }
}
