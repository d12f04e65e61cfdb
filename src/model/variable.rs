//! Decision variables.

/// Semantic value kind of a decision variable.
///
/// Operators dispatch on this tag instead of on a per-kind type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableKind {
    /// Continuous value bounded by `[lower, upper]`.
    Real,
    /// Integer value bounded by `[round(lower), round(upper)]`.
    Integer,
    /// Boolean flag.
    Boolean,
    /// Element of a permutation of `[0, n)`.
    Permutation,
}

/// A single decision value.
///
/// Equality is value equality. A variable is owned by exactly one
/// [`Solution`](super::Solution); mutation replaces the value in place.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variable {
    /// Real-coded value.
    Real(f64),
    /// Integer-coded value (e.g. a grammatical-evolution codon).
    Integer(i64),
    /// Boolean-coded value.
    Boolean(bool),
    /// Permutation element.
    Permutation(usize),
}

impl Variable {
    /// Returns the kind tag of this value.
    pub fn kind(&self) -> VariableKind {
        match self {
            Variable::Real(_) => VariableKind::Real,
            Variable::Integer(_) => VariableKind::Integer,
            Variable::Boolean(_) => VariableKind::Boolean,
            Variable::Permutation(_) => VariableKind::Permutation,
        }
    }

    /// The value as `f64`, for any numeric kind.
    ///
    /// Booleans map to `0.0`/`1.0`.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Variable::Real(v) => v,
            Variable::Integer(v) => v as f64,
            Variable::Boolean(v) => {
                if v {
                    1.0
                } else {
                    0.0
                }
            }
            Variable::Permutation(v) => v as f64,
        }
    }

    /// The real value, if this is a real variable.
    pub fn as_real(&self) -> Option<f64> {
        match *self {
            Variable::Real(v) => Some(v),
            _ => None,
        }
    }

    /// The integer value, if this is an integer variable.
    pub fn as_integer(&self) -> Option<i64> {
        match *self {
            Variable::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// The boolean value, if this is a boolean variable.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Variable::Boolean(v) => Some(v),
            _ => None,
        }
    }

    /// The permutation element, if this is a permutation variable.
    pub fn as_index(&self) -> Option<usize> {
        match *self {
            Variable::Permutation(v) => Some(v),
            _ => None,
        }
    }
}
