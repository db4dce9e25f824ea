//! Condition symbols — one positional element of a rule's condition.
//!
//! A symbol decides whether it accepts one input value and how general it
//! is relative to another symbol of the same kind. Two representations are
//! provided:
//!
//! - [`BinarySymbol`] — the ternary alphabet `0`, `1`, `#` over boolean inputs
//! - [`IntervalSymbol`] — a closed interval over real inputs
//!   normalized to the unit range
//!
//! The representation is picked once per population through the generic
//! parameter on [`Condition`](crate::condition::Condition), so matching is
//! statically dispatched.

use crate::error::{Result, XcsError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability set of a condition symbol.
///
/// Implementations must keep two laws:
/// - `generalize` never shrinks the set of accepted values.
/// - `contains` is a partial order (reflexive, transitive, antisymmetric
///   up to equality).
pub trait Symbol: Clone + PartialEq + fmt::Debug + fmt::Display {
    /// The input value type this symbol matches against.
    type Value;

    /// Whether this symbol accepts the input value.
    fn matches(&self, value: &Self::Value) -> bool;

    /// Whether every value accepted by `other` is also accepted by `self`.
    fn contains(&self, other: &Self) -> bool;

    /// Widen this symbol to its maximally general form.
    fn generalize(&mut self);

    /// Whether this symbol is maximally general.
    fn is_dont_care(&self) -> bool;

    /// A fully specific symbol accepting exactly `value`.
    fn specific(value: &Self::Value) -> Self;
}

/// Ternary symbol over boolean inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinarySymbol {
    Zero,
    One,
    DontCare,
}

impl BinarySymbol {
    /// Parse one of `0`, `1`, `#`.
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            '0' => Ok(BinarySymbol::Zero),
            '1' => Ok(BinarySymbol::One),
            '#' => Ok(BinarySymbol::DontCare),
            other => Err(XcsError::InvalidSymbol(other)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            BinarySymbol::Zero => '0',
            BinarySymbol::One => '1',
            BinarySymbol::DontCare => '#',
        }
    }
}

impl Symbol for BinarySymbol {
    type Value = bool;

    fn matches(&self, value: &bool) -> bool {
        match self {
            BinarySymbol::DontCare => true,
            BinarySymbol::Zero => !*value,
            BinarySymbol::One => *value,
        }
    }

    fn contains(&self, other: &Self) -> bool {
        *self == BinarySymbol::DontCare || self == other
    }

    fn generalize(&mut self) {
        *self = BinarySymbol::DontCare;
    }

    fn is_dont_care(&self) -> bool {
        *self == BinarySymbol::DontCare
    }

    fn specific(value: &bool) -> Self {
        if *value {
            BinarySymbol::One
        } else {
            BinarySymbol::Zero
        }
    }
}

impl fmt::Display for BinarySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Closed interval over real inputs in `[0, 1]`.
///
/// Built from a center and spread, stored as its bounds. Accepts `value`
/// when `lower <= value <= upper`. The symbol is a don't-care once the
/// interval covers the whole unit range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalSymbol {
    lower: f64,
    upper: f64,
}

impl IntervalSymbol {
    pub fn new(center: f64, spread: f64) -> Self {
        let spread = spread.abs();
        Self {
            lower: center - spread,
            upper: center + spread,
        }
    }

    pub fn from_bounds(lower: f64, upper: f64) -> Self {
        Self {
            lower: lower.min(upper),
            upper: lower.max(upper),
        }
    }

    /// Interval centered on an observed input, used when covering.
    pub fn covering(value: f64, spread: f64) -> Self {
        Self::new(value, spread)
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn spread(&self) -> f64 {
        (self.upper - self.lower) / 2.0
    }
}

impl Symbol for IntervalSymbol {
    type Value = f64;

    fn matches(&self, value: &f64) -> bool {
        self.lower <= *value && *value <= self.upper
    }

    fn contains(&self, other: &Self) -> bool {
        self.lower <= other.lower && other.upper <= self.upper
    }

    fn generalize(&mut self) {
        self.lower = self.lower.min(0.0);
        self.upper = self.upper.max(1.0);
    }

    fn is_dont_care(&self) -> bool {
        self.lower <= 0.0 && self.upper >= 1.0
    }

    fn specific(value: &f64) -> Self {
        Self::from_bounds(*value, *value)
    }
}

impl fmt::Display for IntervalSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3},{:.3}]", self.lower, self.upper)
    }
}
