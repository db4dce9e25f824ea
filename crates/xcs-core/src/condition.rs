//! Condition — the ordered symbol sequence on the left side of a rule.
//!
//! A condition is aligned position-by-position with a situation vector.
//! Its length is fixed at construction. Generality is measured by the
//! number of don't-care symbols, and one condition is at least as general
//! as another when each of its symbols contains the corresponding one.

use crate::error::{Result, XcsError};
use crate::random::RandomSource;
use crate::symbol::{BinarySymbol, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Ordered sequence of symbols matched against a situation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition<S> {
    symbols: Vec<S>,
}

impl<S: Symbol> Condition<S> {
    pub fn new(symbols: Vec<S>) -> Self {
        Self { symbols }
    }

    /// Fully specific condition accepting exactly `situation`.
    pub fn from_situation(situation: &[S::Value]) -> Self {
        Self {
            symbols: situation.iter().map(S::specific).collect(),
        }
    }

    /// Whether every symbol accepts its aligned situation value.
    ///
    /// A situation of the wrong length never matches.
    pub fn matches(&self, situation: &[S::Value]) -> bool {
        self.symbols.len() == situation.len()
            && self
                .symbols
                .iter()
                .zip(situation)
                .all(|(symbol, value)| symbol.matches(value))
    }

    /// Like [`matches`](Self::matches), but reports a length mismatch.
    pub fn try_matches(&self, situation: &[S::Value]) -> Result<bool> {
        if self.symbols.len() != situation.len() {
            return Err(XcsError::length_mismatch(self.symbols.len(), situation.len()));
        }
        Ok(self.matches(situation))
    }

    /// Number of maximally general symbols.
    pub fn dont_care_count(&self) -> usize {
        self.symbols.iter().filter(|s| s.is_dont_care()).count()
    }

    /// Generalize each symbol independently with the given probability.
    pub fn random_generalize(&mut self, probability: f64, rng: &mut RandomSource) {
        for symbol in &mut self.symbols {
            if rng.chance(probability) {
                symbol.generalize();
            }
        }
    }

    /// Whether this condition is at least as general as `other`.
    ///
    /// Conditions of different length are incomparable.
    pub fn contains(&self, other: &Condition<S>) -> bool {
        self.symbols.len() == other.symbols.len()
            && self
                .symbols
                .iter()
                .zip(&other.symbols)
                .all(|(mine, theirs)| mine.contains(theirs))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&S> {
        self.symbols.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.symbols.iter()
    }

    pub fn symbols(&self) -> &[S] {
        &self.symbols
    }
}

impl<S> Index<usize> for Condition<S> {
    type Output = S;

    fn index(&self, idx: usize) -> &S {
        &self.symbols[idx]
    }
}

impl<S> IndexMut<usize> for Condition<S> {
    fn index_mut(&mut self, idx: usize) -> &mut S {
        &mut self.symbols[idx]
    }
}

impl<'a, S> IntoIterator for &'a Condition<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

impl<S: fmt::Display> fmt::Display for Condition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl FromStr for Condition<BinarySymbol> {
    type Err = XcsError;

    fn from_str(s: &str) -> Result<Self> {
        let symbols = s
            .chars()
            .map(BinarySymbol::from_char)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { symbols })
    }
}

/// Parse a `0`/`1` string into a boolean situation.
pub fn binary_situation(s: &str) -> Result<Vec<bool>> {
    s.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(XcsError::InvalidSymbol(other)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::IntervalSymbol;

    fn cond(s: &str) -> Condition<BinarySymbol> {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display_round_trip() {
        assert_eq!(cond("01#1").to_string(), "01#1");
        assert!("01x".parse::<Condition<BinarySymbol>>().is_err());
    }

    #[test]
    fn matches_positionally() {
        let c = cond("1#0");
        assert!(c.matches(&binary_situation("110").unwrap()));
        assert!(c.matches(&binary_situation("100").unwrap()));
        assert!(!c.matches(&binary_situation("111").unwrap()));
    }

    #[test]
    fn length_mismatch_never_matches() {
        let c = cond("###");
        let short = binary_situation("10").unwrap();
        assert!(!c.matches(&short));
        assert_eq!(
            c.try_matches(&short),
            Err(XcsError::LengthMismatch { expected: 3, found: 2 })
        );
    }

    #[test]
    fn dont_care_count_measures_generality() {
        assert_eq!(cond("0#1#").dont_care_count(), 2);
        assert_eq!(cond("0101").dont_care_count(), 0);
    }

    #[test]
    fn containment_ordering() {
        assert!(cond("1##").contains(&cond("10#")));
        assert!(cond("10#").contains(&cond("10#")));
        assert!(!cond("10#").contains(&cond("1##")));
        assert!(!cond("0##").contains(&cond("1##")));
        assert!(!cond("##").contains(&cond("###")));
    }

    #[test]
    fn random_generalize_extremes() {
        let mut rng = RandomSource::seeded(3);
        let mut c = cond("0101");
        c.random_generalize(0.0, &mut rng);
        assert_eq!(c.to_string(), "0101");
        c.random_generalize(1.0, &mut rng);
        assert_eq!(c.to_string(), "####");
    }

    #[test]
    fn random_generalize_only_widens() {
        let mut rng = RandomSource::seeded(17);
        let original = cond("01100110");
        let mut c = original.clone();
        c.random_generalize(0.5, &mut rng);
        assert!(c.contains(&original));
    }

    #[test]
    fn from_situation_is_fully_specific() {
        let c = Condition::<IntervalSymbol>::from_situation(&[0.2, 0.8]);
        assert!(c.matches(&[0.2, 0.8]));
        assert!(!c.matches(&[0.2, 0.81]));
        assert_eq!(c.dont_care_count(), 0);
    }
}
