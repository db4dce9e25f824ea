//! Match set — population members whose condition matches the situation.
//!
//! Rebuilt from scratch every decision cycle. Covering is left to the
//! host: [`MatchSet::unselected_actions`] tells it which actions still lack
//! a matching rule.

use crate::classifier_ptr_set::{ClassifierPtrSet, Population};
use indexmap::IndexSet;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;
use tracing::debug;
use xcs_core::classifier::Action;
use xcs_core::constants::Constants;
use xcs_core::symbol::Symbol;

/// View of the population restricted to rules matching one situation.
#[derive(Debug, Clone)]
pub struct MatchSet<S, A> {
    set: ClassifierPtrSet<S, A>,
}

impl<S: Symbol, A: Action> MatchSet<S, A> {
    pub fn new(constants: Rc<Constants>, available_actions: Rc<IndexSet<A>>) -> Self {
        Self {
            set: ClassifierPtrSet::new(constants, available_actions),
        }
    }

    /// Empty match set sharing the population's constants and actions.
    pub fn for_population(population: &Population<S, A>) -> Self {
        Self {
            set: population.empty_like(),
        }
    }

    /// Replace membership with every population member matching `situation`.
    pub fn regenerate(&mut self, population: &Population<S, A>, situation: &[S::Value]) {
        self.set.clear();
        for cl in population {
            if cl.borrow().condition.matches(situation) {
                self.set.insert(cl.clone());
            }
        }
        debug!(
            population = population.len(),
            matched = self.set.len(),
            "match set regenerated"
        );
    }

    /// Distinct actions advocated by members, in first-seen order.
    pub fn present_actions(&self) -> IndexSet<A> {
        self.set.iter().map(|cl| cl.borrow().action.clone()).collect()
    }

    /// Available actions with no matching member.
    pub fn unselected_actions(&self) -> IndexSet<A> {
        let present = self.present_actions();
        self.set
            .available_actions()
            .iter()
            .filter(|a| !present.contains(*a))
            .cloned()
            .collect()
    }
}

impl<S, A> Deref for MatchSet<S, A> {
    type Target = ClassifierPtrSet<S, A>;

    fn deref(&self) -> &Self::Target {
        &self.set
    }
}

impl<S, A> DerefMut for MatchSet<S, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.set
    }
}

impl<'a, S, A> IntoIterator for &'a MatchSet<S, A> {
    type Item = <&'a ClassifierPtrSet<S, A> as IntoIterator>::Item;
    type IntoIter = <&'a ClassifierPtrSet<S, A> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        (&self.set).into_iter()
    }
}
