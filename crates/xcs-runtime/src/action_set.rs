//! Action set — the match set members advocating the executed action.
//!
//! Each decision cycle an action set goes through:
//! 1. `regenerate` from the match set and the chosen action
//! 2. `update` once the payoff is known (parameters, fitness, subsumption)
//! 3. `run_ga`, which only evolves when the set has gone long enough
//!    without a GA invocation
//!
//! Parameters are updated with the Widrow-Hoff delta rule under the MAM
//! warm-up: while a classifier's experience is below `1 / β` the step is
//! `1 / experience` (a plain running mean), afterwards it is `β`.

use crate::classifier_ptr_set::{ClassifierPtr, ClassifierPtrSet, Population};
use crate::ga::GeneticAlgorithm;
use crate::match_set::MatchSet;
use indexmap::IndexSet;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;
use tracing::{debug, trace, warn};
use xcs_core::classifier::Action;
use xcs_core::constants::Constants;
use xcs_core::random::RandomSource;
use xcs_core::symbol::Symbol;

/// The rules of one match set sharing a single action.
#[derive(Debug, Clone)]
pub struct ActionSet<S, A> {
    set: ClassifierPtrSet<S, A>,
}

impl<S: Symbol, A: Action> ActionSet<S, A> {
    pub fn new(constants: Rc<Constants>, available_actions: Rc<IndexSet<A>>) -> Self {
        Self {
            set: ClassifierPtrSet::new(constants, available_actions),
        }
    }

    /// Build an action set and immediately fill it from `match_set`.
    pub fn from_match_set(match_set: &MatchSet<S, A>, action: &A) -> Self {
        let mut action_set = Self {
            set: match_set.empty_like(),
        };
        action_set.regenerate(match_set, action);
        action_set
    }

    /// Replace membership with the match set members whose action is `action`.
    pub fn regenerate(&mut self, match_set: &MatchSet<S, A>, action: &A) {
        self.set.clear();
        for cl in match_set {
            if cl.borrow().action == *action {
                self.set.insert(cl.clone());
            }
        }
        debug!(
            action = ?action,
            size = self.set.len(),
            "action set regenerated"
        );
    }

    /// Copy membership (not the learning context) into `dest`.
    pub fn copy_to(&self, dest: &mut ActionSet<S, A>) {
        dest.set.clear();
        for cl in &self.set {
            dest.set.insert(cl.clone());
        }
    }

    /// Reinforce every member with `payoff`.
    ///
    /// Updates experience, prediction, prediction error, and action set size
    /// estimate member by member, then recomputes fitness over the whole set,
    /// then runs action set subsumption if enabled.
    ///
    /// # Panics
    ///
    /// Panics if the action set is empty.
    pub fn update(
        &mut self,
        payoff: f64,
        population: &mut Population<S, A>,
        rng: &mut RandomSource,
    ) {
        assert!(!self.set.is_empty(), "update called on an empty action set");

        let constants = self.set.shared_constants();
        let numerosity_sum = self.set.numerosity_sum() as f64;

        for ptr in &self.set {
            let mut guard = ptr.borrow_mut();
            let cl = &mut *guard;
            cl.experience += 1;

            let experience = cl.experience as f64;
            let step = if experience < 1.0 / constants.learning_rate {
                1.0 / experience
            } else {
                constants.learning_rate
            };

            cl.prediction += step * (payoff - cl.prediction);
            cl.prediction_error += step * ((payoff - cl.prediction).abs() - cl.prediction_error);
            cl.action_set_size += step * (numerosity_sum - cl.action_set_size);

            trace!(
                experience = cl.experience,
                prediction = cl.prediction,
                prediction_error = cl.prediction_error,
                "classifier reinforced"
            );
        }

        self.update_fitness();

        if constants.do_action_set_subsumption {
            self.do_subsumption(population, rng);
        }
    }

    /// Move each fitness toward its numerosity-weighted relative accuracy.
    ///
    /// All accuracies are computed before any fitness changes, since each
    /// member's target depends on the accuracy sum of the whole set.
    fn update_fitness(&mut self) {
        let constants = self.set.shared_constants();

        let accuracies: Vec<(ClassifierPtr<S, A>, f64)> = self
            .set
            .iter()
            .map(|cl| {
                let kappa = cl.borrow().accuracy(&constants);
                (cl.clone(), kappa)
            })
            .collect();

        let accuracy_sum: f64 = accuracies
            .iter()
            .map(|(cl, kappa)| kappa * cl.borrow().numerosity as f64)
            .sum();

        if accuracy_sum <= 0.0 {
            warn!(size = accuracies.len(), "accuracy sum is zero, fitness left unchanged");
            return;
        }

        for (ptr, kappa) in accuracies {
            let mut guard = ptr.borrow_mut();
            let cl = &mut *guard;
            let relative_accuracy = kappa * cl.numerosity as f64 / accuracy_sum;
            cl.fitness += constants.learning_rate * (relative_accuracy - cl.fitness);
        }
    }

    /// Let the most general subsumer absorb every member it covers.
    ///
    /// Ties on don't-care count are broken by a fair coin each time an
    /// equally general subsumer is met. The chosen subsumer is never merged
    /// into itself.
    fn do_subsumption(&mut self, population: &mut Population<S, A>, rng: &mut RandomSource) {
        let constants = self.set.shared_constants();

        let mut best: Option<(ClassifierPtr<S, A>, usize)> = None;
        for cl in &self.set {
            let candidate = cl.borrow();
            if !candidate.is_subsumer(&constants) {
                continue;
            }
            let generality = candidate.condition.dont_care_count();
            let replace = match &best {
                None => true,
                Some((_, best_generality)) => {
                    generality > *best_generality
                        || (generality == *best_generality && rng.chance(0.5))
                }
            };
            if replace {
                best = Some((cl.clone(), generality));
            }
        }

        let Some((subsumer, _)) = best else {
            return;
        };

        let subsumed: Vec<ClassifierPtr<S, A>> = self
            .set
            .iter()
            .filter(|cl| !cl.ptr_eq(&subsumer) && subsumer.borrow().is_more_general(&cl.borrow()))
            .cloned()
            .collect();

        for cl in &subsumed {
            let absorbed = cl.borrow().numerosity;
            subsumer.borrow_mut().numerosity += absorbed;
            population.erase(cl);
            self.set.erase(cl);
        }

        if !subsumed.is_empty() {
            debug!(
                subsumer = %subsumer.borrow().condition,
                absorbed = subsumed.len(),
                numerosity = subsumer.borrow().numerosity,
                "action set subsumption"
            );
        }
    }

    /// Run the GA if the members' average time stamp is older than `theta_ga`.
    ///
    /// The average is weighted by numerosity. When the GA fires, every
    /// member is stamped with `time_stamp` first. Returns whether it fired.
    ///
    /// # Panics
    ///
    /// Panics if the action set is empty.
    pub fn run_ga<G: GeneticAlgorithm<S, A>>(
        &mut self,
        ga: &mut G,
        situation: &[S::Value],
        population: &mut Population<S, A>,
        time_stamp: u64,
        rng: &mut RandomSource,
    ) -> bool {
        let mut time_stamp_sum = 0u64;
        let mut numerosity_sum = 0u64;
        for cl in &self.set {
            let cl = cl.borrow();
            time_stamp_sum += cl.time_stamp * cl.numerosity;
            numerosity_sum += cl.numerosity;
        }
        assert!(numerosity_sum > 0, "run_ga called on an empty action set");

        let average = time_stamp_sum as f64 / numerosity_sum as f64;
        let gap = time_stamp as f64 - average;
        let theta_ga = self.set.constants().theta_ga as f64;

        if gap <= theta_ga {
            trace!(gap, theta_ga, "GA not due");
            return false;
        }

        debug!(time_stamp, average, gap, theta_ga, "GA triggered");
        for cl in &self.set {
            cl.borrow_mut().time_stamp = time_stamp;
        }
        ga.run(self, situation, population, rng);
        true
    }
}

impl<S, A> Deref for ActionSet<S, A> {
    type Target = ClassifierPtrSet<S, A>;

    fn deref(&self) -> &Self::Target {
        &self.set
    }
}

impl<S, A> DerefMut for ActionSet<S, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.set
    }
}

impl<'a, S, A> IntoIterator for &'a ActionSet<S, A> {
    type Item = <&'a ClassifierPtrSet<S, A> as IntoIterator>::Item;
    type IntoIter = <&'a ClassifierPtrSet<S, A> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        (&self.set).into_iter()
    }
}
