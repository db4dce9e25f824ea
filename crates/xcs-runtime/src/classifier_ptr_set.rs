//! Shared classifier handles and the identity-keyed set that stores them.
//!
//! The population owns its classifiers through [`ClassifierPtr`] handles.
//! Match sets and action sets clone those same handles for the length of
//! one decision cycle, so a parameter update made through an action set is
//! immediately visible in the population. Set membership is decided by
//! handle identity, never by comparing rule contents: two structurally
//! equal classifiers are still two members.

use indexmap::IndexSet;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use xcs_core::classifier::{Action, Classifier};
use xcs_core::constants::Constants;
use xcs_core::symbol::Symbol;

/// Shared, interior-mutable handle to one classifier.
pub struct ClassifierPtr<S, A>(Rc<RefCell<Classifier<S, A>>>);

impl<S, A> ClassifierPtr<S, A> {
    pub fn new(classifier: Classifier<S, A>) -> Self {
        Self(Rc::new(RefCell::new(classifier)))
    }

    pub fn borrow(&self) -> Ref<'_, Classifier<S, A>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Classifier<S, A>> {
        self.0.borrow_mut()
    }

    /// Whether both handles refer to the same classifier object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles to this classifier.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl<S, A> Clone for ClassifierPtr<S, A> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<S, A> PartialEq for ClassifierPtr<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<S, A> Eq for ClassifierPtr<S, A> {}

impl<S, A> Hash for ClassifierPtr<S, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state)
    }
}

impl<S: fmt::Debug, A: fmt::Debug> fmt::Debug for ClassifierPtr<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassifierPtr")
            .field(&Rc::as_ptr(&self.0))
            .field(&*self.0.borrow())
            .finish()
    }
}

/// Identity-keyed set of classifier handles plus the shared learning context.
///
/// Iteration follows insertion order, which keeps seeded runs reproducible.
/// Erasing a handle only affects this set; other sets holding the same
/// classifier keep it.
pub struct ClassifierPtrSet<S, A> {
    set: IndexSet<ClassifierPtr<S, A>>,
    constants: Rc<Constants>,
    available_actions: Rc<IndexSet<A>>,
}

/// The long-lived owner of every classifier.
pub type Population<S, A> = ClassifierPtrSet<S, A>;

impl<S: Symbol, A: Action> ClassifierPtrSet<S, A> {
    pub fn new(constants: Rc<Constants>, available_actions: Rc<IndexSet<A>>) -> Self {
        Self {
            set: IndexSet::new(),
            constants,
            available_actions,
        }
    }

    /// Empty set sharing this set's constants and action space.
    pub fn empty_like(&self) -> Self {
        Self::new(Rc::clone(&self.constants), Rc::clone(&self.available_actions))
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    pub fn shared_constants(&self) -> Rc<Constants> {
        Rc::clone(&self.constants)
    }

    pub fn available_actions(&self) -> &IndexSet<A> {
        &self.available_actions
    }

    pub fn shared_actions(&self) -> Rc<IndexSet<A>> {
        Rc::clone(&self.available_actions)
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, ClassifierPtr<S, A>> {
        self.set.iter()
    }

    /// Insert a handle. Returns `false` if that exact classifier is already present.
    pub fn insert(&mut self, classifier: ClassifierPtr<S, A>) -> bool {
        self.set.insert(classifier)
    }

    /// Wrap a new classifier in a handle, insert it, and return the handle.
    pub fn insert_classifier(&mut self, classifier: Classifier<S, A>) -> ClassifierPtr<S, A> {
        let ptr = ClassifierPtr::new(classifier);
        self.set.insert(ptr.clone());
        ptr
    }

    /// Remove a handle from this set only. Returns whether it was present.
    pub fn erase(&mut self, classifier: &ClassifierPtr<S, A>) -> bool {
        self.set.shift_remove(classifier)
    }

    pub fn clear(&mut self) {
        self.set.clear();
    }

    /// Exchange members with another set. Constants and actions stay put.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.set, &mut other.set);
    }

    pub fn find(&self, classifier: &ClassifierPtr<S, A>) -> Option<&ClassifierPtr<S, A>> {
        self.set.get(classifier)
    }

    /// 1 if the handle is a member, 0 otherwise.
    pub fn count(&self, classifier: &ClassifierPtr<S, A>) -> usize {
        usize::from(self.set.contains(classifier))
    }

    pub fn contains(&self, classifier: &ClassifierPtr<S, A>) -> bool {
        self.set.contains(classifier)
    }

    /// Total numerosity of all members (micro-classifier count).
    pub fn numerosity_sum(&self) -> u64 {
        self.set.iter().map(|cl| cl.borrow().numerosity).sum()
    }
}

impl<S, A> Clone for ClassifierPtrSet<S, A> {
    fn clone(&self) -> Self {
        Self {
            set: self.set.clone(),
            constants: Rc::clone(&self.constants),
            available_actions: Rc::clone(&self.available_actions),
        }
    }
}

impl<S: fmt::Debug, A: fmt::Debug> fmt::Debug for ClassifierPtrSet<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.set.iter()).finish()
    }
}

impl<'a, S, A> IntoIterator for &'a ClassifierPtrSet<S, A> {
    type Item = &'a ClassifierPtr<S, A>;
    type IntoIter = indexmap::set::Iter<'a, ClassifierPtr<S, A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xcs_core::symbol::BinarySymbol;

    fn empty_set() -> ClassifierPtrSet<BinarySymbol, u8> {
        ClassifierPtrSet::new(
            Rc::new(Constants::default()),
            Rc::new([0u8, 1].into_iter().collect()),
        )
    }

    fn rule(cond: &str, action: u8) -> Classifier<BinarySymbol, u8> {
        Classifier::new(cond.parse().unwrap(), action, 0, &Constants::default())
    }

    #[test]
    fn insert_is_idempotent_per_handle() {
        let mut set = empty_set();
        let ptr = ClassifierPtr::new(rule("01", 0));
        assert!(set.insert(ptr.clone()));
        assert!(!set.insert(ptr.clone()));
        assert_eq!(set.len(), 1);
        assert_eq!(set.count(&ptr), 1);
    }

    #[test]
    fn equal_rules_are_distinct_members() {
        let mut set = empty_set();
        set.insert_classifier(rule("01", 0));
        set.insert_classifier(rule("01", 0));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn erase_only_touches_this_set() {
        let mut population = empty_set();
        let mut view = population.empty_like();
        let ptr = population.insert_classifier(rule("1#", 1));
        view.insert(ptr.clone());

        assert!(view.erase(&ptr));
        assert!(!view.erase(&ptr));
        assert!(view.find(&ptr).is_none());
        assert!(population.contains(&ptr));
    }

    #[test]
    fn mutation_through_one_set_is_seen_by_another() {
        let mut population = empty_set();
        let mut view = population.empty_like();
        let ptr = population.insert_classifier(rule("1#", 1));
        view.insert(ptr.clone());

        for cl in &view {
            cl.borrow_mut().numerosity = 4;
        }
        assert_eq!(population.numerosity_sum(), 4);
    }

    #[test]
    fn swap_exchanges_members() {
        let mut a = empty_set();
        let mut b = a.empty_like();
        a.insert_classifier(rule("00", 0));
        a.insert_classifier(rule("11", 1));
        b.insert_classifier(rule("##", 1));

        a.swap(&mut b);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
        a.clear();
        assert!(a.is_empty());
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut set = empty_set();
        let first = set.insert_classifier(rule("00", 0));
        let second = set.insert_classifier(rule("01", 0));
        let third = set.insert_classifier(rule("10", 0));
        set.erase(&second);
        let order: Vec<_> = set.iter().cloned().collect();
        assert_eq!(order, vec![first, third]);
    }
}
