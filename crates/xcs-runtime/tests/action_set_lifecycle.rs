//! Action set lifecycle: regeneration, reinforcement, subsumption, GA trigger.

use std::rc::Rc;
use xcs_runtime::prelude::*;

type Pop = Population<BinarySymbol, char>;
type Ptr = ClassifierPtr<BinarySymbol, char>;

fn population(constants: Constants) -> Pop {
    Population::new(Rc::new(constants), Rc::new(['A', 'B'].into_iter().collect()))
}

fn add(pop: &mut Pop, cond: &str, action: char) -> Ptr {
    let cl = Classifier::new(cond.parse().unwrap(), action, 0, pop.constants());
    pop.insert_classifier(cl)
}

/// Experienced, accurate rule predicting `prediction`.
fn add_veteran(pop: &mut Pop, cond: &str, action: char, prediction: f64) -> Ptr {
    let ptr = add(pop, cond, action);
    {
        let mut cl = ptr.borrow_mut();
        cl.experience = 50;
        cl.prediction = prediction;
        cl.prediction_error = 0.0;
        cl.fitness = 0.5;
    }
    ptr
}

fn action_set(pop: &Pop, situation: &str, action: char) -> ActionSet<BinarySymbol, char> {
    let mut ms = MatchSet::for_population(pop);
    ms.regenerate(pop, &binary_situation(situation).unwrap());
    ActionSet::from_match_set(&ms, &action)
}

/// Counts invocations and optionally inserts one offspring per run.
#[derive(Default)]
struct RecordingGa {
    runs: usize,
    seen_sizes: Vec<usize>,
    breed: bool,
}

impl GeneticAlgorithm<BinarySymbol, char> for RecordingGa {
    fn run(
        &mut self,
        action_set: &mut ActionSet<BinarySymbol, char>,
        situation: &[bool],
        population: &mut Pop,
        rng: &mut RandomSource,
    ) {
        self.runs += 1;
        self.seen_sizes.push(action_set.len());
        if self.breed {
            let parent = rng.choose_from(&action_set.iter().cloned().collect::<Vec<_>>());
            let mut child = parent.borrow().clone();
            child.numerosity = 1;
            child.experience = 0;
            assert!(child.condition.matches(situation));
            population.insert_classifier(child);
        }
    }
}

#[test]
fn regenerate_selects_members_with_target_action_by_identity() {
    let mut pop = population(Constants::default());
    let a1 = add(&mut pop, "1#", 'A');
    let a2 = add(&mut pop, "1#", 'A');
    let b = add(&mut pop, "#0", 'B');

    let aset = action_set(&pop, "10", 'A');
    assert_eq!(aset.len(), 2);
    assert!(aset.contains(&a1));
    assert!(aset.contains(&a2));
    assert!(!aset.contains(&b));
}

#[test]
fn fitness_update_is_a_convex_step() {
    let constants = Constants::default().with_action_set_subsumption(false);
    let mut pop = population(constants.clone());
    let rules = [
        add_veteran(&mut pop, "1#", 'A', 800.0),
        add_veteran(&mut pop, "#0", 'A', 300.0),
        add_veteran(&mut pop, "10", 'A', 550.0),
    ];
    rules[1].borrow_mut().numerosity = 3;
    rules[2].borrow_mut().fitness = 0.05;
    let before: Vec<f64> = rules.iter().map(|r| r.borrow().fitness).collect();

    let mut aset = action_set(&pop, "10", 'A');
    aset.update(600.0, &mut pop, &mut RandomSource::seeded(1));

    let accuracy_sum: f64 = rules
        .iter()
        .map(|r| r.borrow().accuracy(&constants) * r.borrow().numerosity as f64)
        .sum();
    for (rule, old) in rules.iter().zip(before) {
        let cl = rule.borrow();
        let target = cl.accuracy(&constants) * cl.numerosity as f64 / accuracy_sum;
        let (lo, hi) = if old < target { (old, target) } else { (target, old) };
        assert!(
            cl.fitness >= lo - 1e-12 && cl.fitness <= hi + 1e-12,
            "fitness {} outside [{}, {}]",
            cl.fitness,
            lo,
            hi
        );
    }
}

#[test]
fn subsumption_merges_covered_rules_and_keeps_numerosity() {
    let mut pop = population(Constants::default());
    let general = add_veteran(&mut pop, "1#", 'A', 500.0);
    let specific = add(&mut pop, "10", 'A');
    specific.borrow_mut().numerosity = 2;
    let sibling = add(&mut pop, "#0", 'A');
    let other_action = add(&mut pop, "10", 'B');

    let mut aset = action_set(&pop, "10", 'A');
    let before = aset.numerosity_sum();
    aset.update(500.0, &mut pop, &mut RandomSource::seeded(3));

    assert_eq!(aset.numerosity_sum(), before);
    assert_eq!(general.borrow().numerosity, 3);
    assert!(!pop.contains(&specific));
    assert!(!aset.contains(&specific));
    assert!(pop.contains(&general));
    assert!(pop.contains(&sibling));
    assert!(pop.contains(&other_action));

    // The absorbed rule is referenced by nothing but this test.
    assert_eq!(specific.handle_count(), 1);
    assert_eq!(general.handle_count(), 3);
    drop(aset);
    assert_eq!(general.handle_count(), 2);
}

#[test]
fn subsumer_never_absorbs_itself() {
    let mut pop = population(Constants::default());
    let first = add_veteran(&mut pop, "1#", 'A', 500.0);
    let twin = add_veteran(&mut pop, "1#", 'A', 500.0);

    let mut aset = action_set(&pop, "11", 'A');
    aset.update(500.0, &mut pop, &mut RandomSource::seeded(8));

    assert_eq!(pop.len(), 1);
    assert_eq!(aset.len(), 1);
    let survivor = pop.iter().next().unwrap().clone();
    assert!(survivor == first || survivor == twin);
    assert_eq!(survivor.borrow().numerosity, 2);
    assert!(aset.contains(&survivor));
}

#[test]
fn equally_general_subsumers_are_picked_at_random() {
    let mut first_won = 0;
    let mut second_won = 0;
    for seed in 0..64 {
        let mut pop = population(Constants::default());
        let left = add_veteran(&mut pop, "1#", 'A', 500.0);
        let right = add_veteran(&mut pop, "#0", 'A', 500.0);
        let specific = add(&mut pop, "10", 'A');

        let mut aset = action_set(&pop, "10", 'A');
        aset.update(500.0, &mut pop, &mut RandomSource::seeded(seed));

        assert!(!pop.contains(&specific));
        assert_eq!(left.borrow().numerosity + right.borrow().numerosity, 3);
        if left.borrow().numerosity == 2 {
            first_won += 1;
        } else {
            second_won += 1;
        }
    }
    assert!(first_won > 0 && second_won > 0);
}

#[test]
fn inexperienced_rules_do_not_subsume() {
    let mut pop = population(Constants::default());
    add(&mut pop, "1#", 'A');
    add(&mut pop, "10", 'A');

    let mut aset = action_set(&pop, "10", 'A');
    aset.update(500.0, &mut pop, &mut RandomSource::seeded(0));
    assert_eq!(pop.len(), 2);
}

#[test]
fn disabled_subsumption_removes_nothing() {
    let mut pop = population(Constants::default().with_action_set_subsumption(false));
    add_veteran(&mut pop, "1#", 'A', 500.0);
    add(&mut pop, "10", 'A');

    let mut aset = action_set(&pop, "10", 'A');
    aset.update(500.0, &mut pop, &mut RandomSource::seeded(0));
    assert_eq!(pop.len(), 2);
    assert_eq!(aset.len(), 2);
}

fn time_stamped_population(theta_ga: u64) -> (Pop, Vec<Ptr>) {
    let mut pop = population(Constants::default().with_theta_ga(theta_ga));
    let rules = vec![add(&mut pop, "1#", 'A'), add(&mut pop, "#1", 'A'), add(&mut pop, "11", 'A')];
    rules[2].borrow_mut().time_stamp = 10;
    rules[2].borrow_mut().numerosity = 2;
    (pop, rules)
}

#[test]
fn ga_fires_when_weighted_time_gap_exceeds_threshold() {
    // Weighted average time stamp: (0 + 0 + 10 * 2) / 4 = 5, gap at t = 100 is 95.
    let (mut pop, rules) = time_stamped_population(94);
    let mut aset = action_set(&pop, "11", 'A');
    let mut ga = RecordingGa::default();

    assert!(aset.run_ga(&mut ga, &binary_situation("11").unwrap(), &mut pop, 100, &mut RandomSource::seeded(0)));
    assert_eq!(ga.runs, 1);
    assert_eq!(ga.seen_sizes, vec![3]);
    for rule in &rules {
        assert_eq!(rule.borrow().time_stamp, 100);
    }
}

#[test]
fn ga_waits_at_threshold() {
    let (mut pop, rules) = time_stamped_population(95);
    let mut aset = action_set(&pop, "11", 'A');
    let mut ga = RecordingGa::default();

    assert!(!aset.run_ga(&mut ga, &binary_situation("11").unwrap(), &mut pop, 100, &mut RandomSource::seeded(0)));
    assert_eq!(ga.runs, 0);
    assert_eq!(rules[0].borrow().time_stamp, 0);
    assert_eq!(rules[2].borrow().time_stamp, 10);
}

#[test]
fn restamped_set_is_not_due_again_immediately() {
    let (mut pop, _) = time_stamped_population(25);
    let situation = binary_situation("11").unwrap();
    let mut aset = action_set(&pop, "11", 'A');
    let mut ga = RecordingGa::default();
    let mut rng = RandomSource::seeded(0);

    assert!(aset.run_ga(&mut ga, &situation, &mut pop, 100, &mut rng));
    assert!(!aset.run_ga(&mut ga, &situation, &mut pop, 110, &mut rng));
    assert!(aset.run_ga(&mut ga, &situation, &mut pop, 126, &mut rng));
    assert_eq!(ga.runs, 2);
}

#[test]
fn ga_offspring_land_in_population() {
    let (mut pop, _) = time_stamped_population(0);
    let mut aset = action_set(&pop, "11", 'A');
    let mut ga = RecordingGa {
        breed: true,
        ..Default::default()
    };

    aset.run_ga(&mut ga, &binary_situation("11").unwrap(), &mut pop, 50, &mut RandomSource::seeded(4));
    assert_eq!(pop.len(), 4);
    assert_eq!(aset.len(), 3);
}

#[test]
#[should_panic(expected = "empty action set")]
fn run_ga_on_empty_set_panics() {
    let mut pop = population(Constants::default());
    let mut aset = ActionSet::new(pop.shared_constants(), pop.shared_actions());
    let mut ga = RecordingGa::default();
    aset.run_ga(&mut ga, &[], &mut pop, 10, &mut RandomSource::seeded(0));
}
