//! Property-based tests for reaper ordering and failure aggregation

use ebb::testing::{Journal, Outcome};
use ebb::{BoxDestructor, Destructor, ErrorKind, MaybeReaper, Reaper, NOOP};
use proptest::prelude::*;

fn outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        4 => Just(Outcome::Succeed),
        2 => Just(Outcome::Fail),
        1 => Just(Outcome::Panic),
    ]
}

fn fill(journal: &Journal, reaper: &mut Reaper, outcomes: &[Outcome]) {
    for (id, &outcome) in outcomes.iter().enumerate() {
        reaper.assume(journal.scripted(id, outcome)).unwrap();
    }
}

fn reversed_ids(n: usize) -> Vec<usize> {
    (0..n).rev().collect()
}

/// Ids of the failing destructors, in the order they run.
fn failing_ids(outcomes: &[Outcome]) -> Vec<usize> {
    (0..outcomes.len())
        .rev()
        .filter(|&id| outcomes[id] != Outcome::Succeed)
        .collect()
}

/// Kind each failure is reported as, in the order they run.
fn failing_kinds(outcomes: &[Outcome]) -> Vec<ErrorKind> {
    outcomes
        .iter()
        .rev()
        .filter_map(|outcome| match outcome {
            Outcome::Succeed => None,
            Outcome::Fail => Some(ErrorKind::Custom),
            Outcome::Panic => Some(ErrorKind::Panicked),
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_release_then_destroy_runs_each_once_in_reverse(n in 0usize..32) {
        let journal = Journal::new();
        let mut reaper = Reaper::new();
        fill(&journal, &mut reaper, &vec![Outcome::Succeed; n]);

        let mut dtor = reaper.release().unwrap();
        prop_assert!(journal.is_empty());

        prop_assert!(dtor.destroy().is_ok());
        prop_assert_eq!(journal.runs(), reversed_ids(n));
    }

    #[test]
    fn prop_finalize_runs_each_once_in_reverse(n in 0usize..32) {
        let journal = Journal::new();
        let mut reaper = Reaper::new();
        fill(&journal, &mut reaper, &vec![Outcome::Succeed; n]);

        prop_assert!(reaper.finalize().is_ok());
        prop_assert_eq!(journal.runs(), reversed_ids(n));
    }

    #[test]
    fn prop_failures_never_stop_siblings(outcomes in prop::collection::vec(outcome(), 0..24)) {
        let journal = Journal::new();
        let mut reaper = Reaper::new();
        fill(&journal, &mut reaper, &outcomes);

        let result = reaper.finalize();
        prop_assert_eq!(journal.runs(), reversed_ids(outcomes.len()));

        let expected = failing_kinds(&outcomes);
        match result {
            Ok(()) => {
                prop_assert!(expected.is_empty());
            }
            Err(err) => {
                let aggregate = err.as_aggregate().unwrap();
                let kinds: Vec<ErrorKind> = aggregate.iter().map(|e| e.kind()).collect();
                prop_assert_eq!(kinds, expected);
            }
        }
    }

    #[test]
    fn prop_aggregate_names_exactly_the_failing_subset(
        outcomes in prop::collection::vec(outcome(), 1..24)
    ) {
        let journal = Journal::new();
        let mut reaper = Reaper::new();
        fill(&journal, &mut reaper, &outcomes);
        let mut dtor = reaper.release().unwrap();

        let expected: Vec<String> = failing_ids(&outcomes)
            .into_iter()
            .map(|id| match outcomes[id] {
                Outcome::Panic => format!("panicked: destructor {} panicked", id),
                _ => format!("destructor {} failed", id),
            })
            .collect();

        let actual: Vec<String> = match dtor.destroy() {
            Ok(()) => Vec::new(),
            Err(err) => err.as_aggregate().unwrap().iter().map(|e| e.to_string()).collect(),
        };
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_terminal_states_never_rerun(n in 0usize..16, release_first in any::<bool>()) {
        let journal = Journal::new();
        let mut reaper = Reaper::new();
        fill(&journal, &mut reaper, &vec![Outcome::Succeed; n]);

        let mut released: Option<BoxDestructor> = None;
        if release_first {
            released = Some(reaper.release().unwrap());
            prop_assert!(reaper.finalize().is_ok());
        } else {
            prop_assert!(reaper.finalize().is_ok());
            prop_assert_eq!(reaper.finalize().unwrap_err().kind(), ErrorKind::IllegalState);
        }

        prop_assert_eq!(reaper.release().unwrap_err().kind(), ErrorKind::IllegalState);
        prop_assert_eq!(reaper.assume(NOOP).unwrap_err().kind(), ErrorKind::IllegalState);
        prop_assert_eq!(
            reaper.assume_boxed(None).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );

        if let Some(mut dtor) = released {
            prop_assert!(journal.is_empty());
            prop_assert!(dtor.destroy().is_ok());
        }
        prop_assert_eq!(journal.runs(), reversed_ids(n));
    }

    #[test]
    fn prop_absent_reaper_is_inert(calls in 1usize..8) {
        let mut absent: Option<Reaper> = None;
        for _ in 0..calls {
            prop_assert_eq!(absent.assume(NOOP).unwrap_err().kind(), ErrorKind::NilReceiver);
            prop_assert!(absent.release().unwrap().destroy().is_ok());
            prop_assert!(absent.finalize().is_ok());
            prop_assert!(!absent.is_released());
            prop_assert!(!absent.is_finalized());
        }
    }
}
