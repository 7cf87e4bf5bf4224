//! Property tests for the severity order and the aggregation rule.

use proptest::prelude::*;
use stairway_core::{AggregateResult, Outcome, Recordable, ResultKind, State, StepResult};

fn any_state() -> impl Strategy<Value = State> {
    prop::sample::select(State::ALL.to_vec())
}

proptest! {
    /// The declared worst-to-best order is the comparison order, and it
    /// is total: rank comparison and `Ord` always agree.
    #[test]
    fn severity_order_is_total_and_stable(a in any_state(), b in any_state()) {
        let rank = |state: State| State::ALL.iter().position(|s| *s == state).unwrap();
        prop_assert_eq!(a.cmp(&b), rank(a).cmp(&rank(b)));
        // antisymmetry: exactly one relation holds
        match a.cmp(&b) {
            std::cmp::Ordering::Less => prop_assert!(a < b && b > a),
            std::cmp::Ordering::Greater => prop_assert!(a > b && b < a),
            std::cmp::Ordering::Equal => prop_assert!(a == b),
        }
    }

    /// Bad states are exactly those at or worse than ABEND.
    #[test]
    fn bad_states_are_downward_closed(state in any_state()) {
        prop_assert_eq!(state.is_bad(), state <= State::Abend);
        if state.is_bad() {
            prop_assert!(State::BAD_STATES.contains(&state));
        }
    }

    /// After recording children c1..cn in order, the aggregate's state is
    /// min(state(c1..cn)) and its description/message come from the first
    /// child achieving that minimum.
    #[test]
    fn aggregation_is_running_minimum_with_first_tie_break(
        states in prop::collection::vec(any_state(), 1..16)
    ) {
        let mut aggregate = AggregateResult::new(ResultKind::Flight, "prop", "prop");
        for (index, state) in states.iter().enumerate() {
            let step = StepResult::new(Outcome::new(
                format!("child {index}"),
                *state,
                format!("message {index}"),
            ));
            aggregate.record(step.into_record());
        }

        let worst = states.iter().copied().min().unwrap();
        prop_assert_eq!(aggregate.state(), worst);
        prop_assert_eq!(aggregate.children().len(), states.len());

        // only a strictly-worse child replaces the head, so when every
        // child is UNTESTED the aggregate keeps its own identity text
        if worst < State::Untested {
            let first = states.iter().position(|s| *s == worst).unwrap();
            prop_assert_eq!(
                aggregate.outcome().description.clone(),
                format!("child {first}")
            );
            prop_assert_eq!(
                aggregate.outcome().message.clone(),
                format!("message {first}")
            );
        }
    }

    /// Recording order changes the tie-break only, never the final
    /// severity value.
    #[test]
    fn aggregation_severity_is_order_insensitive(
        states in prop::collection::vec(any_state(), 1..16)
    ) {
        let record_all = |states: &[State]| {
            let mut aggregate = AggregateResult::new(ResultKind::Flight, "prop", "prop");
            for state in states {
                let step = StepResult::new(Outcome::new("c", *state, ""));
                aggregate.record(step.into_record());
            }
            aggregate.state()
        };

        let mut reversed = states.clone();
        reversed.reverse();
        prop_assert_eq!(record_all(&states), record_all(&reversed));
    }
}
