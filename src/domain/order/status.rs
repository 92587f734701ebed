//! Order status state machine.
//!
//! Orders move forward only: New → InProgress → Delivered, with Canceled
//! reachable from New or InProgress. Delivered and Canceled are terminal.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed by the customer, not yet picked up by the restaurant.
    #[default]
    New,
    /// Being prepared or out for delivery.
    InProgress,
    /// Handed to the customer.
    Delivered,
    /// Abandoned before delivery.
    Canceled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::New,
        OrderStatus::InProgress,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ];
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            (New, InProgress) | (New, Canceled) | (InProgress, Delivered) | (InProgress, Canceled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            New => vec![InProgress, Canceled],
            InProgress => vec![Delivered, Canceled],
            Delivered | Canceled => vec![],
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::New => "New",
            OrderStatus::InProgress => "InProgress",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Canceled => "Canceled",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rank(status: OrderStatus) -> u8 {
        match status {
            OrderStatus::New => 0,
            OrderStatus::InProgress => 1,
            OrderStatus::Delivered => 2,
            OrderStatus::Canceled => 2,
        }
    }

    fn any_status() -> impl Strategy<Value = OrderStatus> {
        prop::sample::select(OrderStatus::ALL.to_vec())
    }

    #[test]
    fn new_can_start_or_cancel() {
        assert!(OrderStatus::New.can_transition_to(&OrderStatus::InProgress));
        assert!(OrderStatus::New.can_transition_to(&OrderStatus::Canceled));
        assert!(!OrderStatus::New.can_transition_to(&OrderStatus::Delivered));
    }

    #[test]
    fn in_progress_can_deliver_or_cancel() {
        assert_eq!(
            OrderStatus::InProgress.valid_transitions(),
            vec![OrderStatus::Delivered, OrderStatus::Canceled]
        );
    }

    #[test]
    fn delivered_cannot_go_back_to_in_progress() {
        let result = OrderStatus::Delivered.transition_to(OrderStatus::InProgress);
        assert!(result.is_err());
    }

    #[test]
    fn delivered_and_canceled_are_terminal() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
        assert!(!OrderStatus::New.is_terminal());
    }

    #[test]
    fn self_transitions_are_rejected() {
        for status in OrderStatus::ALL {
            assert!(!status.can_transition_to(&status), "{status} -> {status}");
        }
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    proptest! {
        #[test]
        fn accepted_transitions_always_move_forward(from in any_status(), to in any_status()) {
            if from.can_transition_to(&to) {
                prop_assert!(rank(to) > rank(from));
                prop_assert!(!from.is_terminal());
            }
        }

        #[test]
        fn accepted_transitions_never_skip_in_progress(from in any_status(), to in any_status()) {
            if from == OrderStatus::New && to == OrderStatus::Delivered {
                prop_assert!(from.transition_to(to).is_err());
            }
        }

        #[test]
        fn transition_to_agrees_with_valid_transitions(from in any_status(), to in any_status()) {
            prop_assert_eq!(
                from.transition_to(to).is_ok(),
                from.valid_transitions().contains(&to)
            );
        }
    }
}
