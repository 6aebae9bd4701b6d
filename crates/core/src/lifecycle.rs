//! Lifecycle state machine: the only allowed set of prospect transitions
//! (§4.9). Encoded as data; the machine itself is a pure function.

use lazy_static::lazy_static;

use prospecting_domain::ProspectStatus;

lazy_static! {
    /// The complete, ordered transition table. Any `(current, target)` pair
    /// not in this list is rejected.
    static ref TRANSITIONS: Vec<(ProspectStatus, ProspectStatus)> = vec![
        (ProspectStatus::Scanned, ProspectStatus::Scheduled),
        (ProspectStatus::Scheduled, ProspectStatus::Testing),
        (ProspectStatus::Testing, ProspectStatus::Tested),
        (ProspectStatus::Tested, ProspectStatus::Scored),
        (ProspectStatus::Scored, ProspectStatus::ReadyAssets),
        (ProspectStatus::ReadyAssets, ProspectStatus::ReadyToSend),
        (ProspectStatus::ReadyToSend, ProspectStatus::SentManual),
    ];
}

/// True iff `(current, target)` is one of the enumerated transitions.
/// `SENT_MANUAL` is terminal: nothing transitions out of it.
#[must_use]
pub fn can_transition(current: ProspectStatus, target: ProspectStatus) -> bool {
    TRANSITIONS.iter().any(|(from, to)| *from == current && *to == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProspectStatus::{Scanned, Scheduled, SentManual, Tested, Testing};

    #[test]
    fn enumerated_transitions_are_allowed() {
        assert!(can_transition(Scanned, Scheduled));
        assert!(can_transition(Scheduled, Testing));
        assert!(can_transition(Testing, Tested));
    }

    #[test]
    fn skipping_states_is_rejected() {
        assert!(!can_transition(Scanned, Tested));
    }

    #[test]
    fn backward_transitions_are_rejected() {
        assert!(!can_transition(ProspectStatus::ReadyToSend, Scanned));
    }

    #[test]
    fn terminal_state_has_no_outgoing_transitions() {
        for target in [Scanned, Scheduled, Testing, Tested, SentManual] {
            assert!(!can_transition(SentManual, target));
        }
    }

    #[test]
    fn transitions_are_not_transitive() {
        // can_transition(a,b) && can_transition(b,c) does not imply can_transition(a,c)
        assert!(can_transition(Scanned, Scheduled));
        assert!(can_transition(Scheduled, Testing));
        assert!(!can_transition(Scanned, Testing));
    }
}
