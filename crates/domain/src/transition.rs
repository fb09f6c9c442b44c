//! State tracker — turns successive desired states into edge-triggered transitions.

use crate::decision::DesiredState;

/// What the controller has to do to the player this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Desired state unchanged; issue nothing.
    None,
    TurnOn,
    TurnOff,
}

/// Compare the fresh desired state against the last committed one.
///
/// `last_desired` is `None` until the first transition commits; in that
/// case the transition matching `desired` is always returned so the player
/// is forced into a known state at startup.
#[must_use]
pub fn should_transition(desired: DesiredState, last_desired: Option<DesiredState>) -> Transition {
    match (desired, last_desired) {
        (desired, Some(last)) if desired == last => Transition::None,
        (DesiredState::On, _) => Transition::TurnOn,
        (DesiredState::Off, _) => Transition::TurnOff,
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::TurnOn => f.write_str("turn_on"),
            Self::TurnOff => f.write_str("turn_off"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_yield_none_for_repeated_state() {
        assert_eq!(
            should_transition(DesiredState::On, Some(DesiredState::On)),
            Transition::None
        );
        assert_eq!(
            should_transition(DesiredState::Off, Some(DesiredState::Off)),
            Transition::None
        );
    }

    #[test]
    fn should_alternate_on_off_on() {
        let mut last = Some(DesiredState::Off);
        let mut seen = Vec::new();
        for desired in [DesiredState::On, DesiredState::Off, DesiredState::On] {
            seen.push(should_transition(desired, last));
            last = Some(desired);
        }
        assert_eq!(
            seen,
            vec![Transition::TurnOn, Transition::TurnOff, Transition::TurnOn]
        );
    }

    #[test]
    fn should_force_transition_when_nothing_committed_yet() {
        assert_eq!(should_transition(DesiredState::On, None), Transition::TurnOn);
        assert_eq!(should_transition(DesiredState::Off, None), Transition::TurnOff);
    }
}
