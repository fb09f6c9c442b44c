//! Controller state — the single-writer bookkeeping of the control loop.
//!
//! Only the committed-transition path and the shutdown path mutate it, and
//! both do so under the controller's exclusive section. A failed command
//! never touches `last_desired`, so the same transition is retried on the
//! next tick.

use crate::decision::DesiredState;
use crate::playback::PlaybackState;
use crate::time::Timestamp;
use crate::transition::{Transition, should_transition};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    last_desired: Option<DesiredState>,
    last_transition_at: Option<Timestamp>,
    grace_until: Option<Timestamp>,
    last_playback: PlaybackState,
    consecutive_failures: u32,
    shut_down: bool,
}

impl ControllerState {
    /// The last desired state that was successfully applied to the player.
    #[must_use]
    pub fn last_desired(&self) -> Option<DesiredState> {
        self.last_desired
    }

    #[must_use]
    pub fn last_transition_at(&self) -> Option<Timestamp> {
        self.last_transition_at
    }

    /// The last playback state observed from, or forced onto, the player.
    #[must_use]
    pub fn last_playback(&self) -> PlaybackState {
        self.last_playback
    }

    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Whether re-evaluation is suppressed at `now`.
    #[must_use]
    pub fn in_grace_period(&self, now: Timestamp) -> bool {
        self.grace_until.is_some_and(|until| now < until)
    }

    /// The transition needed to reach `desired` from what was last committed.
    #[must_use]
    pub fn transition_to(&self, desired: DesiredState) -> Transition {
        should_transition(desired, self.last_desired)
    }

    /// Record a successfully applied transition.
    ///
    /// `grace_until` is only honoured for [`Transition::TurnOn`]; any other
    /// commit clears a pending grace deadline.
    pub fn commit(
        &mut self,
        desired: DesiredState,
        playback: PlaybackState,
        at: Timestamp,
        grace_until: Option<Timestamp>,
    ) {
        self.last_desired = Some(desired);
        self.last_transition_at = Some(at);
        self.last_playback = playback;
        self.consecutive_failures = 0;
        self.grace_until = match desired {
            DesiredState::On => grace_until,
            DesiredState::Off => None,
        };
    }

    /// Count a failed command sequence and return the running total.
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.consecutive_failures
    }

    /// Cache a playback state reported by the player.
    pub fn observe_playback(&mut self, playback: PlaybackState) {
        self.last_playback = playback;
    }

    /// Enter the terminal state. Returns `false` if shutdown already happened.
    pub fn begin_shutdown(&mut self) -> bool {
        !std::mem::replace(&mut self.shut_down, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(minute: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0).unwrap()
    }

    #[test]
    fn should_start_with_nothing_committed() {
        let state = ControllerState::default();
        assert_eq!(state.last_desired(), None);
        assert_eq!(state.last_transition_at(), None);
        assert_eq!(state.last_playback(), PlaybackState::Unknown);
        assert!(!state.in_grace_period(at(0)));
        assert!(!state.is_shut_down());
    }

    #[test]
    fn should_record_commit() {
        let mut state = ControllerState::default();
        state.commit(DesiredState::On, PlaybackState::Playing, at(1), None);
        assert_eq!(state.last_desired(), Some(DesiredState::On));
        assert_eq!(state.last_transition_at(), Some(at(1)));
        assert_eq!(state.last_playback(), PlaybackState::Playing);
        assert_eq!(state.transition_to(DesiredState::On), Transition::None);
        assert_eq!(state.transition_to(DesiredState::Off), Transition::TurnOff);
    }

    #[test]
    fn should_hold_grace_period_until_deadline() {
        let mut state = ControllerState::default();
        state.commit(DesiredState::On, PlaybackState::Playing, at(0), Some(at(5)));
        assert!(state.in_grace_period(at(0)));
        assert!(state.in_grace_period(at(4)));
        assert!(!state.in_grace_period(at(5)));
    }

    #[test]
    fn should_not_start_grace_period_on_turn_off() {
        let mut state = ControllerState::default();
        state.commit(DesiredState::Off, PlaybackState::Paused, at(0), Some(at(5)));
        assert!(!state.in_grace_period(at(1)));
    }

    #[test]
    fn should_count_failures_and_reset_on_commit() {
        let mut state = ControllerState::default();
        assert_eq!(state.record_failure(), 1);
        assert_eq!(state.record_failure(), 2);
        assert_eq!(state.last_desired(), None);
        state.commit(DesiredState::Off, PlaybackState::Paused, at(2), None);
        assert_eq!(state.consecutive_failures(), 0);
    }

    #[test]
    fn should_begin_shutdown_only_once() {
        let mut state = ControllerState::default();
        assert!(state.begin_shutdown());
        assert!(!state.begin_shutdown());
        assert!(state.is_shut_down());
    }
}
