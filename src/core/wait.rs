//! Wait states.

use super::state::{Annotated, State, StateBase, TransitionState};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// The single timing field a Wait state carries.
#[derive(Clone, Debug, PartialEq)]
pub enum WaitFor {
    /// `Seconds`: fixed delay.
    Seconds(Duration),
    /// `SecondsPath`: delay read from the input.
    SecondsPath(String),
    /// `Timestamp`: fixed instant.
    Timestamp(DateTime<Utc>),
    /// `TimestampPath`: instant read from the input.
    TimestampPath(String),
}

/// Delays the machine for a fixed or input-driven amount of time.
///
/// # Example
///
/// ```rust
/// use stepgraph::core::{TransitionState, WaitFor, WaitState};
/// use std::time::Duration;
///
/// let pause = WaitState::delay("Pause", Duration::from_secs(90)).next("Resume");
/// assert_eq!(pause.wait_for(), &WaitFor::Seconds(Duration::from_secs(90)));
/// assert_eq!(pause.next_state(), Some("Resume"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WaitState {
    pub(crate) base: StateBase,
    pub(crate) next: Option<String>,
    pub(crate) wait: WaitFor,
}

impl WaitState {
    pub fn new(name: impl Into<String>, wait: WaitFor) -> Self {
        Self {
            base: StateBase::named(name),
            next: None,
            wait,
        }
    }

    pub fn delay(name: impl Into<String>, delay: Duration) -> Self {
        Self::new(name, WaitFor::Seconds(delay))
    }

    pub fn delay_from_path(name: impl Into<String>, seconds_path: impl Into<String>) -> Self {
        Self::new(name, WaitFor::SecondsPath(seconds_path.into()))
    }

    pub fn until(name: impl Into<String>, instant: DateTime<Utc>) -> Self {
        Self::new(name, WaitFor::Timestamp(instant))
    }

    pub fn until_path(name: impl Into<String>, timestamp_path: impl Into<String>) -> Self {
        Self::new(name, WaitFor::TimestampPath(timestamp_path.into()))
    }

    pub fn wait_for(&self) -> &WaitFor {
        &self.wait
    }
}

impl State for WaitState {
    fn name(&self) -> &str {
        &self.base.name
    }
}

impl Annotated for WaitState {
    fn base(&self) -> &StateBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StateBase {
        &mut self.base
    }
}

impl TransitionState for WaitState {
    fn next(mut self, target: impl Into<String>) -> Self {
        self.next = Some(target.into());
        self
    }

    fn next_state(&self) -> Option<&str> {
        self.next.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn wait_without_next_has_no_adjacent_states() {
        let wait = WaitState::delay_from_path("Hold", "$.seconds");
        assert!(wait.adjacent_states().is_empty());
        assert!(wait.permits_end());
    }

    #[test]
    fn next_is_the_only_adjacent_state() {
        let wait = WaitState::until_path("Hold", "$.when").next("A").next("B");
        assert_eq!(wait.next_state(), Some("B"));
        assert_eq!(wait.adjacent_states(), vec!["B"]);
    }

    #[test]
    fn constructors_pick_the_timing_field() {
        let instant = Utc.with_ymd_and_hms(2031, 5, 6, 7, 8, 9).unwrap();

        assert_eq!(
            WaitState::until("At", instant).wait_for(),
            &WaitFor::Timestamp(instant)
        );
        assert_eq!(
            WaitState::delay_from_path("From", "$.s").wait_for(),
            &WaitFor::SecondsPath("$.s".to_string())
        );
        assert_eq!(
            WaitState::until_path("Until", "$.t").wait_for(),
            &WaitFor::TimestampPath("$.t".to_string())
        );
    }
}
