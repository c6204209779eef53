//! Point-in-time summaries of pipeline runs.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a run at the moment it was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    Queued,
    Running,
    Success,
    Failure,
    Unstable,
    Aborted,
    NotBuilt,
    Unknown,
}

impl RunState {
    /// Whether the run has reached an outcome that will not change again.
    ///
    /// Only the five outcome states are terminal. `Unknown` is treated as
    /// still in progress.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Success | Self::Failure | Self::Unstable | Self::Aborted | Self::NotBuilt
        )
    }

    /// Wire name, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::Running => "RUNNING",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Unstable => "UNSTABLE",
            Self::Aborted => "ABORTED",
            Self::NotBuilt => "NOT_BUILT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable summary of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSnapshot {
    id: String,
    display_name: String,
    start_time_millis: i64,
    duration_millis: i64,
    change_count: u64,
    state: RunState,
}

impl RunSnapshot {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        start_time_millis: i64,
        duration_millis: i64,
        change_count: u64,
        state: RunState,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            start_time_millis,
            duration_millis,
            change_count,
            state,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub const fn start_time_millis(&self) -> i64 {
        self.start_time_millis
    }

    /// Only final once [`RunState::is_terminal`] holds for the state.
    #[must_use]
    pub const fn duration_millis(&self) -> i64 {
        self.duration_millis
    }

    #[must_use]
    pub const fn change_count(&self) -> u64 {
        self.change_count
    }

    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        !self.state.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        let terminal = [
            RunState::Success,
            RunState::Failure,
            RunState::Unstable,
            RunState::Aborted,
            RunState::NotBuilt,
        ];
        for state in terminal {
            assert!(state.is_terminal(), "{state} should be terminal");
        }
        for state in [RunState::Queued, RunState::Running, RunState::Unknown] {
            assert!(!state.is_terminal(), "{state} should not be terminal");
        }
    }

    #[test]
    fn test_wire_names_match_serde() {
        for state in [
            RunState::Queued,
            RunState::Running,
            RunState::Success,
            RunState::Failure,
            RunState::Unstable,
            RunState::Aborted,
            RunState::NotBuilt,
            RunState::Unknown,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.as_str()));
        }
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let snapshot = RunSnapshot::new("7", "#7", 1_000, 250, 2, RunState::Failure);
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["id"], "7");
        assert_eq!(value["displayName"], "#7");
        assert_eq!(value["startTimeMillis"], 1_000);
        assert_eq!(value["durationMillis"], 250);
        assert_eq!(value["changeCount"], 2);
        assert_eq!(value["state"], "FAILURE");
    }

    #[test]
    fn test_equality_covers_every_field() {
        let base = RunSnapshot::new("1", "#1", 10, 20, 0, RunState::Success);
        assert_eq!(base, base.clone());
        assert_ne!(base, RunSnapshot::new("1", "#1", 10, 21, 0, RunState::Success));
        assert_ne!(base, RunSnapshot::new("1", "#1", 10, 20, 0, RunState::Unstable));
    }
}
