//! Ledger events and the per-employee clock state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::{
    error::DomainError,
    types::{EmployeeId, EventId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ClockEventKind {
    ClockIn,
    ClockOut,
    BreakStart,
    BreakEnd,
}

impl ClockEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockEventKind::ClockIn => "clock-in",
            ClockEventKind::ClockOut => "clock-out",
            ClockEventKind::BreakStart => "break-start",
            ClockEventKind::BreakEnd => "break-end",
        }
    }
}

impl fmt::Display for ClockEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClockEventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clock-in" => Ok(ClockEventKind::ClockIn),
            "clock-out" => Ok(ClockEventKind::ClockOut),
            "break-start" => Ok(ClockEventKind::BreakStart),
            "break-end" => Ok(ClockEventKind::BreakEnd),
            other => Err(format!("unknown clock event kind `{}`", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// One immutable entry of the attendance ledger.
pub struct ClockEvent {
    pub id: EventId,
    pub employee_id: EmployeeId,
    pub kind: ClockEventKind,
    pub occurred_at: DateTime<Utc>,
    /// Store-assigned, strictly increasing. Orders events sharing a timestamp.
    pub seq: i64,
    pub recorded_at: DateTime<Utc>,
}

/// An event about to be appended; the store assigns `seq`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClockEvent {
    pub id: EventId,
    pub employee_id: EmployeeId,
    pub kind: ClockEventKind,
    pub occurred_at: DateTime<Utc>,
    pub recorded_at: DateTime<Utc>,
}

impl NewClockEvent {
    pub fn new(
        employee_id: EmployeeId,
        kind: ClockEventKind,
        occurred_at: DateTime<Utc>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EventId::new(),
            employee_id,
            kind,
            occurred_at,
            recorded_at,
        }
    }

    pub fn into_event(self, seq: i64) -> ClockEvent {
        ClockEvent {
            id: self.id,
            employee_id: self.employee_id,
            kind: self.kind,
            occurred_at: self.occurred_at,
            seq,
            recorded_at: self.recorded_at,
        }
    }
}

/// Derived attendance state of one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockState {
    #[default]
    Out,
    In,
    OnBreak,
}

impl ClockState {
    /// State after a validated event; the ledger only holds legal sequences,
    /// so the last event alone determines the state.
    pub fn after(kind: ClockEventKind) -> Self {
        match kind {
            ClockEventKind::ClockIn | ClockEventKind::BreakEnd => ClockState::In,
            ClockEventKind::BreakStart => ClockState::OnBreak,
            ClockEventKind::ClockOut => ClockState::Out,
        }
    }

    /// State after the most recent event, or `Out` for an empty ledger.
    pub fn from_last(last: Option<ClockEventKind>) -> Self {
        last.map(Self::after).unwrap_or_default()
    }

    /// Checks `kind` against the transition table and returns the next state.
    pub fn apply(self, kind: ClockEventKind) -> Result<Self, DomainError> {
        use ClockEventKind::*;
        use ClockState::*;
        match (self, kind) {
            (Out, ClockIn) => Ok(In),
            (In, BreakStart) => Ok(OnBreak),
            (OnBreak, BreakEnd) => Ok(In),
            (In, ClockOut) => Ok(Out),
            (state, event) => Err(DomainError::InvalidTransition { state, event }),
        }
    }

    pub fn is_clocked_in(&self) -> bool {
        !matches!(self, ClockState::Out)
    }

    pub fn is_on_break(&self) -> bool {
        matches!(self, ClockState::OnBreak)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClockState::Out => "clocked out",
            ClockState::In => "clocked in",
            ClockState::OnBreak => "on break",
        }
    }
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ClockEventKind::*;

    #[test]
    fn kind_serde_is_kebab_case() {
        assert_eq!(
            serde_json::to_value(BreakStart).unwrap(),
            serde_json::json!("break-start")
        );
        assert_eq!("clock-out".parse::<ClockEventKind>().unwrap(), ClockOut);
        assert!("lunch".parse::<ClockEventKind>().is_err());
    }

    #[test]
    fn legal_transitions_follow_the_cycle() {
        let state = ClockState::Out.apply(ClockIn).unwrap();
        assert_eq!(state, ClockState::In);
        let state = state.apply(BreakStart).unwrap();
        assert_eq!(state, ClockState::OnBreak);
        let state = state.apply(BreakEnd).unwrap();
        assert_eq!(state, ClockState::In);
        let state = state.apply(ClockOut).unwrap();
        assert_eq!(state, ClockState::Out);
    }

    #[test]
    fn illegal_transitions_are_rejected() {
        let cases = [
            (ClockState::Out, ClockOut),
            (ClockState::Out, BreakStart),
            (ClockState::Out, BreakEnd),
            (ClockState::In, ClockIn),
            (ClockState::In, BreakEnd),
            (ClockState::OnBreak, ClockIn),
            (ClockState::OnBreak, ClockOut),
            (ClockState::OnBreak, BreakStart),
        ];
        for (state, event) in cases {
            match state.apply(event) {
                Err(DomainError::InvalidTransition { state: s, event: e }) => {
                    assert_eq!((s, e), (state, event));
                }
                other => panic!("{:?} + {:?} should fail, got {:?}", state, event, other),
            }
        }
    }

    #[test]
    fn from_last_matches_apply() {
        assert_eq!(ClockState::from_last(None), ClockState::Out);
        for kind in [ClockIn, ClockOut, BreakStart, BreakEnd] {
            assert_eq!(ClockState::from_last(Some(kind)), ClockState::after(kind));
        }
        assert!(ClockState::OnBreak.is_clocked_in());
        assert!(!ClockState::Out.is_clocked_in());
    }
}
