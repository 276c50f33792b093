//! Folds one calendar day of ledger events into worked time, break time and
//! daily wage.

use chrono::{DateTime, Duration, Utc};

use crate::{
    models::{
        clock_event::{ClockEvent, ClockEventKind, ClockState},
        day_status::DayStatus,
        employee::Employee,
    },
    utils::time::DayWindow,
};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Running totals of a single scan over the day's events.
#[derive(Debug, Default)]
struct Accumulator {
    worked: Duration,
    on_break: Duration,
}

impl Accumulator {
    fn accrue(&mut self, state: ClockState, from: DateTime<Utc>, to: DateTime<Utc>) {
        if to <= from {
            return;
        }
        match state {
            ClockState::In => self.worked += to - from,
            ClockState::OnBreak => self.on_break += to - from,
            ClockState::Out => {}
        }
    }
}

pub fn hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Computes the day status of `employee` for `window`.
///
/// `opening` is the state carried in from the last event before the window,
/// `events` are the events inside the window in ledger order. Open intervals
/// are closed at `min(now, window.end)`; nothing outside the window counts.
pub fn compute_day_totals(
    employee: &Employee,
    opening: ClockState,
    events: &[ClockEvent],
    window: &DayWindow,
    now: DateTime<Utc>,
) -> DayStatus {
    let until = now.min(window.end);
    let mut totals = Accumulator::default();
    let mut state = opening;
    let mut cursor = window.start;
    let mut first_clock_in = None;
    let mut last_clock_out = None;

    for event in events.iter().filter(|e| window.contains(e.occurred_at)) {
        let at = event.occurred_at.min(until);
        totals.accrue(state, cursor, at);
        cursor = cursor.max(at);

        match event.kind {
            ClockEventKind::ClockIn => {
                first_clock_in.get_or_insert(event.occurred_at);
            }
            ClockEventKind::ClockOut => last_clock_out = Some(event.occurred_at),
            ClockEventKind::BreakStart | ClockEventKind::BreakEnd => {}
        }
        state = ClockState::after(event.kind);
    }
    totals.accrue(state, cursor, until);

    let total_hours_worked = hours(totals.worked);
    DayStatus {
        employee_id: employee.employee_id.clone(),
        employee_name: employee.name.clone(),
        employee_role: employee.role,
        date: window.date,
        status: state.into(),
        break_status: state.into(),
        first_clock_in,
        last_clock_out,
        total_break_hours: hours(totals.on_break),
        total_hours_worked,
        daily_wage: employee.hourly_wage * total_hours_worked,
    }
}
