//! Week block accumulation
//!
//! Days arrive in dataset order. A week starts at the first day seen while
//! empty and is flushed on a Sunday, on the dataset's last day, or just
//! before a day that belongs to a different Monday-start block.

use crate::parsers::{week_monday, weekday};
use crate::types::{DaySchedule, Week};

const SUNDAY: usize = 6;

#[derive(Debug, Default)]
enum State {
    #[default]
    Empty,
    Accumulating(Week),
}

/// Linear-scan state machine grouping days into week blocks
#[derive(Debug, Default)]
pub struct WeekAccumulator {
    state: State,
}

impl WeekAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, State::Empty)
    }

    /// Feed the next day. Returns the weeks completed by this step, in
    /// order (at most two: a block change flush and the day's own flush).
    pub fn push(&mut self, day: DaySchedule, is_last: bool) -> Vec<Week> {
        let mut flushed = Vec::new();

        let current = match std::mem::take(&mut self.state) {
            State::Accumulating(week) if week_monday(week.start_date) != week_monday(day.date) => {
                log::warn!(
                    "{} is outside the week starting {}, closing that week early",
                    day.key,
                    week.start_key
                );
                flushed.push(week);
                None
            }
            State::Accumulating(week) => Some(week),
            State::Empty => None,
        };

        let mut week = current.unwrap_or_else(|| Week {
            start_key: day.key.clone(),
            start_date: day.date,
            days: Vec::with_capacity(7),
            is_final: false,
        });

        let closes_week = weekday(day.date) == SUNDAY || is_last;
        week.days.push(day);
        week.is_final = is_last;

        if closes_week {
            flushed.push(week);
        } else {
            self.state = State::Accumulating(week);
        }

        flushed
    }

    /// Group a whole dataset into week blocks
    pub fn group(days: Vec<DaySchedule>) -> Vec<Week> {
        let total = days.len();
        let mut accumulator = Self::new();
        let mut weeks = Vec::new();

        for (index, day) in days.into_iter().enumerate() {
            weeks.extend(accumulator.push(day, index + 1 == total));
        }

        debug_assert!(accumulator.is_empty());
        weeks
    }
}
