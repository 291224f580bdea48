//! Activity streaks derived from the unlock ledger.
//!
//! Timestamps are bucketed by UTC calendar date. "Today" is an explicit
//! parameter so results are reproducible in tests and stable across a
//! request's lifetime.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::unlock::UnlockRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub active_days: usize,
    pub last_active: Option<NaiveDate>,
    /// True whenever the last active date is not today. A run that ended
    /// yesterday still counts as the current streak, but it is one missed
    /// day away from resetting.
    pub at_risk: bool,
}

pub fn compute_streaks(records: &[UnlockRecord], today: NaiveDate) -> StreakSummary {
    let days: BTreeSet<NaiveDate> = records
        .iter()
        .map(|r| r.unlocked_at.date_naive())
        .collect();

    let last_active = days.iter().next_back().copied();
    let at_risk = last_active != Some(today);

    // Current streak: the consecutive run ending today, or ending yesterday
    // when today has no activity yet. A gap of two or more days resets it.
    let current_streak = if days.contains(&today) {
        run_ending_at(&days, today)
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => run_ending_at(&days, yesterday),
            _ => 0,
        }
    };

    let mut longest_streak = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for &day in &days {
        run = match prev.and_then(|p| p.succ_opt()) {
            Some(next) if next == day => run + 1,
            _ => 1,
        };
        longest_streak = longest_streak.max(run);
        prev = Some(day);
    }

    StreakSummary {
        current_streak,
        longest_streak,
        active_days: days.len(),
        last_active,
        at_risk,
    }
}

fn run_ending_at(days: &BTreeSet<NaiveDate>, end: NaiveDate) -> u32 {
    let mut len = 0;
    let mut cursor = end;
    while days.contains(&cursor) {
        len += 1;
        match cursor.pred_opt() {
            Some(p) => cursor = p,
            None => break,
        }
    }
    len
}
