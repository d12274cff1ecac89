use crate::models::{Difficulty, DifficultyCounts, Entry, StatsSnapshot};
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;

const CHALLENGE_DAYS: u32 = 100;

pub fn compute(entries: &[Entry]) -> StatsSnapshot {
    compute_at(Local::now().date_naive(), entries)
}

pub fn compute_at(today: NaiveDate, entries: &[Entry]) -> StatsSnapshot {
    let mut total_problems = 0u64;
    let mut current_day = 0u32;
    let mut by_difficulty = DifficultyCounts::default();
    let mut pattern_counts: BTreeMap<String, u64> = BTreeMap::new();

    for entry in entries {
        total_problems = total_problems.saturating_add(u64::from(entry.problems_solved));
        current_day = current_day.max(entry.day);

        for problem in &entry.problems {
            match problem.difficulty {
                Difficulty::Easy => by_difficulty.easy += 1,
                Difficulty::Medium => by_difficulty.medium += 1,
                Difficulty::Hard => by_difficulty.hard += 1,
            }
        }

        if !entry.pattern.is_empty() {
            *pattern_counts.entry(entry.pattern.clone()).or_insert(0) += 1;
        }
    }

    let (current_streak, max_streak) = streaks(today, entries);

    StatsSnapshot {
        total_problems,
        current_day,
        current_streak,
        max_streak,
        completion_percentage: completion_percentage(current_day),
        problems_by_difficulty: by_difficulty,
        pattern_counts,
    }
}

/// Walks the entries newest-first and measures contiguous day runs.
///
/// The current streak is anchored at the most recent entry: it starts at 1
/// only when that entry is dated today or yesterday, grows while each older
/// entry sits exactly one day behind the previous one, and freezes at its
/// last value on the first break. The max streak is the longest run found
/// anywhere, including runs older than the break.
fn streaks(today: NaiveDate, entries: &[Entry]) -> (u32, u32) {
    let mut dates: Vec<Option<NaiveDate>> = entries.iter().map(|e| parse_date(&e.date)).collect();
    // Stable descending sort; unparseable dates order last.
    dates.sort_by(|a, b| b.cmp(a));

    let mut current_streak = 0u32;
    let mut max_streak = 0u32;
    let mut run = 0u32;
    let mut leading_run_alive = false;
    let mut prev: Option<NaiveDate> = None;

    for (index, date) in dates.iter().enumerate() {
        if index == 0 {
            run = 1;
            if let Some(latest) = date {
                if (today - *latest).num_days() <= 1 {
                    current_streak = 1;
                    leading_run_alive = true;
                }
            }
        } else {
            let gap = match (prev, date) {
                (Some(newer), Some(older)) => Some((newer - *older).num_days()),
                _ => None,
            };
            if gap == Some(1) {
                run += 1;
                if leading_run_alive {
                    current_streak += 1;
                }
            } else {
                // Same-day duplicates (gap 0), holes, and unparseable dates
                // all end the run.
                max_streak = max_streak.max(run);
                run = 1;
                leading_run_alive = false;
            }
        }
        prev = *date;
    }

    max_streak = max_streak.max(run).max(current_streak);
    (current_streak, max_streak)
}

fn completion_percentage(current_day: u32) -> u32 {
    (f64::from(current_day) / f64::from(CHALLENGE_DAYS) * 100.0).round() as u32
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    trimmed.get(..10).unwrap_or(trimmed).parse().ok()
}
