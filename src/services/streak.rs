//! Daily completion tracking for a habit.
//!
//! A habit's progress is an append-only completion history plus three
//! denormalized counters (`current_streak`, `longest_streak`,
//! `total_completions`) kept in step with it. [`mark_done`] is the only
//! code path that changes any of them, and it either applies every change
//! or none.
//!
//! Streak transitions:
//!
//! | state          | event                              | next           |
//! |----------------|------------------------------------|----------------|
//! | fresh (0)      | first completion                   | streaking(1)   |
//! | streaking(n)   | completion, yesterday completed    | streaking(n+1) |
//! | streaking(n)   | completion after a gap             | streaking(1)   |
//! | any            | second completion on the same day  | rejected       |

use chrono::{Duration, NaiveDate, Utc};

use crate::error::{AppError, AppResult};
use crate::models::habit::{CompletionEntry, Habit};

pub fn completed_on(habit: &Habit, day: NaiveDate) -> bool {
    habit
        .completion_history
        .iter()
        .any(|entry| entry.date == day && entry.completed)
}

fn has_entry_on(habit: &Habit, day: NaiveDate) -> bool {
    habit.completion_history.iter().any(|entry| entry.date == day)
}

/// Records a completion for `today` and advances the streak counters.
///
/// Returns `AlreadyCompletedToday` without touching the habit when an entry
/// for `today` exists.
pub fn mark_done(habit: &mut Habit, today: NaiveDate) -> AppResult<()> {
    if has_entry_on(habit, today) {
        return Err(AppError::AlreadyCompletedToday);
    }

    habit.completion_history.push(CompletionEntry {
        date: today,
        completed: true,
    });

    let yesterday = today - Duration::days(1);
    // A zero streak counts up regardless of yesterday.
    if completed_on(habit, yesterday) || habit.current_streak == 0 {
        habit.current_streak += 1;
    } else {
        habit.current_streak = 1;
    }

    habit.longest_streak = habit.longest_streak.max(habit.current_streak);
    habit.total_completions += 1;
    habit.last_completed_date = Some(today);
    habit.updated_at = Utc::now();

    Ok(())
}

pub fn confirmation_message(habit: &Habit) -> String {
    format!(
        "Habit marked as done! Current streak: {} days",
        habit.current_streak
    )
}
