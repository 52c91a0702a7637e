use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Source of the tracker's current calendar day.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Server clock, with the day boundary shifted by a fixed UTC offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset_minutes: i32,
}

impl SystemClock {
    pub fn new(offset_minutes: i32) -> Self {
        Self { offset_minutes }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        day_of(Utc::now(), self.offset_minutes)
    }
}

/// Calendar day of `instant` for a caller `offset_minutes` east of UTC.
pub fn day_of(instant: DateTime<Utc>, offset_minutes: i32) -> NaiveDate {
    (instant + Duration::minutes(offset_minutes as i64)).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_of_discards_time() {
        let late = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(day_of(late, 0), day_of(early, 0));
    }

    #[test]
    fn test_positive_offset_rolls_into_next_day() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 22, 30, 0).unwrap();
        assert_eq!(day_of(instant, 120), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_negative_offset_stays_on_previous_day() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 0, 0).unwrap();
        assert_eq!(day_of(instant, -300), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
