use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// The displayed `(year, month)` pair. `month` is zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Builds a cursor, folding any out-of-range month into the year.
    pub fn new(year: i32, month: i32) -> Self {
        let total = year as i64 * 12 + month as i64;
        Self {
            year: total.div_euclid(12) as i32,
            month: total.rem_euclid(12) as u32,
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0() as i32)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn shifted(&self, delta: i32) -> Self {
        Self::new(self.year, self.month as i32 + delta)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }

    /// Day count of the month: the day before the first of the next month.
    pub fn days_in_month(&self) -> u32 {
        self.shifted(1)
            .first_day()
            .and_then(|next_first| next_first.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month as usize], self.year)
    }
}
