use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::cursor::MonthCursor;

/// Six full weeks.
pub const GRID_CELLS: usize = 42;

/// Click target for an in-month cell; maps back to exactly one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayHandle(NaiveDate);

impl DayHandle {
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub handle: Option<DayHandle>,
}

impl DayCell {
    fn outside(date: NaiveDate) -> Self {
        Self { date, in_current_month: false, handle: None }
    }

    fn inside(date: NaiveDate) -> Self {
        Self { date, in_current_month: true, handle: Some(DayHandle(date)) }
    }

    pub fn label(&self) -> u32 {
        self.date.day()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub cursor: MonthCursor,
    pub headers: [Weekday; 7],
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn leading_count(&self) -> usize {
        self.cells.iter().take_while(|c| !c.in_current_month).count()
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.cells.iter().position(|c| c.date == date)
    }
}

pub fn build(year: i32, month: u32) -> MonthGrid {
    build_with_week_start(year, month, Weekday::Sun)
}

/// Always 42 cells, except at the edges of chrono's date range where the
/// neighbouring days cannot be represented. Callers that move the cursor
/// check the length and refuse such months.
pub fn build_with_week_start(year: i32, month: u32, week_start: Weekday) -> MonthGrid {
    let cursor = MonthCursor::new(year, month as i32);
    let headers = weekday_headers(week_start);

    let Some(first_of_month) = cursor.first_day() else {
        tracing::warn!("Month {}-{} is outside the supported date range", year, month);
        return MonthGrid { cursor, headers, cells: Vec::new() };
    };
    let days_in_month = cursor.days_in_month() as usize;
    let leading = weekday_index(first_of_month.weekday(), week_start);

    let mut cells = Vec::with_capacity(GRID_CELLS);

    for offset in (1..=leading).rev() {
        if let Some(date) = first_of_month.checked_sub_days(Days::new(offset as u64)) {
            cells.push(DayCell::outside(date));
        }
    }

    cells.extend(
        first_of_month
            .iter_days()
            .take(days_in_month)
            .map(DayCell::inside),
    );

    let trailing = GRID_CELLS.saturating_sub(leading + days_in_month);
    if let Some(next_first) = cursor.shifted(1).first_day() {
        cells.extend(next_first.iter_days().take(trailing).map(DayCell::outside));
    }

    MonthGrid { cursor, headers, cells }
}

/// Column of `day` in a week that begins on `week_start` (0–6).
pub fn weekday_index(day: Weekday, week_start: Weekday) -> usize {
    (7 + day.num_days_from_monday() as usize - week_start.num_days_from_monday() as usize) % 7
}

fn weekday_headers(week_start: Weekday) -> [Weekday; 7] {
    let mut headers = [week_start; 7];
    let mut day = week_start;
    for header in headers.iter_mut() {
        *header = day;
        day = day.succ();
    }
    headers
}
