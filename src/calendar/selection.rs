use chrono::{NaiveDate, Weekday};

use super::cursor::MonthCursor;
use super::grid::{self, MonthGrid, GRID_CELLS};

/// Calendar bookkeeping: the displayed month and the one selected date.
#[derive(Debug, Clone)]
pub struct SelectionController {
    cursor: MonthCursor,
    week_start: Weekday,
    grid: MonthGrid,
    selected: Option<NaiveDate>,
}

impl SelectionController {
    pub fn new(today: NaiveDate, week_start: Weekday) -> Self {
        let cursor = MonthCursor::containing(today);
        Self {
            cursor,
            week_start,
            grid: grid::build_with_week_start(cursor.year(), cursor.month(), week_start),
            selected: None,
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selected == Some(date)
    }

    /// Moves the displayed month. Months whose grid would run past the
    /// representable date range are refused and the cursor stays put.
    pub fn navigate(&mut self, delta: i32) {
        self.move_cursor(self.cursor.shifted(delta));
    }

    pub fn jump_to(&mut self, date: NaiveDate) {
        let target = MonthCursor::containing(date);
        if target != self.cursor {
            self.move_cursor(target);
        }
    }

    /// Replaces any previous selection and hands the date on to the panel.
    pub fn select(&mut self, date: NaiveDate) -> NaiveDate {
        if let Some(previous) = self.selected.replace(date)
            && previous != date
        {
            tracing::debug!("Selection moved from {} to {}", previous, date);
        }
        date
    }

    fn move_cursor(&mut self, cursor: MonthCursor) {
        let grid = grid::build_with_week_start(cursor.year(), cursor.month(), self.week_start);
        if grid.cells.len() != GRID_CELLS {
            tracing::warn!(
                "Staying on {}: {} is outside the supported date range",
                self.cursor.title(),
                cursor.title()
            );
            return;
        }
        self.cursor = cursor;
        self.grid = grid;
        tracing::debug!("Month cursor now at {}", cursor.title());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn starts_on_month_containing_today_with_no_selection() {
        let controller = SelectionController::new(date(2024, 3, 15), Weekday::Sun);

        assert_eq!(controller.cursor(), MonthCursor::new(2024, 2));
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn navigate_rebuilds_grid_for_new_month() {
        let mut controller = SelectionController::new(date(2024, 3, 15), Weekday::Sun);

        controller.navigate(1);

        assert_eq!(controller.grid().cursor, MonthCursor::new(2024, 3));
        assert!(controller.grid().position_of(date(2024, 4, 30)).is_some());
    }

    #[test]
    fn navigate_keeps_selection() {
        let mut controller = SelectionController::new(date(2024, 3, 15), Weekday::Sun);
        controller.select(date(2024, 3, 1));

        controller.navigate(-1);
        controller.navigate(-1);

        assert_eq!(controller.selected(), Some(date(2024, 3, 1)));
    }

    #[test]
    fn selecting_replaces_previous_selection() {
        let mut controller = SelectionController::new(date(2024, 3, 15), Weekday::Sun);

        controller.select(date(2024, 3, 1));
        let emitted = controller.select(date(2024, 3, 2));

        assert_eq!(emitted, date(2024, 3, 2));
        assert!(!controller.is_selected(date(2024, 3, 1)));
        assert!(controller.is_selected(date(2024, 3, 2)));
        let selected_cells = controller
            .grid()
            .cells
            .iter()
            .filter(|c| controller.is_selected(c.date))
            .count();
        assert_eq!(selected_cells, 1);
    }

    #[test]
    fn jump_to_moves_cursor_to_date_month() {
        let mut controller = SelectionController::new(date(2024, 3, 15), Weekday::Sun);

        controller.jump_to(date(2025, 1, 20));

        assert_eq!(controller.cursor(), MonthCursor::new(2025, 0));
    }

    #[test]
    fn navigation_stops_before_last_representable_month() {
        let last = MonthCursor::containing(NaiveDate::MAX);
        let start = last.shifted(-2).first_day().unwrap();
        let mut controller = SelectionController::new(start, Weekday::Sun);

        controller.navigate(1);
        controller.navigate(1);
        controller.navigate(1);

        assert_eq!(controller.cursor(), last.shifted(-1));
        assert_eq!(controller.grid().cells.len(), GRID_CELLS);
        assert_eq!(controller.grid().cursor, last.shifted(-1));
    }

    #[test]
    fn navigation_stops_after_first_representable_month() {
        let first = MonthCursor::containing(NaiveDate::MIN);
        let start = first.shifted(2).first_day().unwrap();
        let mut controller = SelectionController::new(start, Weekday::Sun);

        controller.navigate(-1);
        controller.navigate(-1);
        controller.navigate(-1);

        assert!(controller.cursor() == first.shifted(1) || controller.cursor() == first);
        assert_eq!(controller.grid().cells.len(), GRID_CELLS);
    }

    #[test]
    fn december_round_trip_restores_cursor() {
        let mut controller = SelectionController::new(date(2024, 12, 5), Weekday::Mon);
        let before = controller.cursor();

        controller.navigate(1);
        controller.navigate(-1);

        assert_eq!(controller.cursor(), before);
        assert_eq!(controller.grid().headers[0], Weekday::Mon);
    }
}
