use chrono::{NaiveDate, Weekday};
use ratatui::layout::Rect;

use crate::app::AppState;
use crate::calendar::{DayHandle, GRID_CELLS};

/// Width of one day column, in terminal cells.
pub const CELL_WIDTH: u16 = 5;
/// Rows above the first week inside the calendar block: title, blank, weekday headers.
pub const GRID_TOP_OFFSET: u16 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub title: String,
    pub headers: [Weekday; 7],
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub date: NaiveDate,
    pub label: u32,
    pub in_current_month: bool,
    pub handle: Option<DayHandle>,
    pub is_selected: bool,
    pub is_today: bool,
    pub is_focused: bool,
}

pub fn calculate_layout(state: &AppState) -> MonthLayout {
    let grid = state.selection.grid();

    let weeks = grid
        .weeks()
        .map(|week| Week {
            days: week
                .iter()
                .map(|cell| CellView {
                    date: cell.date,
                    label: cell.label(),
                    in_current_month: cell.in_current_month,
                    handle: cell.handle,
                    is_selected: state.selection.is_selected(cell.date),
                    is_today: cell.date == state.today,
                    is_focused: cell.in_current_month && cell.date == state.focus_date,
                })
                .collect(),
        })
        .collect();

    MonthLayout {
        title: grid.cursor.title(),
        headers: grid.headers,
        weeks,
    }
}

pub fn header_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => " Mon ",
        Weekday::Tue => " Tue ",
        Weekday::Wed => " Wed ",
        Weekday::Thu => " Thu ",
        Weekday::Fri => " Fri ",
        Weekday::Sat => " Sat ",
        Weekday::Sun => " Sun ",
    }
}

/// Maps a terminal position inside the calendar block's inner area to a grid index.
pub fn cell_index_at(inner: Rect, column: u16, row: u16) -> Option<usize> {
    let grid_top = inner.y + GRID_TOP_OFFSET;
    if column < inner.x || row < grid_top {
        return None;
    }
    let col = ((column - inner.x) / CELL_WIDTH) as usize;
    let week = (row - grid_top) as usize;
    if col >= 7 || week >= GRID_CELLS / 7 || column >= inner.x + inner.width {
        return None;
    }
    Some(week * 7 + col)
}

/// The click target under the pointer, if it is an in-month day.
pub fn handle_at(state: &AppState, inner: Rect, column: u16, row: u16) -> Option<DayHandle> {
    cell_index_at(inner, column, row)
        .and_then(|index| state.selection.grid().cells.get(index))
        .and_then(|cell| cell.handle)
}
