pub mod cursor;
pub mod grid;
pub mod meeting;
pub mod selection;

pub use cursor::MonthCursor;
pub use grid::{DayCell, DayHandle, MonthGrid, GRID_CELLS};
pub use meeting::{Attendee, Meeting};
pub use selection::SelectionController;
