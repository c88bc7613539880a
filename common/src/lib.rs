//! Class Planner Common Library
//!
//! CLIとWeb(WASM)で共有される型と時間割ロジック

pub mod types;
pub mod error;
pub mod layout;
pub mod parser;
pub mod conflict;
pub mod calendar;
pub mod filter;
pub mod grid;
pub mod selection;

pub use types::{day_label, Class, ClassSchedule, ParsedData, TimeSlot, DAY_CODES};
pub use error::{Error, Result};
pub use layout::{ColumnLayout, LayoutStrategy};
pub use parser::{parse_csv, parse_csv_with, ParseOptions, ParseReport};
pub use conflict::{classes_overlap, find_conflict, schedules_overlap};
pub use calendar::{date_for, format_dmy, monday_of, parse_dmy, term_start, WeekCursor, DEFAULT_TOTAL_WEEKS};
pub use filter::{instructor_options, matches_search, search, subject_options, Filters};
pub use grid::{DayColumn, GridEntry, GridRow, RoomKind, WeekGrid};
pub use selection::{ClassStatus, MemoryStore, Planner, Selection, SelectionStore, STORAGE_KEY};
