pub mod class_search;
pub mod filters;
pub mod header;
pub mod loading_indicator;
pub mod selected_summary;
pub mod timetable;
pub mod upload_area;
pub mod week_navigation;
