//! 週表示の時間割グリッド
//!
//! 列は曜日（月〜日）、行は時間帯（午前・午後・夜間）。
//! その週に授業があり、時限が帯の範囲に収まるスケジュールだけを配置する。

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::calendar::date_for;
use crate::types::{day_label, Class, ClassSchedule, TimeSlot, DAY_CODES};

lazy_static! {
    static ref CAMPUS_ROOM: Regex = Regex::new(r"^A[12]\d{2}").unwrap();
}

/// 教室の種類（表示色の切り替えに使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind {
    /// オンライン（Zoom）
    Online,
    /// A1xx / A2xx 棟
    Campus,
    Other,
}

impl RoomKind {
    pub fn classify(room: &str) -> Self {
        if room.to_lowercase().contains("zoom") {
            RoomKind::Online
        } else if CAMPUS_ROOM.is_match(room) {
            RoomKind::Campus
        } else {
            RoomKind::Other
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RoomKind::Online => "room-online",
            RoomKind::Campus => "room-campus",
            RoomKind::Other => "room-other",
        }
    }
}

/// グリッドの1コマ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridEntry {
    pub class_id: String,
    pub class_name: String,
    pub instructor: String,
    pub start_period: u32,
    pub end_period: u32,
    pub room: String,
    pub room_kind: RoomKind,
}

/// 曜日列の見出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    pub code: u8,
    pub label: &'static str,
    /// 学期開始日が不明なら `None`
    pub date: Option<NaiveDate>,
}

/// 時間帯の行。`cells` は曜日列と同じ並び。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub slot: TimeSlot,
    pub cells: Vec<Vec<GridEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    pub week: u32,
    pub days: Vec<DayColumn>,
    pub rows: Vec<GridRow>,
}

impl WeekGrid {
    /// 選択済み授業から第`week`週のグリッドを作る
    pub fn build(classes: &[Class], week: u32, term_start: Option<NaiveDate>) -> Self {
        let days: Vec<DayColumn> = DAY_CODES
            .map(|code| DayColumn {
                code,
                label: day_label(code).unwrap_or_default(),
                date: term_start.and_then(|start| date_for(start, week, code)),
            })
            .collect();

        let rows = TimeSlot::BANDS
            .iter()
            .map(|&slot| GridRow {
                slot,
                cells: days
                    .iter()
                    .map(|day| entries_for(classes, week, day.code, slot))
                    .collect(),
            })
            .collect();

        Self { week, days, rows }
    }

    /// 指定の帯・曜日のコマ
    pub fn cell(&self, slot: TimeSlot, day_code: u8) -> &[GridEntry] {
        let column = self.days.iter().position(|d| d.code == day_code);
        self.rows
            .iter()
            .find(|row| row.slot == slot)
            .zip(column)
            .and_then(|(row, i)| row.cells.get(i))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 1コマも無いか
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.cells.iter().all(Vec::is_empty))
    }
}

fn entries_for(classes: &[Class], week: u32, day_code: u8, slot: TimeSlot) -> Vec<GridEntry> {
    classes
        .iter()
        .flat_map(|class| {
            class
                .schedules
                .iter()
                .filter(move |s| {
                    s.day == Some(day_code) && s.is_active_in_week(week) && fits_band(s, slot)
                })
                .filter_map(move |s| {
                    let (start_period, end_period) = s.period_range()?;
                    Some(GridEntry {
                        class_id: class.id.clone(),
                        class_name: class.name.clone(),
                        instructor: class.instructor.clone(),
                        start_period,
                        end_period,
                        room: s.room.clone(),
                        room_kind: RoomKind::classify(&s.room),
                    })
                })
        })
        .collect()
}

/// 時限範囲が帯の中に収まるか
fn fits_band(schedule: &ClassSchedule, slot: TimeSlot) -> bool {
    match (schedule.period_range(), slot.periods()) {
        (Some((start, end)), Some(band)) => start >= *band.start() && end <= *band.end(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: &str, schedules: Vec<ClassSchedule>) -> Class {
        Class {
            id: id.to_string(),
            name: format!("Môn {}", id),
            credits: Some(3),
            instructor: "GV".to_string(),
            schedules,
        }
    }

    fn schedule(day: u8, start: u32, end: u32, room: &str, weeks: &[bool]) -> ClassSchedule {
        ClassSchedule {
            day: Some(day),
            start_period: Some(start),
            end_period: Some(end),
            room: room.to_string(),
            weeks: weeks.to_vec(),
            ..Default::default()
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_room_kind() {
        assert_eq!(RoomKind::classify("Zoom 01"), RoomKind::Online);
        assert_eq!(RoomKind::classify("online-ZOOM"), RoomKind::Online);
        assert_eq!(RoomKind::classify("A101"), RoomKind::Campus);
        assert_eq!(RoomKind::classify("A215-B"), RoomKind::Campus);
        assert_eq!(RoomKind::classify("A301"), RoomKind::Other);
        assert_eq!(RoomKind::classify("B101"), RoomKind::Other);
    }

    #[test]
    fn test_day_columns_have_projected_dates() {
        let grid = WeekGrid::build(&[], 3, Some(ymd(2024, 1, 1)));
        assert_eq!(grid.days.len(), 7);
        assert_eq!(grid.days[0].label, "Thứ 2");
        assert_eq!(grid.days[0].date, Some(ymd(2024, 1, 15)));
        assert_eq!(grid.days[2].date, Some(ymd(2024, 1, 17)));
        assert_eq!(grid.days[6].label, "Chủ nhật");
        assert_eq!(grid.days[6].date, Some(ymd(2024, 1, 21)));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_entries_placed_by_day_band_and_week() {
        let classes = vec![
            class("C1", vec![schedule(2, 1, 3, "A101", &[true, false])]),
            class("C2", vec![schedule(4, 7, 9, "Zoom", &[true, true])]),
            class("C3", vec![schedule(8, 13, 15, "B201", &[false, true])]),
        ];

        let week1 = WeekGrid::build(&classes, 1, None);
        assert_eq!(week1.cell(TimeSlot::Morning, 2).len(), 1);
        assert_eq!(week1.cell(TimeSlot::Morning, 2)[0].class_id, "C1");
        assert_eq!(week1.cell(TimeSlot::Morning, 2)[0].room_kind, RoomKind::Campus);
        assert_eq!(week1.cell(TimeSlot::Afternoon, 4)[0].class_id, "C2");
        assert!(week1.cell(TimeSlot::Evening, 8).is_empty());

        let week2 = WeekGrid::build(&classes, 2, None);
        assert!(week2.cell(TimeSlot::Morning, 2).is_empty());
        assert_eq!(week2.cell(TimeSlot::Evening, 8)[0].class_id, "C3");
    }

    #[test]
    fn test_schedule_spanning_bands_is_not_placed() {
        let classes = vec![class("C1", vec![schedule(2, 5, 8, "A101", &[true])])];
        let grid = WeekGrid::build(&classes, 1, None);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_cell_unknown_day() {
        let grid = WeekGrid::build(&[], 1, None);
        assert!(grid.cell(TimeSlot::Morning, 1).is_empty());
        assert!(grid.cell(TimeSlot::All, 2).is_empty());
    }
}
