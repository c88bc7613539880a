//! 週・日付の算出
//!
//! 学期の第1週月曜日を基準に、(週番号, 曜日コード) から日付を求める。
//! CSVの日付は DD/MM/YYYY 形式（日/月/年の順）で読む。

use chrono::{Datelike, Days, NaiveDate};

use crate::types::{Class, DAY_CODES};

/// 表示できる週数の既定値
pub const DEFAULT_TOTAL_WEEKS: u32 = 32;

/// DD/MM/YYYY 形式の日付をパース
pub fn parse_dmy(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%d/%m/%Y").ok()
}

/// DD/MM/YYYY 形式で表示
pub fn format_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// その日を含む週（月曜始まり）の月曜日
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// 学期の第1週月曜日
///
/// 各授業の最初のスケジュールの開始日のうち最も早い日を含む週の月曜日。
/// 日付を1件も読めなければ `None`（呼び出し側で今日の週を使う）。
pub fn term_start(classes: &[Class]) -> Option<NaiveDate> {
    classes
        .iter()
        .filter_map(Class::first_start_date)
        .min()
        .map(monday_of)
}

/// 第`week`週・曜日コード`day_code`の日付
///
/// term_start + 7×(week−1) + (day_code−2) 日
pub fn date_for(term_start: NaiveDate, week: u32, day_code: u8) -> Option<NaiveDate> {
    if week == 0 || !DAY_CODES.contains(&day_code) {
        return None;
    }
    let offset = 7 * u64::from(week - 1) + u64::from(day_code - 2);
    term_start.checked_add_days(Days::new(offset))
}

/// 週ナビゲーションの現在位置。常に [1, total] に収まる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekCursor {
    current: u32,
    total: u32,
}

impl WeekCursor {
    pub fn new(total: u32) -> Self {
        Self::at(1, total)
    }

    /// 範囲外の週は端に丸める
    pub fn at(week: u32, total: u32) -> Self {
        let total = total.max(1);
        Self {
            current: week.clamp(1, total),
            total,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn next(self) -> Self {
        Self::at(self.current.saturating_add(1), self.total)
    }

    pub fn previous(self) -> Self {
        Self::at(self.current.saturating_sub(1), self.total)
    }

    pub fn go_to(self, week: u32) -> Self {
        Self::at(week, self.total)
    }

    /// 現在週の月曜日と日曜日
    pub fn week_range(&self, term_start: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        Some((
            date_for(term_start, self.current, 2)?,
            date_for(term_start, self.current, 8)?,
        ))
    }
}

impl Default for WeekCursor {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_WEEKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassSchedule;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn class_starting(id: &str, start_date: &str) -> Class {
        Class {
            id: id.to_string(),
            schedules: vec![ClassSchedule {
                start_date: start_date.to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_dmy_day_first() {
        assert_eq!(parse_dmy("05/02/2024"), Some(ymd(2024, 2, 5)));
        assert_eq!(parse_dmy(" 31/12/2023 "), Some(ymd(2023, 12, 31)));
        assert_eq!(parse_dmy("5/2/2024"), Some(ymd(2024, 2, 5)));
    }

    #[test]
    fn test_parse_dmy_invalid() {
        assert_eq!(parse_dmy(""), None);
        assert_eq!(parse_dmy("2024-01-01"), None);
        assert_eq!(parse_dmy("31/02/2024"), None);
        assert_eq!(parse_dmy("01/01/2024/1"), None);
    }

    #[test]
    fn test_format_dmy() {
        assert_eq!(format_dmy(ymd(2024, 1, 7)), "07/01/2024");
    }

    #[test]
    fn test_monday_of() {
        // 2024-01-03 は水曜日
        assert_eq!(monday_of(ymd(2024, 1, 3)), ymd(2024, 1, 1));
        assert_eq!(monday_of(ymd(2024, 1, 1)), ymd(2024, 1, 1));
        // 日曜日は直前の月曜日の週に属する
        assert_eq!(monday_of(ymd(2024, 1, 7)), ymd(2024, 1, 1));
    }

    #[test]
    fn test_date_for_week_three_wednesday() {
        let start = ymd(2024, 1, 1);
        assert_eq!(date_for(start, 3, 4), Some(ymd(2024, 1, 17)));
    }

    #[test]
    fn test_date_for_bounds() {
        let start = ymd(2024, 1, 1);
        assert_eq!(date_for(start, 1, 2), Some(start));
        assert_eq!(date_for(start, 1, 8), Some(ymd(2024, 1, 7)));
        assert_eq!(date_for(start, 0, 2), None);
        assert_eq!(date_for(start, 1, 1), None);
        assert_eq!(date_for(start, 1, 9), None);
    }

    #[test]
    fn test_term_start_uses_earliest_first_schedule() {
        let classes = vec![
            class_starting("C1", "10/01/2024"),
            class_starting("C2", "04/01/2024"),
            class_starting("C3", "not a date"),
        ];
        assert_eq!(term_start(&classes), Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn test_term_start_none_when_no_dates() {
        let classes = vec![class_starting("C1", "")];
        assert_eq!(term_start(&classes), None);
        assert_eq!(term_start(&[]), None);
    }

    #[test]
    fn test_week_cursor_clamps() {
        let cursor = WeekCursor::new(32);
        assert_eq!(cursor.current(), 1);
        assert!(!cursor.has_previous());
        assert_eq!(cursor.previous().current(), 1);

        let last = cursor.go_to(40);
        assert_eq!(last.current(), 32);
        assert!(!last.has_next());
        assert_eq!(last.next().current(), 32);

        assert_eq!(cursor.go_to(0).current(), 1);
        assert_eq!(cursor.next().next().current(), 3);
    }

    #[test]
    fn test_week_cursor_zero_total() {
        let cursor = WeekCursor::new(0);
        assert_eq!(cursor.total(), 1);
        assert_eq!(cursor.current(), 1);
    }

    #[test]
    fn test_week_range() {
        let cursor = WeekCursor::at(2, 32);
        assert_eq!(
            cursor.week_range(ymd(2024, 1, 1)),
            Some((ymd(2024, 1, 8), ymd(2024, 1, 14)))
        );
    }
}
