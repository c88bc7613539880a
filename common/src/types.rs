//! 授業データの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ClassSchedule: 1つの週次授業パターン（曜日・時限・教室・実施週）
//! - Class: 授業（LHP）。同じIDの行は1つのClassにまとめられる
//! - ParsedData: CSV 1ファイル分の解析結果
//!
//! 数値として読めなかった値は `None`（不明）として保持し、
//! 比較や表示の段階でエラーにしない。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::calendar::parse_dmy;

/// 曜日コード（2=月曜 … 8=日曜）
pub const DAY_CODES: RangeInclusive<u8> = 2..=8;

/// 曜日コードの表示名
pub fn day_label(code: u8) -> Option<&'static str> {
    match code {
        2 => Some("Thứ 2"),
        3 => Some("Thứ 3"),
        4 => Some("Thứ 4"),
        5 => Some("Thứ 5"),
        6 => Some("Thứ 6"),
        7 => Some("Thứ 7"),
        8 => Some("Chủ nhật"),
        _ => None,
    }
}

/// 週次の授業パターン
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    /// 曜日コード
    pub day: Option<u8>,
    /// 開始時限
    pub start_period: Option<u32>,
    /// 終了時限（この時限を含む）
    pub end_period: Option<u32>,
    pub room: String,
    /// 開始日 (DD/MM/YYYY)
    pub start_date: String,
    /// 終了日 (DD/MM/YYYY)
    pub end_date: String,
    /// 週ごとの実施フラグ（index 0 = 第1週）
    pub weeks: Vec<bool>,
    /// 総時限数（表示用）
    pub total_periods: Option<u32>,
}

impl ClassSchedule {
    /// 第`week`週（1始まり）に授業があるか
    pub fn is_active_in_week(&self, week: u32) -> bool {
        week >= 1
            && self
                .weeks
                .get((week - 1) as usize)
                .copied()
                .unwrap_or(false)
    }

    /// 開始・終了時限がともに判明していれば返す
    pub fn period_range(&self) -> Option<(u32, u32)> {
        Some((self.start_period?, self.end_period?))
    }

    pub fn start_on(&self) -> Option<NaiveDate> {
        parse_dmy(&self.start_date)
    }

    pub fn end_on(&self) -> Option<NaiveDate> {
        parse_dmy(&self.end_date)
    }

    pub fn day_label(&self) -> Option<&'static str> {
        self.day.and_then(day_label)
    }

    /// 実施週の一覧（1始まり）
    pub fn active_weeks(&self) -> Vec<u32> {
        self.weeks
            .iter()
            .enumerate()
            .filter(|(_, meets)| **meets)
            .map(|(i, _)| i as u32 + 1)
            .collect()
    }
}

/// 授業（LHP）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: String,
    pub name: String,
    pub credits: Option<u32>,
    pub instructor: String,
    pub schedules: Vec<ClassSchedule>,
}

impl Class {
    /// 最初のスケジュールの開始日（学期開始日の算出に使う）
    pub fn first_start_date(&self) -> Option<NaiveDate> {
        self.schedules.first().and_then(ClassSchedule::start_on)
    }
}

/// CSV 1ファイル分の解析結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedData {
    /// IDの初出順
    pub classes: Vec<Class>,
}

impl ParsedData {
    pub fn find(&self, id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// 時間帯フィルタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    #[default]
    All,
    /// 午前: 1〜6限
    Morning,
    /// 午後: 7〜12限
    Afternoon,
    /// 夜間: 13限以降
    Evening,
}

impl TimeSlot {
    /// 時間割グリッドに表示する帯
    pub const BANDS: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    /// 開始時限がこの帯に入るか（フィルタ用）
    pub fn contains_start(&self, start_period: Option<u32>) -> bool {
        match (self, start_period) {
            (TimeSlot::All, _) => true,
            (_, None) => false,
            (TimeSlot::Morning, Some(p)) => p <= 6,
            (TimeSlot::Afternoon, Some(p)) => (7..=12).contains(&p),
            (TimeSlot::Evening, Some(p)) => p > 12,
        }
    }

    /// グリッド表示用の時限範囲
    pub fn periods(&self) -> Option<RangeInclusive<u32>> {
        match self {
            TimeSlot::All => None,
            TimeSlot::Morning => Some(1..=6),
            TimeSlot::Afternoon => Some(7..=12),
            TimeSlot::Evening => Some(13..=17),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::All => "Tất cả",
            TimeSlot::Morning => "Sáng",
            TimeSlot::Afternoon => "Chiều",
            TimeSlot::Evening => "Tối",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::All => "all",
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        }
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TimeSlot::All),
            "morning" | "sang" | "sáng" => Ok(TimeSlot::Morning),
            "afternoon" | "chieu" | "chiều" => Ok(TimeSlot::Afternoon),
            "evening" | "toi" | "tối" => Ok(TimeSlot::Evening),
            _ => Err(format!(
                "Unknown time slot: {}. Use all, morning, afternoon, or evening",
                s
            )),
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule_with_weeks(weeks: &[bool]) -> ClassSchedule {
        ClassSchedule {
            day: Some(2),
            start_period: Some(1),
            end_period: Some(3),
            room: "A101".to_string(),
            start_date: "01/01/2024".to_string(),
            end_date: "31/05/2024".to_string(),
            weeks: weeks.to_vec(),
            total_periods: Some(45),
        }
    }

    #[test]
    fn test_is_active_in_week() {
        let schedule = schedule_with_weeks(&[true, false, true]);
        assert!(schedule.is_active_in_week(1));
        assert!(!schedule.is_active_in_week(2));
        assert!(schedule.is_active_in_week(3));
        // 範囲外は授業なし
        assert!(!schedule.is_active_in_week(0));
        assert!(!schedule.is_active_in_week(4));
    }

    #[test]
    fn test_active_weeks() {
        let schedule = schedule_with_weeks(&[true, false, true, false]);
        assert_eq!(schedule.active_weeks(), vec![1, 3]);
    }

    #[test]
    fn test_period_range_unknown() {
        let mut schedule = schedule_with_weeks(&[true]);
        assert_eq!(schedule.period_range(), Some((1, 3)));
        schedule.end_period = None;
        assert_eq!(schedule.period_range(), None);
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label(2), Some("Thứ 2"));
        assert_eq!(day_label(8), Some("Chủ nhật"));
        assert_eq!(day_label(1), None);
        assert_eq!(day_label(9), None);
    }

    #[test]
    fn test_schedule_dates() {
        let schedule = schedule_with_weeks(&[true]);
        assert_eq!(schedule.start_on(), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(schedule.end_on(), NaiveDate::from_ymd_opt(2024, 5, 31));
    }

    #[test]
    fn test_time_slot_contains_start() {
        assert!(TimeSlot::All.contains_start(None));
        assert!(TimeSlot::Morning.contains_start(Some(6)));
        assert!(!TimeSlot::Morning.contains_start(Some(7)));
        assert!(TimeSlot::Afternoon.contains_start(Some(7)));
        assert!(TimeSlot::Afternoon.contains_start(Some(12)));
        assert!(TimeSlot::Evening.contains_start(Some(13)));
        assert!(!TimeSlot::Evening.contains_start(None));
    }

    #[test]
    fn test_time_slot_from_str() {
        assert_eq!("morning".parse::<TimeSlot>(), Ok(TimeSlot::Morning));
        assert_eq!("Sáng".parse::<TimeSlot>(), Ok(TimeSlot::Morning));
        assert_eq!("ALL".parse::<TimeSlot>(), Ok(TimeSlot::All));
        assert!("night".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn test_class_serialize_camel_case() {
        let class = Class {
            id: "C1".to_string(),
            name: "Giải tích".to_string(),
            credits: None,
            instructor: "Nguyễn Văn A".to_string(),
            schedules: vec![schedule_with_weeks(&[true, false])],
        };

        let json = serde_json::to_string(&class).expect("シリアライズ失敗");
        assert!(json.contains("\"startPeriod\":1"));
        assert!(json.contains("\"totalPeriods\":45"));
        // 不明な数値はnull
        assert!(json.contains("\"credits\":null"));
    }
}
