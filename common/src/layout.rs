//! CSV列レイアウトの解決
//!
//! ヘッダー名から列位置を求めるのが基本。列名が見つからない場合のみ、
//! 固定オフセット（標準エクスポート形式 43列）にフォールバックする。

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// 固定オフセット形式の列数
pub const FIXED_COLUMN_COUNT: usize = 43;

/// 列の解決方法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    /// ヘッダー名で解決し、43列のファイルに限り固定オフセットへフォールバック
    #[default]
    Auto,
    /// ヘッダー名のみ
    Header,
    /// 固定オフセットのみ
    Fixed,
}

impl std::str::FromStr for LayoutStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(LayoutStrategy::Auto),
            "header" | "headers" | "name" => Ok(LayoutStrategy::Header),
            "fixed" | "offset" => Ok(LayoutStrategy::Fixed),
            _ => Err(format!("Unknown layout: {}. Use auto, header, or fixed", s)),
        }
    }
}

impl std::fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutStrategy::Auto => write!(f, "auto"),
            LayoutStrategy::Header => write!(f, "header"),
            LayoutStrategy::Fixed => write!(f, "fixed"),
        }
    }
}

/// 必須列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    Name,
    Credits,
    Day,
    StartPeriod,
    EndPeriod,
    StartDate,
    EndDate,
    TotalPeriods,
    Room,
    Instructor,
    FirstWeek,
}

impl Column {
    /// 受け付けるヘッダー名（先頭がエクスポートの正式名）
    fn names(self) -> &'static [&'static str] {
        match self {
            Column::Id => &["Mã LHP", "id", "class_id"],
            Column::Name => &["Tên môn học", "name", "class_name"],
            Column::Credits => &["Số TC", "credits"],
            Column::Day => &["Thứ", "day"],
            Column::StartPeriod => &["Từ tiết", "start_period"],
            Column::EndPeriod => &["Đến tiết", "end_period"],
            Column::StartDate => &["Bắt đầu", "start_date"],
            Column::EndDate => &["Kết thúc", "end_date"],
            Column::TotalPeriods => &["Tổng số tiết", "total_periods"],
            Column::Room => &["Phòng", "room"],
            Column::Instructor => &["Giảng viên", "instructor"],
            Column::FirstWeek => &["T1", "week_1"],
        }
    }

    fn find(self, headers: &[String]) -> Result<usize> {
        let names = self.names();
        headers
            .iter()
            .position(|h| {
                let h = normalize_header(h);
                names.iter().any(|n| n.to_lowercase() == h)
            })
            .ok_or_else(|| Error::MissingColumn(names[0].to_string()))
    }
}

/// BOM・前後の空白・CRを除いて小文字化
fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
}

/// 解決済みの列位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub id: usize,
    pub name: usize,
    pub credits: usize,
    pub day: usize,
    pub start_period: usize,
    pub end_period: usize,
    pub start_date: usize,
    pub end_date: usize,
    pub total_periods: usize,
    pub room: usize,
    pub instructor: usize,
    /// 週フラグ列（第1週列 〜 終了日列の直前）
    pub weeks: RangeInclusive<usize>,
}

impl ColumnLayout {
    /// 指定の方法で列位置を解決
    pub fn resolve(headers: &[String], strategy: LayoutStrategy) -> Result<Self> {
        match strategy {
            LayoutStrategy::Header => Self::from_headers(headers),
            LayoutStrategy::Fixed => Self::fixed_for(headers),
            LayoutStrategy::Auto => match Self::from_headers(headers) {
                Ok(layout) => Ok(layout),
                Err(Error::MissingColumn(column)) if headers.len() == FIXED_COLUMN_COUNT => {
                    tracing::debug!(
                        missing = %column,
                        "header lookup failed, falling back to fixed column offsets"
                    );
                    Ok(Self::fixed())
                }
                Err(e) => Err(e),
            },
        }
    }

    /// ヘッダー名から解決
    pub fn from_headers(headers: &[String]) -> Result<Self> {
        let end_date = Column::EndDate.find(headers)?;
        let first_week = Column::FirstWeek.find(headers)?;
        if end_date <= first_week {
            return Err(Error::InvalidWeekRange {
                start: first_week,
                end: end_date.saturating_sub(1),
            });
        }

        Ok(Self {
            id: Column::Id.find(headers)?,
            name: Column::Name.find(headers)?,
            credits: Column::Credits.find(headers)?,
            day: Column::Day.find(headers)?,
            start_period: Column::StartPeriod.find(headers)?,
            end_period: Column::EndPeriod.find(headers)?,
            start_date: Column::StartDate.find(headers)?,
            end_date,
            total_periods: Column::TotalPeriods.find(headers)?,
            room: Column::Room.find(headers)?,
            instructor: Column::Instructor.find(headers)?,
            weeks: first_week..=end_date - 1,
        })
    }

    /// 固定オフセット
    ///
    /// 0 Mã LHP, 1 Tên môn học, 2 Số TC, 3 Thứ, 4 Từ tiết, 5 Đến tiết,
    /// 6 Tổng số tiết, 7 Phòng, 8 Bắt đầu, 9..=40 T1..T32, 41 Kết thúc, 42 Giảng viên
    pub fn fixed() -> Self {
        Self {
            id: 0,
            name: 1,
            credits: 2,
            day: 3,
            start_period: 4,
            end_period: 5,
            total_periods: 6,
            room: 7,
            start_date: 8,
            weeks: 9..=40,
            end_date: 41,
            instructor: 42,
        }
    }

    fn fixed_for(headers: &[String]) -> Result<Self> {
        if headers.len() < FIXED_COLUMN_COUNT {
            return Err(Error::MissingColumn(format!(
                "fixed layout needs {} columns, header has {}",
                FIXED_COLUMN_COUNT,
                headers.len()
            )));
        }
        Ok(Self::fixed())
    }

    /// 週フラグ列の数（= 学期の週数）
    pub fn week_count(&self) -> usize {
        self.weeks.end() + 1 - self.weeks.start()
    }
}
