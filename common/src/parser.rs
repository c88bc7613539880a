//! 授業CSVパーサー
//!
//! 1行目をヘッダーとして列位置を解決し、各行を ClassSchedule に変換する。
//! 同じ授業IDの行は1つの Class にまとめ、スケジュールを行順に追加する。
//!
//! - 列数がヘッダーと一致しない行は読み飛ばす
//! - 数値に変換できない値は `None` として保持する
//! - 授業はIDの初出順に並ぶ

use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::layout::{ColumnLayout, LayoutStrategy};
use crate::types::{Class, ClassSchedule, ParsedData};

/// パース設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub strategy: LayoutStrategy,
    pub delimiter: u8,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strategy: LayoutStrategy::Auto,
            delimiter: b',',
        }
    }
}

impl ParseOptions {
    pub fn with_strategy(strategy: LayoutStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}

/// パース結果と集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub data: ParsedData,
    /// ヘッダーを除くデータ行数
    pub total_rows: usize,
    /// 列数不一致などで読み飛ばした行数
    pub skipped_rows: usize,
    /// 週フラグ列の数
    pub week_count: usize,
}

/// CSV文字列をパース（既定の設定）
///
/// # Examples
/// ```
/// use class_planner_common::parse_csv;
///
/// let csv = "Mã LHP,Tên môn học,Số TC,Thứ,Từ tiết,Đến tiết,Tổng số tiết,Phòng,Bắt đầu,T1,T2,Kết thúc,Giảng viên\n\
///            C1,Giải tích,3,2,1,3,45,A101,01/01/2024,x,,31/05/2024,Nguyễn Văn A\n";
/// let data = parse_csv(csv).unwrap();
/// assert_eq!(data.classes.len(), 1);
/// assert_eq!(data.classes[0].schedules[0].weeks, vec![true, false]);
/// ```
pub fn parse_csv(content: &str) -> Result<ParsedData> {
    parse_csv_with(content, &ParseOptions::default()).map(|report| report.data)
}

/// CSV文字列をパース
pub fn parse_csv_with(content: &str, options: &ParseOptions) -> Result<ParseReport> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(header) => header?.iter().map(str::to_string).collect(),
        None => return Err(Error::EmptyInput),
    };
    let layout = ColumnLayout::resolve(&headers, options.strategy)?;

    let mut classes: Vec<Class> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();
    let mut total_rows = 0;
    let mut skipped_rows = 0;

    for (line, record) in records.enumerate() {
        total_rows += 1;
        let record = match record {
            Ok(r) if r.len() == headers.len() => r,
            Ok(r) => {
                tracing::debug!(
                    row = line + 2,
                    fields = r.len(),
                    expected = headers.len(),
                    "skipping row with wrong field count"
                );
                skipped_rows += 1;
                continue;
            }
            Err(e) => {
                tracing::debug!(row = line + 2, error = %e, "skipping unreadable row");
                skipped_rows += 1;
                continue;
            }
        };

        let id = field(&record, layout.id).to_string();
        let schedule = map_schedule(&record, &layout);

        match index_by_id.get(&id) {
            Some(&i) => classes[i].schedules.push(schedule),
            None => {
                index_by_id.insert(id.clone(), classes.len());
                classes.push(Class {
                    id,
                    name: field(&record, layout.name).to_string(),
                    credits: parse_number(field(&record, layout.credits)),
                    instructor: field(&record, layout.instructor).to_string(),
                    schedules: vec![schedule],
                });
            }
        }
    }

    tracing::info!(
        classes = classes.len(),
        rows = total_rows,
        skipped = skipped_rows,
        "parsed class CSV"
    );

    Ok(ParseReport {
        data: ParsedData { classes },
        total_rows,
        skipped_rows,
        week_count: layout.week_count(),
    })
}

/// 1行分のスケジュール
///
/// 開始時限 > 終了時限 の行は時限を不明として扱う。
fn map_schedule(record: &StringRecord, layout: &ColumnLayout) -> ClassSchedule {
    let weeks = layout
        .weeks
        .clone()
        .map(|i| is_week_marker(field(record, i)))
        .collect();

    let mut start_period: Option<u32> = parse_number(field(record, layout.start_period));
    let mut end_period: Option<u32> = parse_number(field(record, layout.end_period));
    if let (Some(start), Some(end)) = (start_period, end_period) {
        if start > end {
            tracing::debug!(start, end, "inverted period range treated as unknown");
            start_period = None;
            end_period = None;
        }
    }

    ClassSchedule {
        day: parse_number(field(record, layout.day)),
        start_period,
        end_period,
        room: field(record, layout.room).to_string(),
        start_date: field(record, layout.start_date).to_string(),
        end_date: field(record, layout.end_date).to_string(),
        weeks,
        total_periods: parse_number(field(record, layout.total_periods)),
    }
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

/// 先頭の数字列を整数として読む（"3.0" → 3）。数字で始まらなければ `None`
fn parse_number<T: FromStr>(value: &str) -> Option<T> {
    let value = value.trim();
    let digits = value
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value, |end| &value[..end]);
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// 実施週の印は "x"
fn is_week_marker(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("x")
}
