//! ターミナル表示
//!
//! 不明な値（`None`）は空欄で表示する。

use chrono::NaiveDate;
use class_planner_common::{
    format_dmy, Class, ClassSchedule, ClassStatus, ParseReport, Selection, TimeSlot, WeekCursor,
    WeekGrid,
};

fn blank<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// 状態の表示ラベル
pub fn status_label(status: &ClassStatus) -> String {
    match status {
        ClassStatus::Selected => "✔ 選択中".to_string(),
        ClassStatus::Conflict(existing) => format!("✖ 重複 ({})", existing),
        ClassStatus::Available => "  追加可".to_string(),
    }
}

/// 授業1件の見出し行
pub fn class_line(class: &Class, status: &ClassStatus) -> String {
    format!(
        "[{}] {} {} ({}TC) - {}",
        status_label(status),
        class.id,
        class.name,
        blank(class.credits),
        class.instructor
    )
}

/// スケジュール1件の詳細行
pub fn schedule_line(schedule: &ClassSchedule) -> String {
    let periods = match (schedule.start_period, schedule.end_period) {
        (None, None) => String::new(),
        (start, end) => format!("Tiết {}-{}", blank(start), blank(end)),
    };
    let weeks = schedule
        .active_weeks()
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{} {} {} {}〜{} 週: {}",
        schedule.day_label().unwrap_or_default(),
        periods,
        schedule.room,
        schedule.start_date,
        schedule.end_date,
        weeks
    )
}

/// 授業一覧（状態付き）
pub fn class_list(classes: &[&Class], selection: &Selection) -> String {
    let mut out = String::new();
    for class in classes {
        out.push_str(&class_line(class, &selection.status(class)));
        out.push('\n');
        for schedule in &class.schedules {
            out.push_str("    ");
            out.push_str(&schedule_line(schedule));
            out.push('\n');
        }
    }
    out
}

/// 選択中の授業と合計単位
pub fn selection_summary(selection: &Selection) -> String {
    if selection.is_empty() {
        return "選択中の授業はありません\n".to_string();
    }

    let mut out = format!("選択中の授業: {}件\n", selection.len());
    for class in selection {
        out.push_str(&format!(
            "  {} {} ({}TC) - {}\n",
            class.id,
            class.name,
            blank(class.credits),
            class.instructor
        ));
    }
    out.push_str(&format!("合計単位: {}\n", selection.total_credits()));
    out
}

/// パース結果の概要
pub fn report_summary(report: &ParseReport, term_start: Option<NaiveDate>) -> String {
    let mut out = format!(
        "授業: {}件 / データ行: {}行 / 読み飛ばし: {}行 / 週数: {}\n",
        report.data.len(),
        report.total_rows,
        report.skipped_rows,
        report.week_count
    );
    out.push_str(&format!(
        "学期開始日: {}\n",
        term_start.map(format_dmy).unwrap_or_else(|| "不明".to_string())
    ));
    out
}

/// 週の時間割
pub fn week_grid(grid: &WeekGrid, cursor: &WeekCursor, term_start: NaiveDate) -> String {
    let mut out = match cursor.week_range(term_start) {
        Some((monday, sunday)) => format!(
            "Tuần {}/{} ({} - {})\n",
            cursor.current(),
            cursor.total(),
            format_dmy(monday),
            format_dmy(sunday)
        ),
        None => format!("Tuần {}/{}\n", cursor.current(), cursor.total()),
    };

    if grid.is_empty() {
        out.push_str("この週に授業はありません\n");
        return out;
    }

    for day in &grid.days {
        let entries: Vec<(TimeSlot, String)> = TimeSlot::BANDS
            .iter()
            .flat_map(move |&slot| {
                grid.cell(slot, day.code).iter().map(move |entry| {
                    (
                        slot,
                        format!(
                            "Tiết {}-{} {} {} [{}] {}",
                            entry.start_period,
                            entry.end_period,
                            entry.class_id,
                            entry.class_name,
                            entry.room,
                            entry.instructor
                        ),
                    )
                })
            })
            .collect();

        if entries.is_empty() {
            continue;
        }

        let date = day.date.map(format_dmy).unwrap_or_default();
        out.push_str(&format!("{} {}\n", day.label, date));
        for (slot, line) in entries {
            out.push_str(&format!("  {:<5} {}\n", slot.label(), line));
        }
    }
    out
}
