//! 週の時間割表
//!
//! 行は時間帯（Sáng / Chiều / Tối）、列は曜日。

use chrono::NaiveDate;
use class_planner_common::{format_dmy, GridEntry, Selection, WeekCursor, WeekGrid};
use leptos::prelude::*;

#[component]
pub fn Timetable(
    selection: Memo<Selection>,
    cursor: ReadSignal<WeekCursor>,
    start_date: ReadSignal<NaiveDate>,
) -> impl IntoView {
    let grid = Memo::new(move |_| {
        let week = cursor.get().current();
        selection.with(|s| WeekGrid::build(s.classes(), week, Some(start_date.get())))
    });

    let head = move || {
        grid.get()
            .days
            .into_iter()
            .map(|day| {
                view! {
                    <th class="day-header">
                        {day.label}
                        <br />
                        {day.date.map(format_dmy).unwrap_or_default()}
                    </th>
                }
            })
            .collect_view()
    };

    let body = move || {
        grid.get()
            .rows
            .into_iter()
            .map(|row| {
                view! {
                    <tr class="slot-row">
                        <td class="slot-label">{row.slot.label()}</td>
                        {row
                            .cells
                            .into_iter()
                            .map(|entries| {
                                view! {
                                    <td class="slot-cell">
                                        {entries.into_iter().map(entry_view).collect_view()}
                                    </td>
                                }
                            })
                            .collect_view()}
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <div class="timetable">
            <table>
                <thead>
                    <tr>
                        <th class="slot-label">"Ca học"</th>
                        {head}
                    </tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
        </div>
    }
}

fn entry_view(entry: GridEntry) -> impl IntoView {
    view! {
        <div class=format!("timetable-entry {}", entry.room_kind.css_class())>
            <div class="class-name">{entry.class_name}</div>
            <div>"Mã: " {entry.class_id}</div>
            <div>"Tiết: " {entry.start_period} " - " {entry.end_period}</div>
            <div>"Phòng: " {entry.room}</div>
            <div>"GV: " {entry.instructor}</div>
        </div>
    }
}
