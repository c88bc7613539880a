//! メインアプリケーションコンポーネント

use chrono::NaiveDate;
use class_planner_common::{
    instructor_options, monday_of, parse_csv_with, subject_options, term_start, Class, Error,
    Filters, ParseOptions, ParsedData, Planner, WeekCursor,
};
use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{
    class_search::ClassSearch, filters::FilterPanel, header::Header,
    loading_indicator::LoadingIndicator, selected_summary::SelectedSummary, timetable::Timetable,
    upload_area::UploadArea, week_navigation::WeekNavigation,
};
use crate::storage::BrowserStore;

const PARSE_ERROR_MESSAGE: &str = "Đã xảy ra lỗi khi đọc tệp CSV. Vui lòng thử lại.";

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (parsed, set_parsed) = signal(None::<ParsedData>);
    let (is_loading, set_is_loading) = signal(false);
    let (filters, set_filters) = signal(Filters::default());
    let (cursor, set_cursor) = signal(WeekCursor::default());
    let (start_date, set_start_date) = signal(today_monday());
    let (planner, set_planner) = signal(Planner::open(BrowserStore));

    let selection = Memo::new(move |_| planner.with(|p| p.selection().clone()));
    let classes = Signal::derive(move || {
        parsed.with(|data| data.as_ref().map(|d| d.classes.clone()).unwrap_or_default())
    });
    let subjects = Memo::new(move |_| classes.with(|c| subject_options(c)));
    let instructors = Memo::new(move |_| classes.with(|c| instructor_options(c)));

    // CSV読み込み（描画を1回挟んでからパース）
    let on_file_loaded = move |file_name: String, content: String| {
        set_is_loading.set(true);
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            match parse_csv_with(&content, &ParseOptions::default()) {
                Ok(report) => {
                    if let Some(start) = term_start(&report.data.classes) {
                        set_start_date.set(start);
                    }
                    set_parsed.set(Some(report.data));
                }
                Err(e) => {
                    log_error(&format!("{}: {}", file_name, e));
                    gloo::dialogs::alert(PARSE_ERROR_MESSAGE);
                }
            }
            set_is_loading.set(false);
        });
    };

    let on_add = move |class: Class| {
        set_planner.update(|p| {
            if let Err(e) = p.add(class) {
                report(&e);
            }
        });
    };

    let on_remove = move |id: String| {
        set_planner.update(|p| {
            if let Err(e) = p.remove(&id) {
                report(&e);
            }
        });
    };

    let on_reset_filters = move |_: ()| set_filters.update(Filters::reset);

    view! {
        <div class="container">
            <Header />

            <UploadArea on_file_loaded=on_file_loaded />

            <Show when=move || is_loading.get()>
                <LoadingIndicator message="Đang xử lý tệp CSV..." />
            </Show>

            <Show when=move || parsed.with(Option::is_some) && !is_loading.get()>
                <FilterPanel
                    filters=filters
                    set_filters=set_filters
                    subjects=subjects
                    instructors=instructors
                    on_reset=on_reset_filters
                />
                <div class="layout">
                    <div class="sidebar">
                        <ClassSearch
                            classes=classes
                            filters=filters
                            selection=selection
                            on_add=on_add
                            on_remove=on_remove
                        />
                    </div>
                    <div class="main">
                        <WeekNavigation cursor=cursor set_cursor=set_cursor start_date=start_date />
                        <Timetable selection=selection cursor=cursor start_date=start_date />
                    </div>
                </div>
            </Show>

            <SelectedSummary selection=selection on_remove=on_remove />
        </div>
    }
}

/// 今日を含む週の月曜日
fn today_monday() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .map(monday_of)
    .unwrap_or_default()
}

fn log_error(message: &str) {
    web_sys::console::error_1(&message.into());
}

/// 選択操作のエラー。保存に失敗した場合のみ通知する
fn report(error: &Error) {
    log_error(&error.to_string());
    if !error.is_selection_error() {
        gloo::dialogs::alert(&format!("Không thể lưu lựa chọn: {}", error));
    }
}
