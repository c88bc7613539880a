//! CSVアップロードエリアコンポーネント

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileReader, HtmlInputElement};

const READ_ERROR_MESSAGE: &str = "Không đọc được nội dung tệp.";

#[component]
pub fn UploadArea<F>(on_file_loaded: F) -> impl IntoView
where
    F: Fn(String, String) + 'static + Clone + Send,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref: NodeRef<leptos::html::Input> = NodeRef::new();

    let on_change = {
        let on_file_loaded = on_file_loaded.clone();
        move |ev: web_sys::Event| {
            let input: HtmlInputElement = event_target(&ev);
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                read_file(file, on_file_loaded.clone());
            }
            // 同じファイルを選び直しても change が発火するように
            input.set_value("");
        }
    };

    let on_drop = {
        let on_file_loaded = on_file_loaded.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(file) = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0))
            {
                read_file(file, on_file_loaded.clone());
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div
            class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <input
                type="file"
                accept=".csv,text/csv"
                class="hidden"
                node_ref=input_ref
                on:change=on_change
                on:click=|ev| ev.stop_propagation()
            />
            <div class="upload-icon">"📄"</div>
            <p>"Kéo thả hoặc bấm để chọn tệp CSV"</p>
            <p class="text-muted">"Tệp xuất danh sách lớp học phần (.csv)"</p>
        </div>
    }
}

fn read_file<F>(file: File, on_file_loaded: F)
where
    F: Fn(String, String) + 'static,
{
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            web_sys::console::error_2(&"FileReader unavailable".into(), &e);
            return;
        }
    };

    let file_name = file.name();
    let reader_clone = reader.clone();
    let onload = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        match reader_clone.result().ok().and_then(|r| r.as_string()) {
            Some(text) => on_file_loaded(file_name.clone(), text),
            None => gloo::dialogs::alert(READ_ERROR_MESSAGE),
        }
    }) as Box<dyn FnMut(_)>);

    let onerror = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        gloo::dialogs::alert(READ_ERROR_MESSAGE);
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    if let Err(e) = reader.read_as_text(&file) {
        web_sys::console::error_2(&"read_as_text failed".into(), &e);
        gloo::dialogs::alert(READ_ERROR_MESSAGE);
    }
}
