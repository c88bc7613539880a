//! 読み込み中表示

use leptos::prelude::*;

#[component]
pub fn LoadingIndicator(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="loading-container">
            <div class="spinner" />
            <p class="loading-text">{message}</p>
        </div>
    }
}
