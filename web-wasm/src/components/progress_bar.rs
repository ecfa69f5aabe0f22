//! プログレスバーコンポーネント

use hire_wizard_common::MatchProgress;
use leptos::prelude::*;

#[component]
pub fn ProgressBar(progress: Signal<MatchProgress>) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%", progress.get().percent())
                />
            </div>
            <p class="progress-text">{move || progress.get().label()}</p>
        </div>
    }
}
