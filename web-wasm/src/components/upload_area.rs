//! アップロードエリアコンポーネント（ドラッグ&ドロップ / クリック選択）

use leptos::html;
use leptos::prelude::*;
use web_sys::{DragEvent, File, HtmlInputElement};

use crate::api::file_list_to_vec;
use crate::api::files::DOCUMENT_ACCEPT;

#[component]
pub fn UploadArea<F>(
    icon: &'static str,
    prompt: &'static str,
    multiple: bool,
    disabled: Signal<bool>,
    on_files: F,
) -> impl IntoView
where
    F: Fn(Vec<File>) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<html::Input>::new();

    let on_drop = {
        let on_files = on_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if disabled.get_untracked() {
                return;
            }

            if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
                let files = file_list_to_vec(&files);
                if !files.is_empty() {
                    on_files(files);
                }
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !disabled.get_untracked() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if disabled.get_untracked() {
            return;
        }
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            let files = file_list_to_vec(&files);
            if !files.is_empty() {
                on_files(files);
            }
        }
        // 同じファイルを選び直せるように
        input.set_value("");
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if disabled.get() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <div class="upload-icon"><i class=icon></i></div>
            <p>{prompt}</p>
            <p class="text-muted">"Supported formats: PDF, DOC, DOCX"</p>
            <input
                type="file"
                class="hidden"
                accept=DOCUMENT_ACCEPT
                multiple=multiple
                node_ref=input_ref
                on:change=on_change
                on:click=|ev| ev.stop_propagation()
            />
        </div>
    }
}
