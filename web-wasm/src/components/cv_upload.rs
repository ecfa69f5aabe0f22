//! ステップ2: CVアップロード

use hire_wizard_common::Step;
use leptos::prelude::*;
use web_sys::File;

use crate::components::upload_area::UploadArea;
use crate::controller::WizardController;

#[component]
pub fn CvUploadStep(controller: WizardController) -> impl IntoView {
    let files = move || {
        controller.with(|s| {
            s.candidates
                .iter()
                .map(|c| (c.filename.clone(), c.file_size.clone()))
                .collect::<Vec<_>>()
        })
    };
    let has_files = move || controller.with(|s| !s.candidates.is_empty());

    view! {
        <section
            class="step-content"
            class:active=move || controller.with(|s| s.is_panel_visible(Step::Cvs))
        >
            <h2>"Upload CVs"</h2>

            <UploadArea
                icon="fas fa-file-upload"
                prompt="Drag & drop CVs here or click to browse"
                multiple=true
                disabled=Signal::derive(move || controller.with(|s| s.is_busy()))
                on_files={move |files: Vec<File>| controller.add_cv_files(files)}
            />

            <Show when=has_files>
                <div class="cv-preview">
                    <h4>{move || controller.with(|s| s.cv_count_label())}</h4>
                    <ul class="file-list">
                        <For
                            each=files
                            key=|(name, _)| name.clone()
                            children=|(name, size)| {
                                view! {
                                    <li class="file-item">
                                        <i class="fas fa-file-pdf"></i>
                                        <span class="file-name">{name}</span>
                                        <span class="file-size">{size}</span>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </div>
            </Show>

            <div class="step-actions">
                <button
                    class="btn btn-primary"
                    disabled=move || controller.with(|s| s.is_busy())
                    on:click=move |_| controller.process_cvs()
                >
                    "Process CVs"
                </button>
            </div>
        </section>
    }
}
