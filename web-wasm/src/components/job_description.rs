//! ステップ1: 求人票アップロード

use hire_wizard_common::{Activity, JobSummary, Step};
use leptos::prelude::*;
use web_sys::File;

use crate::components::upload_area::UploadArea;
use crate::controller::WizardController;

#[component]
pub fn JobDescriptionStep(controller: WizardController) -> impl IntoView {
    let is_uploading = move || controller.with(|s| s.activity == Activity::UploadingJobDescription);
    let summary = move || {
        controller.with(|s| s.job_description.as_ref().map(JobSummary::from_job_description))
    };

    let on_files = move |files: Vec<File>| {
        if let Some(file) = files.into_iter().next() {
            controller.upload_job_description(file);
        }
    };

    view! {
        <section
            class="step-content"
            class:active=move || controller.with(|s| s.is_panel_visible(Step::JobDescription))
        >
            <h2>"Upload Job Description"</h2>

            <UploadArea
                icon="fas fa-file-alt"
                prompt="Drag & drop the job description here or click to browse"
                multiple=false
                disabled=Signal::derive(is_uploading)
                on_files=on_files
            />

            {move || {
                controller
                    .with(|s| s.jd_filename.clone())
                    .map(|name| view! { <p class="file-name"><i class="fas fa-file"></i>" "{name}</p> })
            }}

            <Show when=is_uploading>
                <div class="loading">
                    <div class="spinner"></div>
                    <p>"Analyzing job description..."</p>
                </div>
            </Show>

            {move || {
                if is_uploading() {
                    return None;
                }
                summary().map(|summary| {
                    view! {
                        <div class="jd-preview">
                            <h3>{summary.position}</h3>
                            <h4>"Key Requirements"</h4>
                            <ul>
                                {summary
                                    .requirements
                                    .into_iter()
                                    .map(|req| view! { <li>{req}</li> })
                                    .collect_view()}
                            </ul>
                            <button
                                class="btn btn-primary"
                                on:click=move |_| controller.navigate_to_step(Step::Cvs)
                            >
                                "Next: Upload CVs"
                            </button>
                        </div>
                    }
                })
            }}
        </section>
    }
}
