//! ステップ3: マッチング結果

use hire_wizard_common::{Activity, CandidateCard, Step};
use leptos::prelude::*;

use crate::components::progress_bar::ProgressBar;
use crate::controller::WizardController;

#[component]
pub fn MatchingStep(controller: WizardController) -> impl IntoView {
    let is_matching = move || controller.with(|s| s.activity == Activity::MatchingCvs);
    let cards = move || {
        controller.with(|s| {
            s.candidates
                .iter()
                .map(CandidateCard::from_candidate)
                .collect::<Vec<_>>()
        })
    };

    view! {
        <section
            class="step-content"
            class:active=move || controller.with(|s| s.is_panel_visible(Step::Matching))
        >
            <h2>"AI Matching Results"</h2>

            <Show when=is_matching>
                <div class="loading">
                    <div class="spinner"></div>
                    <p>"Analyzing CVs against the job description..."</p>
                </div>
                <ProgressBar progress=Signal::derive(move || controller.with(|s| s.progress)) />
            </Show>

            <Show when=move || controller.with(|s| s.results_ready)>
                <div class="results">
                    {move || {
                        cards()
                            .into_iter()
                            .map(|card| view! { <CandidateCardItem card=card /> })
                            .collect_view()
                    }}
                </div>
                <div class="step-actions">
                    <button
                        class="btn btn-primary"
                        on:click=move |_| controller.advance_to_interviews()
                    >
                        "Next: Schedule Interviews"
                    </button>
                </div>
            </Show>
        </section>
    }
}

#[component]
fn CandidateCardItem(card: CandidateCard) -> impl IntoView {
    let class = format!(
        "candidate-card {}{}",
        card.band.css_class(),
        if card.shortlisted { " shortlisted" } else { "" }
    );

    view! {
        <div class=class>
            <div class="candidate-header">
                <div class="candidate-avatar">{card.avatar}</div>
                <div class="candidate-info">
                    <h4>{card.name}</h4>
                    <p class="text-muted">{card.background}</p>
                </div>
                <div class="match-score">{card.score_label}</div>
            </div>
            <div class="candidate-skills">
                {card
                    .skills
                    .into_iter()
                    .map(|skill| view! { <span class="skill-tag">{skill}</span> })
                    .collect_view()}
            </div>
            {card.error.map(|error| {
                view! {
                    <div class="candidate-error">
                        <i class="fas fa-exclamation-triangle"></i>
                        " "
                        {error}
                    </div>
                }
            })}
        </div>
    }
}
