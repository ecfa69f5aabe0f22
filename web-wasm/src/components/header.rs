//! ヘッダーとステップインジケーター

use hire_wizard_common::Step;
use leptos::prelude::*;

use crate::controller::WizardController;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"AI Hiring Assistant"</h1>
            <p class="text-muted">"Match CVs to your job description and schedule interviews"</p>
        </header>
    }
}

#[component]
pub fn StepIndicators(controller: WizardController) -> impl IntoView {
    view! {
        <div class="step-indicators">
            {Step::ALL
                .into_iter()
                .enumerate()
                .map(|(i, step)| {
                    let class = move || {
                        let state = controller.with(|s| s.indicator_states()[i]);
                        format!("step-indicator {}", state.css_class())
                    };
                    view! {
                        <div class=class>
                            <span class="step-number">{step.number()}</span>
                            <span class="step-label">{step.label()}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
