//! 送信完了画面

use hire_wizard_common::EmailPreview;
use leptos::prelude::*;

use crate::controller::WizardController;

#[component]
pub fn SuccessView(controller: WizardController) -> impl IntoView {
    let completion = move || controller.with(|s| s.completion.clone());

    view! {
        <Show when=move || controller.with(|s| s.completion.is_some())>
            <section class="step-content active success-view">
                <div class="success-icon"><i class="fas fa-check-circle"></i></div>
                <h2>"Interview Invitations Sent!"</h2>
                {move || {
                    completion().map(|response| {
                        let message = response.message.clone().unwrap_or_else(|| {
                            format!("{} candidates have been invited to interview.", response.scheduled)
                        });
                        view! {
                            <p>{message}</p>
                            {(!response.email_previews.is_empty()).then(|| view! {
                                <div class="email-previews">
                                    <h3>"Email Previews"</h3>
                                    {response
                                        .email_previews
                                        .into_iter()
                                        .enumerate()
                                        .map(|(i, preview)| view! {
                                            {(i > 0).then(|| view! { <hr /> })}
                                            <EmailPreviewItem preview=preview />
                                        })
                                        .collect_view()}
                                </div>
                            })}
                        }
                    })
                }}
                <button class="btn btn-primary" on:click=move |_| controller.reset_process()>
                    <i class="fas fa-redo"></i>
                    " Start New Hiring Process"
                </button>
            </section>
        </Show>
    }
}

#[component]
pub fn EmailPreviewItem(preview: EmailPreview) -> impl IntoView {
    if let Some(error) = preview.error {
        return view! {
            <div class="email-preview email-error">
                <p><strong>{preview.candidate}</strong>" ("{preview.email}")"</p>
                <p class="text-danger">{error}</p>
            </div>
        }
        .into_any();
    }

    let lines = preview
        .preview
        .lines()
        .into_iter()
        .map(|line| view! { <p>{line.to_string()}</p> })
        .collect_view();

    view! {
        <div class="email-preview">
            <p><strong>"To: "</strong>{preview.candidate}" <"{preview.email}">"</p>
            <p><strong>"Subject: "</strong>{preview.subject}</p>
            <div class="email-body">{lines}</div>
        </div>
    }
    .into_any()
}
