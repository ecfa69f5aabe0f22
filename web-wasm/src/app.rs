//! メインアプリケーションコンポーネント

use leptos::prelude::*;

use crate::components::{
    cv_upload::CvUploadStep,
    header::{Header, StepIndicators},
    interviews::InterviewStep,
    job_description::JobDescriptionStep,
    notification::NotificationToast,
    results::MatchingStep,
    success::SuccessView,
};
use crate::config::{load_config, today};
use crate::controller::WizardController;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    log::debug!("api base url: {:?}", config.api_base_url);
    let controller = WizardController::new(config, today());

    view! {
        <div class="container">
            <Header />
            <StepIndicators controller=controller />

            <JobDescriptionStep controller=controller />
            <CvUploadStep controller=controller />
            <MatchingStep controller=controller />
            <InterviewStep controller=controller />
            <SuccessView controller=controller />

            <NotificationToast controller=controller />
        </div>
    }
}
