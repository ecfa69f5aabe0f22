//! ウィザードコントローラー
//!
//! 状態（WizardState）を1つのシグナルで持ち、変更はすべて名前付き遷移経由。
//! バックエンド呼び出しは spawn_local で1件ずつ実行し、
//! await をまたいで状態を借用しない（begin → 呼び出し → finish）。

use chrono::NaiveDate;
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use hire_wizard_common::{
    Error, HiringApi, Notification, NotificationSlot, ScheduleForm, SlotField, Step, WizardConfig,
    WizardState,
};

use crate::api::{read_upload, FetchApi};
use crate::config::today;

#[derive(Clone, Copy)]
pub struct WizardController {
    pub state: RwSignal<WizardState>,
    pub notification: RwSignal<NotificationSlot>,
    notification_timeout_ms: u32,
    api: StoredValue<FetchApi>,
}

impl WizardController {
    pub fn new(config: WizardConfig, today: NaiveDate) -> Self {
        let form_defaults = config.schedule_defaults(today);
        Self {
            state: RwSignal::new(WizardState::new(form_defaults)),
            notification: RwSignal::new(NotificationSlot::default()),
            notification_timeout_ms: config.notification_timeout_ms,
            api: StoredValue::new(FetchApi::new(config)),
        }
    }

    /// 状態を読む（購読あり）
    pub fn with<U>(&self, f: impl FnOnce(&WizardState) -> U) -> U {
        self.state.with(f)
    }

    fn transition<U>(&self, f: impl FnOnce(&mut WizardState) -> U) -> Option<U> {
        self.state.try_update(f)
    }

    // =============================================
    // 通知
    // =============================================

    /// 一定時間後に自動で閉じる（後から出た通知は消さない）
    pub fn notify(&self, notification: Notification) {
        let Some(seq) = self.notification.try_update(|slot| slot.show(notification)) else {
            return;
        };

        let signal = self.notification;
        Timeout::new(self.notification_timeout_ms, move || {
            signal.update(|slot| {
                slot.dismiss(seq);
            });
        })
        .forget();
    }

    fn report(&self, error: &Error) {
        log::error!("{}", error);
        self.notify(Notification::from(error));
    }

    fn report_result<T>(&self, result: Option<Result<T, Error>>) -> Option<T> {
        match result? {
            Ok(value) => Some(value),
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    // =============================================
    // ナビゲーション
    // =============================================

    pub fn navigate_to_step(&self, step: Step) {
        self.transition(|s| s.navigate_to_step(step));
    }

    pub fn advance_to_interviews(&self) {
        self.transition(|s| s.advance_to_interviews());
    }

    pub fn reset_process(&self) {
        self.transition(|s| s.reset_process());
    }

    // =============================================
    // 求人票・CV
    // =============================================

    pub fn upload_job_description(self, file: File) {
        spawn_local(async move {
            self.transition(|s| s.begin_job_description_upload(&file.name()));

            let api = self.api.get_value();
            let result = match read_upload(&file).await {
                Ok(upload) => api.process_job_description(&upload).await,
                Err(e) => Err(e),
            };

            let outcome = self.transition(|s| s.finish_job_description_upload(result));
            if self.report_result(outcome).is_some() {
                self.notify(Notification::success("Job description processed successfully!"));
            }
        });
    }

    /// 読み込み中はマッチングを開始させない
    pub fn add_cv_files(self, files: Vec<File>) {
        if files.is_empty() {
            return;
        }
        if self.report_result(self.transition(|s| s.begin_reading_cvs())).is_none() {
            return;
        }

        spawn_local(async move {
            let mut uploads = Vec::with_capacity(files.len());
            for file in &files {
                match read_upload(file).await {
                    Ok(upload) => uploads.push(upload),
                    Err(e) => self.report(&e),
                }
            }

            let added = self.transition(|s| s.finish_reading_cvs(uploads)).unwrap_or(0);
            log::info!("queued {} new CVs", added);
        });
    }

    /// 未処理のCVを1件ずつ順番に処理する
    pub fn process_cvs(self) {
        let Some(queue) = self.report_result(self.transition(|s| s.begin_matching())) else {
            return;
        };

        spawn_local(async move {
            let api = self.api.get_value();
            queue
                .run(&api, |completion| {
                    self.transition(|s| s.record_cv_outcome(completion));
                })
                .await;
            self.transition(|s| s.finish_matching());
        });
    }

    // =============================================
    // 面接スケジュール
    // =============================================

    pub fn update_schedule_form(&self, f: impl FnOnce(&mut ScheduleForm)) {
        self.transition(|s| f(&mut s.schedule_form));
    }

    pub fn generate_interview_slots(&self) {
        let result = self.transition(|s| {
            let count = s.generate_interview_slots()?;
            s.show_interview_preview()?;
            Ok(count)
        });
        if let Some(count) = self.report_result(result) {
            log::info!("generated slots for {} candidates", count);
            self.notify(Notification::success("Interview slots generated successfully!"));
        }
    }

    pub fn add_interview_slot(&self) {
        let date = today();
        self.transition(|s| s.add_interview_slot(date));
    }

    pub fn remove_slot(&self, id: u64) {
        self.transition(|s| s.remove_slot(id));
    }

    pub fn update_slot(&self, id: u64, field: SlotField) {
        self.transition(|s| s.update_slot(id, field));
    }

    pub fn show_interview_preview(&self) {
        let result = self.transition(|s| s.show_interview_preview());
        self.report_result(result);
    }

    pub fn modify_schedule(&self) {
        self.transition(|s| s.modify_schedule());
    }

    pub fn send_interview_invites(self) {
        let Some(request) = self.report_result(self.transition(|s| s.begin_sending_invites())) else {
            return;
        };

        spawn_local(async move {
            let api = self.api.get_value();
            let result = api.schedule_interviews(&request).await;

            let outcome = self.transition(|s| s.finish_sending_invites(result));
            if let Some(scheduled) = self.report_result(outcome) {
                self.notify(Notification::success(format!(
                    "Interview invitations sent to {} candidates!",
                    scheduled
                )));
            }
        });
    }
}
