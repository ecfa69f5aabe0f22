//! ウィザードの状態機械
//!
//! 状態の変更はすべてここの名前付き遷移を通す。
//! 画面（WASM側）はこの状態を描画するだけ。
//!
//! 非同期の遷移は `begin_*` / `finish_*` に分かれている。
//! await 中に状態の借用を持ち越さないため、WASM側は
//! begin → バックエンド呼び出し → finish の順に呼ぶ。
//! ネイティブ（テスト）では `upload_job_description` などの一括版を使う。

use chrono::NaiveDate;

use crate::api::HiringApi;
use crate::error::{Error, Result};
use crate::matching::{rank_candidates, CvCompletion, MatchProgress, MatchingQueue};
use crate::schedule::{
    format_date, format_time, slot_start_times, PreviewEntry, ScheduleForm, SchedulePreview,
};
use crate::types::{
    Candidate, EmailPreview, InterviewConfig, InterviewDetails, InterviewMode, InterviewSlot,
    JobDescription, ScheduleCandidate, ScheduleConfig, ScheduleRequest, ScheduleResponse,
    SlotCandidate, SlotField, UploadedFile,
};

/// ウィザードのステップ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    #[default]
    JobDescription = 1,
    Cvs = 2,
    Matching = 3,
    Interviews = 4,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::JobDescription, Step::Cvs, Step::Matching, Step::Interviews];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == n)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Step::JobDescription => "Job Description",
            Step::Cvs => "Upload CVs",
            Step::Matching => "AI Matching",
            Step::Interviews => "Schedule Interviews",
        }
    }
}

/// ステップインジケーターの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Completed,
    Active,
    Upcoming,
}

impl IndicatorState {
    pub fn css_class(&self) -> &'static str {
        match self {
            IndicatorState::Completed => "completed",
            IndicatorState::Active => "active",
            IndicatorState::Upcoming => "",
        }
    }
}

/// `current` より前は完了、`current` は表示中、以降はどちらでもない
pub fn indicator_states(current: Step) -> [IndicatorState; 4] {
    Step::ALL.map(|step| match step.cmp(&current) {
        std::cmp::Ordering::Less => IndicatorState::Completed,
        std::cmp::Ordering::Equal => IndicatorState::Active,
        std::cmp::Ordering::Greater => IndicatorState::Upcoming,
    })
}

/// 実行中の処理（ローディング表示用）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Activity {
    #[default]
    Idle,
    UploadingJobDescription,
    /// 選択されたCVファイルの読み込み中
    ReadingCvs,
    MatchingCvs,
    SendingInvites,
}

/// ウィザード1回分のセッション状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    pub job_description: Option<JobDescription>,
    pub jd_filename: Option<String>,
    pub candidates: Vec<Candidate>,
    /// `candidates` 上の位置（ランキング後に一度だけ再計算）
    shortlist: Vec<usize>,
    pub current_step: Step,
    pub interview_config: Option<InterviewConfig>,
    pub schedule_form: ScheduleForm,
    pub slots: Vec<InterviewSlot>,
    pub preview: Option<SchedulePreview>,
    pub activity: Activity,
    pub progress: MatchProgress,
    pub results_ready: bool,
    pub completion: Option<ScheduleResponse>,
    /// 送信が全件失敗したときの候補者ごとの結果
    pub failed_previews: Vec<EmailPreview>,
    next_slot_id: u64,
    form_defaults: ScheduleForm,
}

impl WizardState {
    pub fn new(form_defaults: ScheduleForm) -> Self {
        Self {
            schedule_form: form_defaults.clone(),
            form_defaults,
            ..Default::default()
        }
    }

    // =============================================
    // ナビゲーション
    // =============================================

    pub fn navigate_to_step(&mut self, step: Step) {
        log::debug!("navigate to step {}", step.number());
        self.current_step = step;
    }

    pub fn indicator_states(&self) -> [IndicatorState; 4] {
        indicator_states(self.current_step)
    }

    /// 完了画面の表示中はステップ4のパネルを隠す
    pub fn is_panel_visible(&self, step: Step) -> bool {
        step == self.current_step && !(step == Step::Interviews && self.completion.is_some())
    }

    pub fn is_busy(&self) -> bool {
        self.activity != Activity::Idle
    }

    /// 最初からやり直す
    pub fn reset_process(&mut self) {
        log::info!("resetting wizard");
        *self = Self::new(self.form_defaults.clone());
    }

    // =============================================
    // 求人票
    // =============================================

    pub fn begin_job_description_upload(&mut self, filename: &str) {
        self.jd_filename = Some(filename.to_string());
        self.activity = Activity::UploadingJobDescription;
    }

    /// 失敗時は以前の求人票をそのまま残す
    pub fn finish_job_description_upload(&mut self, result: Result<JobDescription>) -> Result<()> {
        self.activity = Activity::Idle;
        let job_description = result?;
        log::info!(
            "job description processed: {}",
            job_description.position.as_deref().unwrap_or("(no position)")
        );
        self.job_description = Some(job_description);
        Ok(())
    }

    pub async fn upload_job_description<A: HiringApi>(
        &mut self,
        api: &A,
        file: &UploadedFile,
    ) -> Result<()> {
        self.begin_job_description_upload(&file.name);
        let result = api.process_job_description(file).await;
        self.finish_job_description_upload(result)
    }

    // =============================================
    // CV
    // =============================================

    /// ファイル読み込みの開始（他の処理の実行中は受け付けない）
    pub fn begin_reading_cvs(&mut self) -> Result<()> {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        self.activity = Activity::ReadingCvs;
        Ok(())
    }

    pub fn finish_reading_cvs(&mut self, files: Vec<UploadedFile>) -> usize {
        if self.activity == Activity::ReadingCvs {
            self.activity = Activity::Idle;
        }
        self.add_cv_files(files)
    }

    /// 同名ファイルは先に追加したものだけ残す（大文字小文字を区別）
    ///
    /// 処理中は何も追加しない。戻り値は追加された件数。
    pub fn add_cv_files(&mut self, files: Vec<UploadedFile>) -> usize {
        if self.is_busy() {
            log::warn!("ignoring {} CVs while {:?}", files.len(), self.activity);
            return 0;
        }

        let mut added = 0;
        for file in files {
            if self.candidates.iter().any(|c| c.filename == file.name) {
                log::debug!("skip duplicate CV {}", file.name);
                continue;
            }
            self.candidates.push(Candidate::queued(file));
            added += 1;
        }
        added
    }

    pub fn cv_count_label(&self) -> String {
        format!("Selected CVs: {}", self.candidates.len())
    }

    // =============================================
    // マッチング
    // =============================================

    /// 前提条件を確認し、ステップ3へ進んで未処理キューを返す
    pub fn begin_matching(&mut self) -> Result<MatchingQueue> {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        if self.candidates.is_empty() {
            return Err(Error::NoCandidates);
        }
        let job_description = self
            .job_description
            .as_ref()
            .ok_or(Error::MissingJobDescription)?;

        let queue = match MatchingQueue::new(&self.candidates, job_description) {
            Ok(queue) => queue,
            Err(e) => {
                self.abort_matching();
                return Err(e);
            }
        };

        self.navigate_to_step(Step::Matching);
        self.activity = Activity::MatchingCvs;
        self.results_ready = false;
        self.progress = MatchProgress::new(0, self.candidates.len());
        log::info!("matching {} of {} CVs", queue.len(), self.candidates.len());
        Ok(queue)
    }

    pub fn record_cv_outcome(&mut self, completion: CvCompletion) {
        self.progress = completion.progress;

        let Some(candidate) = self
            .candidates
            .iter_mut()
            .find(|c| c.filename == completion.filename)
        else {
            log::warn!("CV {} is no longer queued", completion.filename);
            return;
        };

        match completion.outcome {
            Ok(analysis) => candidate.apply_analysis(analysis),
            Err(message) => candidate.mark_failed(message),
        }
    }

    /// スコア降順に並べ、ショートリストを作り直す
    pub fn finish_matching(&mut self) {
        self.shortlist = rank_candidates(&mut self.candidates);
        self.activity = Activity::Idle;
        self.results_ready = true;
        log::info!(
            "matching done: {} candidates, {} shortlisted",
            self.candidates.len(),
            self.shortlist.len()
        );
    }

    /// バッチ全体の失敗時はステップ2に戻す
    pub fn abort_matching(&mut self) {
        self.activity = Activity::Idle;
        self.navigate_to_step(Step::Cvs);
    }

    pub async fn process_batch<A: HiringApi>(&mut self, api: &A) -> Result<()> {
        let queue = self.begin_matching()?;
        queue.run(api, |completion| self.record_cv_outcome(completion)).await;
        self.finish_matching();
        Ok(())
    }

    pub fn shortlisted_candidates(&self) -> Vec<&Candidate> {
        self.shortlist
            .iter()
            .filter_map(|&index| self.candidates.get(index))
            .collect()
    }

    pub fn can_send_invites(&self) -> bool {
        !self.shortlist.is_empty()
    }

    pub fn advance_to_interviews(&mut self) {
        self.navigate_to_step(Step::Interviews);
    }

    // =============================================
    // 面接枠
    // =============================================

    /// ショートリスト順に1人1枠を割り当てる（既存の枠は置き換え）
    pub fn generate_interview_slots(&mut self) -> Result<usize> {
        let form = self.schedule_form.validate()?;
        if self.shortlist.is_empty() {
            return Err(Error::EmptyShortlist);
        }

        let duration = self.schedule_form.duration;
        let break_time = self.schedule_form.break_time;
        let times = slot_start_times(form.start, self.shortlist.len(), duration, break_time)?;

        let config = InterviewConfig {
            mode: form.mode,
            location: self.schedule_form.location.trim().to_string(),
            interviewer: self.schedule_form.interviewer.trim().to_string(),
            duration,
            break_time,
        };

        self.slots.clear();
        self.preview = None;
        for (position, start) in times.iter().enumerate() {
            let id = self.allocate_slot_id();
            self.slots.push(InterviewSlot {
                id,
                candidate: SlotCandidate::Shortlisted(position),
                date: format_date(start),
                time: format_time(start),
                mode: config.mode,
                location: config.location.clone(),
                interviewer: config.interviewer.clone(),
                min_date: None,
            });
        }
        self.interview_config = Some(config);

        log::info!("generated {} interview slots", self.slots.len());
        Ok(self.slots.len())
    }

    /// ショートリスト外の面接枠を追加する
    pub fn add_interview_slot(&mut self, today: NaiveDate) -> u64 {
        let (mode, location, interviewer) = match &self.interview_config {
            Some(config) => (config.mode, config.location.clone(), config.interviewer.clone()),
            None => (InterviewMode::default(), String::new(), String::new()),
        };

        let id = self.allocate_slot_id();
        self.slots.push(InterviewSlot {
            id,
            candidate: SlotCandidate::Manual {
                name: String::new(),
                email: String::new(),
            },
            date: String::new(),
            time: String::new(),
            mode,
            location,
            interviewer,
            min_date: Some(today.format("%Y-%m-%d").to_string()),
        });
        id
    }

    /// 手動追加枠のみ削除できる
    pub fn remove_slot(&mut self, id: u64) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| !(slot.id == id && slot.is_manual()));
        before != self.slots.len()
    }

    pub fn update_slot(&mut self, id: u64, field: SlotField) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == id) else {
            return false;
        };

        match field {
            SlotField::Date(value) => slot.date = value,
            SlotField::Time(value) => slot.time = value,
            SlotField::Mode(mode) => slot.mode = mode,
            SlotField::Location(value) => slot.location = value,
            SlotField::Interviewer(value) => slot.interviewer = value,
            SlotField::CandidateName(value) => match &mut slot.candidate {
                SlotCandidate::Manual { name, .. } => *name = value,
                SlotCandidate::Shortlisted(_) => return false,
            },
            SlotField::CandidateEmail(value) => match &mut slot.candidate {
                SlotCandidate::Manual { email, .. } => *email = value,
                SlotCandidate::Shortlisted(_) => return false,
            },
        }
        true
    }

    /// 枠の見出しに出す名前
    pub fn slot_title(&self, slot: &InterviewSlot) -> String {
        match &slot.candidate {
            SlotCandidate::Shortlisted(position) => self
                .shortlist_candidate(*position)
                .map(|c| c.name.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Unknown Candidate".to_string()),
            SlotCandidate::Manual { name, .. } if !name.trim().is_empty() => name.clone(),
            SlotCandidate::Manual { .. } => "Additional Interview Slot".to_string(),
        }
    }

    fn shortlist_candidate(&self, position: usize) -> Option<&Candidate> {
        self.shortlist
            .get(position)
            .and_then(|&index| self.candidates.get(index))
    }

    fn allocate_slot_id(&mut self) -> u64 {
        let id = self.next_slot_id;
        self.next_slot_id += 1;
        id
    }

    // =============================================
    // プレビュー
    // =============================================

    pub fn build_preview(&self) -> Result<SchedulePreview> {
        if self.slots.is_empty() {
            return Err(Error::NoSlotsToPreview);
        }

        let duration = self.schedule_form.duration;
        let entries = self
            .slots
            .iter()
            .map(|slot| {
                PreviewEntry::new(self.slot_title(slot), &slot.date, &slot.time, slot.mode, duration)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SchedulePreview {
            duration,
            break_time: self.schedule_form.break_time,
            entries,
        })
    }

    pub fn show_interview_preview(&mut self) -> Result<()> {
        self.preview = Some(self.build_preview()?);
        Ok(())
    }

    /// プレビューを閉じて編集に戻る
    pub fn modify_schedule(&mut self) {
        self.preview = None;
    }

    // =============================================
    // 面接案内の送信
    // =============================================

    /// 1枠でも不備があれば全体を送らない
    pub fn build_schedule_request(&self) -> Result<ScheduleRequest> {
        if self.slots.is_empty() {
            return Err(Error::NoSlots);
        }
        let job_description = self
            .job_description
            .clone()
            .ok_or(Error::JobDescriptionLost)?;

        let mut candidates = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            if !slot.is_complete() {
                return Err(Error::IncompleteSlot);
            }

            let interview_details = InterviewDetails {
                date: slot.date.trim().to_string(),
                time: slot.time.trim().to_string(),
                mode: slot.mode,
                location: slot.location.trim().to_string(),
                interviewer: slot.interviewer.trim().to_string(),
            };

            let candidate = match &slot.candidate {
                SlotCandidate::Shortlisted(position) => {
                    let c = self
                        .shortlist_candidate(*position)
                        .ok_or(Error::UnknownCandidate(*position))?;
                    ScheduleCandidate {
                        name: c.name.clone(),
                        email: c.email.clone(),
                        score: Some(c.score),
                        strengths: c.strengths.clone(),
                        weaknesses: c.weaknesses.clone(),
                        interview_details,
                    }
                }
                SlotCandidate::Manual { name, email } => {
                    if name.trim().is_empty() || email.trim().is_empty() {
                        return Err(Error::MissingManualCandidate);
                    }
                    ScheduleCandidate {
                        name: name.trim().to_string(),
                        email: email.trim().to_string(),
                        score: None,
                        strengths: Vec::new(),
                        weaknesses: Vec::new(),
                        interview_details,
                    }
                }
            };
            candidates.push(candidate);
        }

        Ok(ScheduleRequest {
            candidates,
            job_description,
            schedule_config: ScheduleConfig {
                duration: self.schedule_form.duration,
                break_time: self.schedule_form.break_time,
            },
        })
    }

    pub fn begin_sending_invites(&mut self) -> Result<ScheduleRequest> {
        let request = self.build_schedule_request()?;
        self.failed_previews.clear();
        self.activity = Activity::SendingInvites;
        Ok(request)
    }

    /// 成功時は完了画面に切り替え、送信件数を返す
    pub fn finish_sending_invites(&mut self, result: Result<ScheduleResponse>) -> Result<usize> {
        self.activity = Activity::Idle;
        if let Err(Error::ScheduleRejected { email_previews, .. }) = &result {
            log::warn!("no interviews scheduled, {} failures", email_previews.len());
            self.failed_previews = email_previews.clone();
        }
        let response = result?;
        let scheduled = response.scheduled;
        log::info!("interview invitations sent to {} candidates", scheduled);
        self.completion = Some(response);
        Ok(scheduled)
    }

    pub async fn send_interview_invites<A: HiringApi>(&mut self, api: &A) -> Result<usize> {
        let request = self.begin_sending_invites()?;
        let result = api.schedule_interviews(&request).await;
        self.finish_sending_invites(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeApi;
    use crate::types::{CvAnalysis, EmailPreview};
    use futures::executor::block_on;

    fn pdf(name: &str) -> UploadedFile {
        UploadedFile::new(name, "application/pdf", b"%PDF-1.4".to_vec())
    }

    fn engineer_jd() -> JobDescription {
        JobDescription {
            position: Some("Engineer".into()),
            requirements: vec!["Python".into(), "SQL".into()],
            ..Default::default()
        }
    }

    fn scored(name: &str, email: &str, score: f64) -> CvAnalysis {
        CvAnalysis {
            name: Some(name.into()),
            email: Some(email.into()),
            score: Some(score),
            skills: Some(vec!["Python".into()]),
            strengths: Some(vec!["SQL".into()]),
            ..Default::default()
        }
    }

    fn filled_form() -> ScheduleForm {
        ScheduleForm {
            start_date: "2025-03-03".into(),
            start_time: "09:00".into(),
            duration: 30,
            break_time: 10,
            mode: Some(InterviewMode::InPerson),
            location: "HQ, Room 4".into(),
            interviewer: "Grace".into(),
        }
    }

    /// JD登録 + 3件マッチング済みの状態（90, 85 がショートリスト入り）
    fn matched_state() -> (WizardState, FakeApi) {
        let api = FakeApi::default()
            .with_job_description(engineer_jd())
            .with_cv("ada.pdf", scored("Ada", "ada@example.com", 90.0))
            .with_cv("bob.pdf", scored("Bob", "bob@example.com", 70.0))
            .with_cv("cy.pdf", scored("Cy", "cy@example.com", 85.0));

        let mut state = WizardState::new(filled_form());
        block_on(state.upload_job_description(&api, &pdf("jd.pdf"))).expect("JD登録失敗");
        state.add_cv_files(vec![pdf("ada.pdf"), pdf("bob.pdf"), pdf("cy.pdf")]);
        block_on(state.process_batch(&api)).expect("マッチング失敗");
        (state, api)
    }

    // =============================================
    // ナビゲーションテスト
    // =============================================

    #[test]
    fn test_indicator_states() {
        assert_eq!(
            indicator_states(Step::Matching),
            [
                IndicatorState::Completed,
                IndicatorState::Completed,
                IndicatorState::Active,
                IndicatorState::Upcoming,
            ]
        );
        assert_eq!(indicator_states(Step::JobDescription)[0], IndicatorState::Active);
    }

    #[test]
    fn test_navigate_is_idempotent() {
        let mut state = WizardState::default();
        state.navigate_to_step(Step::Cvs);
        let once = (state.indicator_states(), state.is_panel_visible(Step::Cvs));
        state.navigate_to_step(Step::Cvs);
        let twice = (state.indicator_states(), state.is_panel_visible(Step::Cvs));
        assert_eq!(once, twice);
        assert!(!state.is_panel_visible(Step::JobDescription));
    }

    #[test]
    fn test_step_from_number() {
        assert_eq!(Step::from_number(4), Some(Step::Interviews));
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(5), None);
    }

    // =============================================
    // 求人票テスト
    // =============================================

    #[test]
    fn test_upload_job_description_success() {
        let api = FakeApi::default().with_job_description(engineer_jd());
        let mut state = WizardState::default();

        block_on(state.upload_job_description(&api, &pdf("jd.pdf"))).expect("JD登録失敗");

        assert_eq!(state.job_description, Some(engineer_jd()));
        assert_eq!(state.jd_filename.as_deref(), Some("jd.pdf"));
        assert_eq!(state.activity, Activity::Idle);
    }

    #[test]
    fn test_upload_job_description_failure_keeps_previous() {
        let mut state = WizardState::default();
        state.job_description = Some(engineer_jd());
        let api = FakeApi::default().with_job_description_error("No file selected");

        let err = block_on(state.upload_job_description(&api, &pdf("other.pdf"))).unwrap_err();

        assert_eq!(err.to_string(), "No file selected");
        assert_eq!(state.job_description, Some(engineer_jd()));
        assert_eq!(state.activity, Activity::Idle);
    }

    // =============================================
    // CV追加テスト
    // =============================================

    #[test]
    fn test_add_cv_files_dedupes_by_exact_name() {
        let mut state = WizardState::default();
        assert_eq!(state.add_cv_files(vec![pdf("a.pdf"), pdf("b.pdf"), pdf("a.pdf")]), 2);
        assert_eq!(state.add_cv_files(vec![pdf("b.pdf"), pdf("A.pdf")]), 1);

        let names: Vec<&str> = state.candidates.iter().map(|c| c.filename.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf", "A.pdf"]);
        assert_eq!(state.cv_count_label(), "Selected CVs: 3");
    }

    // =============================================
    // マッチングテスト
    // =============================================

    #[test]
    fn test_process_requires_candidates() {
        let api = FakeApi::default();
        let mut state = WizardState::default();
        state.job_description = Some(engineer_jd());
        let err = block_on(state.process_batch(&api)).unwrap_err();
        assert!(matches!(err, Error::NoCandidates));
        assert_eq!(state.current_step, Step::JobDescription);
    }

    #[test]
    fn test_process_requires_job_description() {
        let api = FakeApi::default();
        let mut state = WizardState::default();
        state.add_cv_files(vec![pdf("a.pdf")]);
        let err = block_on(state.process_batch(&api)).unwrap_err();
        assert!(matches!(err, Error::MissingJobDescription));
        assert!(api.cv_calls().is_empty());
    }

    #[test]
    fn test_process_two_candidates_shortlists_only_high_score() {
        let api = FakeApi::default()
            .with_cv("low.pdf", scored("Low", "low@example.com", 70.0))
            .with_cv("high.pdf", scored("High", "high@example.com", 90.0));
        let mut state = WizardState::default();
        state.job_description = Some(engineer_jd());
        state.add_cv_files(vec![pdf("low.pdf"), pdf("high.pdf")]);

        block_on(state.process_batch(&api)).expect("マッチング失敗");

        let shortlisted: Vec<&str> = state
            .shortlisted_candidates()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(shortlisted, vec!["High"]);
        assert_eq!(state.candidates[0].name, "High");
        assert_eq!(state.current_step, Step::Matching);
        assert!(state.results_ready);
        assert_eq!(state.progress, MatchProgress::new(2, 2));
    }

    #[test]
    fn test_process_sorted_and_shortlist_is_subsequence() {
        let (state, _) = matched_state();

        let scores: Vec<f64> = state.candidates.iter().map(|c| c.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));

        let expected: Vec<&Candidate> = state.candidates.iter().filter(|c| c.score >= 80.0).collect();
        assert_eq!(state.shortlisted_candidates(), expected);
        assert!(state.can_send_invites());
    }

    #[test]
    fn test_failed_candidate_is_processed_with_error() {
        let api = FakeApi::default()
            .with_cv("ok.pdf", scored("Ok", "ok@example.com", 88.0))
            .with_cv_error("broken.pdf", "Extracted text is too short or empty.");
        let mut state = WizardState::default();
        state.job_description = Some(engineer_jd());
        state.add_cv_files(vec![pdf("broken.pdf"), pdf("ok.pdf")]);

        block_on(state.process_batch(&api)).expect("マッチング失敗");

        let broken = state.candidates.iter().find(|c| c.filename == "broken.pdf").unwrap();
        assert!(broken.processed);
        assert_eq!(broken.score, 0.0);
        assert_eq!(broken.error.as_deref(), Some("Extracted text is too short or empty."));
        assert_eq!(state.shortlisted_candidates().len(), 1);
    }

    #[test]
    fn test_reprocessing_skips_processed_candidates() {
        let (mut state, api) = matched_state();
        state.add_cv_files(vec![pdf("late.pdf")]);

        block_on(state.process_batch(&api)).expect("マッチング失敗");

        assert_eq!(api.cv_calls(), vec!["ada.pdf", "bob.pdf", "cy.pdf", "late.pdf"]);
        assert_eq!(state.candidates.len(), 4);
    }

    #[test]
    fn test_cv_added_during_matching_is_refused() {
        let api = FakeApi::default()
            .with_cv("ada.pdf", scored("Ada", "ada@example.com", 90.0))
            .with_cv("late.pdf", scored("Late", "late@example.com", 95.0));
        let mut state = WizardState::default();
        state.job_description = Some(engineer_jd());
        state.add_cv_files(vec![pdf("ada.pdf")]);

        let queue = state.begin_matching().expect("マッチング開始失敗");
        assert_eq!(state.add_cv_files(vec![pdf("late.pdf")]), 0);
        block_on(queue.run(&api, |completion| state.record_cv_outcome(completion)));
        state.finish_matching();

        assert_eq!(state.candidates.len(), 1);
        assert!(state.candidates.iter().all(|c| c.processed));
        assert_eq!(api.cv_calls(), vec!["ada.pdf"]);
    }

    #[test]
    fn test_reading_cvs_blocks_matching_until_added() {
        let api = FakeApi::default()
            .with_cv("ada.pdf", scored("Ada", "ada@example.com", 90.0))
            .with_cv("late.pdf", scored("Late", "late@example.com", 95.0));
        let mut state = WizardState::default();
        state.job_description = Some(engineer_jd());
        state.add_cv_files(vec![pdf("ada.pdf")]);

        state.begin_reading_cvs().expect("読み込み開始失敗");
        assert!(state.is_busy());
        assert!(matches!(state.begin_matching(), Err(Error::Busy)));
        assert_eq!(state.current_step, Step::JobDescription);
        assert!(api.cv_calls().is_empty());

        assert_eq!(state.finish_reading_cvs(vec![pdf("late.pdf")]), 1);
        assert_eq!(state.activity, Activity::Idle);
        block_on(state.process_batch(&api)).expect("マッチング失敗");

        assert!(state.candidates.iter().all(|c| c.processed));
        let shortlisted: Vec<&str> = state
            .shortlisted_candidates()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(shortlisted, vec!["Late", "Ada"]);
    }

    #[test]
    fn test_reading_cvs_refused_while_matching() {
        let mut state = WizardState::default();
        state.job_description = Some(engineer_jd());
        state.add_cv_files(vec![pdf("ada.pdf")]);
        let _queue = state.begin_matching().expect("マッチング開始失敗");

        assert!(matches!(state.begin_reading_cvs(), Err(Error::Busy)));
        assert_eq!(state.activity, Activity::MatchingCvs);
    }

    // =============================================
    // 面接枠テスト
    // =============================================

    #[test]
    fn test_generate_slots_one_per_shortlisted_candidate() {
        let (mut state, _) = matched_state();
        state.advance_to_interviews();

        assert_eq!(state.generate_interview_slots().expect("枠生成失敗"), 2);

        let times: Vec<(&str, &str)> = state
            .slots
            .iter()
            .map(|s| (s.date.as_str(), s.time.as_str()))
            .collect();
        assert_eq!(times, vec![("2025-03-03", "09:00"), ("2025-03-03", "09:40")]);
        assert_eq!(state.slot_title(&state.slots[0]), "Ada");
        assert_eq!(state.slot_title(&state.slots[1]), "Cy");

        let config = state.interview_config.as_ref().unwrap();
        assert_eq!(config.mode, InterviewMode::InPerson);
        assert_eq!(config.interviewer, "Grace");
    }

    #[test]
    fn test_generate_slots_refuses_missing_inputs() {
        let (mut state, _) = matched_state();
        state.schedule_form.interviewer.clear();

        assert!(matches!(state.generate_interview_slots(), Err(Error::MissingInterviewer)));
        assert!(state.slots.is_empty());
        assert!(state.interview_config.is_none());
    }

    #[test]
    fn test_generate_slots_refuses_empty_shortlist() {
        let mut state = WizardState::new(filled_form());
        assert!(matches!(state.generate_interview_slots(), Err(Error::EmptyShortlist)));
        assert!(state.slots.is_empty());
    }

    #[test]
    fn test_generate_slots_replaces_existing_slots() {
        let (mut state, _) = matched_state();
        state.add_interview_slot(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        state.generate_interview_slots().unwrap();
        state.generate_interview_slots().unwrap();
        assert_eq!(state.slots.len(), 2);
        assert!(state.slots.iter().all(|s| !s.is_manual()));
    }

    #[test]
    fn test_manual_slot_uses_config_defaults() {
        let (mut state, _) = matched_state();
        state.generate_interview_slots().unwrap();

        let id = state.add_interview_slot(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let slot = state.slots.iter().find(|s| s.id == id).unwrap();

        assert_eq!(slot.mode, InterviewMode::InPerson);
        assert_eq!(slot.location, "HQ, Room 4");
        assert_eq!(slot.interviewer, "Grace");
        assert_eq!(slot.min_date.as_deref(), Some("2025-03-01"));
        assert_eq!(state.slot_title(slot), "Additional Interview Slot");
    }

    #[test]
    fn test_manual_slot_without_config_defaults_to_virtual() {
        let mut state = WizardState::default();
        let id = state.add_interview_slot(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let slot = state.slots.iter().find(|s| s.id == id).unwrap();
        assert_eq!(slot.mode, InterviewMode::Virtual);
        assert_eq!(slot.location, "");
    }

    #[test]
    fn test_only_manual_slots_are_removable() {
        let (mut state, _) = matched_state();
        state.generate_interview_slots().unwrap();
        let generated = state.slots[0].id;
        let manual = state.add_interview_slot(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());

        assert!(!state.remove_slot(generated));
        assert!(state.remove_slot(manual));
        assert_eq!(state.slots.len(), 2);
    }

    #[test]
    fn test_update_slot_fields() {
        let (mut state, _) = matched_state();
        state.generate_interview_slots().unwrap();
        let id = state.slots[0].id;

        assert!(state.update_slot(id, SlotField::Time("11:15".into())));
        assert!(state.update_slot(id, SlotField::Mode(InterviewMode::Phone)));
        assert!(!state.update_slot(id, SlotField::CandidateName("X".into())));
        assert!(!state.update_slot(999, SlotField::Time("10:00".into())));

        assert_eq!(state.slots[0].time, "11:15");
        assert_eq!(state.slots[0].mode, InterviewMode::Phone);
    }

    // =============================================
    // プレビューテスト
    // =============================================

    #[test]
    fn test_preview_lists_every_slot() {
        let (mut state, _) = matched_state();
        state.generate_interview_slots().unwrap();
        state.show_interview_preview().expect("プレビュー失敗");

        let preview = state.preview.as_ref().unwrap();
        assert_eq!(preview.entries.len(), 2);
        assert_eq!(preview.entries[1].candidate_name, "Cy");
        assert_eq!(preview.entries[1].start_label, "9:40 AM");
        assert_eq!(preview.entries[1].end_label, "10:10 AM");

        state.modify_schedule();
        assert!(state.preview.is_none());
    }

    #[test]
    fn test_preview_without_slots() {
        let mut state = WizardState::default();
        assert!(matches!(state.show_interview_preview(), Err(Error::NoSlotsToPreview)));
    }

    #[test]
    fn test_preview_rejects_unparseable_slot() {
        let (mut state, _) = matched_state();
        state.generate_interview_slots().unwrap();
        state.add_interview_slot(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());

        assert!(matches!(state.show_interview_preview(), Err(Error::InvalidDateTime(_))));
        assert!(state.preview.is_none());
    }

    // =============================================
    // 送信テスト
    // =============================================

    #[test]
    fn test_send_invites_builds_payload() {
        let (mut state, _) = matched_state();
        state.generate_interview_slots().unwrap();
        let api = FakeApi::default().with_schedule(ScheduleResponse {
            scheduled: 2,
            email_previews: vec![EmailPreview {
                candidate: "Ada".into(),
                ..Default::default()
            }],
            ..Default::default()
        });

        let sent = block_on(state.send_interview_invites(&api)).expect("送信失敗");

        assert_eq!(sent, 2);
        assert!(state.completion.is_some());
        assert!(!state.is_panel_visible(Step::Interviews));

        let request = &api.schedule_requests()[0];
        assert_eq!(request.candidates.len(), 2);
        assert_eq!(request.candidates[0].name, "Ada");
        assert_eq!(request.candidates[0].score, Some(90.0));
        assert_eq!(request.candidates[0].strengths, vec!["SQL"]);
        assert_eq!(request.candidates[1].interview_details.time, "09:40");
        assert_eq!(request.schedule_config, ScheduleConfig { duration: 30, break_time: 10 });
        assert_eq!(request.job_description, engineer_jd());
    }

    #[test]
    fn test_send_invites_rejects_incomplete_slot() {
        let (mut state, _) = matched_state();
        state.generate_interview_slots().unwrap();
        let id = state.slots[1].id;
        state.update_slot(id, SlotField::Location("  ".into()));
        let api = FakeApi::default();

        let err = block_on(state.send_interview_invites(&api)).unwrap_err();

        assert!(matches!(err, Error::IncompleteSlot));
        assert!(api.schedule_requests().is_empty());
    }

    #[test]
    fn test_send_invites_requires_manual_name_and_email() {
        let (mut state, _) = matched_state();
        state.generate_interview_slots().unwrap();
        let id = state.add_interview_slot(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        state.update_slot(id, SlotField::Date("2025-03-04".into()));
        state.update_slot(id, SlotField::Time("15:00".into()));

        assert!(matches!(state.build_schedule_request(), Err(Error::MissingManualCandidate)));

        state.update_slot(id, SlotField::CandidateName("Dee".into()));
        state.update_slot(id, SlotField::CandidateEmail("dee@example.com".into()));
        let request = state.build_schedule_request().expect("リクエスト生成失敗");
        assert_eq!(request.candidates[2].name, "Dee");
        assert_eq!(request.candidates[2].score, None);
    }

    #[test]
    fn test_send_invites_requires_slots_and_job_description() {
        let mut state = WizardState::default();
        assert!(matches!(state.build_schedule_request(), Err(Error::NoSlots)));

        state.add_interview_slot(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert!(matches!(state.build_schedule_request(), Err(Error::JobDescriptionLost)));
    }

    #[test]
    fn test_send_invites_backend_failure_stays_on_step() {
        let (mut state, _) = matched_state();
        state.advance_to_interviews();
        state.generate_interview_slots().unwrap();
        let api = FakeApi::default().with_schedule_error("No interviews were scheduled");

        let err = block_on(state.send_interview_invites(&api)).unwrap_err();

        assert_eq!(err.to_string(), "No interviews were scheduled");
        assert!(state.completion.is_none());
        assert_eq!(state.activity, Activity::Idle);
        assert!(state.is_panel_visible(Step::Interviews));
    }

    #[test]
    fn test_send_invites_rejection_keeps_failed_previews() {
        let (mut state, _) = matched_state();
        state.advance_to_interviews();
        state.generate_interview_slots().unwrap();
        let failed = EmailPreview {
            candidate: "Ada".into(),
            email: "ada@example.com".into(),
            error: Some("SMTP error: timeout".into()),
            ..Default::default()
        };
        let api = FakeApi::default()
            .with_schedule_rejection("No interviews were scheduled", vec![failed.clone()]);

        let err = block_on(state.send_interview_invites(&api)).unwrap_err();

        assert_eq!(err.to_string(), "No interviews were scheduled");
        assert_eq!(state.failed_previews, vec![failed]);
        assert!(state.completion.is_none());

        // 再送が通れば消える
        let api = FakeApi::default().with_schedule(ScheduleResponse {
            scheduled: 2,
            ..Default::default()
        });
        block_on(state.send_interview_invites(&api)).expect("送信失敗");
        assert!(state.failed_previews.is_empty());
        assert!(state.completion.is_some());
    }

    // =============================================
    // リセットテスト
    // =============================================

    #[test]
    fn test_reset_process_restores_initial_state() {
        let (mut state, _) = matched_state();
        state.advance_to_interviews();
        state.generate_interview_slots().unwrap();
        state.schedule_form.location = "changed".into();

        state.reset_process();

        assert_eq!(state.job_description, None);
        assert!(state.candidates.is_empty());
        assert!(state.shortlisted_candidates().is_empty());
        assert_eq!(state.current_step, Step::JobDescription);
        assert!(state.slots.is_empty());
        assert!(state.interview_config.is_none());
        assert_eq!(state.schedule_form, filled_form());
        assert_eq!(state, WizardState::new(filled_form()));
    }
}
