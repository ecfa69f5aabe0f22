//! Hiring Wizard Common Library
//!
//! 採用ウィザードの状態機械・面接スケジュール計算・表示モデル。
//! ブラウザ(WASM)に依存しないのでネイティブでテストできる。

pub mod api;
pub mod config;
pub mod error;
pub mod matching;
pub mod schedule;
pub mod types;
pub mod view;
pub mod wizard;

pub use api::HiringApi;
pub use config::WizardConfig;
pub use error::{Error, Result};
pub use matching::{MatchProgress, MatchingQueue, ScoreBand, SHORTLIST_THRESHOLD};
pub use schedule::{ScheduleForm, SchedulePreview};
pub use types::{
    Candidate, CvAnalysis, EmailPreview, InterviewMode, InterviewSlot, JobDescription,
    ScheduleRequest, ScheduleResponse, SlotCandidate, SlotField, UploadedFile,
};
pub use view::{
    CandidateCard, JobSummary, Notification, NotificationLevel, NotificationSlot, ShortlistView,
};
pub use wizard::{Activity, IndicatorState, Step, WizardState};
