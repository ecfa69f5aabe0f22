//! エラー型定義
//!
//! 各バリアントの表示文字列はそのまま通知メッセージとして使う

use thiserror::Error;

use crate::types::EmailPreview;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// バックエンドが返した `{ message }`
    #[error("{0}")]
    Api(String),

    #[error("Network error: {0}")]
    Transport(String),

    /// スケジュール送信が全件失敗（候補者ごとの失敗内容つき）
    #[error("{message}")]
    ScheduleRejected {
        message: String,
        email_previews: Vec<EmailPreview>,
    },

    #[error("Please wait for the current operation to finish")]
    Busy,

    #[error("Please upload at least one CV first")]
    NoCandidates,

    #[error("Job description data is missing. Please upload a job description first.")]
    MissingJobDescription,

    #[error("Job description is missing. Please start from the beginning.")]
    JobDescriptionLost,

    #[error("Please select both start date and time")]
    MissingStartDateTime,

    #[error("Please select interview mode and provide location/link")]
    MissingModeOrLocation,

    #[error("Please provide the interviewer's name")]
    MissingInterviewer,

    #[error("No shortlisted candidates available. Please process CVs first.")]
    EmptyShortlist,

    #[error("No interview slots to preview")]
    NoSlotsToPreview,

    #[error("No interview slots found. Please generate slots first.")]
    NoSlots,

    #[error("Please fill in all interview details (date, time, mode, location, and interviewer)")]
    IncompleteSlot,

    #[error("Please fill in candidate name and email for all additional slots")]
    MissingManualCandidate,

    #[error("Invalid date or time format: {0}")]
    InvalidDateTime(String),

    #[error("Shortlisted candidate #{0} no longer exists")]
    UnknownCandidate(usize),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
