//! バックエンドAPI
//!
//! 書類解析・スコアリング・メール生成はすべてバックエンド側。
//! ここではエンドポイントとレスポンス形式だけを定義する。

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{
    CvAnalysis, EmailPreview, JobDescription, ScheduleRequest, ScheduleResponse, UploadedFile,
};

pub const JOB_DESCRIPTION_ENDPOINT: &str = "/api/process-job-description";
pub const CV_ENDPOINT: &str = "/api/process-cv";
pub const SCHEDULE_ENDPOINT: &str = "/api/schedule-interviews";

/// バックエンドとの通信
///
/// ブラウザでは fetch 実装、テストではメモリ上の実装を使う。
#[allow(async_fn_in_trait)]
pub trait HiringApi {
    /// multipart `file`
    async fn process_job_description(&self, file: &UploadedFile) -> Result<JobDescription>;

    /// multipart `file` + `job_description`（JSON文字列）
    async fn process_cv(&self, file: &UploadedFile, job_description_json: &str) -> Result<CvAnalysis>;

    async fn schedule_interviews(&self, request: &ScheduleRequest) -> Result<ScheduleResponse>;
}

/// 非2xxレスポンスの本文
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

/// スケジュール送信が全件失敗したときの本文
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RejectedScheduleBody {
    email_previews: Vec<EmailPreview>,
}

/// エラー本文から通知用メッセージを取り出す
pub fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// 非2xxレスポンスをエラーにする
pub fn api_error(body: &str, fallback: &str) -> Error {
    Error::Api(error_message(body, fallback))
}

/// スケジュール送信の非2xx（失敗したメールの内容があれば残す）
pub fn schedule_error(body: &str, fallback: &str) -> Error {
    let message = error_message(body, fallback);
    let email_previews = serde_json::from_str::<RejectedScheduleBody>(body)
        .map(|b| b.email_previews)
        .unwrap_or_default();

    if email_previews.is_empty() {
        Error::Api(message)
    } else {
        Error::ScheduleRejected {
            message,
            email_previews,
        }
    }
}
