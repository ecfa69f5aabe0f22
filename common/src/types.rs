//! ウィザードの型定義
//!
//! - JobDescription / CvAnalysis: バックエンドのレスポンス
//! - Candidate: アップロード済みCVと解析結果
//! - InterviewSlot: 面接枠（画面はこのリストを描画するだけ）
//! - ScheduleRequest / ScheduleResponse: 面接スケジュール送信

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// 求人票（バックエンドが抽出した構造化データ）
///
/// position と requirements 以外のフィールドも `extra` に保持し、
/// CV解析・面接送信時にそのまま送り返す。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    #[serde(default)]
    pub position: Option<String>,

    #[serde(default)]
    pub requirements: Vec<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// アップロードされたファイル
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub data: Arc<[u8]>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: Arc::from(data),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// 候補者
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub file: UploadedFile,
    pub filename: String,
    pub file_size: String,
    pub processed: bool,
    pub score: f64,
    pub skills: Vec<String>,
    pub experience: String,
    pub education: String,
    pub name: String,
    pub email: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub error: Option<String>,
}

impl Candidate {
    /// 未処理の候補者としてキューに入れる
    pub fn queued(file: UploadedFile) -> Self {
        Self {
            filename: file.name.clone(),
            file_size: format_file_size(file.size() as u64),
            file,
            processed: false,
            score: 0.0,
            skills: Vec::new(),
            experience: String::new(),
            education: String::new(),
            name: String::new(),
            email: String::new(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            error: None,
        }
    }

    /// 解析結果をマージして処理済みにする（レスポンスにない項目は変更しない）
    pub fn apply_analysis(&mut self, analysis: CvAnalysis) {
        if let Some(name) = analysis.name {
            self.name = name;
        }
        if let Some(email) = analysis.email {
            self.email = email;
        }
        if let Some(score) = analysis.score {
            self.score = score.clamp(0.0, 100.0);
        }
        if let Some(skills) = analysis.skills {
            self.skills = skills;
        }
        if let Some(experience) = analysis.experience {
            self.experience = experience;
        }
        if let Some(education) = analysis.education {
            self.education = education;
        }
        if let Some(strengths) = analysis.strengths {
            self.strengths = strengths;
        }
        if let Some(weaknesses) = analysis.weaknesses {
            self.weaknesses = weaknesses;
        }
        self.processed = true;
    }

    /// 失敗しても処理済みにし、空の項目だけ既定値で埋める
    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.processed = true;
        self.error = Some(message.into());
        if self.experience.is_empty() {
            self.experience = "Unknown".into();
        }
        if self.education.is_empty() {
            self.education = "Unknown".into();
        }
        if self.name.is_empty() {
            self.name = "Unknown Candidate".into();
        }
        if self.email.is_empty() {
            self.email = "no-email@example.com".into();
        }
    }
}

/// "0 Bytes", "1.5 KB", "2 MB"
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 10.0).round() / 10.0;
    format!("{} {}", rounded, UNITS[unit])
}

/// CV解析レスポンス（`/api/process-cv`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvAnalysis {
    pub name: Option<String>,
    pub email: Option<String>,
    pub score: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub strengths: Option<Vec<String>>,
    pub weaknesses: Option<Vec<String>>,
}

/// 面接形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewMode {
    #[default]
    Virtual,
    InPerson,
    Phone,
}

impl InterviewMode {
    pub const ALL: [InterviewMode; 3] = [
        InterviewMode::Virtual,
        InterviewMode::InPerson,
        InterviewMode::Phone,
    ];

    /// フォーム値（`<select>` の value）
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewMode::Virtual => "virtual",
            InterviewMode::InPerson => "in-person",
            InterviewMode::Phone => "phone",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == value)
    }

    /// 選択肢ラベル
    pub fn option_label(&self) -> &'static str {
        match self {
            InterviewMode::Virtual => "Virtual (Zoom)",
            InterviewMode::InPerson => "In-Person",
            InterviewMode::Phone => "Phone Call",
        }
    }

    /// プレビュー表示用ラベル
    pub fn preview_label(&self) -> &'static str {
        match self {
            InterviewMode::Virtual => "Virtual Interview",
            InterviewMode::InPerson => "In-person Interview",
            InterviewMode::Phone => "Phone Interview",
        }
    }

    pub fn icon_class(&self) -> &'static str {
        match self {
            InterviewMode::Virtual => "fa-video",
            InterviewMode::InPerson => "fa-building",
            InterviewMode::Phone => "fa-phone",
        }
    }
}

/// 枠生成時に確定した面接設定
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewConfig {
    pub mode: InterviewMode,
    pub location: String,
    pub interviewer: String,
    pub duration: u32,
    pub break_time: u32,
}

/// 面接枠の対象者
#[derive(Debug, Clone, PartialEq)]
pub enum SlotCandidate {
    /// ショートリスト上の位置
    Shortlisted(usize),
    /// 手動追加枠
    Manual { name: String, email: String },
}

/// 面接枠
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewSlot {
    pub id: u64,
    pub candidate: SlotCandidate,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub mode: InterviewMode,
    pub location: String,
    pub interviewer: String,
    /// 日付入力の下限（手動追加枠のみ）
    pub min_date: Option<String>,
}

impl InterviewSlot {
    pub fn is_manual(&self) -> bool {
        matches!(self.candidate, SlotCandidate::Manual { .. })
    }

    /// 必須5項目がすべて入力済みか
    pub fn is_complete(&self) -> bool {
        [&self.date, &self.time, &self.location, &self.interviewer]
            .iter()
            .all(|value| !value.trim().is_empty())
    }
}

/// 面接枠の編集内容
#[derive(Debug, Clone, PartialEq)]
pub enum SlotField {
    Date(String),
    Time(String),
    Mode(InterviewMode),
    Location(String),
    Interviewer(String),
    CandidateName(String),
    CandidateEmail(String),
}

/// 面接詳細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewDetails {
    pub date: String,
    pub time: String,
    pub mode: InterviewMode,
    pub location: String,
    pub interviewer: String,
}

/// 送信する候補者＋面接枠
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleCandidate {
    pub name: String,
    pub email: String,
    pub score: Option<f64>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    #[serde(rename = "interviewDetails")]
    pub interview_details: InterviewDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub duration: u32,
    pub break_time: u32,
}

/// `/api/schedule-interviews` リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub candidates: Vec<ScheduleCandidate>,
    pub job_description: JobDescription,
    pub schedule_config: ScheduleConfig,
}

/// `/api/schedule-interviews` レスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleResponse {
    pub message: Option<String>,
    pub scheduled: usize,
    pub email_previews: Vec<EmailPreview>,
}

/// メール本文（文字列または行配列）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreviewBody {
    Text(String),
    Lines(Vec<String>),
}

impl Default for PreviewBody {
    fn default() -> Self {
        PreviewBody::Text(String::new())
    }
}

impl PreviewBody {
    pub fn lines(&self) -> Vec<&str> {
        match self {
            PreviewBody::Text(text) => text.lines().collect(),
            PreviewBody::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

/// 送信メールのプレビュー（送信失敗時は error のみ）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailPreview {
    #[serde(alias = "name")]
    pub candidate: String,
    #[serde(alias = "to")]
    pub email: String,
    pub subject: String,
    #[serde(alias = "body")]
    pub preview: PreviewBody,
    pub error: Option<String>,
}
