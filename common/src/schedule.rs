//! 面接スケジュール計算
//!
//! 開始日時から (面接時間 + 休憩) 分ずつずらして枠を割り当てる。
//! 1枠目は開始日時ちょうど。

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};
use crate::types::InterviewMode;

/// 面接時間の選択肢（分）
pub const DURATION_OPTIONS: [u32; 5] = [15, 30, 45, 60, 90];

/// 休憩時間の選択肢（分）
pub const BREAK_OPTIONS: [u32; 5] = [0, 5, 10, 15, 30];

/// 枠生成フォームの入力値
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleForm {
    pub start_date: String,
    pub start_time: String,
    pub duration: u32,
    pub break_time: u32,
    pub mode: Option<InterviewMode>,
    pub location: String,
    pub interviewer: String,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self {
            start_date: String::new(),
            start_time: String::new(),
            duration: 30,
            break_time: 10,
            mode: None,
            location: String::new(),
            interviewer: String::new(),
        }
    }
}

/// 検証済みのフォーム
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub start: NaiveDateTime,
    pub mode: InterviewMode,
}

impl ScheduleForm {
    /// 入力不足を項目ごとのエラーで返す
    pub fn validate(&self) -> Result<ValidatedForm> {
        if self.start_date.trim().is_empty() || self.start_time.trim().is_empty() {
            return Err(Error::MissingStartDateTime);
        }
        let mode = match self.mode {
            Some(mode) if !self.location.trim().is_empty() => mode,
            _ => return Err(Error::MissingModeOrLocation),
        };
        if self.interviewer.trim().is_empty() {
            return Err(Error::MissingInterviewer);
        }

        let start = parse_slot_datetime(&self.start_date, &self.start_time)?;
        Ok(ValidatedForm { start, mode })
    }
}

/// `YYYY-MM-DD` と `HH:MM`（秒付きも可）を日時にする
pub fn parse_slot_datetime(date: &str, time: &str) -> Result<NaiveDateTime> {
    let invalid = || Error::InvalidDateTime(format!("{} {}", date, time).trim().to_string());

    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M:%S"))
        .map_err(|_| invalid())?;
    Ok(date.and_time(time))
}

/// k番目の枠 = start + k * (duration + break_time) 分
pub fn slot_start_times(
    start: NaiveDateTime,
    count: usize,
    duration: u32,
    break_time: u32,
) -> Result<Vec<NaiveDateTime>> {
    let step = Duration::minutes(i64::from(duration) + i64::from(break_time));
    let mut current = start;
    let mut times = Vec::with_capacity(count);

    for _ in 0..count {
        times.push(current);
        current = current
            .checked_add_signed(step)
            .ok_or_else(|| Error::InvalidDateTime(current.to_string()))?;
    }

    Ok(times)
}

pub fn format_date(datetime: &NaiveDateTime) -> String {
    datetime.format("%Y-%m-%d").to_string()
}

pub fn format_time(datetime: &NaiveDateTime) -> String {
    datetime.format("%H:%M").to_string()
}

/// プレビューの1行
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewEntry {
    pub candidate_name: String,
    /// "Monday, March 3, 2025"
    pub date_label: String,
    /// "9:00 AM"
    pub start_label: String,
    pub end_label: String,
    pub mode: InterviewMode,
}

impl PreviewEntry {
    pub fn new(
        candidate_name: impl Into<String>,
        date: &str,
        time: &str,
        mode: InterviewMode,
        duration: u32,
    ) -> Result<Self> {
        let start = parse_slot_datetime(date, time)?;
        let end = start
            .checked_add_signed(Duration::minutes(i64::from(duration)))
            .ok_or_else(|| Error::InvalidDateTime(format!("{} {}", date, time)))?;

        Ok(Self {
            candidate_name: candidate_name.into(),
            date_label: start.format("%A, %B %-d, %Y").to_string(),
            start_label: start.format("%-I:%M %p").to_string(),
            end_label: end.format("%-I:%M %p").to_string(),
            mode,
        })
    }
}

/// 面接スケジュールのプレビュー
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePreview {
    pub duration: u32,
    pub break_time: u32,
    pub entries: Vec<PreviewEntry>,
}

impl SchedulePreview {
    pub fn duration_summary(&self) -> String {
        format!("{} minutes per interview", self.duration)
    }

    pub fn break_summary(&self) -> String {
        format!("{} minutes break between interviews", self.break_time)
    }
}
