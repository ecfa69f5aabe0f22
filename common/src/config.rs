//! ウィザード設定
//!
//! ページ内の `<script id="wizard-config" type="application/json">` から読み込む。
//! すべての項目にデフォルト値があるため、未指定の項目は省略できる。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schedule::ScheduleForm;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardConfig {
    /// エンドポイントの前置URL（空なら同一オリジン）
    pub api_base_url: String,
    pub notification_timeout_ms: u32,
    pub default_start_time: String,
    pub default_duration: u32,
    pub default_break_time: u32,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            notification_timeout_ms: 5000,
            default_start_time: "09:00".into(),
            default_duration: 30,
            default_break_time: 10,
        }
    }
}

impl WizardConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        let config: WizardConfig = serde_json::from_str(content)?;
        if config.default_duration == 0 {
            return Err(Error::Config("defaultDuration must be greater than 0".into()));
        }
        Ok(config)
    }

    /// `/api/...` パスを完全なURLにする
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }

    /// 面接スケジュールフォームの初期値
    pub fn schedule_defaults(&self, today: NaiveDate) -> ScheduleForm {
        ScheduleForm {
            start_date: today.format("%Y-%m-%d").to_string(),
            start_time: self.default_start_time.clone(),
            duration: self.default_duration,
            break_time: self.default_break_time,
            mode: None,
            location: String::new(),
            interviewer: String::new(),
        }
    }
}
