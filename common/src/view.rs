//! 表示用モデル
//!
//! 状態から画面に出す文字列とCSSクラスを組み立てる純粋関数群。

use crate::error::Error;
use crate::matching::{is_shortlisted, ScoreBand};
use crate::types::{Candidate, JobDescription};
use crate::wizard::WizardState;

/// 求人票サマリー
#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    pub position: String,
    pub requirements: Vec<String>,
}

impl JobSummary {
    pub fn from_job_description(jd: &JobDescription) -> Self {
        let position = jd
            .position
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or("Not specified")
            .to_string();

        let requirements = if jd.requirements.is_empty() {
            vec!["No specific requirements found".to_string()]
        } else {
            jd.requirements.clone()
        };

        Self { position, requirements }
    }
}

/// 候補者カード
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCard {
    pub avatar: String,
    pub name: String,
    pub background: String,
    pub skills: Vec<String>,
    pub score_label: String,
    pub band: ScoreBand,
    pub shortlisted: bool,
    pub error: Option<String>,
}

impl CandidateCard {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        let avatar = candidate
            .name
            .chars()
            .next()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string());

        Self {
            avatar,
            name: display_name(candidate),
            background: format!(
                "{} experience | {}",
                or_unknown(&candidate.experience),
                or_unknown(&candidate.education)
            ),
            skills: candidate.skills.clone(),
            score_label: format!("{}%", candidate.score),
            band: ScoreBand::from_score(candidate.score),
            shortlisted: is_shortlisted(candidate.score),
            error: candidate.error.clone(),
        }
    }
}

/// ショートリスト一覧の1行
#[derive(Debug, Clone, PartialEq)]
pub struct ShortlistEntry {
    pub name: String,
    pub match_label: String,
}

/// ステップ4のショートリスト表示
#[derive(Debug, Clone, PartialEq)]
pub struct ShortlistView {
    pub entries: Vec<ShortlistEntry>,
    pub empty_message: Option<&'static str>,
    pub send_enabled: bool,
}

impl ShortlistView {
    pub fn from_state(state: &WizardState) -> Self {
        let entries: Vec<ShortlistEntry> = state
            .shortlisted_candidates()
            .into_iter()
            .map(|c| ShortlistEntry {
                name: display_name(c),
                match_label: format!("{}% match", c.score),
            })
            .collect();

        let empty = entries.is_empty();
        Self {
            entries,
            empty_message: empty.then_some("No candidates met the 80% threshold"),
            send_enabled: state.can_send_invites(),
        }
    }
}

fn display_name(candidate: &Candidate) -> String {
    if candidate.name.trim().is_empty() {
        "Unknown Candidate".to_string()
    } else {
        candidate.name.clone()
    }
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        "Unknown"
    } else {
        value
    }
}

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

impl NotificationLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "notification-success",
            NotificationLevel::Error => "notification-error",
            NotificationLevel::Info => "notification-info",
        }
    }

    pub fn icon_class(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "fas fa-check-circle",
            NotificationLevel::Error => "fas fa-exclamation-circle",
            NotificationLevel::Info => "fas fa-info-circle",
        }
    }
}

/// 一定時間で消える通知
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: "Success".into(),
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".into(),
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }
}

impl From<&Error> for Notification {
    fn from(error: &Error) -> Self {
        Notification::error(error.to_string())
    }
}

/// 表示中の通知（1件のみ）
///
/// 通知ごとに番号を振り、自動で閉じるタイマーは自分の番号のときだけ閉じる。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationSlot {
    seq: u64,
    current: Option<Notification>,
}

impl NotificationSlot {
    /// 前の通知を置き換え、この通知の番号を返す
    pub fn show(&mut self, notification: Notification) -> u64 {
        self.seq += 1;
        self.current = Some(notification);
        self.seq
    }

    /// 後から別の通知が出ていれば何もしない
    pub fn dismiss(&mut self, seq: u64) -> bool {
        if seq != self.seq || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UploadedFile;

    fn processed(name: &str, score: f64) -> Candidate {
        let mut c = Candidate::queued(UploadedFile::new("cv.pdf", "application/pdf", vec![]));
        c.name = name.to_string();
        c.score = score;
        c.processed = true;
        c
    }

    // =============================================
    // 求人票サマリーテスト
    // =============================================

    #[test]
    fn test_job_summary_engineer() {
        let jd = JobDescription {
            position: Some("Engineer".into()),
            requirements: vec!["Python".into(), "SQL".into()],
            ..Default::default()
        };

        let summary = JobSummary::from_job_description(&jd);
        assert_eq!(summary.position, "Engineer");
        assert_eq!(summary.requirements, vec!["Python", "SQL"]);
    }

    #[test]
    fn test_job_summary_placeholders() {
        let summary = JobSummary::from_job_description(&JobDescription::default());
        assert_eq!(summary.position, "Not specified");
        assert_eq!(summary.requirements, vec!["No specific requirements found"]);
    }

    // =============================================
    // 候補者カードテスト
    // =============================================

    #[test]
    fn test_candidate_card_high_match() {
        let mut candidate = processed("Ada", 90.0);
        candidate.experience = "5+ years".into();
        candidate.education = "MSc".into();

        let card = CandidateCard::from_candidate(&candidate);
        assert_eq!(card.avatar, "A");
        assert_eq!(card.background, "5+ years experience | MSc");
        assert_eq!(card.score_label, "90%");
        assert_eq!(card.band, ScoreBand::High);
        assert!(card.shortlisted);
    }

    #[test]
    fn test_candidate_card_unknown_fields() {
        let card = CandidateCard::from_candidate(&processed("", 76.5));
        assert_eq!(card.avatar, "?");
        assert_eq!(card.name, "Unknown Candidate");
        assert_eq!(card.background, "Unknown experience | Unknown");
        assert_eq!(card.score_label, "76.5%");
        assert_eq!(card.band, ScoreBand::Medium);
        assert!(!card.shortlisted);
    }

    #[test]
    fn test_candidate_card_shows_error() {
        let mut candidate = processed("", 0.0);
        candidate.mark_failed("Failed to process CV");
        let card = CandidateCard::from_candidate(&candidate);
        assert_eq!(card.error.as_deref(), Some("Failed to process CV"));
        assert_eq!(card.band, ScoreBand::Low);
    }

    // =============================================
    // ショートリストテスト
    // =============================================

    #[test]
    fn test_shortlist_view_empty_disables_send() {
        let view = ShortlistView::from_state(&WizardState::default());
        assert!(view.entries.is_empty());
        assert_eq!(view.empty_message, Some("No candidates met the 80% threshold"));
        assert!(!view.send_enabled);
    }

    // =============================================
    // 通知テスト
    // =============================================

    #[test]
    fn test_notification_from_error() {
        let notification = Notification::from(&Error::NoCandidates);
        assert_eq!(notification.title, "Error");
        assert_eq!(notification.message, "Please upload at least one CV first");
        assert_eq!(notification.level.css_class(), "notification-error");
        assert_eq!(notification.level.icon_class(), "fas fa-exclamation-circle");
    }

    #[test]
    fn test_notification_success() {
        let notification = Notification::success("Job description processed successfully!");
        assert_eq!(notification.level, NotificationLevel::Success);
        assert_eq!(notification.level.icon_class(), "fas fa-check-circle");
    }

    #[test]
    fn test_older_timeout_keeps_newer_notification() {
        let mut slot = NotificationSlot::default();
        let first = slot.show(Notification::error("Please upload at least one CV first"));
        let second = slot.show(Notification::success("Job description processed successfully!"));

        assert!(!slot.dismiss(first));
        assert_eq!(
            slot.current().map(|n| n.message.as_str()),
            Some("Job description processed successfully!")
        );

        assert!(slot.dismiss(second));
        assert!(slot.current().is_none());
        assert!(!slot.dismiss(second));
    }
}
