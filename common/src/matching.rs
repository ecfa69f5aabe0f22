//! CVマッチング
//!
//! 未処理の候補者を1件ずつ順番にバックエンドへ送る単一ワーカーのキュー。
//! 同時に投げるリクエストは常に1件。

use crate::api::HiringApi;
use crate::error::Result;
use crate::types::{Candidate, CvAnalysis, JobDescription, UploadedFile};

/// ショートリスト入りのスコア下限
pub const SHORTLIST_THRESHOLD: f64 = 80.0;

const HIGH_MATCH: f64 = 85.0;
const MEDIUM_MATCH: f64 = 75.0;

/// スコア帯（表示色の切り替え用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_MATCH {
            ScoreBand::High
        } else if score >= MEDIUM_MATCH {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::High => "high-match",
            ScoreBand::Medium => "medium-match",
            ScoreBand::Low => "low-match",
        }
    }
}

pub fn is_shortlisted(score: f64) -> bool {
    score >= SHORTLIST_THRESHOLD
}

/// 進捗
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchProgress {
    pub processed: usize,
    pub total: usize,
}

impl MatchProgress {
    pub fn new(processed: usize, total: usize) -> Self {
        Self { processed, total }
    }

    /// 0.0〜100.0
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.processed as f64 / self.total as f64 * 100.0).min(100.0)
    }

    pub fn label(&self) -> String {
        format!("Processing {}/{} CVs", self.processed, self.total)
    }
}

/// 1件分の処理結果
#[derive(Debug, Clone, PartialEq)]
pub struct CvCompletion {
    pub filename: String,
    pub outcome: std::result::Result<CvAnalysis, String>,
    pub progress: MatchProgress,
}

/// 未処理候補者のキュー
#[derive(Debug, Clone)]
pub struct MatchingQueue {
    job_description_json: String,
    /// (候補者リスト上の位置, ファイル)
    pending: Vec<(usize, UploadedFile)>,
    total: usize,
}

impl MatchingQueue {
    /// 処理済みの候補者は含めない
    pub fn new(candidates: &[Candidate], job_description: &JobDescription) -> Result<Self> {
        let job_description_json = serde_json::to_string(job_description)?;
        let pending = candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| !candidate.processed)
            .map(|(index, candidate)| (index, candidate.file.clone()))
            .collect();

        Ok(Self {
            job_description_json,
            pending,
            total: candidates.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// 先頭から順に1件ずつ処理する
    ///
    /// 1件の失敗でキューは止まらない。失敗はエラー文字列として `on_complete` に渡る。
    pub async fn run<A, F>(self, api: &A, mut on_complete: F)
    where
        A: HiringApi,
        F: FnMut(CvCompletion),
    {
        let total = self.total;

        for (index, file) in self.pending {
            log::debug!("processing CV {} ({}/{})", file.name, index + 1, total);

            let outcome = api
                .process_cv(&file, &self.job_description_json)
                .await
                .map_err(|e| {
                    log::error!("Error processing CV {}: {}", file.name, e);
                    e.to_string()
                });

            on_complete(CvCompletion {
                filename: file.name.clone(),
                outcome,
                progress: MatchProgress::new(index + 1, total),
            });
        }
    }
}

/// スコア降順の安定ソートとショートリスト抽出
///
/// 戻り値はショートリスト入りした候補者の位置（ソート後）。
pub fn rank_candidates(candidates: &mut [Candidate]) -> Vec<usize> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| is_shortlisted(candidate.score))
        .map(|(index, _)| index)
        .collect()
}
