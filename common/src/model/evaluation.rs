//! Evaluation returned by the Evaluation Service, and its display banding.

use std::sync::LazyLock;

use regex::Regex;

static FINAL_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)final\s+score\s*:\s*\[?\s*(\d+(?:\.\d+)?)")
        .expect("final score pattern is a valid regex")
});

/// What the applicant sees once the submission went through.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub evaluation_text: String,
    /// Score on a 0–10 scale, if one was reported or could be recovered.
    pub score: Option<f64>,
    pub application_id: Option<u64>,
}

impl EvaluationResult {
    /// Builds a result from the service's fields.
    ///
    /// A reported `ai_score` is already on the 0–10 scale. When it is missing
    /// the evaluator's `Final Score: N` line is used instead; that line is
    /// always out of 100.
    pub fn new(evaluation_text: String, reported_score: Option<f64>, application_id: Option<u64>) -> Self {
        let score = match reported_score {
            Some(score) => Some(score),
            None => score_from_text(&evaluation_text).map(percent_to_ten),
        }
        .filter(|s| s.is_finite() && *s >= 0.0);
        Self {
            evaluation_text,
            score,
            application_id,
        }
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Extracts the number following `Final Score:` in an evaluation text.
pub fn score_from_text(text: &str) -> Option<f64> {
    FINAL_SCORE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn percent_to_ten(percent: f64) -> f64 {
    (percent / 10.0).min(10.0)
}

/// Categorical display of a score, same thresholds as the HR review screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsImprovement,
    NoScore,
}

impl ScoreBand {
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            None => ScoreBand::NoScore,
            Some(s) if s >= 8.0 => ScoreBand::Excellent,
            Some(s) if s >= 6.0 => ScoreBand::Good,
            Some(_) => ScoreBand::NeedsImprovement,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::NeedsImprovement => "Needs Improvement",
            ScoreBand::NoScore => "No Score",
        }
    }

    /// CSS modifier used by the result panel.
    pub fn css_class(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::Good => "score-good",
            ScoreBand::NeedsImprovement => "score-low",
            ScoreBand::NoScore => "score-none",
        }
    }
}
