//! Safety score estimation and display levels

use chrono::{Local, Timelike};
use rand::Rng;
use serde::Serialize;

use crate::models::user::clamp_safety_score;

const BASE_SCORE: f64 = 7.0;
const MIN_ESTIMATE: f64 = 1.0;

/// A stored score is replaced only when a new estimate differs by more than this
pub const RESCORE_THRESHOLD: f64 = 1.0;

/// Scores below this are reported to the police dashboard log
pub const LOW_SCORE_ALERT_THRESHOLD: f64 = 5.0;

/// Placeholder estimator standing in for a trained model: a base score
/// scaled by a time-of-day factor and randomised environment factors.
#[derive(Clone, Default)]
pub struct SafetyScorer;

impl SafetyScorer {
    pub fn new() -> Self {
        Self
    }

    /// Estimate a score for the current local time
    pub fn estimate(&self) -> f64 {
        self.estimate_with(&mut rand::thread_rng(), Local::now().hour())
    }

    /// Estimate a score at the given hour with an explicit random source
    pub fn estimate_with<R: Rng + ?Sized>(&self, rng: &mut R, hour: u32) -> f64 {
        let factors = [
            time_of_day_factor(hour),
            rng.gen_range(0.8..=1.2),   // location
            rng.gen_range(0.8..=1.2),   // crowd density
            rng.gen_range(0.9..=1.1),   // weather
            rng.gen_range(0.85..=1.0),  // historical incidents
        ];
        let score = factors.iter().fold(BASE_SCORE, |acc, f| acc * f);
        let rounded = (score * 10.0).round() / 10.0;
        rounded.clamp(MIN_ESTIMATE, 10.0)
    }
}

fn time_of_day_factor(hour: u32) -> f64 {
    match hour {
        6..=18 => 1.1,
        19..=22 => 1.0,
        _ => 0.8,
    }
}

/// Display level of a safety score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SafetyLevel {
    Excellent,
    Good,
    NeedsAttention,
}

impl SafetyLevel {
    /// Level for a score, after clamping it into [0, 10]
    pub fn from_score(score: f64) -> Self {
        let score = clamp_safety_score(score);
        if score >= 8.0 {
            SafetyLevel::Excellent
        } else if score >= 6.0 {
            SafetyLevel::Good
        } else {
            SafetyLevel::NeedsAttention
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SafetyLevel::Excellent => "Excellent",
            SafetyLevel::Good => "Good",
            SafetyLevel::NeedsAttention => "Needs Attention",
        }
    }
}

impl std::fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
