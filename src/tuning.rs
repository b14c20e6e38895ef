//! Game balance and plot parameters
//!
//! Loaded from a JSON file; anything missing falls back to the defaults in
//! [`crate::consts`].

use std::fs;
use std::ops::Range;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::curve::{Domain, MAX_SAMPLES, Positive};

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Quiz balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizTuning {
    pub start_lives: u8,
    pub start_time_secs: u32,
    pub points_per_correct: u32,
    pub time_bonus_secs: u32,
    pub feedback_window_ms: u64,
    pub countdown_period_ms: u64,
    /// Question roots, end exclusive
    pub root_range: Range<i32>,
    /// Distractor options, end exclusive
    pub distractor_range: Range<i32>,
    pub max_name_len: usize,
}

impl Default for QuizTuning {
    fn default() -> Self {
        Self {
            start_lives: START_LIVES,
            start_time_secs: START_TIME_SECS,
            points_per_correct: POINTS_PER_CORRECT,
            time_bonus_secs: TIME_BONUS_SECS,
            feedback_window_ms: FEEDBACK_WINDOW_MS,
            countdown_period_ms: COUNTDOWN_PERIOD_MS,
            root_range: ROOT_MIN..ROOT_MAX,
            distractor_range: DISTRACTOR_MIN..DISTRACTOR_MAX,
            max_name_len: MAX_NAME_LEN,
        }
    }
}

impl QuizTuning {
    pub fn feedback_window(&self) -> Duration {
        Duration::from_millis(self.feedback_window_ms)
    }

    pub fn countdown_period(&self) -> Duration {
        Duration::from_millis(self.countdown_period_ms)
    }

    fn validate(&self) -> Result<(), TuningError> {
        if self.start_lives == 0 {
            return Err(TuningError::Invalid("start_lives must be at least 1".into()));
        }
        if self.start_time_secs == 0 {
            return Err(TuningError::Invalid("start_time_secs must be at least 1".into()));
        }
        if self.countdown_period_ms == 0 {
            return Err(TuningError::Invalid("countdown_period_ms must be positive".into()));
        }
        if self.root_range.is_empty() {
            return Err(TuningError::Invalid("root_range is empty".into()));
        }
        // The correct answer plus three distinct distractors must be drawable
        let distractors = self.distractor_range.end as i64 - self.distractor_range.start as i64;
        if distractors < OPTION_COUNT as i64 {
            return Err(TuningError::Invalid(format!(
                "distractor_range must hold at least {} values",
                OPTION_COUNT
            )));
        }
        if self.max_name_len == 0 {
            return Err(TuningError::Invalid("max_name_len must be positive".into()));
        }
        Ok(())
    }
}

/// Plot parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotTuning {
    /// Parabola window either side of the vertex
    pub half_range: f64,
    /// Parabola x step
    pub step: Positive,
    /// Projectile time subdivisions
    pub trajectory_steps: u32,
}

impl Default for PlotTuning {
    fn default() -> Self {
        Self {
            half_range: PLOT_HALF_RANGE,
            step: Positive::PLOT_STEP,
            trajectory_steps: TRAJECTORY_STEPS,
        }
    }
}

impl PlotTuning {
    fn validate(&self) -> Result<(), TuningError> {
        if !self.half_range.is_finite() || self.half_range < 0.0 {
            return Err(TuningError::Invalid("half_range must be finite and non-negative".into()));
        }
        if Domain::centered(0.0, self.half_range, self.step).sample_count().is_none() {
            return Err(TuningError::Invalid(format!(
                "step {} is too fine for half_range {} (over {} samples)",
                self.step.get(),
                self.half_range,
                MAX_SAMPLES
            )));
        }
        if self.trajectory_steps as usize >= MAX_SAMPLES {
            return Err(TuningError::Invalid(format!(
                "trajectory_steps must be below {}",
                MAX_SAMPLES
            )));
        }
        Ok(())
    }
}

/// All tunables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub quiz: QuizTuning,
    pub plot: PlotTuning,
}

impl Tuning {
    /// Load and validate a tuning file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.quiz.validate()?;
        tuning.plot.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load a tuning file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(TuningError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No tuning file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), TuningError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Tuning saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuizSession;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.quiz.start_lives, 3);
        assert_eq!(t.quiz.start_time_secs, 30);
        assert_eq!(t.quiz.root_range, -5..5);
        assert_eq!(t.quiz.distractor_range, -10..10);
        assert_eq!(t.plot.step.get(), 0.5);
        assert_eq!(t.plot.trajectory_steps, 40);
        assert!(t.quiz.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");
        fs::write(&path, r#"{ "quiz": { "start_time_secs": 60 } }"#).unwrap();

        let t = Tuning::load(&path).unwrap();
        assert_eq!(t.quiz.start_time_secs, 60);
        assert_eq!(t.quiz.start_lives, 3);
        assert_eq!(t.plot, PlotTuning::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");

        fs::write(&path, r#"{ "quiz": { "start_lives": 0 } }"#).unwrap();
        assert!(matches!(Tuning::load(&path), Err(TuningError::Invalid(_))));

        fs::write(&path, r#"{ "plot": { "step": 0.0 } }"#).unwrap();
        assert!(matches!(Tuning::load(&path), Err(TuningError::Parse(_))));

        fs::write(&path, r#"{ "quiz": { "distractor_range": { "start": 0, "end": 2 } } }"#)
            .unwrap();
        assert!(matches!(Tuning::load(&path), Err(TuningError::Invalid(_))));

        fs::write(&path, r#"{ "quiz": { "start_time_secs": 0 } }"#).unwrap();
        assert!(matches!(Tuning::load(&path), Err(TuningError::Invalid(_))));

        fs::write(&path, r#"{ "plot": { "step": 1e-300 } }"#).unwrap();
        assert!(matches!(Tuning::load(&path), Err(TuningError::Invalid(_))));

        fs::write(&path, r#"{ "plot": { "trajectory_steps": 4000000000 } }"#).unwrap();
        assert!(matches!(Tuning::load(&path), Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_wide_root_range_plays() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");
        fs::write(
            &path,
            r#"{ "quiz": { "root_range": { "start": -100000, "end": 100000 } } }"#,
        )
        .unwrap();

        let t = Tuning::load(&path).unwrap();
        let mut session = QuizSession::with_seed(t.quiz, 3);
        session.start();
        let q = session.question().unwrap();
        let x = i64::from(q.answer);
        assert_eq!(x * x + q.b * x + q.c, 0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let t = Tuning::load_or_default(&dir.path().join("absent.json"));
        assert_eq!(t, Tuning::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");
        let mut t = Tuning::default();
        t.quiz.time_bonus_secs = 7;
        t.save(&path).unwrap();
        assert_eq!(Tuning::load(&path).unwrap(), t);
    }
}
