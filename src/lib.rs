//! Quadratic Lab - quadratic equation compute kernel
//!
//! Core modules:
//! - `solver`: Discriminant-classified roots with a derivation trace
//! - `curve`: Deterministic curve sampling (parabola, projectile)
//! - `quiz`: Timed root-guessing game (state machine, timers, questions)
//! - `highscores`: Leaderboard and the score store seam
//! - `persistence`: File-backed score store
//! - `platform`: Navigation shell and wall-clock driver
//! - `tuning`: Data-driven game balance and plot parameters

pub mod curve;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod quiz;
pub mod solver;
pub mod tuning;

pub use curve::{Positive, PlotPoint, Projectile};
pub use highscores::{HighScores, ScoreEntry, ScoreStore, StoreError};
pub use solver::{Coefficients, RootResult, Roots, solve};
pub use tuning::Tuning;

use glam::DVec2;

/// Default game balance and plot constants
pub mod consts {
    /// Lives at the start of a run
    pub const START_LIVES: u8 = 3;
    /// Countdown at the start of a run (seconds)
    pub const START_TIME_SECS: u32 = 30;
    /// Points for a correct answer
    pub const POINTS_PER_CORRECT: u32 = 10;
    /// Seconds added to the countdown for a correct answer
    pub const TIME_BONUS_SECS: u32 = 5;
    /// Answer lockout after each answer (milliseconds)
    pub const FEEDBACK_WINDOW_MS: u64 = 1000;
    /// Countdown period (milliseconds)
    pub const COUNTDOWN_PERIOD_MS: u64 = 1000;

    /// Question roots are drawn from `ROOT_MIN..ROOT_MAX` (end exclusive)
    pub const ROOT_MIN: i32 = -5;
    pub const ROOT_MAX: i32 = 5;
    /// Distractor options are drawn from `DISTRACTOR_MIN..DISTRACTOR_MAX`
    pub const DISTRACTOR_MIN: i32 = -10;
    pub const DISTRACTOR_MAX: i32 = 10;
    /// Answer options per question
    pub const OPTION_COUNT: usize = 4;

    /// Longest player name kept on submission (characters)
    pub const MAX_NAME_LEN: usize = 15;

    /// Parabola plot extends this far either side of the vertex
    pub const PLOT_HALF_RANGE: f64 = 10.0;
    /// Parabola plot x step
    pub const PLOT_STEP: f64 = 0.5;
    /// Projectile flight is split into this many equal time steps
    pub const TRAJECTORY_STEPS: u32 = 40;
    /// Standard gravity (m/s²)
    pub const EARTH_GRAVITY: f64 = 9.8;
}

/// Round to a fixed number of decimal places
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    let rounded = (value * scale).round() / scale;
    // Collapse -0.0 so plots and traces never show "-0"
    rounded + 0.0
}

/// Plain decimal rendering (Display never uses exponent notation for f64)
#[inline]
pub fn plain(value: f64) -> String {
    format!("{}", value + 0.0)
}

/// Fixed-precision rendering without a negative zero
#[inline]
pub fn fixed(value: f64, places: usize) -> String {
    let text = format!("{:.*}", places, value);
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}
