//! Quiz session state
//!
//! One session owns everything a run can mutate: phase, score, lives,
//! countdown, the current question, and both of its timers. Restarting or
//! abandoning the session cancels the timers and retires outstanding
//! submission tickets, so nothing scheduled for a previous run can land in
//! the next one.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::question::Question;
use super::timer::Timer;
use crate::tuning::QuizTuning;

/// Current phase of the quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizPhase {
    /// Waiting for the first start
    Start,
    /// Questions are being answered against the clock
    Playing,
    /// Run over, score may be submitted
    End,
}

/// Transient display after an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Correct,
    Wrong,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    OutOfLives,
    OutOfTime,
}

/// Something that happened during a session update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizEvent {
    Started,
    QuestionGenerated { equation: String },
    AnsweredCorrectly { score: u32 },
    AnsweredWrong { lives: u8 },
    SecondElapsed { time_left: u32 },
    FeedbackCleared,
    GameOver { reason: EndReason, score: u32 },
}

/// Score submission progress for the current `End` phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Submission {
    #[default]
    Idle,
    InFlight,
    Submitted,
}

/// A quiz run
#[derive(Debug, Clone)]
pub struct QuizSession<R = Pcg32> {
    pub(crate) tuning: QuizTuning,
    pub(crate) rng: R,
    pub(crate) phase: QuizPhase,
    pub(crate) score: u32,
    pub(crate) lives: u8,
    pub(crate) time_left: u32,
    pub(crate) question: Option<Question>,
    pub(crate) feedback: Option<Feedback>,
    pub(crate) submission: Submission,
    /// Bumped by `start` and `abandon`; stamps submission tickets
    pub(crate) run: u64,
    /// 1 Hz countdown
    pub(crate) countdown: Timer,
    /// Answer lockout after each answer
    pub(crate) feedback_timer: Timer,
}

impl QuizSession<Pcg32> {
    /// Session with a seeded PCG generator
    pub fn with_seed(tuning: QuizTuning, seed: u64) -> Self {
        Self::new(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn new(tuning: QuizTuning, rng: R) -> Self {
        let lives = tuning.start_lives;
        let time_left = tuning.start_time_secs;
        Self {
            tuning,
            rng,
            phase: QuizPhase::Start,
            score: 0,
            lives,
            time_left,
            question: None,
            feedback: None,
            submission: Submission::Idle,
            run: 0,
            countdown: Timer::default(),
            feedback_timer: Timer::default(),
        }
    }

    /// Begin a fresh run (from `Start` or `End`)
    pub fn start(&mut self) -> Vec<QuizEvent> {
        if self.phase == QuizPhase::Playing {
            log::debug!("start ignored: run already in progress");
            return Vec::new();
        }

        self.cancel_timers();
        self.run = self.run.wrapping_add(1);
        self.score = 0;
        self.lives = self.tuning.start_lives;
        self.time_left = self.tuning.start_time_secs;
        self.feedback = None;
        self.submission = Submission::Idle;
        self.phase = QuizPhase::Playing;
        self.countdown.schedule_repeating(self.tuning.countdown_period());
        log::info!(
            "Quiz started: {} lives, {}s on the clock",
            self.lives,
            self.time_left
        );

        let mut events = vec![QuizEvent::Started];
        events.push(self.next_question());
        events
    }

    /// Leave the quiz screen: cancel pending timers and return to `Start`
    ///
    /// A save still in flight for the abandoned run is ignored when it
    /// completes.
    pub fn abandon(&mut self) {
        self.cancel_timers();
        self.run = self.run.wrapping_add(1);
        self.phase = QuizPhase::Start;
        self.question = None;
        self.feedback = None;
        self.submission = Submission::Idle;
        log::debug!("Quiz abandoned");
    }

    pub(crate) fn cancel_timers(&mut self) {
        self.countdown.cancel();
        self.feedback_timer.cancel();
    }

    pub(crate) fn next_question(&mut self) -> QuizEvent {
        let question = Question::generate(&self.tuning, &mut self.rng);
        let event = QuizEvent::QuestionGenerated {
            equation: question.equation.clone(),
        };
        self.question = Some(question);
        event
    }

    pub(crate) fn end(&mut self, reason: EndReason) -> QuizEvent {
        self.phase = QuizPhase::End;
        self.countdown.cancel();
        self.question = None;
        log::info!("Quiz over ({:?}): final score {}", reason, self.score);
        QuizEvent::GameOver {
            reason,
            score: self.score,
        }
    }
}

impl<R> QuizSession<R> {
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn submission(&self) -> Submission {
        self.submission
    }

    pub fn tuning(&self) -> &QuizTuning {
        &self.tuning
    }

    /// True while an answer would be accepted
    pub fn accepts_answers(&self) -> bool {
        self.phase == QuizPhase::Playing && self.feedback.is_none()
    }

    /// True if any timer is still armed
    pub fn has_pending_timers(&self) -> bool {
        self.countdown.is_armed() || self.feedback_timer.is_armed()
    }
}
