//! Score submission
//!
//! A finished run may be saved once. The store call can happen off the
//! clock thread: `begin_submission` validates, marks the attempt in flight
//! and hands back a ticket; `finish_submission` records the outcome for that
//! ticket. Neither touches score or lives.

use thiserror::Error;

use super::state::{QuizPhase, QuizSession, Submission};
use crate::highscores::{ScoreEntry, ScoreStore, StoreError};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("the run is not over yet")]
    NotFinished,
    #[error("this score was already saved")]
    AlreadySubmitted,
    #[error("a save is already in progress")]
    InFlight,
    #[error("please enter a name")]
    EmptyName,
    #[error("save result belongs to a run that is no longer current")]
    Stale,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Identifies the run a save was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    run: u64,
}

/// Today's date as `YYYY-MM-DD` (UTC)
pub fn today() -> String {
    time::OffsetDateTime::now_utc().date().to_string()
}

impl<R> QuizSession<R> {
    /// Validate a submission and mark it in flight
    pub fn begin_submission(
        &mut self,
        name: &str,
        date: String,
    ) -> Result<(SubmitTicket, ScoreEntry), SubmitError> {
        if self.phase != QuizPhase::End {
            return Err(SubmitError::NotFinished);
        }
        match self.submission {
            Submission::Submitted => return Err(SubmitError::AlreadySubmitted),
            Submission::InFlight => return Err(SubmitError::InFlight),
            Submission::Idle => {}
        }
        let name: String = name.trim().chars().take(self.tuning.max_name_len).collect();
        if name.is_empty() {
            return Err(SubmitError::EmptyName);
        }

        self.submission = Submission::InFlight;
        let ticket = SubmitTicket { run: self.run };
        Ok((
            ticket,
            ScoreEntry {
                name,
                score: self.score,
                date,
            },
        ))
    }

    /// Record the store's answer for the save `ticket` started
    ///
    /// Returns the leaderboard rank reached, if any. Results for an earlier
    /// run, or with nothing in flight, are dropped with `SubmitError::Stale`.
    pub fn finish_submission(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<Option<usize>, StoreError>,
    ) -> Result<Option<usize>, SubmitError> {
        if ticket.run != self.run || self.submission != Submission::InFlight {
            log::debug!("submission result for run {} ignored", ticket.run);
            return Err(SubmitError::Stale);
        }
        match outcome {
            Ok(rank) => {
                self.submission = Submission::Submitted;
                match rank {
                    Some(rank) => log::info!("Score {} saved at #{}", self.score, rank),
                    None => log::info!("Score {} saved", self.score),
                }
                Ok(rank)
            }
            Err(e) => {
                // Leave the run retryable
                self.submission = Submission::Idle;
                log::error!("Failed to save score: {}", e);
                Err(e.into())
            }
        }
    }

    /// Validate, save and record in one call
    pub fn submit_score<S: ScoreStore + ?Sized>(
        &mut self,
        name: &str,
        store: &mut S,
    ) -> Result<Option<usize>, SubmitError> {
        let (ticket, entry) = self.begin_submission(name, today())?;
        let outcome = store.save_score(entry);
        self.finish_submission(ticket, outcome)
    }
}
