//! Root-guessing quiz
//!
//! A timed multiple-choice game over monic quadratics with integer roots.
//! All state lives in one `QuizSession`; it is mutated only through
//! `&mut self`, and time only moves when the host calls `advance`:
//! - Seeded RNG only (injectable)
//! - Timers are owned by the session and cancelled on restart/abandon
//! - No rendering or storage dependencies beyond the `ScoreStore` seam

pub mod question;
pub mod state;
pub mod submit;
pub mod tick;
pub mod timer;

pub use question::Question;
pub use state::{EndReason, Feedback, QuizEvent, QuizPhase, QuizSession, Submission};
pub use submit::{SubmitError, SubmitTicket, today};
pub use timer::Timer;
