//! Session updates
//!
//! Answers arrive from the player; time arrives through `advance`. Due timers
//! fire in chronological order, the countdown first when both come due at
//! the same instant.

use std::time::Duration;

use rand::Rng;

use super::state::{EndReason, Feedback, QuizEvent, QuizPhase, QuizSession};

impl<R: Rng> QuizSession<R> {
    /// Submit an answer for the current question
    ///
    /// Ignored outside `Playing` and while a feedback window is open.
    pub fn answer(&mut self, option: i32) -> Vec<QuizEvent> {
        if !self.accepts_answers() {
            log::debug!("answer {} ignored in {:?}", option, self.phase);
            return Vec::new();
        }
        let Some(question) = self.question.as_ref() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        if question.is_correct(option) {
            self.score += self.tuning.points_per_correct;
            self.time_left += self.tuning.time_bonus_secs;
            self.feedback = Some(Feedback::Correct);
            events.push(QuizEvent::AnsweredCorrectly { score: self.score });
        } else {
            self.lives = self.lives.saturating_sub(1);
            self.feedback = Some(Feedback::Wrong);
            events.push(QuizEvent::AnsweredWrong { lives: self.lives });
            if self.lives == 0 {
                events.push(self.end(EndReason::OutOfLives));
            }
        }

        self.feedback_timer.schedule_once(self.tuning.feedback_window());
        events
    }

    /// Let `dt` of wall-clock time pass
    pub fn advance(&mut self, dt: Duration) -> Vec<QuizEvent> {
        let mut events = Vec::new();
        let mut budget = dt;

        loop {
            let next_due = [self.countdown.remaining(), self.feedback_timer.remaining()]
                .into_iter()
                .flatten()
                .min()
                .filter(|due| *due <= budget);

            let Some(due) = next_due else {
                self.countdown.elapse(budget);
                self.feedback_timer.elapse(budget);
                break;
            };

            budget -= due;
            self.countdown.elapse(due);
            self.feedback_timer.elapse(due);

            if self.countdown.take_due() {
                self.on_second(&mut events);
            }
            if self.feedback_timer.take_due() {
                self.on_feedback_elapsed(&mut events);
            }
        }

        events
    }

    fn on_second(&mut self, events: &mut Vec<QuizEvent>) {
        if self.phase != QuizPhase::Playing {
            self.countdown.cancel();
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        events.push(QuizEvent::SecondElapsed {
            time_left: self.time_left,
        });
        if self.time_left == 0 {
            events.push(self.end(EndReason::OutOfTime));
        }
    }

    fn on_feedback_elapsed(&mut self, events: &mut Vec<QuizEvent>) {
        self.feedback = None;
        events.push(QuizEvent::FeedbackCleared);
        // A run that ended on this answer gets no further question
        if self.phase == QuizPhase::Playing {
            events.push(self.next_question());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::state::Submission;
    use crate::tuning::QuizTuning;
    use proptest::prelude::*;
    use rand_pcg::Pcg32;

    const SEC: Duration = Duration::from_secs(1);

    fn playing(seed: u64) -> QuizSession<Pcg32> {
        let mut session = QuizSession::with_seed(QuizTuning::default(), seed);
        session.start();
        session
    }

    fn correct(session: &QuizSession<Pcg32>) -> i32 {
        session.question().unwrap().answer
    }

    fn wrong(session: &QuizSession<Pcg32>) -> i32 {
        let q = session.question().unwrap();
        *q.options.iter().find(|&&o| o != q.answer).unwrap()
    }

    #[test]
    fn test_correct_answer_scores_and_adds_time() {
        let mut session = playing(11);
        let events = session.answer(correct(&session));
        assert_eq!(events, vec![QuizEvent::AnsweredCorrectly { score: 10 }]);
        assert_eq!(session.score(), 10);
        assert_eq!(session.time_left(), 35);
        assert_eq!(session.feedback(), Some(Feedback::Correct));
        assert!(!session.accepts_answers());
    }

    #[test]
    fn test_feedback_window_locks_answers() {
        let mut session = playing(11);
        session.answer(correct(&session));
        let answer = correct(&session);
        assert!(session.answer(answer).is_empty());
        assert_eq!(session.score(), 10);

        session.advance(Duration::from_millis(999));
        assert_eq!(session.feedback(), Some(Feedback::Correct));
        assert!(session.answer(answer).is_empty());
    }

    #[test]
    fn test_feedback_window_then_next_question() {
        let mut session = playing(11);
        session.answer(correct(&session));
        let events = session.advance(SEC);
        assert_eq!(events[0], QuizEvent::SecondElapsed { time_left: 34 });
        assert_eq!(events[1], QuizEvent::FeedbackCleared);
        assert!(matches!(events[2], QuizEvent::QuestionGenerated { .. }));
        assert_eq!(session.feedback(), None);
        assert!(session.accepts_answers());
    }

    #[test]
    fn test_wrong_answer_costs_a_life() {
        let mut session = playing(5);
        let events = session.answer(wrong(&session));
        assert_eq!(events, vec![QuizEvent::AnsweredWrong { lives: 2 }]);
        assert_eq!(session.lives(), 2);
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_left(), 30);
        assert_eq!(session.feedback(), Some(Feedback::Wrong));
        assert_eq!(session.phase(), QuizPhase::Playing);
    }

    #[test]
    fn test_last_life_ends_run_in_same_update() {
        let mut session = playing(5);
        session.lives = 1;
        let events = session.answer(wrong(&session));
        assert_eq!(
            events,
            vec![
                QuizEvent::AnsweredWrong { lives: 0 },
                QuizEvent::GameOver {
                    reason: EndReason::OutOfLives,
                    score: 0
                },
            ]
        );
        assert_eq!(session.phase(), QuizPhase::End);
        assert_eq!(session.lives(), 0);
        assert!(session.question().is_none());

        let events = session.advance(SEC);
        assert_eq!(events, vec![QuizEvent::FeedbackCleared]);
        assert!(session.question().is_none());
        assert_eq!(session.feedback(), None);
        assert!(!session.has_pending_timers());
    }

    #[test]
    fn test_two_wrong_answers_keep_playing() {
        let mut session = playing(9);
        session.answer(wrong(&session));
        session.advance(SEC);
        session.answer(wrong(&session));
        assert_eq!(session.lives(), 1);
        assert_eq!(session.phase(), QuizPhase::Playing);
        session.advance(SEC);
        session.answer(wrong(&session));
        assert_eq!(session.phase(), QuizPhase::End);
    }

    #[test]
    fn test_countdown_ends_run() {
        let mut session = playing(3);
        let events = session.advance(Duration::from_secs(29));
        assert_eq!(events.len(), 29);
        assert_eq!(session.time_left(), 1);
        assert_eq!(session.phase(), QuizPhase::Playing);

        let events = session.advance(SEC);
        assert_eq!(
            events,
            vec![
                QuizEvent::SecondElapsed { time_left: 0 },
                QuizEvent::GameOver {
                    reason: EndReason::OutOfTime,
                    score: 0
                },
            ]
        );
        assert_eq!(session.phase(), QuizPhase::End);
    }

    #[test]
    fn test_large_step_stops_at_game_over() {
        let mut session = playing(3);
        let events = session.advance(Duration::from_secs(120));
        let seconds = events
            .iter()
            .filter(|e| matches!(e, QuizEvent::SecondElapsed { .. }))
            .count();
        assert_eq!(seconds, 30);
        assert_eq!(session.time_left(), 0);
        assert!(!session.has_pending_timers());
    }

    #[test]
    fn test_partial_seconds_accumulate() {
        let mut session = playing(3);
        for _ in 0..3 {
            assert!(session.advance(Duration::from_millis(400)).len() <= 1);
        }
        assert_eq!(session.time_left(), 29);
    }

    #[test]
    fn test_answers_ignored_outside_playing() {
        let mut session = QuizSession::with_seed(QuizTuning::default(), 1);
        assert!(session.answer(0).is_empty());

        session.start();
        session.advance(Duration::from_secs(30));
        assert_eq!(session.phase(), QuizPhase::End);
        assert!(session.answer(0).is_empty());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_restart_during_feedback_drops_stale_window() {
        let mut session = playing(21);
        session.lives = 1;
        session.answer(wrong(&session));
        assert_eq!(session.phase(), QuizPhase::End);

        session.advance(Duration::from_millis(300));
        session.start();
        assert_eq!(session.submission(), Submission::Idle);
        let question = session.question().cloned();

        // The old window would have closed 700ms into the new run
        let events = session.advance(Duration::from_millis(700));
        assert!(events.is_empty());
        assert_eq!(session.question().cloned(), question);
        assert_eq!(session.time_left(), 30);
    }

    #[derive(Debug, Clone)]
    enum Action {
        AnswerCorrect,
        AnswerWrong,
        Wait(u64),
        Restart,
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::AnswerCorrect),
            Just(Action::AnswerWrong),
            (0u64..2500).prop_map(Action::Wait),
            Just(Action::Restart),
        ]
    }

    proptest! {
        #[test]
        fn prop_playing_invariants(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..60)) {
            let mut session = playing(seed);
            for action in actions {
                let was_playing = session.phase() == QuizPhase::Playing;
                let score_before = session.score();
                match action {
                    Action::AnswerCorrect => {
                        if let Some(q) = session.question() {
                            let a = q.answer;
                            session.answer(a);
                        }
                    }
                    Action::AnswerWrong => {
                        if session.question().is_some() {
                            let w = wrong(&session);
                            session.answer(w);
                        }
                    }
                    Action::Wait(ms) => {
                        session.advance(Duration::from_millis(ms));
                    }
                    Action::Restart => {
                        session.start();
                    }
                }
                prop_assert!(session.lives() <= 3);
                if was_playing {
                    // Restart is ignored while Playing, so nothing resets the score
                    prop_assert!(session.score() >= score_before);
                }
                if session.phase() == QuizPhase::Playing {
                    prop_assert!(session.lives() > 0);
                    prop_assert_eq!(session.score() % 10, 0);
                    prop_assert!(session.question().is_some());
                    prop_assert!(session.time_left() > 0);
                } else {
                    prop_assert!(session.question().is_none());
                }
            }
        }
    }
}
