//! Question generation
//!
//! Every question is built backwards from two integer roots, so the monic
//! quadratic `x² + b·x + c` always factors over the integers. Coefficients
//! are widened to `i64`, so any pair of `i32` roots is representable.

use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::OPTION_COUNT;
use crate::tuning::QuizTuning;

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// e.g. `x² - 1x - 6 = 0`
    pub equation: String,
    /// Linear coefficient
    pub b: i64,
    /// Constant term
    pub c: i64,
    /// Always the first drawn root
    pub answer: i32,
    /// Distinct, ascending, contains `answer`
    pub options: Vec<i32>,
}

impl Question {
    /// Build the question whose roots are `r1` and `r2`, drawing distractors
    /// from `distractors`
    pub fn from_roots<R: Rng>(
        r1: i32,
        r2: i32,
        distractors: Range<i32>,
        rng: &mut R,
    ) -> Self {
        let (w1, w2) = (i64::from(r1), i64::from(r2));
        let b = -(w1 + w2);
        let c = w1 * w2;

        let mut options = vec![r1];
        while options.len() < OPTION_COUNT {
            let candidate = rng.random_range(distractors.clone());
            if !options.contains(&candidate) {
                options.push(candidate);
            }
        }
        options.sort_unstable();

        Self {
            equation: equation_text(b, c),
            b,
            c,
            answer: r1,
            options,
        }
    }

    /// Draw a fresh question
    pub fn generate<R: Rng>(tuning: &QuizTuning, rng: &mut R) -> Self {
        let r1 = rng.random_range(tuning.root_range.clone());
        let r2 = rng.random_range(tuning.root_range.clone());
        Self::from_roots(r1, r2, tuning.distractor_range.clone(), rng)
    }

    pub fn is_correct(&self, option: i32) -> bool {
        option == self.answer
    }
}

/// `x² {+|-} |b|x {+|-} |c| = 0`; zero terms keep a `+`
fn equation_text(b: i64, c: i64) -> String {
    let sign = |v: i64| if v >= 0 { '+' } else { '-' };
    format!(
        "x² {} {}x {} {} = 0",
        sign(b),
        b.unsigned_abs(),
        sign(c),
        c.unsigned_abs()
    )
}
