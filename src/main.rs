//! Quadratic Lab entry point
//!
//! Runs the compute kernel end to end: a solve with its derivation, the
//! parabola and projectile plots, and a scripted quiz run saved to an
//! in-memory leaderboard.
//!
//! Usage: `quadratic-lab [seed] [tuning.json]`

use std::path::Path;
use std::time::Duration;

use quadratic_lab::curve::{self, Projectile};
use quadratic_lab::quiz::{QuizEvent, QuizPhase, QuizSession};
use quadratic_lab::{HighScores, ScoreStore, Tuning, solve};

fn main() {
    env_logger::init();
    log::info!("Quadratic Lab (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let tuning = args
        .next()
        .map(|path| Tuning::load_or_default(Path::new(&path)))
        .unwrap_or_default();

    show_solver();
    show_curves(&tuning);
    play_quiz(&tuning, seed);
}

fn show_solver() {
    for (a, b, c) in [(1.0, -3.0, 2.0), (1.0, 2.0, 1.0), (1.0, 0.0, 1.0), (0.0, 5.0, -10.0)] {
        let result = solve(a, b, c);
        let (x1, x2) = result.root_labels();
        println!("\n{}x² + {}x + {} = 0  [{}]", a, b, c, result.roots.as_str());
        for step in &result.steps {
            println!("  {}", step);
        }
        println!("  x1 = {}, x2 = {}", x1, x2);
    }
}

fn show_curves(tuning: &Tuning) {
    let result = solve(1.0, -3.0, 2.0);
    let points = curve::parabola(&result.coefficients, tuning.plot.half_range, tuning.plot.step);
    let roots = curve::root_points(&result);
    println!(
        "\nParabola: {} samples from x = {} to x = {}, {} root marker(s)",
        points.len(),
        points.first().map(|p| p.x).unwrap_or_default(),
        points.last().map(|p| p.x).unwrap_or_default(),
        roots.len()
    );

    let projectile = Projectile::earth(25.0, 45.0);
    let flight = projectile.flight();
    let trajectory = projectile.trajectory(tuning.plot.trajectory_steps);
    println!(
        "Projectile: {} samples, flight {:.2}s, range {:.2}m, apex {:.2}m",
        trajectory.len(),
        flight.total_time,
        flight.max_distance,
        flight.max_height
    );
}

/// Answer the first few questions correctly, then miss until the run ends
fn play_quiz(tuning: &Tuning, seed: u64) {
    let mut session = QuizSession::with_seed(tuning.quiz.clone(), seed);

    println!("\nQuiz (seed {})", seed);
    print_events(session.start());

    let mut answered = 0;
    while session.phase() == QuizPhase::Playing {
        if let Some(question) = session.question() {
            let pick = if answered < 3 {
                question.answer
            } else {
                question
                    .options
                    .iter()
                    .copied()
                    .find(|&o| o != question.answer)
                    .unwrap_or(question.answer)
            };
            answered += 1;
            print_events(session.answer(pick));
        }
        print_events(session.advance(Duration::from_secs(1)));
    }

    let mut leaderboard = HighScores::new();
    match session.submit_score("Demo", &mut leaderboard) {
        Ok(rank) => {
            if let Some(rank) = rank {
                println!("  Saved at rank #{}", rank);
            }
            for (rank, entry) in leaderboard.scores().unwrap_or_default().iter().enumerate() {
                println!("  #{} {} {} ({})", rank + 1, entry.name, entry.score, entry.date);
            }
        }
        Err(e) => log::warn!("Score not saved: {}", e),
    }
}

fn print_events(events: Vec<QuizEvent>) {
    for event in events {
        match event {
            QuizEvent::QuestionGenerated { equation } => println!("  Q: {}", equation),
            QuizEvent::GameOver { reason, score } => {
                println!("  Game over ({:?}), score {}", reason, score)
            }
            _ => {}
        }
    }
}
