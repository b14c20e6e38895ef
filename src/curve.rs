//! Deterministic curve sampling
//!
//! One sampling primitive drives every plot: the plain parabola around its
//! vertex, the projectile trajectory over its time of flight, and the root
//! markers. Re-sampling identical inputs yields an identical sequence.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{EARTH_GRAVITY, PLOT_HALF_RANGE, PLOT_STEP, TRAJECTORY_STEPS};
use crate::solver::{Coefficients, RootResult, solve};
use crate::{polar_to_cartesian, round_to};

/// Allowed drift when deciding whether the last step lands on the domain end
const END_SLACK: f64 = 1e-9;

/// Most positions a single domain will yield
pub const MAX_SAMPLES: usize = 100_000;

/// A strictly positive, finite real
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Positive(f64);

impl Positive {
    /// Default parabola x step
    pub const PLOT_STEP: Positive = Positive(PLOT_STEP);

    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Positive {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("expected a positive number, got {}", value))
    }
}

impl From<Positive> for f64 {
    fn from(p: Positive) -> f64 {
        p.0
    }
}

/// A plotted point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl From<DVec2> for PlotPoint {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Sampling domain: `start..=end` in steps of `step`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub start: f64,
    pub end: f64,
    pub step: Positive,
}

impl Domain {
    /// `center ± half_range`
    pub fn centered(center: f64, half_range: f64, step: Positive) -> Self {
        Self {
            start: center - half_range,
            end: center + half_range,
            step,
        }
    }

    /// `start..=end` split into `steps` equal parts; `None` for an empty span
    pub fn subdivided(start: f64, end: f64, steps: u32) -> Option<Self> {
        if steps == 0 {
            return None;
        }
        let step = Positive::new((end - start) / steps as f64)?;
        Some(Self { start, end, step })
    }

    /// Number of positions the domain covers, `None` past [`MAX_SAMPLES`]
    pub fn sample_count(&self) -> Option<usize> {
        let span = self.end - self.start;
        if !span.is_finite() || span < 0.0 {
            return Some(0);
        }
        let intervals = (span / self.step.get() + END_SLACK).floor();
        (intervals < MAX_SAMPLES as f64).then(|| intervals as usize + 1)
    }

    /// Sample positions, both ends included when the step lands on `end`
    ///
    /// Domains finer than [`MAX_SAMPLES`] are cut off after that many
    /// positions.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        let count = self.sample_count().unwrap_or_else(|| {
            log::warn!(
                "domain {}..={} with step {} truncated to {} samples",
                self.start,
                self.end,
                self.step.get(),
                MAX_SAMPLES
            );
            MAX_SAMPLES
        });
        // Index-based stepping keeps every sample free of accumulated drift
        (0..count).map(move |i| self.start + i as f64 * self.step.get())
    }
}

/// Sample `f` over `domain`
pub fn sample<F>(f: F, domain: &Domain) -> Vec<PlotPoint>
where
    F: Fn(f64) -> f64,
{
    domain
        .positions()
        .map(|x| PlotPoint { x, y: f(x) })
        .collect()
}

/// Sample a parametric curve `t -> (x, y)` over `domain`
pub fn sample_parametric<F>(f: F, domain: &Domain) -> Vec<(f64, DVec2)>
where
    F: Fn(f64) -> DVec2,
{
    domain.positions().map(|t| (t, f(t))).collect()
}

/// Parabola plot around the vertex (x to 1 decimal, y to 2 decimals)
pub fn parabola(q: &Coefficients, half_range: f64, step: Positive) -> Vec<PlotPoint> {
    // Linear input has no vertex; plot around the origin instead
    let center = q.vertex().map(|v| v.x).unwrap_or(0.0);
    let domain = Domain::centered(center, half_range, step);
    sample(|x| q.evaluate(x), &domain)
        .into_iter()
        .map(|p| PlotPoint {
            x: round_to(p.x, 1),
            y: round_to(p.y, 2),
        })
        .collect()
}

/// Parabola plot with the default window (±10 around the vertex, step 0.5)
pub fn default_parabola(q: &Coefficients) -> Vec<PlotPoint> {
    parabola(q, PLOT_HALF_RANGE, Positive::PLOT_STEP)
}

/// Real roots as points on the x axis (at most two, finite only)
pub fn root_points(result: &RootResult) -> Vec<PlotPoint> {
    result
        .roots
        .real()
        .into_iter()
        .filter(|x| x.is_finite())
        .map(|x| PlotPoint { x, y: 0.0 })
        .collect()
}

/// One trajectory sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

/// Flight summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Time until the projectile returns to launch height (s)
    pub total_time: f64,
    /// Horizontal distance at landing (m)
    pub max_distance: f64,
    /// Apex height (m)
    pub max_height: f64,
}

/// Projectile launched from the origin over flat ground
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Launch speed (m/s)
    pub speed: f64,
    /// Launch angle above horizontal (degrees)
    pub angle_deg: f64,
    /// Downward acceleration (m/s²)
    pub gravity: Positive,
}

impl Projectile {
    pub fn new(speed: f64, angle_deg: f64, gravity: Positive) -> Self {
        Self {
            speed,
            angle_deg,
            gravity,
        }
    }

    /// Launch under Earth gravity
    pub fn earth(speed: f64, angle_deg: f64) -> Self {
        Self::new(speed, angle_deg, Positive(EARTH_GRAVITY))
    }

    /// Initial velocity `(v0·cos θ, v0·sin θ)`
    pub fn velocity(&self) -> DVec2 {
        polar_to_cartesian(self.speed, self.angle_deg.to_radians())
    }

    /// Height as a quadratic in time: `-½g·t² + v0y·t + 0`
    pub fn height_curve(&self) -> Coefficients {
        Coefficients::new(-0.5 * self.gravity.get(), self.velocity().y, 0.0)
    }

    /// Position at time `t`
    pub fn position(&self, t: f64) -> DVec2 {
        let v = self.velocity();
        DVec2::new(v.x * t, self.height_curve().evaluate(t))
    }

    /// Time of flight: the non-zero root of the height quadratic
    pub fn time_of_flight(&self) -> f64 {
        let roots = solve_height(self);
        roots.into_iter().fold(0.0, f64::max)
    }

    pub fn flight(&self) -> Flight {
        let total_time = self.time_of_flight();
        let max_height = self
            .height_curve()
            .vertex()
            .map(|apex| apex.y)
            .unwrap_or(0.0)
            .max(0.0);
        Flight {
            total_time,
            max_distance: self.velocity().x * total_time,
            max_height,
        }
    }

    /// Trajectory over the time of flight in `steps` equal parts,
    /// each coordinate rounded to 2 decimals
    pub fn trajectory(&self, steps: u32) -> Vec<TrajectoryPoint> {
        let total_time = self.time_of_flight();
        let Some(domain) = Domain::subdivided(0.0, total_time, steps) else {
            return vec![TrajectoryPoint {
                t: 0.0,
                x: 0.0,
                y: 0.0,
            }];
        };
        sample_parametric(|t| self.position(t), &domain)
            .into_iter()
            .map(|(t, p)| TrajectoryPoint {
                t: round_to(t, 2),
                x: round_to(p.x, 2),
                y: round_to(p.y, 2),
            })
            .collect()
    }

    /// Trajectory in the default 40 steps
    pub fn default_trajectory(&self) -> Vec<TrajectoryPoint> {
        self.trajectory(TRAJECTORY_STEPS)
    }
}

fn solve_height(p: &Projectile) -> Vec<f64> {
    let q = p.height_curve();
    solve(q.a, q.b, q.c).roots.real()
}
