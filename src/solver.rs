//! Quadratic solver
//!
//! Classifies `a·x² + b·x + c = 0` by the sign of its discriminant and records
//! a human-readable derivation for each step. Pure and reentrant.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{fixed, plain};

/// Coefficients of `a·x² + b·x + c`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Coefficients {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// `b² - 4ac`
    #[inline]
    pub fn discriminant(&self) -> f64 {
        self.b * self.b - 4.0 * self.a * self.c
    }

    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }

    /// Turning point of the parabola, `None` when `a == 0`
    pub fn vertex(&self) -> Option<DVec2> {
        if self.a == 0.0 {
            return None;
        }
        let h = -self.b / (2.0 * self.a);
        let k = self.c - self.b * self.b / (4.0 * self.a);
        Some(DVec2::new(h, k))
    }
}

/// Nature of the roots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Roots {
    /// `a == 0`: the equation is linear
    NotQuadratic,
    /// `D > 0`: `x1 = (-b + √D) / 2a`, `x2 = (-b - √D) / 2a`
    TwoReal { x1: f64, x2: f64 },
    /// `D == 0`: repeated root
    OneReal { x: f64 },
    /// `D < 0`: `re ± im·i`
    Complex { re: f64, im: f64 },
}

impl Roots {
    pub fn as_str(&self) -> &'static str {
        match self {
            Roots::NotQuadratic => "not-quadratic",
            Roots::TwoReal { .. } => "two-real",
            Roots::OneReal { .. } => "one-real",
            Roots::Complex { .. } => "complex",
        }
    }

    /// Real roots in `x1, x2` order (a repeated root appears once)
    pub fn real(&self) -> Vec<f64> {
        match *self {
            Roots::TwoReal { x1, x2 } => vec![x1, x2],
            Roots::OneReal { x } => vec![x],
            Roots::NotQuadratic | Roots::Complex { .. } => Vec::new(),
        }
    }
}

/// Outcome of a single solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootResult {
    pub coefficients: Coefficients,
    /// `None` for a non-quadratic input
    pub discriminant: Option<f64>,
    pub roots: Roots,
    /// Derivation, one line per step
    pub steps: Vec<String>,
}

impl RootResult {
    /// Display labels for `x1` and `x2`
    pub fn root_labels(&self) -> (String, String) {
        match self.roots {
            Roots::NotQuadratic => ("Undefined".to_string(), "Undefined".to_string()),
            Roots::TwoReal { x1, x2 } => (fixed(x1, 4), fixed(x2, 4)),
            Roots::OneReal { x } => (fixed(x, 4), fixed(x, 4)),
            Roots::Complex { re, im } => (
                format!("{} + {}i", fixed(re, 2), fixed(im, 2)),
                format!("{} - {}i", fixed(re, 2), fixed(im, 2)),
            ),
        }
    }
}

/// Coefficients divided by a power of two that brings the largest to `[1, 2)`
///
/// Power-of-two scaling is exact apart from underflow of terms far smaller
/// than the largest, and leaves the roots unchanged.
fn rescaled(q: &Coefficients) -> Coefficients {
    let largest = q.a.abs().max(q.b.abs()).max(q.c.abs());
    let scale = 2f64.powi(-(largest.log2().floor() as i32));
    Coefficients::new(q.a * scale, q.b * scale, q.c * scale)
}

/// Solve `a·x² + b·x + c = 0`
///
/// Finite coefficients large enough to overflow `b² - 4ac` or `2a` are
/// rescaled before the roots are taken; the reported discriminant stays
/// unscaled and may then be infinite.
pub fn solve(a: f64, b: f64, c: f64) -> RootResult {
    let coefficients = Coefficients::new(a, b, c);

    if a == 0.0 {
        return RootResult {
            coefficients,
            discriminant: None,
            roots: Roots::NotQuadratic,
            steps: vec![
                "Since a = 0, this is not a quadratic equation but a linear one.".to_string(),
            ],
        };
    }

    let d = coefficients.discriminant();
    let two_a = 2.0 * a;
    let mut steps = vec![
        "1. Compute the discriminant: D = b² - 4ac".to_string(),
        format!(
            "D = ({})² - 4({})({}) = {} - {} = {}",
            plain(b),
            plain(a),
            plain(c),
            plain(b * b),
            plain(4.0 * a * c),
            plain(d)
        ),
    ];

    let overflowed = !d.is_finite() || !two_a.is_finite();
    let finite = a.is_finite() && b.is_finite() && c.is_finite();
    let q = if overflowed && finite {
        log::debug!("rescaling {}x² + {}x + {} to avoid overflow", a, b, c);
        rescaled(&coefficients)
    } else {
        coefficients
    };
    let (sd, s_two_a) = (q.discriminant(), 2.0 * q.a);

    let roots = if sd > 0.0 {
        let x1 = (-q.b + sd.sqrt()) / s_two_a;
        let x2 = (-q.b - sd.sqrt()) / s_two_a;
        let sqrt_d = d.sqrt();
        steps.push("2. D > 0, so there are two distinct real roots.".to_string());
        steps.push(format!(
            "x1 = (-b + √D) / 2a = ({} + {}) / {} = {}",
            plain(-b),
            fixed(sqrt_d, 2),
            plain(two_a),
            fixed(x1, 4)
        ));
        steps.push(format!(
            "x2 = (-b - √D) / 2a = ({} - {}) / {} = {}",
            plain(-b),
            fixed(sqrt_d, 2),
            plain(two_a),
            fixed(x2, 4)
        ));
        Roots::TwoReal { x1, x2 }
    } else if sd == 0.0 {
        // Exact comparison: near-zero discriminants classify by sign
        let x = -q.b / s_two_a;
        steps.push("2. D = 0, so there is one repeated real root.".to_string());
        steps.push(format!(
            "x = -b / 2a = {} / {} = {}",
            plain(-b),
            plain(two_a),
            fixed(x, 4)
        ));
        Roots::OneReal { x }
    } else {
        let re = -q.b / s_two_a;
        let im = (-sd).sqrt() / s_two_a;
        steps.push("2. D < 0, so there are two complex conjugate roots.".to_string());
        steps.push(format!("x1 = {} + {}i", fixed(re, 2), fixed(im, 2)));
        steps.push(format!("x2 = {} - {}i", fixed(re, 2), fixed(im, 2)));
        Roots::Complex { re, im }
    };

    RootResult {
        coefficients,
        discriminant: Some(d),
        roots,
        steps,
    }
}
