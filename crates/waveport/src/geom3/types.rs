//! Basic 3D types and tolerances used by the segment classifier.
//!
//! - `SegCfg`: the two epsilons (collinearity, projection bounds).
//! - `Segment`: directed pair `a → b`.
//! - `Fan`: a base point with ordered tips, i.e. segments `base → tip`.
//! - `SegmentMatch`, `SegmentError`: scan outcome and failure modes.

use std::fmt;

use nalgebra::Vector3;

use super::segment::{classify_against_candidates, ratio_eps};

/// Classifier tolerances, both in squared-length units.
///
/// - `eps_cross`: max absolute component of `(p−a) × (b−a)` still treated as zero.
/// - `eps_dot`: slack on both ends of `0 ≤ (p−a)·(b−a) ≤ |b−a|²`.
///
/// The cross product scales with `|b−a|`, so a fixed `eps_cross` admits a
/// perpendicular offset of about `eps_cross / |b−a|`: longer segments accept
/// smaller offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegCfg {
    pub eps_cross: f64,
    pub eps_dot: f64,
}

impl SegCfg {
    /// Exact comparisons against zero.
    #[inline]
    pub const fn strict() -> Self {
        Self {
            eps_cross: 0.0,
            eps_dot: 0.0,
        }
    }

    /// Same slack for collinearity and bounds, in squared-length units.
    #[inline]
    pub fn with_tolerance(eps: f64) -> Self {
        let eps = eps.abs();
        Self {
            eps_cross: eps,
            eps_dot: eps,
        }
    }

    #[inline]
    pub fn is_strict(&self) -> bool {
        self.eps_cross == 0.0 && self.eps_dot == 0.0
    }
}

impl Default for SegCfg {
    fn default() -> Self {
        Self::strict()
    }
}

/// Directed segment `a → b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Vector3<f64>,
    pub b: Vector3<f64>,
}

impl Segment {
    #[inline]
    pub fn new(a: Vector3<f64>, b: Vector3<f64>) -> Self {
        Self { a, b }
    }
    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        self.b - self.a
    }
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.a.iter().chain(self.b.iter()).all(|c| c.is_finite())
    }
    /// Point at parameter `t` (0 → `a`, 1 → `b`).
    #[inline]
    pub fn at(&self, t: f64) -> Vector3<f64> {
        self.a + self.direction() * t
    }
    /// Normalized position of `p`, or `None` when `p` is off the segment.
    #[inline]
    pub fn ratio_of(&self, p: Vector3<f64>, cfg: SegCfg) -> Result<Option<f64>, SegmentError> {
        ratio_eps(p, self.a, self.b, cfg)
    }
}

/// Candidate segments sharing a start point: `base → tips[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Fan {
    pub base: Vector3<f64>,
    pub tips: Vec<Vector3<f64>>,
}

impl Fan {
    pub fn new(base: Vector3<f64>, tips: Vec<Vector3<f64>>) -> Self {
        Self { base, tips }
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.tips.iter().map(|&t| Segment::new(self.base, t)).collect()
    }

    /// First tip index whose segment contains `query`.
    pub fn classify(
        &self,
        query: Vector3<f64>,
        cfg: SegCfg,
    ) -> Result<Option<SegmentMatch>, SegmentError> {
        classify_against_candidates(query, &self.segments(), cfg)
    }
}

/// First candidate that contains the query, with its ratio in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentMatch {
    pub index: usize,
    pub ratio: f64,
}

/// Errors surfaced by the classifier.
#[derive(Clone, Debug, PartialEq)]
pub enum SegmentError {
    /// `a == b`; the ratio has no denominator.
    DegenerateSegment,
    /// Some coordinate is NaN or infinite.
    NonFinite,
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentError::DegenerateSegment => {
                write!(f, "segment is degenerate (start equals end)")
            }
            SegmentError::NonFinite => write!(f, "coordinates must be finite"),
        }
    }
}

impl std::error::Error for SegmentError {}
