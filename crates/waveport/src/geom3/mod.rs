//! 3D point-on-segment classification.
//!
//! Purpose
//! - Decide whether a query point lies on a directed segment `a → b` and at
//!   which normalized position (0 at `a`, 1 at `b`).
//! - Scan an ordered candidate list and report the first hit.
//!
//! Numerics
//! - Collinearity uses the cross product `(p−a) × (b−a)`; bounds use the dot
//!   form `0 ≤ (p−a)·(b−a) ≤ |b−a|²` (no square root).
//! - `SegCfg::strict()` compares against exact zero. CAD coordinates carry
//!   float noise, so callers feeding tool output usually want
//!   `SegCfg::with_tolerance`.
//!
//! Code cross-refs: `Segment`, `SegCfg`, `Fan`, `crate::port::classify_port`

mod segment;
mod types;

pub use segment::{
    classify_against_candidates, distance, is_on_segment, is_on_segment_eps, ratio, ratio_eps,
};
pub use types::{Fan, SegCfg, Segment, SegmentError, SegmentMatch};
