use nalgebra::Vector3;

use super::types::{SegCfg, Segment, SegmentError, SegmentMatch};

/// Euclidean distance between two points.
#[inline]
pub fn distance(p1: Vector3<f64>, p2: Vector3<f64>) -> f64 {
    (p1 - p2).norm()
}

/// Strict membership of `p` in the closed segment `[a, b]`.
///
/// Pre: none; for `a == b` this is true iff `p == a` (the dot test alone would
/// accept every `p`).
/// Post: true iff `(p−a) × (b−a) == 0` and `0 ≤ (p−a)·(b−a) ≤ |b−a|²`.
#[inline]
pub fn is_on_segment(p: Vector3<f64>, a: Vector3<f64>, b: Vector3<f64>) -> bool {
    is_on_segment_eps(p, a, b, SegCfg::strict())
}

/// Membership of `p` in `[a, b]` with the slack given by `cfg`.
pub fn is_on_segment_eps(p: Vector3<f64>, a: Vector3<f64>, b: Vector3<f64>, cfg: SegCfg) -> bool {
    let ap = p - a;
    if a == b {
        return ap.amax() <= cfg.eps_cross;
    }
    let ab = b - a;
    // max |component|; zero iff the cross product vanishes
    if ap.cross(&ab).amax() > cfg.eps_cross {
        return false;
    }
    let dot = ap.dot(&ab);
    -cfg.eps_dot <= dot && dot <= ab.dot(&ab) + cfg.eps_dot
}

/// Strict normalized position of `p` along `a → b`.
#[inline]
pub fn ratio(
    p: Vector3<f64>,
    a: Vector3<f64>,
    b: Vector3<f64>,
) -> Result<Option<f64>, SegmentError> {
    ratio_eps(p, a, b, SegCfg::strict())
}

/// Normalized position `|a−p| / |a−b|` of `p`, if `p` lies on `[a, b]`.
///
/// `Ok(None)` means "not on segment" and is distinct from `Ok(Some(0.0))`.
/// Errors on non-finite input and on `a == b`, whatever `p` is.
/// The value is clamped into `[0, 1]`, which only matters under a tolerance.
pub fn ratio_eps(
    p: Vector3<f64>,
    a: Vector3<f64>,
    b: Vector3<f64>,
    cfg: SegCfg,
) -> Result<Option<f64>, SegmentError> {
    let seg = Segment::new(a, b);
    if !(seg.is_finite() && p.iter().all(|c| c.is_finite())) {
        return Err(SegmentError::NonFinite);
    }
    if seg.is_degenerate() {
        return Err(SegmentError::DegenerateSegment);
    }
    if !is_on_segment_eps(p, a, b, cfg) {
        return Ok(None);
    }
    let r = distance(a, p) / seg.length();
    Ok(Some(r.clamp(0.0, 1.0)))
}

/// Ordered scan: the first candidate containing `query` wins.
///
/// Candidates after the first hit are never inspected, so a degenerate
/// segment there does not raise an error.
pub fn classify_against_candidates(
    query: Vector3<f64>,
    candidates: &[Segment],
    cfg: SegCfg,
) -> Result<Option<SegmentMatch>, SegmentError> {
    for (index, seg) in candidates.iter().enumerate() {
        if let Some(ratio) = ratio_eps(query, seg.a, seg.b, cfg)? {
            return Ok(Some(SegmentMatch { index, ratio }));
        }
    }
    Ok(None)
}
