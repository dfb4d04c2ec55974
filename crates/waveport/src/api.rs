//! Curated internal API for callers (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI and
//!   experiments. Breaking changes are allowed and expected.

// 3D segment classification
pub use crate::geom3::{
    classify_against_candidates, distance, is_on_segment, is_on_segment_eps, ratio, ratio_eps,
    Fan, SegCfg, Segment, SegmentError, SegmentMatch,
};
// Port labeling
pub use crate::port::{classify_port, PortClassification, PortError, PortPoints, Query, Vertex};
// Automation seam
pub use crate::session::{
    pack_port_points, CadSession, MemorySession, SessionError, WavePortRecord,
};
