//! Wave-port geometry: point-on-segment classification and port labeling.
//!
//! Layout
//! - `geom3`: strict/tolerant point-on-segment predicate, ratio, ordered scan.
//! - `port`: labels which script point of a wave port lies on which face edge.
//! - `session`: narrow seam over the CAD automation tool plus an in-memory
//!   implementation, and packing of per-port point lists.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - Everything here is pure and synchronous; no I/O, no logging.

pub mod api;
pub mod geom3;
pub mod port;
pub mod session;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom3::{SegCfg, Segment, SegmentError};
pub use nalgebra::Vector3 as Vec3;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom3::{
        classify_against_candidates, distance, is_on_segment, is_on_segment_eps, ratio,
        ratio_eps, Fan, SegCfg, Segment, SegmentError, SegmentMatch,
    };
    pub use crate::port::{classify_port, PortClassification, PortPoints, Query, Vertex};
    pub use crate::session::{pack_port_points, CadSession, MemorySession, WavePortRecord};
    pub use nalgebra::Vector3 as Vec3;
}
