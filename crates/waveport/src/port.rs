//! Wave-port labeling: which script point lies on which face edge.
//!
//! A port contributes six points in a fixed order: four face vertices
//! `a, b, c, d` (from the automation session) followed by the script's start
//! point `e` and end point `f`. The candidate edges are `a→b`, `a→c`, `a→d`.
//! `e` is tried first; `f` only when `e` lies on none of them.
//!
//! Code cross-refs: `crate::geom3::Fan`, `crate::session::pack_port_points`

use std::fmt;

use nalgebra::Vector3;

use crate::geom3::{Fan, SegCfg, SegmentError};

/// Points per port: four face vertices plus start and end.
pub const PORT_POINTS: usize = 6;

/// Face vertex that can close an edge from `a`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vertex {
    B,
    C,
    D,
}

impl Vertex {
    pub const ALL: [Vertex; 3] = [Vertex::B, Vertex::C, Vertex::D];

    #[inline]
    pub fn label(self) -> char {
        match self {
            Vertex::B => 'b',
            Vertex::C => 'c',
            Vertex::D => 'd',
        }
    }

    /// The two other vertices, in `b, c, d` order.
    pub fn others(self) -> (Vertex, Vertex) {
        match self {
            Vertex::B => (Vertex::C, Vertex::D),
            Vertex::C => (Vertex::B, Vertex::D),
            Vertex::D => (Vertex::B, Vertex::C),
        }
    }
}

/// Script reference point under test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Query {
    E,
    F,
}

impl Query {
    #[inline]
    pub fn label(self) -> char {
        match self {
            Query::E => 'e',
            Query::F => 'f',
        }
    }

    #[inline]
    pub fn other(self) -> Query {
        match self {
            Query::E => Query::F,
            Query::F => Query::E,
        }
    }
}

/// The six labeled points of one port.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortPoints {
    pub a: Vector3<f64>,
    pub b: Vector3<f64>,
    pub c: Vector3<f64>,
    pub d: Vector3<f64>,
    pub e: Vector3<f64>,
    pub f: Vector3<f64>,
}

impl PortPoints {
    pub fn from_slice(points: &[Vector3<f64>]) -> Result<Self, PortError> {
        match points {
            &[a, b, c, d, e, f] => Ok(Self { a, b, c, d, e, f }),
            _ => Err(PortError::PointCount {
                expected: PORT_POINTS,
                got: points.len(),
            }),
        }
    }

    #[inline]
    pub fn vertex(&self, v: Vertex) -> Vector3<f64> {
        match v {
            Vertex::B => self.b,
            Vertex::C => self.c,
            Vertex::D => self.d,
        }
    }

    #[inline]
    pub fn query(&self, q: Query) -> Vector3<f64> {
        match q {
            Query::E => self.e,
            Query::F => self.f,
        }
    }

    /// Edges `a→b`, `a→c`, `a→d` as a fan.
    pub fn fan(&self) -> Fan {
        Fan::new(self.a, Vertex::ALL.iter().map(|&v| self.vertex(v)).collect())
    }
}

/// Outcome for one port: `query` lies on edge `a→edge` at `ratio`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortClassification {
    pub query: Query,
    pub edge: Vertex,
    pub ratio: f64,
    pub points: PortPoints,
}

impl PortClassification {
    #[inline]
    pub fn query_point(&self) -> Vector3<f64> {
        self.points.query(self.query)
    }

    #[inline]
    pub fn other_query_point(&self) -> Vector3<f64> {
        self.points.query(self.query.other())
    }

    /// Matched edge as `[a, vertex]`.
    #[inline]
    pub fn edge_points(&self) -> [Vector3<f64>; 2] {
        [self.points.a, self.points.vertex(self.edge)]
    }

    /// Edge between the two vertices not on the matched edge.
    pub fn opposite_points(&self) -> [Vector3<f64>; 2] {
        let (u, v) = self.edge.others();
        [self.points.vertex(u), self.points.vertex(v)]
    }

    /// `"ab"`, `"ac"` or `"ad"`.
    pub fn edge_key(&self) -> String {
        ['a', self.edge.label()].iter().collect()
    }

    /// `"cd"`, `"bd"` or `"bc"`.
    pub fn opposite_key(&self) -> String {
        let (u, v) = self.edge.others();
        [u.label(), v.label()].iter().collect()
    }
}

/// Label the port: first `e`, then `f`, against `a→b`, `a→c`, `a→d`.
pub fn classify_port(
    points: &PortPoints,
    cfg: SegCfg,
) -> Result<Option<PortClassification>, PortError> {
    let fan = points.fan();
    for query in [Query::E, Query::F] {
        if let Some(hit) = fan.classify(points.query(query), cfg)? {
            // one fan tip per vertex, in `Vertex::ALL` order
            return Ok(Some(PortClassification {
                query,
                edge: Vertex::ALL[hit.index],
                ratio: hit.ratio,
                points: *points,
            }));
        }
    }
    Ok(None)
}

/// Errors surfaced while labeling a port.
#[derive(Clone, Debug, PartialEq)]
pub enum PortError {
    /// The port does not carry exactly six points.
    PointCount { expected: usize, got: usize },
    Segment(SegmentError),
}

impl From<SegmentError> for PortError {
    fn from(e: SegmentError) -> Self {
        PortError::Segment(e)
    }
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortError::PointCount { expected, got } => {
                write!(f, "port needs {expected} points, got {got}")
            }
            PortError::Segment(e) => write!(f, "segment classification failed: {e}"),
        }
    }
}

impl std::error::Error for PortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PortError::Segment(e) => Some(e),
            PortError::PointCount { .. } => None,
        }
    }
}
