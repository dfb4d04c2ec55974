//! Seam over the CAD automation tool.
//!
//! The real tool is driven through a proprietary automation interface; this
//! crate only sees the narrow `CadSession` capability. `MemorySession` backs
//! it with a face table so packing and labeling run without the tool.
//!
//! Lifecycle: `open_project` → `activate_design` → queries → `close`.
//! Queries before a design is active fail with `NoDesign`; anything after
//! `close` fails with `Closed`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use nalgebra::Vector3;

/// One wave-port assignment as recovered from a generated automation script.
#[derive(Clone, Debug, PartialEq)]
pub struct WavePortRecord {
    pub name: String,
    pub face_id: u32,
    pub start: Vector3<f64>,
    pub end: Vector3<f64>,
}

/// Capability object for the automation tool.
pub trait CadSession {
    fn open_project(&mut self, path: &str) -> Result<(), SessionError>;
    fn activate_design(&mut self, name: &str) -> Result<(), SessionError>;
    /// Names of the excitations defined in the active design.
    fn excitations(&self) -> Result<Vec<String>, SessionError>;
    /// Vertex positions of a face, in the tool's vertex order.
    fn face_vertices(&self, face_id: u32) -> Result<Vec<Vector3<f64>>, SessionError>;
    fn close(&mut self) -> Result<(), SessionError>;
}

/// Face vertices followed by start and end, keyed by port name.
///
/// A later record with the same name replaces an earlier one.
pub fn pack_port_points<S: CadSession + ?Sized>(
    session: &S,
    records: &[WavePortRecord],
) -> Result<BTreeMap<String, Vec<Vector3<f64>>>, SessionError> {
    let mut out = BTreeMap::new();
    for rec in records {
        let mut pts = session.face_vertices(rec.face_id)?;
        pts.push(rec.start);
        pts.push(rec.end);
        out.insert(rec.name.clone(), pts);
    }
    Ok(out)
}

/// In-memory session over a single design.
#[derive(Clone, Debug, Default)]
pub struct MemorySession {
    design: String,
    excitations: Vec<String>,
    faces: HashMap<u32, Vec<Vector3<f64>>>,
    project: Option<String>,
    active: bool,
    closed: bool,
}

impl MemorySession {
    pub fn new(design: impl Into<String>) -> Self {
        Self {
            design: design.into(),
            ..Self::default()
        }
    }

    pub fn with_face(mut self, face_id: u32, vertices: Vec<Vector3<f64>>) -> Self {
        self.faces.insert(face_id, vertices);
        self
    }

    pub fn with_excitation(mut self, name: impl Into<String>) -> Self {
        self.excitations.push(name.into());
        self
    }

    #[inline]
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::Closed);
        }
        Ok(())
    }

    fn ensure_design(&self) -> Result<(), SessionError> {
        self.ensure_open()?;
        if self.project.is_none() {
            return Err(SessionError::NoProject);
        }
        if !self.active {
            return Err(SessionError::NoDesign);
        }
        Ok(())
    }
}

impl CadSession for MemorySession {
    fn open_project(&mut self, path: &str) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.project = Some(path.to_string());
        self.active = false;
        Ok(())
    }

    fn activate_design(&mut self, name: &str) -> Result<(), SessionError> {
        self.ensure_open()?;
        if self.project.is_none() {
            return Err(SessionError::NoProject);
        }
        if name != self.design {
            return Err(SessionError::UnknownDesign {
                name: name.to_string(),
            });
        }
        self.active = true;
        Ok(())
    }

    fn excitations(&self) -> Result<Vec<String>, SessionError> {
        self.ensure_design()?;
        Ok(self.excitations.clone())
    }

    fn face_vertices(&self, face_id: u32) -> Result<Vec<Vector3<f64>>, SessionError> {
        self.ensure_design()?;
        self.faces
            .get(&face_id)
            .cloned()
            .ok_or(SessionError::UnknownFace { face_id })
    }

    fn close(&mut self) -> Result<(), SessionError> {
        self.project = None;
        self.active = false;
        self.closed = true;
        Ok(())
    }
}

/// Errors surfaced by a session.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionError {
    NoProject,
    NoDesign,
    UnknownDesign { name: String },
    UnknownFace { face_id: u32 },
    Closed,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoProject => write!(f, "no project is open"),
            Self::NoDesign => write!(f, "no design is active"),
            Self::UnknownDesign { name } => write!(f, "design '{name}' not found"),
            Self::UnknownFace { face_id } => write!(f, "face {face_id} not found"),
            Self::Closed => write!(f, "session is closed"),
        }
    }
}

impl std::error::Error for SessionError {}
