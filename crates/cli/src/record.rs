//! JSON shapes read and written by the CLI.
//!
//! - point sets: `{"<port>": [[x, y, z], ...]}`, six points per port
//! - face table: design name, excitation names, face id → vertices
//! - port records: `[{"name", "face_id", "start", "end"}]`
//! - classification: `{"e", "ab", "f", "cd", "k"}`, or `{}` without a match

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use waveport::port::PortClassification;
use waveport::session::{MemorySession, WavePortRecord};
use waveport::Vec3;

pub type Coord = [f64; 3];
pub type PointSets = BTreeMap<String, Vec<Coord>>;

#[inline]
pub fn to_vec3(c: Coord) -> Vec3<f64> {
    Vec3::new(c[0], c[1], c[2])
}

#[inline]
pub fn to_coord(v: Vec3<f64>) -> Coord {
    [v.x, v.y, v.z]
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FaceTable {
    pub design: String,
    #[serde(default)]
    pub excitations: Vec<String>,
    pub faces: BTreeMap<u32, Vec<Coord>>,
}

impl FaceTable {
    pub fn into_session(self) -> MemorySession {
        let mut session = MemorySession::new(self.design);
        for name in self.excitations {
            session = session.with_excitation(name);
        }
        for (id, verts) in self.faces {
            session = session.with_face(id, verts.into_iter().map(to_vec3).collect());
        }
        session
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PortRow {
    pub name: String,
    pub face_id: u32,
    pub start: Coord,
    pub end: Coord,
}

impl From<PortRow> for WavePortRecord {
    fn from(row: PortRow) -> Self {
        WavePortRecord {
            name: row.name,
            face_id: row.face_id,
            start: to_vec3(row.start),
            end: to_vec3(row.end),
        }
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

pub fn point_sets(packed: &BTreeMap<String, Vec<Vec3<f64>>>) -> PointSets {
    packed
        .iter()
        .map(|(k, pts)| (k.clone(), pts.iter().copied().map(to_coord).collect()))
        .collect()
}

/// Persisted form of a classification; an empty object when nothing matched.
pub fn classification_record(hit: Option<&PortClassification>) -> Value {
    let Some(hit) = hit else {
        return Value::Object(Map::new());
    };
    let mut obj = Map::new();
    obj.insert(
        hit.query.label().to_string(),
        json!(to_coord(hit.query_point())),
    );
    obj.insert(hit.edge_key(), json!(hit.edge_points().map(to_coord)));
    obj.insert(
        hit.query.other().label().to_string(),
        json!(to_coord(hit.other_query_point())),
    );
    obj.insert(hit.opposite_key(), json!(hit.opposite_points().map(to_coord)));
    obj.insert("k".to_string(), json!(hit.ratio));
    Value::Object(obj)
}
