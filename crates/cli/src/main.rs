use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use waveport::geom3::SegCfg;
use waveport::port::{classify_port, PortPoints};
use waveport::session::{pack_port_points, CadSession, WavePortRecord};

mod provenance;
mod record;

use provenance::{write_sidecar, Payload};
use record::{classification_record, point_sets, read_json, to_vec3, write_json};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Wave-port point packing and edge classification")]
struct Cmd {
    /// Optional VK ticket UUID; propagated to outputs and logs
    #[arg(long)]
    vk: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Collect face vertices and script start/end points per port
    Pack {
        /// Face table: design, excitations, face id -> vertices
        #[arg(long)]
        faces: PathBuf,
        /// Port records: name, face_id, start, end
        #[arg(long)]
        ports: PathBuf,
        #[arg(long, default_value = "project.aedt")]
        project: String,
        #[arg(long, default_value = "HFSSDesign1")]
        design: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Label which script point lies on which face edge of one port
    Classify {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "1")]
        key: String,
        #[arg(long)]
        out: PathBuf,
        /// Collinearity/bounds tolerance in squared-length units; 0 compares exactly
        #[arg(long, default_value_t = 0.0)]
        eps: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Pack {
            faces,
            ports,
            project,
            design,
            out,
        } => pack(&faces, &ports, &project, &design, &out, cmd.vk),
        Action::Classify {
            input,
            key,
            out,
            eps,
        } => classify(&input, &key, &out, eps, cmd.vk),
        Action::Report => report(cmd.vk),
    }
}

fn pack(
    faces: &Path,
    ports: &Path,
    project: &str,
    design: &str,
    out: &Path,
    vk: Option<String>,
) -> Result<()> {
    tracing::info!(
        faces = %faces.display(),
        ports = %ports.display(),
        project,
        design,
        vk = ?vk,
        "pack"
    );
    let table: record::FaceTable = read_json(faces)?;
    let rows: Vec<record::PortRow> = read_json(ports)?;
    let records: Vec<WavePortRecord> = rows.into_iter().map(Into::into).collect();

    let mut session = table.into_session();
    session.open_project(project)?;
    session.activate_design(design)?;
    let excitations = session.excitations()?;
    for rec in &records {
        if !excitations.contains(&rec.name) {
            tracing::warn!(port = %rec.name, "port_not_listed_as_excitation");
        }
    }
    let packed = pack_port_points(&session, &records);
    session.close()?;
    let packed = packed?;
    tracing::info!(ports = packed.len(), "packed");

    write_json(out, &point_sets(&packed))?;
    let payload = Payload::new(
        "pack",
        serde_json::json!({
            "faces": faces.to_string_lossy(),
            "ports": ports.to_string_lossy(),
            "project": project,
            "design": design,
        }),
    )
    .with_vk(vk);
    write_sidecar(out, payload)?;
    Ok(())
}

fn classify(input: &Path, key: &str, out: &Path, eps: f64, vk: Option<String>) -> Result<()> {
    tracing::info!(input = %input.display(), key, eps, vk = ?vk, "classify");
    if !eps.is_finite() {
        bail!("--eps must be finite, got {eps}");
    }
    let sets: record::PointSets = read_json(input)?;
    let coords = sets
        .get(key)
        .ok_or_else(|| anyhow!("port '{key}' not found in {}", input.display()))?;
    let pts: Vec<_> = coords.iter().copied().map(to_vec3).collect();
    let port = PortPoints::from_slice(&pts).with_context(|| format!("port '{key}'"))?;

    let cfg = SegCfg::with_tolerance(eps);
    let hit = classify_port(&port, cfg).with_context(|| format!("classifying port '{key}'"))?;
    match &hit {
        Some(h) => tracing::info!(
            query = %h.query.label(),
            edge = %h.edge_key(),
            ratio = h.ratio,
            "port_point_on_edge"
        ),
        None => tracing::info!("no_port_point_on_edges"),
    }

    write_json(out, &classification_record(hit.as_ref()))?;
    let payload = Payload::new(
        "classify",
        serde_json::json!({
            "input": input.to_string_lossy(),
            "key": key,
            "eps": eps,
            "strict": cfg.is_strict(),
        }),
    )
    .with_vk(vk);
    write_sidecar(out, payload)?;
    Ok(())
}

fn report(vk: Option<String>) -> Result<()> {
    let payload = Payload::new("report", serde_json::json!({})).with_vk(vk);
    let obj = provenance::document(Path::new("-"), &payload);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PointSets;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::tempdir;

    fn write(path: &Path, v: &Value) {
        fs::write(path, serde_json::to_vec(v).unwrap()).unwrap();
    }

    #[test]
    fn pack_then_classify() {
        let dir = tempdir().unwrap();
        let faces = dir.path().join("faces.json");
        let ports = dir.path().join("ports.json");
        let points = dir.path().join("points.json");
        let out = dir.path().join("output.json");
        write(
            &faces,
            &json!({
                "design": "HFSSDesign1",
                "excitations": ["1"],
                "faces": {"7": [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]]}
            }),
        );
        write(
            &ports,
            &json!([{"name": "1", "face_id": 7, "start": [5.0, 5.0, 5.0], "end": [0.0, 0.0, 1.5]}]),
        );

        pack(&faces, &ports, "Face3.aedt", "HFSSDesign1", &points, None).unwrap();
        let sets: PointSets = read_json(&points).unwrap();
        assert_eq!(sets["1"].len(), 6);
        assert!(dir.path().join("points.provenance.json").exists());

        classify(&points, "1", &out, 0.0, Some("vk-1".into())).unwrap();
        let rec: Value = read_json(&out).unwrap();
        assert_eq!(rec["f"], json!([0.0, 0.0, 1.5]));
        assert_eq!(rec["ad"], json!([[0.0, 0.0, 0.0], [0.0, 0.0, 2.0]]));
        assert_eq!(rec["k"], json!(0.75));
        let prov: Value = read_json(&dir.path().join("output.provenance.json")).unwrap();
        assert_eq!(prov["params"]["strict"], json!(true));
    }

    #[test]
    fn pack_rejects_unknown_design() {
        let dir = tempdir().unwrap();
        let faces = dir.path().join("faces.json");
        let ports = dir.path().join("ports.json");
        write(&faces, &json!({"design": "A", "faces": {}}));
        write(&ports, &json!([]));
        let err = pack(&faces, &ports, "p.aedt", "B", &dir.path().join("o.json"), None);
        assert!(err.is_err());
    }

    #[test]
    fn classify_without_match_writes_empty_object() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("points.json");
        let out = dir.path().join("output.json");
        write(
            &input,
            &json!({"1": [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0],
                          [5.0, 5.0, 5.0], [1.0, 1.0, 0.0]]}),
        );
        classify(&input, "1", &out, 0.0, None).unwrap();
        let rec: Value = read_json(&out).unwrap();
        assert_eq!(rec, json!({}));
    }

    #[test]
    fn classify_errors_on_missing_key_and_short_port() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("points.json");
        let out = dir.path().join("output.json");
        write(&input, &json!({"1": [[0.0, 0.0, 0.0]]}));
        assert!(classify(&input, "2", &out, 0.0, None).is_err());
        assert!(classify(&input, "1", &out, 0.0, None).is_err());
        assert!(classify(&input, "1", &out, f64::NAN, None).is_err());
    }
}
