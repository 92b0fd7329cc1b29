use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use esmt::geom::GeomCfg;
use esmt::mst::{prim, DistanceGraph};
use esmt::rand::{draw_cloud, CloudCfg, ReplayToken};
use esmt::search::{select, SearchCfg, Selection};
use esmt::Vec2;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "esmt")]
#[command(about = "Approximate Euclidean Steiner minimal trees in the plane")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run the full pipeline on a point file and report the tree
    Solve {
        #[arg(long)]
        input: String,
        /// Write the result as JSON
        #[arg(long)]
        out: Option<String>,
        /// Cap on Steiner candidates before the exhaustive sweep is refused
        #[arg(long, default_value_t = 20)]
        max_candidates: usize,
    },
    /// MST weight of the raw points, without Steiner candidates
    Mst {
        #[arg(long)]
        input: String,
    },
    /// Sample a random instance in the input format
    Gen {
        #[arg(long, default_value_t = 16)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve {
            input,
            out,
            max_candidates,
        } => run_solve(&input, out.as_deref(), max_candidates),
        Action::Mst { input } => run_mst(&input),
        Action::Gen { count, seed, out } => run_gen(count, seed, out.as_deref()),
    }
}

fn run_solve(input: &str, out: Option<&str>, max_candidates: usize) -> Result<()> {
    let points = load_points(input)?;
    tracing::info!(input, n = points.len(), "solve");
    let geom = GeomCfg::default();

    let t0 = Instant::now();
    let tri = esmt::delaunay::triangulate(&points, geom)?;
    tracing::info!(
        ms = t0.elapsed().as_millis() as u64,
        triangles = tri.triangles.len(),
        "triangulated"
    );

    let t1 = Instant::now();
    let candidates = esmt::fermat::candidates(&tri.triangles, geom);
    tracing::info!(
        ms = t1.elapsed().as_millis() as u64,
        candidates = candidates.len(),
        "candidates built"
    );

    let t2 = Instant::now();
    let selection = select(&tri.vertices, &candidates, SearchCfg { max_candidates })?;
    tracing::info!(
        ms = t2.elapsed().as_millis() as u64,
        chosen = selection.chosen.iter().filter(|&&c| c).count(),
        "subsets swept"
    );

    print_report(&selection);
    if let Some(out) = out {
        write_report(out, &candidates, &selection)?;
    }
    Ok(())
}

fn run_mst(input: &str) -> Result<()> {
    let points = load_points(input)?;
    let started = Instant::now();
    let mst = prim(&DistanceGraph::complete(&points));
    tracing::info!(
        ms = started.elapsed().as_millis() as u64,
        n = points.len(),
        "mst"
    );
    println!("MST weight: {:.2}", mst.weight);
    Ok(())
}

fn run_gen(count: usize, seed: u64, out: Option<&str>) -> Result<()> {
    let cloud = draw_cloud(
        CloudCfg {
            count,
            ..CloudCfg::default()
        },
        ReplayToken { seed, index: 0 },
    );
    let mut text = String::new();
    for p in &cloud {
        text.push_str(&format!("{:.3} {:.3}\n", p.x, p.y));
    }
    match out {
        Some(path) => write_text(path, &text),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

/// Point file: one `x y` pair per line; `#` starts a comment.
fn parse_points(text: &str) -> Result<Vec<Vec2<f64>>> {
    let mut points = Vec::new();
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let (Some(x), Some(y)) = (parts.next(), parts.next()) else {
            bail!("line {}: expected `x y`, got {raw:?}", lineno + 1);
        };
        if parts.next().is_some() {
            bail!("line {}: trailing tokens after `x y`", lineno + 1);
        }
        let x: f64 = x
            .parse()
            .with_context(|| format!("line {}: bad x coordinate", lineno + 1))?;
        let y: f64 = y
            .parse()
            .with_context(|| format!("line {}: bad y coordinate", lineno + 1))?;
        points.push(Vec2::new(x, y));
    }
    Ok(points)
}

fn load_points(path: &str) -> Result<Vec<Vec2<f64>>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("cannot read {path}"))?;
    parse_points(&text)
}

fn print_report(sel: &Selection) {
    println!("Points in the tree:");
    for (i, p) in sel.points.iter().enumerate() {
        println!("#{:<3} x {:>10.3}  y {:>10.3}", i + 1, p.x, p.y);
    }
    println!("Path          Length");
    for e in &sel.edges {
        println!("#{} <-> #{}    {:.2}", e.a + 1, e.b + 1, e.weight);
    }
    println!("Summary: {:.2}", sel.weight);
}

#[derive(serde::Serialize)]
struct ReportEdge {
    a: usize,
    b: usize,
    weight: f64,
}

#[derive(serde::Serialize)]
struct Report {
    points: Vec<[f64; 2]>,
    candidates: Vec<[f64; 2]>,
    chosen: Vec<bool>,
    edges: Vec<ReportEdge>,
    weight: f64,
}

fn write_report(out: &str, candidates: &[Vec2<f64>], sel: &Selection) -> Result<()> {
    let report = Report {
        points: sel.points.iter().map(|p| [p.x, p.y]).collect(),
        candidates: candidates.iter().map(|p| [p.x, p.y]).collect(),
        chosen: sel.chosen.clone(),
        edges: sel
            .edges
            .iter()
            .map(|e| ReportEdge {
                a: e.a,
                b: e.b,
                weight: e.weight,
            })
            .collect(),
        weight: sel.weight,
    };
    let text = serde_json::to_string_pretty(&report)?;
    write_text(out, &text)
}

fn write_text(path: &str, text: &str) -> Result<()> {
    let out_path = Path::new(path);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out_path, text).with_context(|| format!("cannot write {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_points_with_comments() {
        let pts = parse_points("# header\n0 0\n1.5 2.5 # inline\n\n3 4\n").unwrap();
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[1], Vec2::new(1.5, 2.5));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_points("0\n").is_err());
        assert!(parse_points("a b\n").is_err());
        assert!(parse_points("1 2 3\n").is_err());
    }

    #[test]
    fn loads_points_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 0\n10 0\n5 8.66").unwrap();
        let pts = load_points(file.path().to_str().unwrap()).unwrap();
        assert_eq!(pts.len(), 3);
    }

    #[test]
    fn solve_report_round_trips_through_json() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        ];
        let sel = select(&square, &[], SearchCfg::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");
        write_report(out.to_str().unwrap(), &[], &sel).unwrap();
        let doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(doc["points"].as_array().unwrap().len(), 4);
        assert_eq!(doc["edges"].as_array().unwrap().len(), 3);
        assert!((doc["weight"].as_f64().unwrap() - 3.0).abs() < 1e-9);
    }
}
