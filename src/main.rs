// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use osmnav::{GeoPoint, Navigator};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] osmnav::osm::Error);

#[derive(Debug, thiserror::Error)]
#[error("{path}:{line}: expected \"lat,lon\", got {text:?}")]
struct TraceError {
    path: PathBuf,
    line: usize,
    text: String,
}

#[derive(Parser)]
struct Cli {
    /// The path to the OSM file
    osm_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the shortest route between two places as GeoJSON
    Route {
        /// Start: node id, name, or "lat,lon"
        from: String,

        /// Destination: node id, name, or "lat,lon"
        to: String,
    },

    /// Follow a GPS trace towards a destination, re-routing when off course
    Drive {
        /// Destination: node id, name, or "lat,lon"
        to: String,

        /// File with one "lat,lon" position per line
        trace: PathBuf,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let mut nav = Navigator::default();
    load_graph(&mut nav, &cli.osm_file)?;

    match cli.command {
        Command::Route { from, to } => {
            let from = resolve(&nav, &from)?;
            let to = resolve(&nav, &to)?;

            if nav.directions(&from, &to)?.is_none() {
                log::info!("start and destination are the same - no route needed");
            } else if let Some(route) = nav.active_route() {
                print_route(&route.points(nav.graph()?));
            }
        }

        Command::Drive { to, trace } => {
            let to = resolve(&nav, &to)?;
            nav.drive_there(&to)?;

            for position in read_trace(&trace)? {
                for event in nav.update_position(position)? {
                    log::info!("{}: {:?}", position, event);
                }
                if !nav.tracker().is_tracking() {
                    break;
                }
            }

            if let Some(route) = nav.active_route() {
                print_route(&route.points(nav.graph()?));
            }
        }
    }

    Ok(())
}

fn load_graph<P: AsRef<Path>>(nav: &mut Navigator, path: P) -> Result<(), GraphLoadError> {
    let options = osmnav::osm::Options::default();
    nav.load_file(path.as_ref(), &options)
        .map_err(|e| GraphLoadError(PathBuf::from(path.as_ref()), e))
}

/// Turns "lat,lon" into the id of the closest node; other keys are returned as-is.
fn resolve(nav: &Navigator, key: &str) -> Result<String, osmnav::Error> {
    match parse_position(key) {
        Some(position) => {
            let idx = nav.closest_node(position)?;
            Ok(nav.graph()?.node(idx).id.clone())
        }
        None => Ok(key.to_string()),
    }
}

fn parse_position(s: &str) -> Option<GeoPoint> {
    let (lat, lon) = s.split_once(',')?;
    Some(GeoPoint::new(
        lat.trim().parse().ok()?,
        lon.trim().parse().ok()?,
    ))
}

fn read_trace(path: &Path) -> Result<Vec<GeoPoint>, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    let mut positions = Vec::default();

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let position = parse_position(line).ok_or_else(|| TraceError {
            path: path.to_path_buf(),
            line: i + 1,
            text: line.to_string(),
        })?;
        positions.push(position);
    }

    Ok(positions)
}

fn print_route(points: &[GeoPoint]) {
    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{}},");

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut points = points.iter().peekable();
    while let Some(p) = points.next() {
        let suffix = if points.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", p.lon, p.lat, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");
}
