// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use viaroute::Weighting;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] viaroute::osm::Error);

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum WeightingArg {
    /// Fastest route (optimize travel time)
    TravelTime,

    /// Shortest route (optimize distance)
    Length,
}

impl From<WeightingArg> for Weighting {
    fn from(arg: WeightingArg) -> Self {
        match arg {
            WeightingArg::TravelTime => Weighting::TravelTime,
            WeightingArg::Length => Weighting::Length,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ProfileArg {
    Car,
    Foot,
    Bicycle,
}

impl ProfileArg {
    fn as_profile(self) -> &'static viaroute::osm::Profile<'static> {
        match self {
            Self::Car => &viaroute::osm::CAR_PROFILE,
            Self::Foot => &viaroute::osm::FOOT_PROFILE,
            Self::Bicycle => &viaroute::osm::BICYCLE_PROFILE,
        }
    }
}

#[derive(Parser)]
struct Cli {
    /// The path to the OSM file (.osm, .osm.gz or .osm.bz2)
    osm_file: PathBuf,

    /// Latitude of the start point
    start_lat: f64,

    /// Longitude of the start point
    start_lon: f64,

    /// Latitude of the end point
    end_lat: f64,

    /// Longitude of the end point
    end_lon: f64,

    /// Cost metric to optimize
    #[arg(long, value_enum, default_value = "travel-time")]
    weighting: WeightingArg,

    /// Routing profile to interpret the OSM data with
    #[arg(long, value_enum, default_value = "car")]
    profile: ProfileArg,

    /// Subdivide edges longer than this many metres, so that the start and
    /// end points snap to realistic waypoints along long streets
    #[arg(long, value_name = "METRES")]
    densify: Option<f64>,

    /// Follow curved street geometries in the printed route
    #[arg(long)]
    follow_geometry: bool,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let mut g = load_graph(&cli.osm_file, cli.profile)?;
    log::info!("loaded {} nodes from {}", g.len(), cli.osm_file.display());

    if let Some(threshold) = cli.densify {
        g = viaroute::densify(&g, threshold)?;
        log::info!("densified graph has {} nodes", g.len());
    }

    let tree = viaroute::KDTree::from_iter(g.iter().copied())
        .expect("no nodes to route over - check the OSM file and profile");
    let start = tree.find_nearest_node(cli.start_lat, cli.start_lon);
    let end = tree.find_nearest_node(cli.end_lat, cli.end_lon);

    let view = viaroute::RoadGraph::new(&g, cli.weighting.into());
    let route = viaroute::find_route(&view, start.id, end.id, viaroute::DEFAULT_STEP_LIMIT)?;
    if !route.is_found() {
        log::error!("no route between the selected points");
        std::process::exit(1);
    }

    let metrics = viaroute::path_metrics(&g, &route.nodes);
    log::info!(
        "distance: {}; travel time: {}; {} nodes over {} edges",
        viaroute::format_distance(metrics.distance_m),
        viaroute::format_time(metrics.travel_time_s),
        route.nodes.len(),
        metrics.edge_count,
    );

    let coordinates = viaroute::path_coordinates(&g, &route.nodes, cli.follow_geometry);

    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{}},");

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut points = coordinates.iter().peekable();
    while let Some(&(lat, lon)) = points.next() {
        let suffix = if points.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", lon, lat, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");

    Ok(())
}

fn load_graph<P: AsRef<Path>>(path: P, profile: ProfileArg) -> Result<viaroute::Graph, GraphLoadError> {
    let mut g = viaroute::Graph::default();
    let options = viaroute::osm::Options {
        profile: profile.as_profile(),
        file_format: viaroute::osm::FileFormat::from_path(path.as_ref()),
        bbox: [0.0; 4],
    };
    match viaroute::osm::add_features_from_file(&mut g, &options, path.as_ref()) {
        Ok(()) => Ok(g),
        Err(e) => Err(GraphLoadError(PathBuf::from(path.as_ref()), e)),
    }
}
