// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Building a routing [Graph](crate::Graph) from local
//! [OpenStreetMap](https://www.openstreetmap.org/) files.
//!
//! Ways are interpreted through a routing [Profile] (which way classes are
//! routable, access tags, one-way rules); every consecutive node pair of a
//! routable way becomes a pair of attributed edges (or a single edge for
//! one-way streets) carrying the haversine length, the raw `maxspeed` value
//! and a two-point curve geometry. Costs are not decided here - they are
//! derived later by a [RoadGraph](crate::RoadGraph) view.

mod profile;
mod reader;

pub use profile::{Profile, RoadClass, BICYCLE_PROFILE, CAR_PROFILE, FOOT_PROFILE};
pub use reader::{
    add_features_from_buffer, add_features_from_file, add_features_from_io, Error, FileFormat,
    Options,
};

#[cfg(test)]
mod tests {
    use super::super::{earth_distance, Graph};
    use super::*;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr, $eps:expr) => {
            assert!(
                (($a - $b).abs() < $eps),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    macro_rules! assert_edge {
        ($graph:expr, $from:expr, $to:expr) => {
            assert!(
                $graph.edges_between($from, $to).next().is_some(),
                "expected an edge {} -> {}",
                $from,
                $to
            );
        };
    }

    macro_rules! assert_no_edge {
        ($graph:expr, $from:expr, $to:expr) => {
            assert!(
                $graph.edges_between($from, $to).next().is_none(),
                "expected no edge {} -> {}",
                $from,
                $to
            );
        };
    }

    const DATA: &[u8] = include_bytes!("reader/test_fixtures/simple.osm");

    fn build(profile: &Profile, bbox: [f64; 4]) -> Graph {
        let mut g = Graph::default();
        let options = Options {
            profile,
            file_format: FileFormat::Xml,
            bbox,
        };
        add_features_from_buffer(&mut g, &options, DATA).unwrap();
        g
    }

    #[test]
    fn build_graph_for_cars() {
        //        -9
        //         │
        //       ┌-63┐        -8
        //     -60   -62      │ (motorway)
        //       └-61┘        -7
        //         ┆         / │
        //  (no    ┆       -4  │
        //  motor  ┆         \ │
        //  vehicle)┆          │
        //        -2──────────-3──-5   (-50: footway only)
        //         │
        //        -1
        let g = build(&CAR_PROFILE, [0.0; 4]);

        // 14 nodes in the file; -99 is referenced by no way,
        // -50 only by a way cars can't use.
        assert_eq!(g.len(), 12);
        assert_eq!(g.get_node(-99), None);
        assert_eq!(g.get_node(-50), None);

        // Plain two-way street with a declared speed.
        assert_edge!(g, -1, -2);
        assert_edge!(g, -2, -1);
        let edge = g.edges_between(-1, -2).next().unwrap();
        assert_eq!(edge.maxspeed, vec!["50".to_string()]);
        assert_eq!(edge.travel_time, None);

        // Lengths are the haversine distance between the endpoints,
        // identical in both directions.
        let expected = earth_distance(52.2290, 21.0110, 52.2300, 21.0110);
        assert_almost_eq!(edge.length.unwrap(), expected, 1e-9);
        let reverse = g.edges_between(-2, -1).next().unwrap();
        assert_eq!(reverse.length, edge.length);

        // Two-point geometry in (lon, lat) order.
        assert_eq!(edge.geometry, vec![[21.0110, 52.2290], [21.0110, 52.2300]]);
        assert_eq!(reverse.geometry, vec![[21.0110, 52.2300], [21.0110, 52.2290]]);

        // Raw maxspeed values are stored untouched, parseable or not.
        let mph = g.edges_between(-3, -7).next().unwrap();
        assert_eq!(mph.maxspeed, vec!["30 mph".to_string()]);
        let list = g.edges_between(-3, -5).next().unwrap();
        assert_eq!(list.maxspeed, vec!["40;60".to_string()]);
        let zone = g.edges_between(-63, -9).next().unwrap();
        assert_eq!(zone.maxspeed, vec!["DE:zone30".to_string()]);

        // Ways without a maxspeed produce edges without one.
        assert_eq!(g.edges_between(-2, -3).next().unwrap().maxspeed.len(), 0);

        // Parallel ways produce parallel edges.
        assert_eq!(g.edges_between(-2, -3).count(), 2);

        // Oneway handling: -7 -> -4 (oneway=yes), -3 -> -4 (oneway=-1).
        assert_edge!(g, -7, -4);
        assert_no_edge!(g, -4, -7);
        assert_edge!(g, -3, -4);
        assert_no_edge!(g, -4, -3);

        // Motorways default to one-way.
        assert_edge!(g, -7, -8);
        assert_no_edge!(g, -8, -7);

        // Roundabout handling: -61 -> -62 -> -63 -> -60 -> -61.
        assert_edge!(g, -61, -62);
        assert_edge!(g, -62, -63);
        assert_edge!(g, -63, -60);
        assert_edge!(g, -60, -61);
        assert_no_edge!(g, -62, -61);
        assert_no_edge!(g, -63, -62);
        assert_no_edge!(g, -60, -63);
        assert_no_edge!(g, -61, -60);

        // Access tag handling: -2 <-> -61 has motor_vehicle=no.
        assert_no_edge!(g, -2, -61);
        assert_no_edge!(g, -61, -2);
    }

    #[test]
    fn build_graph_on_foot() {
        let g = build(&FOOT_PROFILE, [0.0; 4]);

        // The footway is usable, so -50 stays; the motorway is not,
        // which orphans -8.
        assert_eq!(g.len(), 12);
        assert_eq!(g.get_node(-8), None);
        assert_edge!(g, -5, -50);
        assert_edge!(g, -50, -5);

        // Generic oneway tags don't apply on foot.
        assert_edge!(g, -7, -4);
        assert_edge!(g, -4, -7);
        assert_edge!(g, -61, -60);

        // Access tags still do: motor_vehicle=no does not bind pedestrians.
        assert_edge!(g, -2, -61);
    }

    #[test]
    fn build_graph_with_bbox() {
        // The bbox cuts off node -9 (lat 52.2330); way -109 degenerates
        // to a single known node and is skipped.
        let g = build(&CAR_PROFILE, [21.0, 52.2280, 21.02, 52.2325]);

        assert_eq!(g.get_node(-9), None);
        assert!(g.get_node(-63).is_some());
        assert!(g.get_edges(-63).iter().all(|e| e.to != -9));
    }
}
