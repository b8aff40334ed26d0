// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use crate::{earth_distance, Edge, Graph, Node};

use super::{model, FeatureReader, Options};

/// Helper object used for storing state related to converting
/// [OSM features](model::Feature) into a [Graph].
pub(super) struct GraphBuilder<'a> {
    g: &'a mut Graph,
    options: &'a Options<'a>,
    unused_nodes: HashSet<i64>,
    ignore_bbox: bool,
}

impl<'a> GraphBuilder<'a> {
    /// Create a new, empty graph builder.
    pub(super) fn new(g: &'a mut Graph, options: &'a Options<'a>) -> Self {
        let ignore_bbox =
            options.bbox.iter().all(|&x| x == 0.0) || options.bbox.iter().any(|x| !x.is_finite());
        if !ignore_bbox {
            log::debug!("filtering features by bbox {:?}", options.bbox);
        }

        Self {
            g,
            options,
            unused_nodes: HashSet::default(),
            ignore_bbox,
        }
    }

    /// Add all features from the provided [FeatureReader].
    pub(super) fn add_features<F: FeatureReader>(
        &mut self,
        mut features: F,
    ) -> Result<(), F::Error> {
        while let Some(f) = features.next()? {
            self.add_feature(f);
        }
        self.cleanup();
        Ok(())
    }

    /// Drops nodes not referenced by any routable way.
    fn cleanup(&mut self) {
        log::debug!(
            "removing {} nodes unused by routable ways",
            self.unused_nodes.len(),
        );
        self.unused_nodes
            .iter()
            .for_each(|&id| self.g.delete_node(id));
    }

    fn add_feature(&mut self, f: model::Feature) {
        match f {
            model::Feature::Node(n) => self.add_node(n),
            model::Feature::Way(w) => self.add_way(w),
        }
    }

    fn add_node(&mut self, n: Node) {
        if n.id != 0 && self.is_in_bbox(n.lat, n.lon) {
            self.g.set_node(n);
            self.unused_nodes.insert(n.id);
        }
    }

    fn is_in_bbox(&self, lat: f64, lon: f64) -> bool {
        if self.ignore_bbox {
            return true;
        }
        let [min_lon, min_lat, max_lon, max_lat] = self.options.bbox;
        lat >= min_lat && lat <= max_lat && lon >= min_lon && lon <= max_lon
    }

    fn add_way(&mut self, w: model::Way) {
        if !self.options.profile.is_routable(&w.tags) {
            log::debug!("way {} is not routable under the active profile", w.id);
            return;
        }

        let nodes = self.get_way_nodes(&w);
        if nodes.is_empty() {
            return;
        }

        let (forward, backward) = self.options.profile.way_direction(&w.tags);
        let maxspeed: Vec<String> = w.tags.get("maxspeed").cloned().into_iter().collect();

        self.create_edges(&nodes, &maxspeed, forward, backward);
        nodes.iter().for_each(|node_id| {
            self.unused_nodes.remove(node_id);
        });
    }

    fn get_way_nodes(&self, w: &model::Way) -> Vec<i64> {
        // Remove references to unknown nodes
        let nodes: Vec<i64> = w
            .nodes
            .iter()
            .cloned()
            .filter(|&node_id| self.g.get_node(node_id).is_some())
            .collect();

        if nodes.len() < 2 {
            log::warn!("way {} has fewer than 2 known nodes - skipping", w.id);
            vec![]
        } else {
            nodes
        }
    }

    fn create_edges(&mut self, nodes: &[i64], maxspeed: &[String], forward: bool, backward: bool) {
        debug_assert!(nodes.len() >= 2);
        debug_assert!(forward || backward);

        nodes.windows(2).for_each(|pair| {
            let left = self
                .g
                .get_node(pair[0])
                .expect("get_way_nodes should only return nodes which exist");

            let right = self
                .g
                .get_node(pair[1])
                .expect("get_way_nodes should only return nodes which exist");

            let length = earth_distance(left.lat, left.lon, right.lat, right.lon);

            if forward {
                self.g.add_edge(
                    left.id,
                    Edge {
                        to: right.id,
                        length: Some(length),
                        travel_time: None,
                        maxspeed: maxspeed.to_vec(),
                        geometry: vec![[left.lon, left.lat], [right.lon, right.lat]],
                    },
                );
            }
            if backward {
                self.g.add_edge(
                    right.id,
                    Edge {
                        to: left.id,
                        length: Some(length),
                        travel_time: None,
                        maxspeed: maxspeed.to_vec(),
                        geometry: vec![[right.lon, right.lat], [left.lon, left.lat]],
                    },
                );
            }
        });
    }
}
