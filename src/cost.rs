// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Edge, Graph};

/// Fallback maximum speed assumed when no edge in a [Graph] declares
/// a usable speed limit, in km/h.
pub const DEFAULT_MAX_SPEED_KPH: f64 = 130.0;

/// Conversion factor from miles per hour to kilometres per hour.
const MPH_TO_KPH: f64 = 1.60934;

/// Selects which scalar quantity a [RoadGraph](crate::RoadGraph) view derives
/// from edge attributes as the cost driving a shortest-path search.
///
/// The selection is made once per view and never changes for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weighting {
    /// Traversal time in seconds: an explicit [Edge::travel_time] when
    /// present, otherwise length divided by an effective speed.
    #[default]
    TravelTime,

    /// Physical length in metres.
    Length,
}

/// Parses a raw declared speed limit value into km/h.
///
/// Handles the formats found in real map data: a plain number,
/// a semicolon-separated list (the first entry wins), and `km/h`, `kph` or
/// `mph` unit suffixes in any case (`mph` values are converted to km/h).
/// Returns `None` for anything unparseable; callers decide on a fallback.
pub fn parse_declared_speed_kph(raw: &str) -> Option<f64> {
    let first = raw.split(';').next().unwrap_or("").trim();
    let lower = first.to_ascii_lowercase();

    if let Some(idx) = lower.find("mph") {
        let value: f64 = first[..idx].trim().parse().ok()?;
        return Some(value * MPH_TO_KPH);
    }

    let cleaned = lower.replace("km/h", "").replace("kph", "");
    cleaned.trim().parse().ok()
}

/// Returns the declared speed of an edge in km/h, if it declares a usable one.
///
/// Only the first element of [Edge::maxspeed] is consulted, mirroring how
/// duplicate-valued speed attributes behave in the source data. Non-positive
/// values are rejected, as they can't be divided by.
pub fn declared_speed_kph(edge: &Edge) -> Option<f64> {
    edge.maxspeed
        .first()
        .and_then(|raw| parse_declared_speed_kph(raw))
        .filter(|&kph| kph > 0.0)
}

/// Surveys all edges of a graph for the maximum parseable declared speed and
/// returns it in metres per second, defaulting to [DEFAULT_MAX_SPEED_KPH]
/// when no edge declares a usable value.
///
/// The survey must be re-run (by constructing a new view) whenever the edge
/// set changes, e.g. after [densify](crate::densify).
pub fn survey_max_speed(g: &Graph) -> f64 {
    let mut max_kph: f64 = 0.0;
    for node in g.iter() {
        for edge in g.get_edges(node.id) {
            if let Some(kph) = declared_speed_kph(edge) {
                if kph > max_kph {
                    max_kph = kph;
                }
            }
        }
    }

    if max_kph <= 0.0 {
        max_kph = DEFAULT_MAX_SPEED_KPH;
    }
    max_kph / 3.6
}

/// Effective speed over an edge in metres per second: the declared speed
/// when usable, the provided graph-wide fallback otherwise.
pub(crate) fn effective_speed(edge: &Edge, fallback_m_s: f64) -> f64 {
    declared_speed_kph(edge).map_or(fallback_m_s, |kph| kph / 3.6)
}

/// A finite, non-negative length in metres, or `None` when the edge can't be
/// measured. Negative or non-finite lengths must never become search costs.
pub(crate) fn usable_length(edge: &Edge) -> Option<f64> {
    edge.length.filter(|l| l.is_finite() && *l >= 0.0)
}

/// An explicit, usable traversal time in seconds.
pub(crate) fn explicit_travel_time(edge: &Edge) -> Option<f64> {
    edge.travel_time.filter(|t| t.is_finite() && *t >= 0.0)
}

/// Derives the cost of a single edge under the given weighting, probing the
/// available attributes in priority order: explicit travel time, then length
/// over an effective speed (declared, falling back to `fallback_m_s`).
/// Returns `None` when the edge carries no usable cost data; such edges are
/// not traversable.
pub(crate) fn edge_cost(edge: &Edge, weighting: Weighting, fallback_m_s: f64) -> Option<f64> {
    match weighting {
        Weighting::Length => usable_length(edge),
        Weighting::TravelTime => explicit_travel_time(edge).or_else(|| {
            let length = usable_length(edge)?;
            let speed = effective_speed(edge, fallback_m_s);
            if speed > 0.0 {
                Some(length / speed)
            } else {
                None
            }
        }),
    }
}
