// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Describes how to convert OSM data into a [Graph](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile<'a> {
    /// Human readable name of the routing profile,
    /// customary the most specific [access tag](https://wiki.openstreetmap.org/wiki/Key:access).
    ///
    /// This value is not used for actual OSM data interpretation,
    /// except when set to "foot", which adds the following logic:
    /// - `oneway` tags are ignored - only `oneway:foot` tags are considered, except on:
    ///    - `highway=footway`,
    ///    - `highway=path`,
    ///    - `highway=steps`,
    ///    - `highway=platform`
    ///    - `public_transport=platform`,
    ///    - `railway=platform`.
    pub name: &'a str,

    /// Array of tags for which OSM ways can be used for routing.
    ///
    /// A way is matched against all [RoadClass] objects in order; once an
    /// exact key and value match is found, the way is used for routing. The
    /// cost of the resulting edges is not decided here - it is derived later
    /// from each edge's attributes by a [RoadGraph](crate::RoadGraph) view.
    pub routable: &'a [RoadClass<'a>],

    /// Array of OSM [access tags](https://wiki.openstreetmap.org/wiki/Key:access#Land-based_transportation)
    /// (in order from least to most specific) to consider when checking for road prohibitions.
    ///
    /// This array is used mainly to follow the access tags, but also to follow mode-specific
    /// one-way restrictions (see [Profile::is_allowed] and [Profile::way_direction]).
    pub access: &'a [&'a str],

    /// Force no routing over [motorroad=yes](https://wiki.openstreetmap.org/wiki/Key:motorroad) ways.
    pub disallow_motorroad: bool,
}

/// A key-value pair identifying a class of OSM ways usable for routing,
/// e.g. `highway=residential`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadClass<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> Profile<'a> {
    /// Checks if a way with the given tags should become part of the routing
    /// graph: it must match one of the [routable](Profile::routable) classes
    /// and must not be disallowed by the access tags
    /// (as determined by [Profile::is_allowed]).
    pub fn is_routable(&self, tags: &HashMap<String, String>) -> bool {
        self.matches_road_class(tags) && self.is_allowed(tags)
    }

    /// Returns true if any [RoadClass] matches the way tags exactly.
    fn matches_road_class(&self, tags: &HashMap<String, String>) -> bool {
        self.routable
            .iter()
            .any(|c| tags.get(c.key).map(|v| v.as_str()) == Some(c.value))
    }

    /// Checks if the way is routable, by considering motor roads ([Profile::disallow_motorroad])
    /// and access tags ([Profile::access]).
    pub fn is_allowed(&self, tags: &HashMap<String, String>) -> bool {
        // Check against the motorroad tag
        if self.disallow_motorroad && tags.get("motorroad").map(|v| v.as_str()) == Some("yes") {
            return false;
        }

        // Check against the access tags
        match self
            .access
            .iter()
            .rev()
            .find_map(|&mode| tags.get(mode).map(|v| v.as_str()))
        {
            Some("no") | Some("private") => false,
            _ => true,
        }
    }

    /// Checks if a way is traversable forward (first return value) and
    /// backwards (second return value) by investigating mode-specific and generic one-way tags.
    ///
    /// Some ways (highway=motorway, highway=motorway_link, junction=roundabout and
    /// junction=circular) default to being one-way, except if overridden by specific tags.
    pub fn way_direction(&self, tags: &HashMap<String, String>) -> (bool, bool) {
        let mut forward = true;
        let mut backward = true;

        // Default one-way ways (foot profile exception - does not apply)
        if !self.apply_foot_exceptions() {
            match tags.get("highway").map(|s| s.as_str()).unwrap_or("") {
                "motorway" | "motorway_link" => {
                    backward = false;
                }
                _ => {}
            }

            match tags.get("junction").map(|s| s.as_str()).unwrap_or("") {
                "roundabout" | "circular" => {
                    backward = false;
                }
                _ => {}
            }
        }

        // Check the oneway tag
        match self.get_active_oneway_value(tags) {
            "yes" | "true" | "1" => {
                forward = true;
                backward = false;
            }

            "-1" | "reverse" => {
                forward = false;
                backward = true;
            }

            "no" => {
                forward = true;
                backward = true;
            }

            _ => {}
        }

        return (forward, backward);
    }

    /// Returns the value of the most specific "oneway:MODE" tag (based on [Profile::access]),
    /// falling back to simply "oneway", and returning an empty string if no relevant tag was found.
    fn get_active_oneway_value<'t>(&self, tags: &'t HashMap<String, String>) -> &'t str {
        if self.apply_foot_exceptions() {
            // foot profile exception - only consider "oneway:foot" and "oneway" in select cases
            if let Some(oneway_foot) = tags.get("oneway:foot") {
                return oneway_foot.as_str();
            }

            if Self::allow_generic_oneway_to_apply_on_foot(tags) {
                if let Some(oneway) = tags.get("oneway") {
                    return oneway.as_str();
                }
            }

            return "";
        } else {
            self.access
                .iter()
                .rev()
                .filter(|&&mode| mode != "access")
                .find_map(|&mode| tags.get(&format!("oneway:{}", mode)))
                .or_else(|| tags.get("oneway"))
                .map(|oneway_tag| oneway_tag.as_str())
                .unwrap_or("")
        }
    }

    fn allow_generic_oneway_to_apply_on_foot(tags: &HashMap<String, String>) -> bool {
        // By default, on foot, only "oneway:foot" is considered. However, on the following
        // ways the generic "oneway" tag also applies.

        // highway=footway, highway=path, highway=steps, highway=platform
        match tags.get("highway").map(|v| v.as_str()) {
            Some("footway") | Some("path") | Some("steps") | Some("platform") => return true,
            _ => {}
        }

        // public_transport=platform
        if tags.get("public_transport").map(|v| v.as_str()) == Some("platform") {
            return true;
        }

        // railway=platform
        if tags.get("railway").map(|v| v.as_str()) == Some("platform") {
            return true;
        }

        // Default to false
        return false;
    }

    fn apply_foot_exceptions(&self) -> bool {
        self.name == "foot"
    }
}

/// Routing [Profile] for cars, with appropriate
/// [access tags](https://wiki.openstreetmap.org/wiki/Key:access).
pub const CAR_PROFILE: Profile = Profile {
    name: "motorcar",
    routable: &[
        RoadClass {
            key: "highway",
            value: "motorway",
        },
        RoadClass {
            key: "highway",
            value: "motorway_link",
        },
        RoadClass {
            key: "highway",
            value: "trunk",
        },
        RoadClass {
            key: "highway",
            value: "trunk_link",
        },
        RoadClass {
            key: "highway",
            value: "primary",
        },
        RoadClass {
            key: "highway",
            value: "primary_link",
        },
        RoadClass {
            key: "highway",
            value: "secondary",
        },
        RoadClass {
            key: "highway",
            value: "secondary_link",
        },
        RoadClass {
            key: "highway",
            value: "tertiary",
        },
        RoadClass {
            key: "highway",
            value: "tertiary_link",
        },
        RoadClass {
            key: "highway",
            value: "unclassified",
        },
        RoadClass {
            key: "highway",
            value: "minor",
        },
        RoadClass {
            key: "highway",
            value: "residential",
        },
        RoadClass {
            key: "highway",
            value: "living_street",
        },
        RoadClass {
            key: "highway",
            value: "track",
        },
        RoadClass {
            key: "highway",
            value: "service",
        },
    ],
    access: &["access", "vehicle", "motor_vehicle", "motorcar"],
    disallow_motorroad: false,
};

/// Routing [Profile] for bicycles, with appropriate
/// [access tags](https://wiki.openstreetmap.org/wiki/Key:access).
pub const BICYCLE_PROFILE: Profile = Profile {
    name: "bicycle",
    routable: &[
        RoadClass {
            key: "highway",
            value: "trunk",
        },
        RoadClass {
            key: "highway",
            value: "trunk_link",
        },
        RoadClass {
            key: "highway",
            value: "primary",
        },
        RoadClass {
            key: "highway",
            value: "primary_link",
        },
        RoadClass {
            key: "highway",
            value: "secondary",
        },
        RoadClass {
            key: "highway",
            value: "secondary_link",
        },
        RoadClass {
            key: "highway",
            value: "tertiary",
        },
        RoadClass {
            key: "highway",
            value: "tertiary_link",
        },
        RoadClass {
            key: "highway",
            value: "unclassified",
        },
        RoadClass {
            key: "highway",
            value: "minor",
        },
        RoadClass {
            key: "highway",
            value: "cycleway",
        },
        RoadClass {
            key: "highway",
            value: "residential",
        },
        RoadClass {
            key: "highway",
            value: "living_street",
        },
        RoadClass {
            key: "highway",
            value: "track",
        },
        RoadClass {
            key: "highway",
            value: "service",
        },
        RoadClass {
            key: "highway",
            value: "bridleway",
        },
        RoadClass {
            key: "highway",
            value: "footway",
        },
        RoadClass {
            key: "highway",
            value: "steps",
        },
        RoadClass {
            key: "highway",
            value: "path",
        },
    ],
    access: &["access", "vehicle", "bicycle"],
    disallow_motorroad: true,
};

/// Routing [Profile] for walking, with appropriate
/// [access tags](https://wiki.openstreetmap.org/wiki/Key:access).
pub const FOOT_PROFILE: Profile = Profile {
    name: "foot",
    routable: &[
        RoadClass {
            key: "highway",
            value: "trunk",
        },
        RoadClass {
            key: "highway",
            value: "trunk_link",
        },
        RoadClass {
            key: "highway",
            value: "primary",
        },
        RoadClass {
            key: "highway",
            value: "primary_link",
        },
        RoadClass {
            key: "highway",
            value: "secondary",
        },
        RoadClass {
            key: "highway",
            value: "secondary_link",
        },
        RoadClass {
            key: "highway",
            value: "tertiary",
        },
        RoadClass {
            key: "highway",
            value: "tertiary_link",
        },
        RoadClass {
            key: "highway",
            value: "unclassified",
        },
        RoadClass {
            key: "highway",
            value: "minor",
        },
        RoadClass {
            key: "highway",
            value: "residential",
        },
        RoadClass {
            key: "highway",
            value: "living_street",
        },
        RoadClass {
            key: "highway",
            value: "track",
        },
        RoadClass {
            key: "highway",
            value: "service",
        },
        RoadClass {
            key: "highway",
            value: "bridleway",
        },
        RoadClass {
            key: "highway",
            value: "footway",
        },
        RoadClass {
            key: "highway",
            value: "path",
        },
        RoadClass {
            key: "highway",
            value: "steps",
        },
        RoadClass {
            key: "highway",
            value: "pedestrian",
        },
        RoadClass {
            key: "highway",
            value: "platform",
        },
        RoadClass {
            key: "railway",
            value: "platform",
        },
        RoadClass {
            key: "public_transport",
            value: "platform",
        },
    ],
    access: &["access", "foot"],
    disallow_motorroad: true,
};
