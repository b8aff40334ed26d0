// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io;
use std::path::Path;

use graph_builder::GraphBuilder;

use crate::osm::Profile;
use crate::Graph;

mod graph_builder;
mod model;
mod xml;

/// Format of the input OSM file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Uncompressed [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    Xml,

    /// [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

impl FileFormat {
    /// Guesses the file format from a path's extensions,
    /// defaulting to plain [FileFormat::Xml].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let name = path
            .as_ref()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");
        if name.ends_with(".osm.gz") || name.ends_with(".xml.gz") {
            Self::XmlGz
        } else if name.ends_with(".osm.bz2") || name.ends_with(".xml.bz2") {
            Self::XmlBz2
        } else {
            Self::Xml
        }
    }
}

/// Additional controls for interpreting OSM data as a routing [Graph].
#[derive(Debug)]
pub struct Options<'a> {
    /// How OSM features should be interpreted and converted into a [Graph].
    pub profile: &'a Profile<'a>,

    /// Format of the input data.
    pub file_format: FileFormat,

    /// Filter features by a specific bounding box. In order: left (min lon), bottom (min lat),
    /// right (max lon), top (max lat). Ignored if all values are set to zero, or at least one
    /// of them is not finite.
    pub bbox: [f64; 4],
}

/// Error conditions which may occur when loading OSM data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o: {0}")]
    Io(#[from] io::Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Internal trait for objects which can stream [osm features](model::Feature)
/// from an underlying source.
pub(super) trait FeatureReader {
    type Error;
    fn next(&mut self) -> Result<Option<model::Feature>, Self::Error>;
}

/// Parse OSM features from a reader into a [Graph] as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader when needed.
pub fn add_features_from_io<'a, R: io::Read>(
    g: &'a mut Graph,
    options: &'a Options<'a>,
    reader: R,
) -> Result<(), Error> {
    match options.file_format {
        FileFormat::Xml => {
            let b = io::BufReader::new(reader);
            let r = xml::from_io(b);
            GraphBuilder::new(g, options).add_features(r)?;
            Ok(())
        }

        FileFormat::XmlGz => {
            let d = flate2::read::MultiGzDecoder::new(reader);
            let b = io::BufReader::new(d);
            let r = xml::from_io(b);
            GraphBuilder::new(g, options).add_features(r)?;
            Ok(())
        }

        FileFormat::XmlBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(reader);
            let b = io::BufReader::new(d);
            let r = xml::from_io(b);
            GraphBuilder::new(g, options).add_features(r)?;
            Ok(())
        }
    }
}

/// Parse OSM features from a file at the provided path into a [Graph] as per the provided [Options].
pub fn add_features_from_file<'a, P: AsRef<Path>>(
    g: &'a mut Graph,
    options: &'a Options<'a>,
    path: P,
) -> Result<(), Error> {
    let f = File::open(path)?;
    add_features_from_io(g, options, f)
}

/// Parse OSM features from a static buffer into a [Graph] as per the provided [Options].
pub fn add_features_from_buffer<'a>(
    g: &'a mut Graph,
    options: &'a Options<'a>,
    data: &[u8],
) -> Result<(), Error> {
    if options.file_format == FileFormat::Xml {
        // Fast path is available for in-memory XML data
        let r = xml::from_buffer(data);
        GraphBuilder::new(g, options).add_features(r)?;
        Ok(())
    } else {
        add_features_from_io(g, options, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_format_from_path() {
        assert_eq!(FileFormat::from_path("monaco.osm"), FileFormat::Xml);
        assert_eq!(FileFormat::from_path("monaco.osm.gz"), FileFormat::XmlGz);
        assert_eq!(FileFormat::from_path("a/b/monaco.osm.bz2"), FileFormat::XmlBz2);
        assert_eq!(FileFormat::from_path("monaco"), FileFormat::Xml);
    }
}
