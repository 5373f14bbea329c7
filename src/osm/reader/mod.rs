// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use loader::GraphLoader;

use crate::graph::{BuildError, Graph};

mod loader;
mod model;
mod xml;

/// Format of the input OSM file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the first bytes of the content
    #[default]
    Unknown,

    /// Force uncompressed [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    Xml,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

impl FileFormat {
    /// Guesses the format from the first few bytes of a file.
    pub fn detect(prefix: &[u8]) -> Self {
        if prefix.starts_with(&[0x1f, 0x8b]) {
            Self::XmlGz
        } else if prefix.starts_with(b"BZh") {
            Self::XmlBz2
        } else {
            Self::Xml
        }
    }
}

/// Additional controls for interpreting OSM data as a [Graph].
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,

    /// Fail on ways referencing unknown nodes, instead of dropping such references.
    /// Map extracts commonly contain ways crossing the extract boundary,
    /// so this is off by default: dangling references are then dropped with
    /// a warning and the rest of the map still loads. Only with this flag set
    /// does a single bad reference discard the whole model.
    pub strict_references: bool,
}

/// Error which can occur when loading an OSM file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("graph: {0}")]
    Build(#[from] BuildError),
}

/// Parse OSM features from a reader into a new [Graph] as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader when needed.
pub fn graph_from_io<R: io::Read>(options: &Options, reader: R) -> Result<Graph, Error> {
    let mut b = io::BufReader::new(reader);

    let format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf()?),
        format => format,
    };

    match format {
        FileFormat::Unknown | FileFormat::Xml => {
            GraphLoader::new(options).add_features(xml::features_from_io(b))
        }

        FileFormat::XmlGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            let b = io::BufReader::new(d);
            GraphLoader::new(options).add_features(xml::features_from_io(b))
        }

        FileFormat::XmlBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            let b = io::BufReader::new(d);
            GraphLoader::new(options).add_features(xml::features_from_io(b))
        }
    }
}

/// Parse OSM features from a file at the provided path into a new [Graph] as per the provided [Options].
pub fn graph_from_file<P: AsRef<Path>>(options: &Options, path: P) -> Result<Graph, Error> {
    let path = path.as_ref();
    log::info!("loading {}", path.display());
    let f = File::open(path)?;
    graph_from_io(options, f)
}

/// Parse OSM features from a static buffer into a new [Graph] as per the provided [Options].
pub fn graph_from_buffer(options: &Options, data: &[u8]) -> Result<Graph, Error> {
    let format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(data),
        format => format,
    };

    if format == FileFormat::Xml {
        // Fast path is available for in-memory XML data
        GraphLoader::new(options).add_features(xml::features_from_buffer(data))
    } else {
        // Wrap the buffer in a cursor and use the IO path
        let options = Options {
            file_format: format,
            ..options.clone()
        };
        graph_from_io(&options, io::Cursor::new(data))
    }
}
