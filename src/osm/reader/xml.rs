// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;
use std::str::from_utf8;

use quick_xml::events::BytesStart;

use super::model;
use crate::graph::Tags;

pub(super) fn features_from_io<R: io::BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<model::Feature, quick_xml::Error>> {
    Reader::from_io(reader)
}

pub(super) fn features_from_buffer(
    b: &[u8],
) -> impl Iterator<Item = Result<model::Feature, quick_xml::Error>> + '_ {
    Reader::from_buffer(b)
}

/// Parser is a trait for objects which can parse XML.
///
/// This trait only exists to fix the mismatch of
/// [quick_xml::Reader::read_event] when working on buffered data
/// and [quick_xml::Reader::read_event_into] when working on IO.
trait Parser {
    fn read_event<'a>(&'a mut self) -> quick_xml::Result<quick_xml::events::Event<'a>>;
}

/// IoParser implements [Parser] over an [std::io::BufRead].
struct IoParser<R: io::BufRead>(quick_xml::Reader<R>, Vec<u8>);

impl<R: io::BufRead> IoParser<R> {
    #[inline]
    fn new(reader: R) -> Self {
        Self(quick_xml::Reader::from_reader(reader), Vec::default())
    }
}

impl<R: io::BufRead> Parser for IoParser<R> {
    #[inline]
    fn read_event<'a>(&'a mut self) -> quick_xml::Result<quick_xml::events::Event<'a>> {
        self.1.clear();
        self.0.read_event_into(&mut self.1)
    }
}

/// BufParser implements [Parser] over a slice of bytes (`&[u8]`).
struct BufParser<'a>(quick_xml::Reader<&'a [u8]>);

impl<'a> BufParser<'a> {
    #[inline]
    fn new(data: &'a [u8]) -> Self {
        Self(quick_xml::Reader::from_reader(data))
    }
}

impl<'a> Parser for BufParser<'a> {
    #[inline]
    fn read_event<'b>(&'b mut self) -> quick_xml::Result<quick_xml::events::Event<'b>> {
        self.0.read_event()
    }
}

/// Reader reads osm [Features](model::Feature) from an XML file.
///
/// Malformed nodes and ways are skipped with a warning, relations are ignored.
struct Reader<P: Parser> {
    parser: P,
    eof: bool,
}

impl<P: Parser> Reader<P> {
    #[inline]
    fn new(parser: P) -> Self {
        Self { parser, eof: false }
    }
}

impl<P: Parser> Iterator for Reader<P> {
    type Item = Result<model::Feature, quick_xml::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut f: Option<model::Feature> = None;

        while !self.eof {
            let event = match self.parser.read_event() {
                Ok(e) => e,
                Err(e) => return Some(Err(e)),
            };

            match event {
                quick_xml::events::Event::Empty(start) => match start.local_name().as_ref() {
                    b"node" => {
                        if let Some(n) = parse_node(&start) {
                            return Some(Ok(model::Feature::Node(n)));
                        }
                    }
                    b"tag" => {
                        if let Some(tags) = feature_tags(&mut f) {
                            if let Some((k, v)) = parse_tag(&start) {
                                tags.insert(k, v);
                            }
                        }
                    }
                    b"nd" => {
                        if let Some(nodes) = feature_nodes(&mut f) {
                            if let Some(ref_) = parse_nd(&start) {
                                nodes.push(ref_);
                            }
                        }
                    }
                    b"way" => log::warn!(
                        "skipping self-closing way {}: no node references",
                        parse_attribute(&start, b"id").unwrap_or_default()
                    ),
                    // "relation" is ignored entirely
                    _ => {}
                },

                quick_xml::events::Event::Start(start) => match start.local_name().as_ref() {
                    b"node" => f = parse_node(&start).map(model::Feature::Node),
                    b"way" => f = parse_way(&start).map(model::Feature::Way),
                    // "tag" and "nd" must be self-closing
                    _ => {}
                },

                quick_xml::events::Event::End(end) => match end.local_name().as_ref() {
                    b"node" | b"way" => {
                        if let Some(f) = f.take() {
                            return Some(Ok(f));
                        }
                    }
                    _ => {}
                },

                quick_xml::events::Event::Eof => {
                    self.eof = true;
                }

                _ => {}
            }
        }

        f.map(Ok)
    }
}

impl<'a> Reader<BufParser<'a>> {
    #[inline]
    fn from_buffer(data: &'a [u8]) -> Self {
        Self::new(BufParser::new(data))
    }
}

impl<R: io::BufRead> Reader<IoParser<R>> {
    #[inline]
    fn from_io(reader: R) -> Self {
        Self::new(IoParser::new(reader))
    }
}

fn parse_node(start: &BytesStart<'_>) -> Option<model::Node> {
    let node = try_parse_node(start);
    if node.is_none() {
        log::warn!("skipping malformed node: {}", String::from_utf8_lossy(start));
    }
    node
}

fn try_parse_node(start: &BytesStart<'_>) -> Option<model::Node> {
    let mut id = None;
    let mut lat = f64::NAN;
    let mut lon = f64::NAN;

    for attr in start.attributes() {
        let attr = attr.ok()?;
        match attr.key.as_ref() {
            b"id" => id = Some(from_utf8(&attr.value).ok()?.to_string()),
            b"lat" => lat = from_utf8(&attr.value).ok()?.parse().ok()?,
            b"lon" => lon = from_utf8(&attr.value).ok()?.parse().ok()?,
            _ => {}
        }
    }

    match id {
        Some(id) if !id.is_empty() && lat.is_finite() && lon.is_finite() => Some(model::Node {
            id,
            lat,
            lon,
            tags: Tags::default(),
        }),
        _ => None,
    }
}

fn parse_way(start: &BytesStart<'_>) -> Option<model::Way> {
    let id = parse_attribute(start, b"id").filter(|id| !id.is_empty());
    if id.is_none() {
        log::warn!("skipping way without an id");
    }

    id.map(|id| model::Way {
        id,
        nodes: Vec::default(),
        tags: Tags::default(),
    })
}

fn parse_tag(start: &BytesStart<'_>) -> Option<(String, String)> {
    let mut k = None;
    let mut v = None;

    for attr in start.attributes() {
        let attr = attr.ok()?;
        match attr.key.as_ref() {
            b"k" => k = attr.unescape_value().ok().map(|s| s.into_owned()),
            b"v" => v = attr.unescape_value().ok().map(|s| s.into_owned()),
            _ => {}
        }
    }

    k.map(|k| (k, v.unwrap_or_default()))
}

fn parse_nd(start: &BytesStart<'_>) -> Option<String> {
    parse_attribute(start, b"ref").filter(|ref_| !ref_.is_empty())
}

fn parse_attribute(start: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    start
        .attributes()
        .filter_map(Result::ok)
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| from_utf8(&attr.value).ok().map(str::to_string))
}

fn feature_tags(f: &mut Option<model::Feature>) -> Option<&mut Tags> {
    match f {
        None => None,
        Some(model::Feature::Node(ref mut n)) => Some(&mut n.tags),
        Some(model::Feature::Way(ref mut w)) => Some(&mut w.tags),
    }
}

fn feature_nodes(f: &mut Option<model::Feature>) -> Option<&mut Vec<String>> {
    match f {
        Some(model::Feature::Way(ref mut w)) => Some(&mut w.nodes),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::model::{Feature, Node, Way};
    use super::*;
    use crate::test_graphs::tags;

    const SIMPLE_XML: &[u8] = include_bytes!("../test_fixtures/simple.osm");

    fn node(id: &str, lat: f64, lon: f64, tags: Tags) -> Node {
        Node {
            id: id.to_string(),
            lat,
            lon,
            tags,
        }
    }

    fn way(id: &str, nodes: &[&str], tags: Tags) -> Way {
        Way {
            id: id.to_string(),
            nodes: nodes.iter().map(|s| s.to_string()).collect(),
            tags,
        }
    }

    fn get_expected_nodes() -> Vec<Node> {
        vec![
            node("1", 52.0, 21.0, tags! {"name": "Town Hall"}),
            node("2", 52.001, 21.0, tags! {}),
            node("3", 52.002, 21.0, tags! {}),
            node(
                "4",
                52.002,
                21.001,
                tags! {"name": "Fish & Chips", "amenity": "restaurant"},
            ),
            node("5", 52.0, 21.001, tags! {}),
            node("6", 52.01, 21.01, tags! {}),
        ]
    }

    fn get_expected_ways() -> Vec<Way> {
        vec![
            way(
                "100",
                &["1", "2", "3"],
                tags! {"highway": "residential", "name": "Main Street"},
            ),
            way("101", &["3", "4", "999"], tags! {"highway": "service"}),
            way("102", &["998"], tags! {}),
        ]
    }

    fn collect_all<I>(features: I) -> Result<(Vec<Node>, Vec<Way>), quick_xml::Error>
    where
        I: Iterator<Item = Result<Feature, quick_xml::Error>>,
    {
        let mut nodes = Vec::default();
        let mut ways = Vec::default();

        for f in features {
            match f? {
                Feature::Node(n) => nodes.push(n),
                Feature::Way(w) => ways.push(w),
            }
        }

        Ok((nodes, ways))
    }

    fn check_against_expected<I>(features: I) -> Result<(), quick_xml::Error>
    where
        I: Iterator<Item = Result<Feature, quick_xml::Error>>,
    {
        let (nodes, ways) = collect_all(features)?;
        assert_eq!(nodes, get_expected_nodes());
        assert_eq!(ways, get_expected_ways());
        Ok(())
    }

    #[test]
    fn parse_from_buf() -> Result<(), quick_xml::Error> {
        check_against_expected(Reader::from_buffer(SIMPLE_XML))
    }

    #[test]
    fn parse_from_io() -> Result<(), quick_xml::Error> {
        check_against_expected(Reader::from_io(io::Cursor::new(SIMPLE_XML)))
    }

    #[test]
    fn self_closing_way_is_skipped() -> Result<(), quick_xml::Error> {
        let data = br#"<osm>
            <node id="1" lat="0" lon="0"/>
            <way id="50"/>
            <way id="51"><nd ref="1"/></way>
        </osm>"#;
        let (nodes, ways) = collect_all(Reader::from_buffer(data))?;
        assert_eq!(nodes, vec![node("1", 0.0, 0.0, tags! {})]);
        assert_eq!(ways, vec![way("51", &["1"], tags! {})]);
        Ok(())
    }
}
