// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Small hand-made graphs shared by unit tests.

use crate::graph::{Graph, GraphBuilder};
use crate::GeoPoint;

macro_rules! tags {
    {} => { $crate::graph::Tags::default() };
    {$( $k:literal : $v:literal ),+} => {
        $crate::graph::Tags::from_iter([ $( ($k.to_string(), $v.to_string()) ),+ ])
    };
}

pub(crate) use tags;

/// Three collinear nodes along the equator:
///
/// ```text
/// a ── b ── c
/// ```
///
/// The way is named "Main Street" and `c` is named "End".
pub(crate) fn line() -> Graph {
    let mut b = GraphBuilder::new();
    b.add_node("a", GeoPoint::new(0.0, 0.0), tags! {}).unwrap();
    b.add_node("b", GeoPoint::new(0.0, 0.001), tags! {}).unwrap();
    b.add_node("c", GeoPoint::new(0.0, 0.002), tags! {"name": "End"})
        .unwrap();
    b.add_way(
        "w1",
        ["a", "b", "c"],
        tags! {"highway": "residential", "name": "Main Street"},
    )
    .unwrap();
    b.build()
}

/// 3×3 grid of nodes spaced 0.001° apart, with a way along every row and column.
/// Node ids are `{row}{col}`, row 0 being the southernmost.
///
/// ```text
/// 20 ── 21 ── 22
///  │     │     │
/// 10 ── 11 ── 12
///  │     │     │
/// 00 ── 01 ── 02
/// ```
pub(crate) fn grid() -> Graph {
    let mut b = GraphBuilder::new();
    for row in 0..3 {
        for col in 0..3 {
            let position = GeoPoint::new(row as f64 * 0.001, col as f64 * 0.001);
            b.add_node(format!("{row}{col}"), position, tags! {}).unwrap();
        }
    }
    for i in 0..3 {
        let row: Vec<String> = (0..3).map(|col| format!("{i}{col}")).collect();
        b.add_way(format!("row{i}"), row, tags! {"highway": "residential"})
            .unwrap();

        let col: Vec<String> = (0..3).map(|row| format!("{row}{i}")).collect();
        b.add_way(format!("col{i}"), col, tags! {"highway": "residential"})
            .unwrap();
    }
    b.build()
}

/// Two ways sharing no nodes:
///
/// ```text
/// a ── b        c ── d
/// ```
pub(crate) fn disjoint() -> Graph {
    let mut b = GraphBuilder::new();
    b.add_node("a", GeoPoint::new(0.0, 0.0), tags! {}).unwrap();
    b.add_node("b", GeoPoint::new(0.0, 0.001), tags! {}).unwrap();
    b.add_node("c", GeoPoint::new(0.0, 0.01), tags! {}).unwrap();
    b.add_node("d", GeoPoint::new(0.0, 0.011), tags! {}).unwrap();
    b.add_way("w1", ["a", "b"], tags! {}).unwrap();
    b.add_way("w2", ["c", "d"], tags! {}).unwrap();
    b.build()
}

/// Two routes from `s` to `t`: a direct-looking one with few long hops through `p`,
/// and a shorter one with more hops along the equator.
///
/// ```text
///          p
///        /   \
///       /     \
///      s─q1─q2─q3─t
/// ```
pub(crate) fn detour() -> Graph {
    let mut b = GraphBuilder::new();
    b.add_node("s", GeoPoint::new(0.0, 0.0), tags! {}).unwrap();
    b.add_node("p", GeoPoint::new(0.003, 0.002), tags! {}).unwrap();
    b.add_node("q1", GeoPoint::new(0.0, 0.001), tags! {}).unwrap();
    b.add_node("q2", GeoPoint::new(0.0, 0.002), tags! {}).unwrap();
    b.add_node("q3", GeoPoint::new(0.0, 0.003), tags! {}).unwrap();
    b.add_node("t", GeoPoint::new(0.0, 0.004), tags! {}).unwrap();
    b.add_way("hill", ["s", "p", "t"], tags! {}).unwrap();
    b.add_way("flat", ["t", "q3", "q2", "q1", "s"], tags! {})
        .unwrap();
    b.build()
}
