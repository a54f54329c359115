// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary curves.

use alloc::string::ToString;
use alloc::vec::Vec;

use kurbo::Point;

use crate::node::{NodeReader, NodeWriter};

const POLYLINE_TAG: &str = "polyline";
const POINT_TAG: &str = "point";

/// One boundary of the content region, traced as a polyline from one side of
/// the page to the other.
///
/// Point order is significant: two curves with the same points in a
/// different order do not match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curve {
    polyline: Vec<Point>,
}

impl Curve {
    /// Largest distance, in source units, at which two vertices still match.
    pub const MATCH_TOLERANCE: f64 = 0.01;

    /// Creates an empty (invalid) curve.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a curve from its vertices, in tracing order.
    #[must_use]
    pub fn from_polyline<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Self {
        Self {
            polyline: points.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads a curve from a serialized element.
    ///
    /// A missing `polyline` child yields an empty curve. So does a point with
    /// a missing, unparseable or non-finite coordinate: partially garbled data
    /// is discarded as a whole rather than producing a shorter polyline.
    pub fn from_node<R: NodeReader>(node: &R) -> Self {
        let Some(polyline) = node.child(POLYLINE_TAG) else {
            return Self::new();
        };

        let points = polyline.children(POINT_TAG);
        let mut out = Vec::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            match (coordinate(point, "x"), coordinate(point, "y")) {
                (Some(x), Some(y)) => out.push(Point::new(x, y)),
                _ => {
                    tracing::debug!(index, "discarding curve with a malformed point");
                    return Self::new();
                }
            }
        }
        Self { polyline: out }
    }

    /// Like [`Curve::from_node`], treating an absent element as an empty curve.
    pub fn from_node_opt<R: NodeReader>(node: Option<&R>) -> Self {
        node.map(Self::from_node).unwrap_or_default()
    }

    /// Writes the curve as an element named `name`.
    pub fn to_node<W: NodeWriter>(&self, writer: &mut W, name: &str) -> W::Element {
        let mut polyline = writer.create_element(POLYLINE_TAG);
        for pt in &self.polyline {
            let mut el = writer.create_element(POINT_TAG);
            writer.set_attribute(&mut el, "x", &pt.x.to_string());
            writer.set_attribute(&mut el, "y", &pt.y.to_string());
            writer.append_child(&mut polyline, el);
        }

        let mut el = writer.create_element(name);
        writer.append_child(&mut el, polyline);
        el
    }

    /// Returns `true` if the curve can describe a page edge: at least two
    /// finite vertices, with distinct endpoints.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.polyline.len() >= 2
            && self.polyline.first() != self.polyline.last()
            && self.polyline.iter().all(|pt| pt.is_finite())
    }

    /// Returns the vertices in tracing order.
    #[must_use]
    pub fn polyline(&self) -> &[Point] {
        &self.polyline
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.polyline.len()
    }

    /// Returns `true` if the curve has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polyline.is_empty()
    }

    /// Returns `true` if both curves have the same number of vertices and
    /// corresponding vertices lie within [`Curve::MATCH_TOLERANCE`].
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        const TOLERANCE_SQ: f64 = Curve::MATCH_TOLERANCE * Curve::MATCH_TOLERANCE;
        self.polyline.len() == other.polyline.len()
            && self
                .polyline
                .iter()
                .zip(&other.polyline)
                .all(|(a, b)| (*a - *b).hypot2() <= TOLERANCE_SQ)
    }
}

impl FromIterator<Point> for Curve {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            polyline: iter.into_iter().collect(),
        }
    }
}

fn coordinate<R: NodeReader>(point: &R, name: &str) -> Option<f64> {
    point
        .attribute(name)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
