// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Rect};

use crate::curve::Curve;
use crate::node::{NodeReader, NodeWriter};

const TOP_CURVE_TAG: &str = "top-curve";
const BOTTOM_CURVE_TAG: &str = "bottom-curve";

/// Distortion of a scanned page, described by the top and bottom boundaries
/// of its content region.
///
/// A model whose curves are not both valid stands for "no distortion data".
/// Such models match each other, never match a valid model, and serialize to
/// nothing.
#[derive(Clone, Debug, Default)]
pub struct DistortionModel {
    top_curve: Curve,
    bottom_curve: Curve,
}

impl DistortionModel {
    /// Creates a model from its two boundary curves.
    #[must_use]
    pub fn new(top_curve: Curve, bottom_curve: Curve) -> Self {
        Self {
            top_curve,
            bottom_curve,
        }
    }

    /// Reads a model from the `top-curve` and `bottom-curve` children of
    /// `node`.
    ///
    /// Missing children produce invalid curves; nothing here fails.
    pub fn from_node<R: NodeReader>(node: &R) -> Self {
        Self {
            top_curve: Curve::from_node_opt(node.child(TOP_CURVE_TAG).as_ref()),
            bottom_curve: Curve::from_node_opt(node.child(BOTTOM_CURVE_TAG).as_ref()),
        }
    }

    /// Writes the model as an element named `name`, or returns `None` if the
    /// model is invalid.
    pub fn to_node<W: NodeWriter>(&self, writer: &mut W, name: &str) -> Option<W::Element> {
        if !self.is_valid() {
            return None;
        }

        let mut el = writer.create_element(name);
        let top = self.top_curve.to_node(writer, TOP_CURVE_TAG);
        writer.append_child(&mut el, top);
        let bottom = self.bottom_curve.to_node(writer, BOTTOM_CURVE_TAG);
        writer.append_child(&mut el, bottom);
        Some(el)
    }

    /// Returns the top boundary.
    #[must_use]
    pub fn top_curve(&self) -> &Curve {
        &self.top_curve
    }

    /// Returns the bottom boundary.
    #[must_use]
    pub fn bottom_curve(&self) -> &Curve {
        &self.bottom_curve
    }

    /// Returns `true` if both curves are valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.top_curve.is_valid() && self.bottom_curve.is_valid()
    }

    /// Returns `true` if results computed for `other` can be reused for `self`.
    ///
    /// Two invalid models match. A valid and an invalid model never match.
    /// Two valid models match when their top curves match and their bottom
    /// curves match.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        match (self.is_valid(), other.is_valid()) {
            (false, false) => true,
            (true, true) => {
                self.top_curve.matches(&other.top_curve)
                    && self.bottom_curve.matches(&other.bottom_curve)
            }
            _ => false,
        }
    }

    /// Returns the axis-aligned bounds of every curve vertex after mapping it
    /// through `transform`.
    ///
    /// Points are transformed before bounding, so the result is tight for
    /// rotations and shears too. A model without vertices yields
    /// [`Rect::ZERO`].
    #[must_use]
    pub fn bounding_box(&self, transform: Affine) -> Rect {
        let mut left = f64::MAX;
        let mut top = f64::MAX;
        let mut right = f64::MIN;
        let mut bottom = f64::MIN;

        let points = self
            .top_curve
            .polyline()
            .iter()
            .chain(self.bottom_curve.polyline());
        for &pt in points {
            let pt = transform * pt;
            left = left.min(pt.x);
            right = right.max(pt.x);
            top = top.min(pt.y);
            bottom = bottom.max(pt.y);
        }

        if top > bottom || left > right {
            Rect::ZERO
        } else {
            Rect::new(left, top, right, bottom)
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Point, Rect, Vec2};

    use super::DistortionModel;
    use crate::curve::Curve;
    use crate::node::{Element, ElementWriter, NodeReader};

    fn flat_model() -> DistortionModel {
        DistortionModel::new(
            Curve::from_polyline([(0.0, 0.0), (10.0, 0.0)]),
            Curve::from_polyline([(0.0, 5.0), (10.0, 5.0)]),
        )
    }

    fn assert_rect_close(a: Rect, b: Rect) {
        assert!((a.x0 - b.x0).abs() < 1e-9, "{a:?} vs {b:?}");
        assert!((a.y0 - b.y0).abs() < 1e-9, "{a:?} vs {b:?}");
        assert!((a.x1 - b.x1).abs() < 1e-9, "{a:?} vs {b:?}");
        assert!((a.y1 - b.y1).abs() < 1e-9, "{a:?} vs {b:?}");
    }

    #[test]
    fn default_is_invalid() {
        let model = DistortionModel::default();
        assert!(!model.is_valid());
        assert!(model.top_curve().is_empty());
        assert!(model.bottom_curve().is_empty());
    }

    #[test]
    fn validity_requires_both_curves() {
        let good = Curve::from_polyline([(0.0, 0.0), (1.0, 0.0)]);
        let bad = Curve::from_polyline([(0.0, 0.0)]);

        assert!(DistortionModel::new(good.clone(), good.clone()).is_valid());
        assert!(!DistortionModel::new(good.clone(), bad.clone()).is_valid());
        assert!(!DistortionModel::new(bad.clone(), good).is_valid());
        assert!(!DistortionModel::new(bad.clone(), bad).is_valid());
    }

    #[test]
    fn matches_three_way_policy() {
        let valid = flat_model();
        let invalid =
            DistortionModel::new(Curve::new(), Curve::from_polyline([(0.0, 0.0)]));

        assert!(DistortionModel::default().matches(&invalid));
        assert!(invalid.matches(&DistortionModel::default()));
        assert!(!valid.matches(&invalid));
        assert!(!invalid.matches(&valid));
        assert!(valid.matches(&valid.clone()));
    }

    #[test]
    fn matches_compares_each_curve() {
        let a = flat_model();
        let other_bottom = DistortionModel::new(
            a.top_curve().clone(),
            Curve::from_polyline([(0.0, 6.0), (10.0, 6.0)]),
        );
        let other_top = DistortionModel::new(
            Curve::from_polyline([(0.0, 1.0), (10.0, 0.0)]),
            a.bottom_curve().clone(),
        );

        assert!(!a.matches(&other_bottom));
        assert!(!a.matches(&other_top));
    }

    #[test]
    fn bounding_box_identity() {
        let bbox = flat_model().bounding_box(Affine::IDENTITY);
        assert_eq!(bbox, Rect::new(0.0, 0.0, 10.0, 5.0));
        assert_eq!(bbox.width(), 10.0);
        assert_eq!(bbox.height(), 5.0);
    }

    #[test]
    fn bounding_box_covers_both_curves_with_negative_coordinates() {
        let model = DistortionModel::new(
            Curve::from_polyline([(-20.0, -8.0), (-5.0, -12.0), (3.0, -9.0)]),
            Curve::from_polyline([(-18.0, -1.0), (4.0, -2.0)]),
        );
        let bbox = model.bounding_box(Affine::IDENTITY);
        assert_eq!(bbox, Rect::new(-20.0, -12.0, 4.0, -1.0));
    }

    #[test]
    fn bounding_box_translation() {
        let model = flat_model();
        let base = model.bounding_box(Affine::IDENTITY);
        let moved = model.bounding_box(Affine::translate(Vec2::new(3.0, -7.0)));
        assert_rect_close(moved, base + Vec2::new(3.0, -7.0));
    }

    #[test]
    fn bounding_box_rotation_swaps_extents() {
        let bbox = flat_model().bounding_box(Affine::rotate(core::f64::consts::FRAC_PI_2));
        assert!((bbox.width() - 5.0).abs() < 1e-9);
        assert!((bbox.height() - 10.0).abs() < 1e-9);
        // (x, y) -> (-y, x)
        assert_rect_close(bbox, Rect::new(-5.0, 0.0, 0.0, 10.0));
    }

    #[test]
    fn bounding_box_transforms_points_not_bounds() {
        // A diagonal segment has a zero-height box after a rotation that
        // aligns it with the x axis; bounding first would not.
        let model = DistortionModel::new(
            Curve::from_polyline([(0.0, 0.0), (1.0, 1.0)]),
            Curve::from_polyline([(2.0, 2.0), (3.0, 3.0)]),
        );
        let bbox = model.bounding_box(Affine::rotate(-core::f64::consts::FRAC_PI_4));
        assert!(bbox.height().abs() < 1e-9);
        assert!((bbox.width() - 3.0 * core::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn bounding_box_of_empty_model_is_zero() {
        let model = DistortionModel::default();
        assert_eq!(model.bounding_box(Affine::IDENTITY), Rect::ZERO);
        assert_eq!(model.bounding_box(Affine::rotate(1.0)), Rect::ZERO);
    }

    #[test]
    fn bounding_box_tolerates_invalid_model() {
        // One usable curve: bounds still come from the points that exist.
        let model = DistortionModel::new(
            Curve::from_polyline([(2.0, 3.0), (6.0, 1.0)]),
            Curve::new(),
        );
        assert!(!model.is_valid());
        assert_eq!(
            model.bounding_box(Affine::IDENTITY),
            Rect::new(2.0, 1.0, 6.0, 3.0)
        );

        let single = DistortionModel::new(
            Curve::from_polyline([Point::new(4.0, 4.0)]),
            Curve::new(),
        );
        assert_eq!(
            single.bounding_box(Affine::IDENTITY),
            Rect::new(4.0, 4.0, 4.0, 4.0)
        );
    }

    #[test]
    fn invalid_model_writes_nothing() {
        assert!(
            DistortionModel::default()
                .to_node(&mut ElementWriter, "distortion-model")
                .is_none()
        );
    }

    #[test]
    fn to_node_layout() {
        let el = flat_model()
            .to_node(&mut ElementWriter, "distortion-model")
            .unwrap();
        assert_eq!(el.name(), "distortion-model");
        assert!(el.attributes().is_empty());
        let names: alloc::vec::Vec<_> =
            el.child_elements().iter().map(Element::name).collect();
        assert_eq!(names, ["top-curve", "bottom-curve"]);
    }

    #[test]
    fn node_roundtrip_matches() {
        let model = flat_model();
        let el = model.to_node(&mut ElementWriter, "x").unwrap();
        let restored = DistortionModel::from_node(&&el);
        assert!(restored.is_valid());
        assert!(model.matches(&restored));
    }

    #[test]
    fn missing_children_read_as_invalid() {
        let el = Element::new("distortion-model");
        assert!((&el).child("top-curve").is_none());
        let model = DistortionModel::from_node(&&el);
        assert!(!model.is_valid());
        assert!(model.matches(&DistortionModel::default()));
    }
}
