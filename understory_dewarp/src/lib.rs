// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dewarp --heading-base-level=0

//! Understory Dewarp: page distortion models for dewarping pipelines.
//!
//! A scanned page that is not flat (a book spine, a curled sheet) shows its
//! content region bent away from a rectangle. This crate describes that
//! distortion by its two boundaries, a top [`Curve`] and a bottom [`Curve`],
//! bundled in a [`DistortionModel`]. It provides:
//! - Validity checks: a model is usable only when both curves are.
//! - Equivalence via [`DistortionModel::matches`], for deciding whether
//!   previously computed dewarping results still apply.
//! - Axis-aligned bounds of the distorted region under any [`kurbo::Affine`]
//!   transform, including rotations.
//! - Round trips through a structured document via the narrow
//!   [`NodeReader`] / [`NodeWriter`] traits.
//!
//! It does **not** fit curves to image content or remap pixels. Callers are
//! expected to:
//! - Produce curves from their own detection or user editing.
//! - Own the surrounding project document and plug it in through
//!   [`NodeReader`] / [`NodeWriter`], or use the bundled [`Element`] tree.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Affine, Rect};
//! use understory_dewarp::{Curve, DistortionModel};
//!
//! let model = DistortionModel::new(
//!     Curve::from_polyline([(0.0, 0.0), (10.0, 0.0)]),
//!     Curve::from_polyline([(0.0, 5.0), (10.0, 5.0)]),
//! );
//! assert!(model.is_valid());
//! assert_eq!(model.bounding_box(Affine::IDENTITY), Rect::new(0.0, 0.0, 10.0, 5.0));
//!
//! // A model without curve data is still a value: it matches other empty
//! // models and has empty bounds.
//! let empty = DistortionModel::default();
//! assert!(!empty.is_valid());
//! assert!(empty.matches(&DistortionModel::default()));
//! assert!(!empty.matches(&model));
//! assert_eq!(empty.bounding_box(Affine::IDENTITY), Rect::ZERO);
//! ```
//!
//! ## Document round trip
//!
//! ```rust
//! use understory_dewarp::{Curve, DistortionModel, ElementWriter};
//!
//! let model = DistortionModel::new(
//!     Curve::from_polyline([(0.0, 0.0), (5.0, 1.0), (10.0, 0.0)]),
//!     Curve::from_polyline([(0.0, 20.0), (10.0, 20.0)]),
//! );
//!
//! let el = model.to_node(&mut ElementWriter, "distortion-model").unwrap();
//! let restored = DistortionModel::from_node(&&el);
//! assert!(model.matches(&restored));
//!
//! // Invalid models are not written at all.
//! assert!(DistortionModel::default().to_node(&mut ElementWriter, "distortion-model").is_none());
//! ```
//!
//! ## Features
//!
//! - `std` (default): build Kurbo with `std`.
//! - `libm`: build Kurbo with `libm` for `no_std` targets.
//! - `xml`: text XML support through `roxmltree` and `quick-xml`; see the
//!   `xml` module.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod curve;
mod model;
mod node;

#[cfg(feature = "xml")]
pub mod xml;

pub use curve::Curve;
pub use model::DistortionModel;
pub use node::{Element, ElementWriter, NodeReader, NodeWriter};
