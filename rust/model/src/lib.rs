// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # GeoScript Model
//!
//! Geometry model built from `.geo` descriptor scripts.
//!
//! This crate turns a parsed script (see `geoscript-core`) into a validated
//! boundary-representation DAG: points reference nothing, lines reference
//! points, line loops reference signed lines, plane surfaces reference line
//! loops, surface loops reference surfaces, and volumes reference surface
//! loops. Every constructor checks that its operands already exist, so a
//! fully built [`GeometryModel`] never contains a dangling tag.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use geoscript_model::build_model;
//!
//! let model = build_model(
//!     "Point(1) = {0, 0, 0};\n\
//!      Point(2) = {1, 0, 0};\n\
//!      Line(1) = {1, 2};\n",
//! )?;
//! assert_eq!(model.line_count(), 1);
//! println!("{}", model.to_geo());
//! ```
//!
//! Models also round-trip through JSON via [`serialization`], and re-emit
//! canonical script text via [`writer`].

pub mod annotation;
pub mod construction;
pub mod error;
pub mod interp;
pub mod model;
pub mod serialization;
pub mod tags;
pub mod transform;
pub mod writer;

pub use annotation::{PeriodicRelation, PhysicalGroup};
pub use error::{Error, Result};
pub use interp::{build_model, ScriptInterpreter};
pub use model::{
    GeometryModel, LineData, LineLoopData, ModelOptions, PointData, SignedLine, SurfaceData,
    SurfaceLoopData, VolumeData,
};
pub use serialization::{from_json, to_json, ModelSnapshot};
pub use tags::{
    EntityKind, LineLoopTag, LineTag, PointTag, SurfaceLoopTag, SurfaceTag, VolumeTag,
};
pub use transform::AffineTransform;
pub use writer::write_geo;

// Script-level dimension classes are shared with the parser crate.
pub use geoscript_core::statement::DimensionClass;
