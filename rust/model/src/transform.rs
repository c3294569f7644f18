// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Affine transforms attached to periodic relations.
//!
//! The statement grammar only produces pure translations
//! (`Translate {dx, dy, dz}`); the enum leaves room for the format's other
//! affine forms without touching call sites.

use nalgebra::{Matrix4, Point3, Translation3, Vector3};

/// Affine correspondence between a periodic surface pair.
#[derive(Debug, Clone, PartialEq)]
pub enum AffineTransform {
    /// Pure translation by a fixed vector.
    Translation(Vector3<f64>),
}

impl AffineTransform {
    /// Builds a translation transform from components.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        AffineTransform::Translation(Vector3::new(dx, dy, dz))
    }

    /// Applies the transform to a point.
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        match self {
            AffineTransform::Translation(v) => Translation3::from(*v) * point,
        }
    }

    /// Returns the inverse transform (maps target back onto source).
    pub fn inverse(&self) -> Self {
        match self {
            AffineTransform::Translation(v) => AffineTransform::Translation(-v),
        }
    }

    /// Homogeneous 4x4 matrix form.
    pub fn matrix(&self) -> Matrix4<f64> {
        match self {
            AffineTransform::Translation(v) => Translation3::from(*v).to_homogeneous(),
        }
    }

    /// Translation components, for serialization and display.
    pub fn translation_vector(&self) -> Vector3<f64> {
        match self {
            AffineTransform::Translation(v) => *v,
        }
    }
}
