// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Leaf annotations over already-built entities: physical groups and
//! periodic relations. Neither participates in the entity DAG; both only
//! reference entities that exist at declaration time.

use geoscript_core::DimensionClass;
use serde::{Deserialize, Serialize};

use crate::tags::SurfaceTag;
use crate::transform::AffineTransform;

/// A named, dimension-typed tag set over entities. Downstream solvers use
/// these to apply boundary conditions.
///
/// Names are unique per dimension class, not globally: a surface group and a
/// volume group may share a name. Re-declaring a (name, dimension) pair
/// replaces the member set (last-write-wins, declarative-script semantics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalGroup {
    pub name: String,
    pub dim: DimensionClass,
    /// Member tags within the dimension's namespace, in declaration order.
    pub members: Vec<u32>,
}

/// A declared correspondence between two surfaces under an affine transform.
/// Applying the transform to the source surface yields the target surface
/// (congruence is assumed, not verified).
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicRelation {
    pub target: SurfaceTag,
    pub source: SurfaceTag,
    pub transform: AffineTransform,
}
