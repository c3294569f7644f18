// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Central storage for geometry entities.
//!
//! The [`GeometryModel`] owns one table per entity category (point, line,
//! line loop, plane surface, surface loop, volume), each with its own tag
//! namespace and monotone allocator. Construction is append-only: entities
//! are created exactly once, never mutated and never destroyed, matching the
//! declarative build-script semantics of the `.geo` format.
//!
//! Entity references form a strict DAG: points precede lines, lines precede
//! line loops, and so on up to volumes. Physical groups and periodic
//! relations are leaf annotations over already-built entities.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::annotation::{PeriodicRelation, PhysicalGroup};
use crate::tags::*;
use geoscript_core::DimensionClass;

/// Data stored for a point: a position in 3D space with an optional
/// characteristic mesh size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointData {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Target element size at this point, when the script provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_length: Option<f64>,
}

/// Data stored for a line: a directed segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineData {
    pub start: PointTag,
    pub end: PointTag,
}

/// A line reference with traversal direction. `reversed` corresponds to a
/// leading `-` in the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedLine {
    pub line: LineTag,
    pub reversed: bool,
}

impl SignedLine {
    pub fn forward(line: LineTag) -> Self {
        SignedLine {
            line,
            reversed: false,
        }
    }

    pub fn reversed(line: LineTag) -> Self {
        SignedLine {
            line,
            reversed: true,
        }
    }
}

/// Data stored for a line loop: an ordered, signed cycle of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineLoopData {
    pub lines: Vec<SignedLine>,
}

/// Data stored for a plane surface: one outer line loop plus zero or more
/// hole loops. Planarity is assumed, not verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceData {
    pub outer_loop: LineLoopTag,
    pub holes: Vec<LineLoopTag>,
}

/// Data stored for a surface loop: a set of surfaces forming a closed shell.
/// Closure is assumed, not verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceLoopData {
    pub surfaces: Vec<SurfaceTag>,
}

/// Data stored for a volume: the surface loop bounding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeData {
    pub shell: SurfaceLoopTag,
}

/// Construction policy switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOptions {
    /// Verify that line loops chain endpoint-to-endpoint into a closed
    /// cycle. The original format trusts the input; disabling this matches
    /// that permissiveness.
    pub validate_loop_closure: bool,
}

impl ModelOptions {
    /// Skip all optional validation, trusting the script like the original
    /// format does.
    pub fn permissive() -> Self {
        ModelOptions {
            validate_loop_closure: false,
        }
    }
}

impl Default for ModelOptions {
    fn default() -> Self {
        ModelOptions {
            validate_loop_closure: true,
        }
    }
}

/// The central model that owns all geometry entities and annotations.
///
/// # Example
///
/// ```
/// use geoscript_model::GeometryModel;
///
/// let mut model = GeometryModel::new();
/// let p0 = model.new_point_tag();
/// model.add_point(p0, 0.0, 0.0, 0.0, None).unwrap();
///
/// assert_eq!(model.point_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryModel {
    pub(crate) options: ModelOptions,

    // Entity tables, one tag namespace each
    pub(crate) points: FxHashMap<PointTag, PointData>,
    pub(crate) lines: FxHashMap<LineTag, LineData>,
    pub(crate) line_loops: FxHashMap<LineLoopTag, LineLoopData>,
    pub(crate) surfaces: FxHashMap<SurfaceTag, SurfaceData>,
    pub(crate) surface_loops: FxHashMap<SurfaceLoopTag, SurfaceLoopData>,
    pub(crate) volumes: FxHashMap<VolumeTag, VolumeData>,

    // Declaration order, for deterministic serialization
    pub(crate) point_order: Vec<PointTag>,
    pub(crate) line_order: Vec<LineTag>,
    pub(crate) line_loop_order: Vec<LineLoopTag>,
    pub(crate) surface_order: Vec<SurfaceTag>,
    pub(crate) surface_loop_order: Vec<SurfaceLoopTag>,
    pub(crate) volume_order: Vec<VolumeTag>,

    // Allocator watermarks (highest tag seen per namespace)
    pub(crate) max_point: u32,
    pub(crate) max_line: u32,
    pub(crate) max_line_loop: u32,
    pub(crate) max_surface: u32,
    pub(crate) max_surface_loop: u32,
    pub(crate) max_volume: u32,

    // Annotations
    pub(crate) physical_groups: Vec<PhysicalGroup>,
    pub(crate) physical_index: FxHashMap<(DimensionClass, String), usize>,
    pub(crate) periodics: Vec<PeriodicRelation>,
}

impl GeometryModel {
    /// Creates a new, empty model with default options.
    pub fn new() -> Self {
        Self::with_options(ModelOptions::default())
    }

    /// Creates a new, empty model with the given options.
    pub fn with_options(options: ModelOptions) -> Self {
        Self {
            options,

            points: FxHashMap::default(),
            lines: FxHashMap::default(),
            line_loops: FxHashMap::default(),
            surfaces: FxHashMap::default(),
            surface_loops: FxHashMap::default(),
            volumes: FxHashMap::default(),

            point_order: Vec::new(),
            line_order: Vec::new(),
            line_loop_order: Vec::new(),
            surface_order: Vec::new(),
            surface_loop_order: Vec::new(),
            volume_order: Vec::new(),

            max_point: 0,
            max_line: 0,
            max_line_loop: 0,
            max_surface: 0,
            max_surface_loop: 0,
            max_volume: 0,

            physical_groups: Vec::new(),
            physical_index: FxHashMap::default(),
            periodics: Vec::new(),
        }
    }

    /// Construction options in effect.
    pub fn options(&self) -> ModelOptions {
        self.options
    }

    // --- Tag allocators (gmsh semantics: next free tag = max + 1) ---

    /// Next free point tag (`newp`).
    pub fn new_point_tag(&self) -> PointTag {
        PointTag(self.max_point + 1)
    }

    /// Next free line tag (`newl`).
    pub fn new_line_tag(&self) -> LineTag {
        LineTag(self.max_line + 1)
    }

    /// Next free line loop tag (`newll`).
    pub fn new_line_loop_tag(&self) -> LineLoopTag {
        LineLoopTag(self.max_line_loop + 1)
    }

    /// Next free surface tag (`news`).
    pub fn new_surface_tag(&self) -> SurfaceTag {
        SurfaceTag(self.max_surface + 1)
    }

    /// Next free surface loop tag (`newsl`).
    pub fn new_surface_loop_tag(&self) -> SurfaceLoopTag {
        SurfaceLoopTag(self.max_surface_loop + 1)
    }

    /// Next free volume tag (`newv`).
    pub fn new_volume_tag(&self) -> VolumeTag {
        VolumeTag(self.max_volume + 1)
    }

    // --- Point operations ---

    /// Returns the point data for the given tag, or `None` if not declared.
    pub fn point(&self, tag: PointTag) -> Option<&PointData> {
        self.points.get(&tag)
    }

    /// Number of declared points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Points in declaration order.
    pub fn points(&self) -> impl Iterator<Item = (PointTag, &PointData)> {
        self.point_order.iter().map(|t| (*t, &self.points[t]))
    }

    /// Coordinates of a point as `[x, y, z]`.
    pub fn point_coords(&self, tag: PointTag) -> Option<[f64; 3]> {
        self.points.get(&tag).map(|p| [p.x, p.y, p.z])
    }

    // --- Line operations ---

    /// Returns the line data for the given tag, or `None` if not declared.
    pub fn line(&self, tag: LineTag) -> Option<&LineData> {
        self.lines.get(&tag)
    }

    /// Number of declared lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Lines in declaration order.
    pub fn lines(&self) -> impl Iterator<Item = (LineTag, &LineData)> {
        self.line_order.iter().map(|t| (*t, &self.lines[t]))
    }

    // --- Line loop operations ---

    /// Returns the line loop data for the given tag, or `None` if not declared.
    pub fn line_loop(&self, tag: LineLoopTag) -> Option<&LineLoopData> {
        self.line_loops.get(&tag)
    }

    /// Number of declared line loops.
    pub fn line_loop_count(&self) -> usize {
        self.line_loops.len()
    }

    /// Line loops in declaration order.
    pub fn line_loops(&self) -> impl Iterator<Item = (LineLoopTag, &LineLoopData)> {
        self.line_loop_order
            .iter()
            .map(|t| (*t, &self.line_loops[t]))
    }

    // --- Surface operations ---

    /// Returns the surface data for the given tag, or `None` if not declared.
    pub fn surface(&self, tag: SurfaceTag) -> Option<&SurfaceData> {
        self.surfaces.get(&tag)
    }

    /// Number of declared surfaces.
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Surfaces in declaration order.
    pub fn surfaces(&self) -> impl Iterator<Item = (SurfaceTag, &SurfaceData)> {
        self.surface_order.iter().map(|t| (*t, &self.surfaces[t]))
    }

    // --- Surface loop operations ---

    /// Returns the surface loop data for the given tag, or `None` if not declared.
    pub fn surface_loop(&self, tag: SurfaceLoopTag) -> Option<&SurfaceLoopData> {
        self.surface_loops.get(&tag)
    }

    /// Number of declared surface loops.
    pub fn surface_loop_count(&self) -> usize {
        self.surface_loops.len()
    }

    /// Surface loops in declaration order.
    pub fn surface_loops(&self) -> impl Iterator<Item = (SurfaceLoopTag, &SurfaceLoopData)> {
        self.surface_loop_order
            .iter()
            .map(|t| (*t, &self.surface_loops[t]))
    }

    // --- Volume operations ---

    /// Returns the volume data for the given tag, or `None` if not declared.
    pub fn volume(&self, tag: VolumeTag) -> Option<&VolumeData> {
        self.volumes.get(&tag)
    }

    /// Number of declared volumes.
    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    /// Volumes in declaration order.
    pub fn volumes(&self) -> impl Iterator<Item = (VolumeTag, &VolumeData)> {
        self.volume_order.iter().map(|t| (*t, &self.volumes[t]))
    }

    // --- Annotations ---

    /// Physical groups in declaration order. A re-declared (name, dimension)
    /// pair keeps its original position with the latest member set.
    pub fn physical_groups(&self) -> &[PhysicalGroup] {
        &self.physical_groups
    }

    /// Looks up a physical group by dimension class and name.
    pub fn physical_group(&self, dim: DimensionClass, name: &str) -> Option<&PhysicalGroup> {
        self.physical_index
            .get(&(dim, name.to_string()))
            .map(|&i| &self.physical_groups[i])
    }

    /// Periodic surface relations in declaration order.
    pub fn periodic_relations(&self) -> &[PeriodicRelation] {
        &self.periodics
    }
}

impl Default for GeometryModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_model_is_empty() {
        let model = GeometryModel::new();
        assert_eq!(model.point_count(), 0);
        assert_eq!(model.line_count(), 0);
        assert_eq!(model.line_loop_count(), 0);
        assert_eq!(model.surface_count(), 0);
        assert_eq!(model.surface_loop_count(), 0);
        assert_eq!(model.volume_count(), 0);
        assert!(model.physical_groups().is_empty());
        assert!(model.periodic_relations().is_empty());
    }

    #[test]
    fn allocators_start_at_one() {
        let model = GeometryModel::new();
        assert_eq!(model.new_point_tag(), PointTag(1));
        assert_eq!(model.new_volume_tag(), VolumeTag(1));
    }

    #[test]
    fn allocator_tracks_watermark_not_count() {
        let mut model = GeometryModel::new();
        // Declaring a high tag advances the allocator past it
        model.add_point(PointTag(10), 0.0, 0.0, 0.0, None).unwrap();
        assert_eq!(model.new_point_tag(), PointTag(11));
        assert_eq!(model.point_count(), 1);
    }

    #[test]
    fn point_coords_helper() {
        let mut model = GeometryModel::new();
        let tag = model.new_point_tag();
        model.add_point(tag, -5.0, 0.0, 10.5, None).unwrap();
        assert_eq!(model.point_coords(tag), Some([-5.0, 0.0, 10.5]));
    }

    #[test]
    fn declaration_order_is_preserved() {
        let mut model = GeometryModel::new();
        model.add_point(PointTag(3), 0.0, 0.0, 0.0, None).unwrap();
        model.add_point(PointTag(1), 1.0, 0.0, 0.0, None).unwrap();
        model.add_point(PointTag(2), 2.0, 0.0, 0.0, None).unwrap();

        let order: Vec<u32> = model.points().map(|(t, _)| t.value()).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }
}
