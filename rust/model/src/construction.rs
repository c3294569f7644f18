// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction methods for geometry entities.
//!
//! Every entity is created through the model, which enforces referential
//! integrity: all referenced sub-entities must already exist, and a tag may
//! be declared only once within its namespace. Loop closure validation is
//! controlled by [`ModelOptions`](crate::ModelOptions).

use crate::annotation::{PeriodicRelation, PhysicalGroup};
use crate::error::{Error, Result};
use crate::model::*;
use crate::tags::*;
use crate::transform::AffineTransform;
use geoscript_core::DimensionClass;

impl GeometryModel {
    /// Declares a point. Fails only if the tag is already taken.
    pub fn add_point(
        &mut self,
        tag: PointTag,
        x: f64,
        y: f64,
        z: f64,
        char_length: Option<f64>,
    ) -> Result<PointTag> {
        if self.points.contains_key(&tag) {
            return Err(Error::DuplicateTag(EntityKind::Point, tag.value()));
        }

        self.points.insert(
            tag,
            PointData {
                x,
                y,
                z,
                char_length,
            },
        );
        self.point_order.push(tag);
        self.max_point = self.max_point.max(tag.value());
        Ok(tag)
    }

    /// Declares a directed line between two existing points.
    pub fn add_line(&mut self, tag: LineTag, start: PointTag, end: PointTag) -> Result<LineTag> {
        if self.lines.contains_key(&tag) {
            return Err(Error::DuplicateTag(EntityKind::Line, tag.value()));
        }
        if !self.points.contains_key(&start) {
            return Err(Error::PointNotFound(start));
        }
        if !self.points.contains_key(&end) {
            return Err(Error::PointNotFound(end));
        }

        self.lines.insert(tag, LineData { start, end });
        self.line_order.push(tag);
        self.max_line = self.max_line.max(tag.value());
        Ok(tag)
    }

    /// Declares a line loop from signed line references.
    ///
    /// When loop-closure validation is enabled, the sign-adjusted traversal
    /// must chain endpoint-to-endpoint into a closed cycle.
    pub fn add_line_loop(&mut self, tag: LineLoopTag, lines: &[SignedLine]) -> Result<LineLoopTag> {
        if self.line_loops.contains_key(&tag) {
            return Err(Error::DuplicateTag(EntityKind::LineLoop, tag.value()));
        }
        if lines.is_empty() {
            return Err(Error::EmptyLoop);
        }
        for sl in lines {
            if !self.lines.contains_key(&sl.line) {
                return Err(Error::LineNotFound(sl.line));
            }
        }

        if self.options.validate_loop_closure {
            self.check_loop_closure(lines)?;
        }

        self.line_loops.insert(
            tag,
            LineLoopData {
                lines: lines.to_vec(),
            },
        );
        self.line_loop_order.push(tag);
        self.max_line_loop = self.max_line_loop.max(tag.value());
        Ok(tag)
    }

    /// Declares a plane surface bounded by an outer loop and optional holes.
    pub fn add_plane_surface(
        &mut self,
        tag: SurfaceTag,
        outer_loop: LineLoopTag,
        holes: &[LineLoopTag],
    ) -> Result<SurfaceTag> {
        if self.surfaces.contains_key(&tag) {
            return Err(Error::DuplicateTag(EntityKind::Surface, tag.value()));
        }
        if !self.line_loops.contains_key(&outer_loop) {
            return Err(Error::LineLoopNotFound(outer_loop));
        }
        for hole in holes {
            if !self.line_loops.contains_key(hole) {
                return Err(Error::LineLoopNotFound(*hole));
            }
        }

        self.surfaces.insert(
            tag,
            SurfaceData {
                outer_loop,
                holes: holes.to_vec(),
            },
        );
        self.surface_order.push(tag);
        self.max_surface = self.max_surface.max(tag.value());
        Ok(tag)
    }

    /// Declares a surface loop (closed shell) over existing surfaces.
    pub fn add_surface_loop(
        &mut self,
        tag: SurfaceLoopTag,
        surfaces: &[SurfaceTag],
    ) -> Result<SurfaceLoopTag> {
        if self.surface_loops.contains_key(&tag) {
            return Err(Error::DuplicateTag(EntityKind::SurfaceLoop, tag.value()));
        }
        if surfaces.is_empty() {
            return Err(Error::EmptyShell);
        }
        for s in surfaces {
            if !self.surfaces.contains_key(s) {
                return Err(Error::SurfaceNotFound(*s));
            }
        }

        self.surface_loops.insert(
            tag,
            SurfaceLoopData {
                surfaces: surfaces.to_vec(),
            },
        );
        self.surface_loop_order.push(tag);
        self.max_surface_loop = self.max_surface_loop.max(tag.value());
        Ok(tag)
    }

    /// Declares a volume bounded by an existing surface loop.
    pub fn add_volume(&mut self, tag: VolumeTag, shell: SurfaceLoopTag) -> Result<VolumeTag> {
        if self.volumes.contains_key(&tag) {
            return Err(Error::DuplicateTag(EntityKind::Volume, tag.value()));
        }
        if !self.surface_loops.contains_key(&shell) {
            return Err(Error::SurfaceLoopNotFound(shell));
        }

        self.volumes.insert(tag, VolumeData { shell });
        self.volume_order.push(tag);
        self.max_volume = self.max_volume.max(tag.value());
        Ok(tag)
    }

    /// Declares (or re-declares) a physical group. Every member must exist
    /// in the namespace selected by `dim`. Re-declaring a (name, dimension)
    /// pair replaces the member set, keeping the original declaration slot.
    pub fn set_physical_group(
        &mut self,
        name: &str,
        dim: DimensionClass,
        members: &[u32],
    ) -> Result<()> {
        for &m in members {
            match dim {
                DimensionClass::Point => {
                    if !self.points.contains_key(&PointTag(m)) {
                        return Err(Error::PointNotFound(PointTag(m)));
                    }
                }
                DimensionClass::Curve => {
                    if !self.lines.contains_key(&LineTag(m)) {
                        return Err(Error::LineNotFound(LineTag(m)));
                    }
                }
                DimensionClass::Surface => {
                    if !self.surfaces.contains_key(&SurfaceTag(m)) {
                        return Err(Error::SurfaceNotFound(SurfaceTag(m)));
                    }
                }
                DimensionClass::Volume => {
                    if !self.volumes.contains_key(&VolumeTag(m)) {
                        return Err(Error::VolumeNotFound(VolumeTag(m)));
                    }
                }
            }
        }

        let key = (dim, name.to_string());
        match self.physical_index.get(&key) {
            Some(&i) => {
                // Last-write-wins
                self.physical_groups[i].members = members.to_vec();
            }
            None => {
                self.physical_groups.push(PhysicalGroup {
                    name: name.to_string(),
                    dim,
                    members: members.to_vec(),
                });
                self.physical_index.insert(key, self.physical_groups.len() - 1);
            }
        }
        Ok(())
    }

    /// Declares a periodic correspondence between two existing surfaces.
    pub fn add_periodic(
        &mut self,
        target: SurfaceTag,
        source: SurfaceTag,
        transform: AffineTransform,
    ) -> Result<()> {
        if !self.surfaces.contains_key(&target) {
            return Err(Error::SurfaceNotFound(target));
        }
        if !self.surfaces.contains_key(&source) {
            return Err(Error::SurfaceNotFound(source));
        }

        self.periodics.push(PeriodicRelation {
            target,
            source,
            transform,
        });
        Ok(())
    }

    /// Walks the signed lines and verifies each sign-adjusted endpoint meets
    /// the next line's start, wrapping around at the end.
    fn check_loop_closure(&self, lines: &[SignedLine]) -> Result<()> {
        let endpoint = |sl: &SignedLine| {
            let data = &self.lines[&sl.line];
            if sl.reversed {
                (data.end, data.start)
            } else {
                (data.start, data.end)
            }
        };

        for i in 0..lines.len() {
            let next = (i + 1) % lines.len();
            let (_, end) = endpoint(&lines[i]);
            let (start, _) = endpoint(&lines[next]);
            if end != start {
                return Err(Error::UnclosedLoop { at: i, next });
            }
        }
        Ok(())
    }
}
