// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for geometry models.
//!
//! Snapshots are plain declaration-order records keyed by raw tags, so they
//! are portable across consumers that do not share the Rust type layout.
//! Restoring replays the snapshot through the construction API, which
//! re-validates referential integrity.

use serde::{Deserialize, Serialize};

use crate::annotation::PhysicalGroup;
use crate::error::{Error, Result};
use crate::model::{GeometryModel, ModelOptions, SignedLine};
use crate::tags::*;
use crate::transform::AffineTransform;

/// Serializable representation of a full geometry model.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub options: ModelOptions,
    pub points: Vec<PointSnapshot>,
    pub lines: Vec<LineSnapshot>,
    pub line_loops: Vec<LineLoopSnapshot>,
    pub surfaces: Vec<SurfaceSnapshot>,
    pub surface_loops: Vec<SurfaceLoopSnapshot>,
    pub volumes: Vec<VolumeSnapshot>,
    pub physical_groups: Vec<PhysicalGroup>,
    pub periodics: Vec<PeriodicSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointSnapshot {
    pub tag: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_length: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub tag: u32,
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LineLoopSnapshot {
    pub tag: u32,
    /// Signed line tags; a negative value means reversed traversal.
    pub lines: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SurfaceSnapshot {
    pub tag: u32,
    pub outer_loop: u32,
    pub holes: Vec<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SurfaceLoopSnapshot {
    pub tag: u32,
    pub surfaces: Vec<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VolumeSnapshot {
    pub tag: u32,
    pub shell: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PeriodicSnapshot {
    pub target: u32,
    pub source: u32,
    pub translation: [f64; 3],
}

impl ModelSnapshot {
    /// Captures a snapshot of the model in declaration order.
    pub fn capture(model: &GeometryModel) -> Self {
        ModelSnapshot {
            options: model.options(),
            points: model
                .points()
                .map(|(tag, p)| PointSnapshot {
                    tag: tag.value(),
                    x: p.x,
                    y: p.y,
                    z: p.z,
                    char_length: p.char_length,
                })
                .collect(),
            lines: model
                .lines()
                .map(|(tag, l)| LineSnapshot {
                    tag: tag.value(),
                    start: l.start.value(),
                    end: l.end.value(),
                })
                .collect(),
            line_loops: model
                .line_loops()
                .map(|(tag, ll)| LineLoopSnapshot {
                    tag: tag.value(),
                    lines: ll
                        .lines
                        .iter()
                        .map(|sl| {
                            let v = sl.line.value() as i64;
                            if sl.reversed {
                                -v
                            } else {
                                v
                            }
                        })
                        .collect(),
                })
                .collect(),
            surfaces: model
                .surfaces()
                .map(|(tag, s)| SurfaceSnapshot {
                    tag: tag.value(),
                    outer_loop: s.outer_loop.value(),
                    holes: s.holes.iter().map(|h| h.value()).collect(),
                })
                .collect(),
            surface_loops: model
                .surface_loops()
                .map(|(tag, sl)| SurfaceLoopSnapshot {
                    tag: tag.value(),
                    surfaces: sl.surfaces.iter().map(|s| s.value()).collect(),
                })
                .collect(),
            volumes: model
                .volumes()
                .map(|(tag, v)| VolumeSnapshot {
                    tag: tag.value(),
                    shell: v.shell.value(),
                })
                .collect(),
            physical_groups: model.physical_groups().to_vec(),
            periodics: model
                .periodic_relations()
                .iter()
                .map(|rel| {
                    let v = rel.transform.translation_vector();
                    PeriodicSnapshot {
                        target: rel.target.value(),
                        source: rel.source.value(),
                        translation: [v.x, v.y, v.z],
                    }
                })
                .collect(),
        }
    }

    /// Rebuilds a model by replaying the snapshot through the construction
    /// API, re-validating every reference.
    pub fn restore(&self) -> Result<GeometryModel> {
        let mut model = GeometryModel::with_options(self.options);

        for p in &self.points {
            model.add_point(PointTag(p.tag), p.x, p.y, p.z, p.char_length)?;
        }
        for l in &self.lines {
            model.add_line(LineTag(l.tag), PointTag(l.start), PointTag(l.end))?;
        }
        for ll in &self.line_loops {
            let lines: Vec<SignedLine> = ll
                .lines
                .iter()
                .map(|&signed| SignedLine {
                    line: LineTag(signed.unsigned_abs() as u32),
                    reversed: signed < 0,
                })
                .collect();
            model.add_line_loop(LineLoopTag(ll.tag), &lines)?;
        }
        for s in &self.surfaces {
            let holes: Vec<LineLoopTag> = s.holes.iter().map(|&h| LineLoopTag(h)).collect();
            model.add_plane_surface(SurfaceTag(s.tag), LineLoopTag(s.outer_loop), &holes)?;
        }
        for sl in &self.surface_loops {
            let surfaces: Vec<SurfaceTag> = sl.surfaces.iter().map(|&s| SurfaceTag(s)).collect();
            model.add_surface_loop(SurfaceLoopTag(sl.tag), &surfaces)?;
        }
        for v in &self.volumes {
            model.add_volume(VolumeTag(v.tag), SurfaceLoopTag(v.shell))?;
        }
        for group in &self.physical_groups {
            model.set_physical_group(&group.name, group.dim, &group.members)?;
        }
        for rel in &self.periodics {
            let [dx, dy, dz] = rel.translation;
            model.add_periodic(
                SurfaceTag(rel.target),
                SurfaceTag(rel.source),
                AffineTransform::translation(dx, dy, dz),
            )?;
        }

        Ok(model)
    }
}

/// Serializes a model to a JSON string.
pub fn to_json(model: &GeometryModel) -> Result<String> {
    serde_json::to_string(&ModelSnapshot::capture(model))
        .map_err(|e| Error::Serialization(e.to_string()))
}

/// Deserializes a model from a JSON string.
pub fn from_json(json: &str) -> Result<GeometryModel> {
    let snapshot: ModelSnapshot =
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
    snapshot.restore()
}
