// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deterministic re-serialization of a geometry model to the `.geo` grammar.
//!
//! Entities are emitted category by category in declaration order, so a
//! written script rebuilds into a structurally equal model (same tags, same
//! argument lists).

use std::fmt::Write;

use crate::model::GeometryModel;

/// Serializes the model to `.geo` statement text.
pub fn write_geo(model: &GeometryModel) -> String {
    let mut out = String::new();

    for (tag, p) in model.points() {
        match p.char_length {
            Some(lc) => {
                let _ = writeln!(out, "Point({tag}) = {{{}, {}, {}, {}}};", p.x, p.y, p.z, lc);
            }
            None => {
                let _ = writeln!(out, "Point({tag}) = {{{}, {}, {}}};", p.x, p.y, p.z);
            }
        }
    }

    for (tag, l) in model.lines() {
        let _ = writeln!(out, "Line({tag}) = {{{}, {}}};", l.start, l.end);
    }

    for (tag, ll) in model.line_loops() {
        let refs: Vec<String> = ll
            .lines
            .iter()
            .map(|sl| {
                if sl.reversed {
                    format!("-{}", sl.line)
                } else {
                    sl.line.to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "Line Loop({tag}) = {{{}}};", refs.join(", "));
    }

    for (tag, s) in model.surfaces() {
        let mut refs = vec![s.outer_loop.to_string()];
        refs.extend(s.holes.iter().map(|h| h.to_string()));
        let _ = writeln!(out, "Plane Surface({tag}) = {{{}}};", refs.join(", "));
    }

    for (tag, sl) in model.surface_loops() {
        let refs: Vec<String> = sl.surfaces.iter().map(|s| s.to_string()).collect();
        let _ = writeln!(out, "Surface Loop({tag}) = {{{}}};", refs.join(", "));
    }

    for (tag, v) in model.volumes() {
        let _ = writeln!(out, "Volume({tag}) = {{{}}};", v.shell);
    }

    for group in model.physical_groups() {
        let refs: Vec<String> = group.members.iter().map(|m| m.to_string()).collect();
        let _ = writeln!(
            out,
            "Physical {}(\"{}\") = {{{}}};",
            group.dim.keyword(),
            group.name,
            refs.join(", ")
        );
    }

    for rel in model.periodic_relations() {
        let v = rel.transform.translation_vector();
        let _ = writeln!(
            out,
            "Periodic Surface {{{}}} = {{{}}} Translate {{{}, {}, {}}};",
            rel.target, rel.source, v.x, v.y, v.z
        );
    }

    out
}

impl GeometryModel {
    /// Serializes the model to `.geo` statement text.
    pub fn to_geo(&self) -> String {
        write_geo(self)
    }
}
