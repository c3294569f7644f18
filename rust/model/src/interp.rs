// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Script interpreter: executes parsed statements against a
//! [`GeometryModel`].
//!
//! The interpreter owns the script's variable bindings. Allocator keywords
//! (`newp`, `newll`, ...) evaluate to the current next-free tag of their
//! namespace; the tag only advances when an entity is actually created, so
//! `p = newp; Point(p) = {...};` works the way the format intends.
//!
//! Construction is single-threaded, synchronous and append-only. Any failure
//! aborts immediately, wrapped with the 1-based line of the failing
//! statement.

use rustc_hash::FxHashMap;

use geoscript_core::{parse_script, AllocKind, Expr, Statement};

use crate::error::{Error, Result};
use crate::model::{GeometryModel, ModelOptions, SignedLine};
use crate::tags::*;
use crate::transform::AffineTransform;

/// Executes `.geo` statements against a geometry model.
pub struct ScriptInterpreter {
    model: GeometryModel,
    bindings: FxHashMap<String, f64>,
}

impl ScriptInterpreter {
    /// Creates an interpreter over an empty model with default options.
    pub fn new() -> Self {
        Self::with_options(ModelOptions::default())
    }

    /// Creates an interpreter over an empty model with the given options.
    pub fn with_options(options: ModelOptions) -> Self {
        Self {
            model: GeometryModel::with_options(options),
            bindings: FxHashMap::default(),
        }
    }

    /// Parses and executes a whole script. Statements take effect in order;
    /// on error the model keeps everything built before the failing
    /// statement.
    pub fn run(&mut self, source: &str) -> Result<()> {
        let statements = parse_script(source)?;
        for (line, stmt) in &statements {
            self.execute(stmt).map_err(|e| Error::at_line(*line, e))?;
        }
        Ok(())
    }

    /// Executes a single parsed statement.
    pub fn execute(&mut self, stmt: &Statement) -> Result<()> {
        match stmt {
            Statement::Assign { name, value } => {
                let v = self.eval(value)?;
                self.bindings.insert((*name).to_string(), v);
            }
            Statement::Point { tag, args } => {
                if args.len() != 3 && args.len() != 4 {
                    return Err(Error::WrongArity {
                        constructor: "Point",
                        expected: "3 or 4",
                        got: args.len(),
                    });
                }
                let tag = PointTag(self.eval_tag(tag)?);
                let x = self.eval(&args[0])?;
                let y = self.eval(&args[1])?;
                let z = self.eval(&args[2])?;
                let lc = match args.get(3) {
                    Some(e) => Some(self.eval(e)?),
                    None => None,
                };
                self.model.add_point(tag, x, y, z, lc)?;
            }
            Statement::Line { tag, args } => {
                if args.len() != 2 {
                    return Err(Error::WrongArity {
                        constructor: "Line",
                        expected: "2",
                        got: args.len(),
                    });
                }
                let tag = LineTag(self.eval_tag(tag)?);
                let start = PointTag(self.eval_tag(&args[0])?);
                let end = PointTag(self.eval_tag(&args[1])?);
                self.model.add_line(tag, start, end)?;
            }
            Statement::LineLoop { tag, args } => {
                let tag = LineLoopTag(self.eval_tag(tag)?);
                let mut lines = Vec::with_capacity(args.len());
                for arg in args {
                    let (value, reversed) = self.eval_signed_tag(arg)?;
                    lines.push(SignedLine {
                        line: LineTag(value),
                        reversed,
                    });
                }
                self.model.add_line_loop(tag, &lines)?;
            }
            Statement::PlaneSurface { tag, args } => {
                if args.is_empty() {
                    return Err(Error::WrongArity {
                        constructor: "Plane Surface",
                        expected: "1 or more",
                        got: 0,
                    });
                }
                let tag = SurfaceTag(self.eval_tag(tag)?);
                let outer = LineLoopTag(self.eval_tag(&args[0])?);
                let mut holes = Vec::with_capacity(args.len() - 1);
                for arg in &args[1..] {
                    holes.push(LineLoopTag(self.eval_tag(arg)?));
                }
                self.model.add_plane_surface(tag, outer, &holes)?;
            }
            Statement::SurfaceLoop { tag, args } => {
                let tag = SurfaceLoopTag(self.eval_tag(tag)?);
                let mut surfaces = Vec::with_capacity(args.len());
                for arg in args {
                    surfaces.push(SurfaceTag(self.eval_tag(arg)?));
                }
                self.model.add_surface_loop(tag, &surfaces)?;
            }
            Statement::Volume { tag, args } => {
                if args.len() != 1 {
                    return Err(Error::WrongArity {
                        constructor: "Volume",
                        expected: "1",
                        got: args.len(),
                    });
                }
                let tag = VolumeTag(self.eval_tag(tag)?);
                let shell = SurfaceLoopTag(self.eval_tag(&args[0])?);
                self.model.add_volume(tag, shell)?;
            }
            Statement::Physical { dim, name, members } => {
                let mut tags = Vec::with_capacity(members.len());
                for m in members {
                    tags.push(self.eval_tag(m)?);
                }
                self.model.set_physical_group(name, *dim, &tags)?;
            }
            Statement::Periodic {
                targets,
                sources,
                translation,
            } => {
                if targets.len() != sources.len() {
                    return Err(Error::PeriodicLengthMismatch {
                        targets: targets.len(),
                        sources: sources.len(),
                    });
                }
                let dx = self.eval(&translation[0])?;
                let dy = self.eval(&translation[1])?;
                let dz = self.eval(&translation[2])?;
                let transform = AffineTransform::translation(dx, dy, dz);

                for (t, s) in targets.iter().zip(sources.iter()) {
                    let target = SurfaceTag(self.eval_tag(t)?);
                    let source = SurfaceTag(self.eval_tag(s)?);
                    self.model.add_periodic(target, source, transform.clone())?;
                }
            }
        }
        Ok(())
    }

    /// Consumes the interpreter, returning the built model.
    pub fn finish(self) -> GeometryModel {
        self.model
    }

    /// Read access to the model mid-build.
    pub fn model(&self) -> &GeometryModel {
        &self.model
    }

    /// Evaluates an expression to a number.
    fn eval(&self, expr: &Expr) -> Result<f64> {
        match expr {
            Expr::Number(n) => Ok(*n),
            Expr::Ident(name) => self
                .bindings
                .get(*name)
                .copied()
                .ok_or_else(|| Error::UnboundVariable((*name).to_string())),
            Expr::Alloc(kind) => Ok(self.next_tag(*kind) as f64),
            Expr::Neg(inner) => Ok(-self.eval(inner)?),
        }
    }

    /// Evaluates an expression to a positive integer tag.
    fn eval_tag(&self, expr: &Expr) -> Result<u32> {
        let value = self.eval(expr)?;
        if value.fract() != 0.0 || value < 1.0 || value > u32::MAX as f64 {
            return Err(Error::InvalidTag(value));
        }
        Ok(value as u32)
    }

    /// Evaluates a signed entity reference, returning (tag, reversed).
    fn eval_signed_tag(&self, expr: &Expr) -> Result<(u32, bool)> {
        let reversed = expr.is_negated();
        let tag = self.eval_tag(expr.unsigned())?;
        Ok((tag, reversed))
    }

    /// Current next-free tag for an allocator keyword.
    fn next_tag(&self, kind: AllocKind) -> u32 {
        match kind {
            AllocKind::Point => self.model.new_point_tag().value(),
            AllocKind::Line => self.model.new_line_tag().value(),
            AllocKind::LineLoop => self.model.new_line_loop_tag().value(),
            AllocKind::Surface => self.model.new_surface_tag().value(),
            AllocKind::SurfaceLoop => self.model.new_surface_loop_tag().value(),
            AllocKind::Volume => self.model.new_volume_tag().value(),
        }
    }
}

impl Default for ScriptInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses and executes a script, returning the built model.
pub fn build_model(source: &str) -> Result<GeometryModel> {
    let mut interp = ScriptInterpreter::new();
    interp.run(source)?;
    Ok(interp.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoscript_core::DimensionClass;

    #[test]
    fn allocator_binding_then_construction() {
        let model = build_model(
            "p0 = newp;\n\
             Point(p0) = {0, 0, 0};\n\
             p1 = newp;\n\
             Point(p1) = {0, 0, 1};\n\
             Line(newl) = {p0, p1};\n",
        )
        .unwrap();

        assert_eq!(model.point_count(), 2);
        assert_eq!(model.line_count(), 1);
        let line = model.line(LineTag(1)).unwrap();
        assert_eq!(line.start, PointTag(1));
        assert_eq!(line.end, PointTag(2));
    }

    #[test]
    fn allocator_does_not_advance_without_creation() {
        let mut interp = ScriptInterpreter::new();
        interp.run("a = newp;\nb = newp;\n").unwrap();
        // Both bindings see the same next-free tag
        interp
            .run("Point(a) = {0, 0, 0};")
            .expect("a and b alias tag 1");
        assert!(interp.run("Point(b) = {1, 0, 0};").is_err());
    }

    #[test]
    fn variables_in_coordinates() {
        let model = build_model("lc = 0.25;\nPoint(1) = {0, 0, 0, lc};\n").unwrap();
        assert_eq!(model.point(PointTag(1)).unwrap().char_length, Some(0.25));
    }

    #[test]
    fn unbound_variable_reported_with_line() {
        let err = build_model("Point(1) = {0, 0, zmax};\n").unwrap_err();
        match err {
            Error::Statement { line, source } => {
                assert_eq!(line, 1);
                assert!(matches!(*source, Error::UnboundVariable(ref n) if n == "zmax"));
            }
            other => panic!("expected Statement wrapper, got {other:?}"),
        }
    }

    #[test]
    fn unknown_point_reference_fails() {
        let err = build_model(
            "Point(1) = {0, 0, 0};\n\
             Line(1) = {1, 99};\n",
        )
        .unwrap_err();
        match err {
            Error::Statement { line, source } => {
                assert_eq!(line, 2);
                assert!(matches!(*source, Error::PointNotFound(PointTag(99))));
            }
            other => panic!("expected Statement wrapper, got {other:?}"),
        }
    }

    #[test]
    fn signed_loop_references() {
        let model = build_model(
            "Point(1) = {0, 0, 0};\n\
             Point(2) = {1, 0, 0};\n\
             Point(3) = {1, 1, 0};\n\
             Line(1) = {1, 2};\n\
             Line(2) = {2, 3};\n\
             Line(3) = {1, 3};\n\
             Line Loop(1) = {1, 2, -3};\n",
        )
        .unwrap();

        let ll = model.line_loop(LineLoopTag(1)).unwrap();
        assert!(!ll.lines[0].reversed);
        assert!(ll.lines[2].reversed);
    }

    #[test]
    fn fractional_tag_rejected() {
        let err = build_model("Point(1.5) = {0, 0, 0};\n").unwrap_err();
        match err {
            Error::Statement { source, .. } => {
                assert!(matches!(*source, Error::InvalidTag(v) if v == 1.5));
            }
            other => panic!("expected Statement wrapper, got {other:?}"),
        }
    }

    #[test]
    fn point_arity_enforced() {
        let err = build_model("Point(1) = {0, 0};\n").unwrap_err();
        match err {
            Error::Statement { source, .. } => {
                assert!(matches!(*source, Error::WrongArity { got: 2, .. }));
            }
            other => panic!("expected Statement wrapper, got {other:?}"),
        }
    }

    #[test]
    fn periodic_lists_pair_elementwise() {
        let model = build_model(
            "Point(1) = {0, 0, 0};\n\
             Point(2) = {1, 0, 0};\n\
             Point(3) = {1, 1, 0};\n\
             Point(4) = {0, 1, 0};\n\
             Line(1) = {1, 2};\n\
             Line(2) = {2, 3};\n\
             Line(3) = {3, 4};\n\
             Line(4) = {4, 1};\n\
             Line Loop(1) = {1, 2, 3, 4};\n\
             Plane Surface(1) = {1};\n\
             Plane Surface(2) = {1};\n\
             Periodic Surface {2} = {1} Translate {1, 0, 0};\n",
        )
        .unwrap();

        let rel = &model.periodic_relations()[0];
        assert_eq!(rel.target, SurfaceTag(2));
        assert_eq!(rel.source, SurfaceTag(1));
        let v = rel.transform.translation_vector();
        assert_eq!((v.x, v.y, v.z), (1.0, 0.0, 0.0));
    }

    #[test]
    fn periodic_length_mismatch_rejected() {
        let err = build_model(
            "Point(1) = {0, 0, 0};\n\
             Point(2) = {1, 0, 0};\n\
             Point(3) = {1, 1, 0};\n\
             Point(4) = {0, 1, 0};\n\
             Line(1) = {1, 2};\n\
             Line(2) = {2, 3};\n\
             Line(3) = {3, 4};\n\
             Line(4) = {4, 1};\n\
             Line Loop(1) = {1, 2, 3, 4};\n\
             Plane Surface(1) = {1};\n\
             Plane Surface(2) = {1};\n\
             Periodic Surface {1, 2} = {1} Translate {1, 0, 0};\n",
        )
        .unwrap_err();

        match err {
            Error::Statement { source, .. } => assert!(matches!(
                *source,
                Error::PeriodicLengthMismatch {
                    targets: 2,
                    sources: 1
                }
            )),
            other => panic!("expected Statement wrapper, got {other:?}"),
        }
    }

    #[test]
    fn physical_group_redeclaration() {
        let model = build_model(
            "Point(1) = {0, 0, 0};\n\
             Point(2) = {1, 0, 0};\n\
             Point(3) = {1, 1, 0};\n\
             Line(1) = {1, 2};\n\
             Line(2) = {2, 3};\n\
             Line(3) = {3, 1};\n\
             Line Loop(1) = {1, 2, 3};\n\
             Plane Surface(1) = {1};\n\
             Plane Surface(2) = {1};\n\
             Physical Surface(\"dirichlet\") = {1};\n\
             Physical Surface(\"dirichlet\") = {2};\n",
        )
        .unwrap();

        let group = model
            .physical_group(DimensionClass::Surface, "dirichlet")
            .unwrap();
        assert_eq!(group.members, vec![2]);
        assert_eq!(model.physical_groups().len(), 1);
    }
}
