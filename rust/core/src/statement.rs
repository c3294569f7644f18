// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Statement AST for the `.geo` geometry-description grammar.
//!
//! Statements borrow identifier and name slices from the source script
//! (zero-copy). Argument lists use [`smallvec::SmallVec`] since almost all
//! real argument lists hold 2-4 entries (coordinates, line endpoints).

use smallvec::SmallVec;

/// Tag allocator keywords. Each entity category has its own allocator and
/// its own tag namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AllocKind {
    /// `newp` - next free point tag
    Point,
    /// `newl` - next free line tag
    Line,
    /// `newll` - next free line loop tag
    LineLoop,
    /// `news` - next free surface tag
    Surface,
    /// `newsl` - next free surface loop tag
    SurfaceLoop,
    /// `newv` - next free volume tag
    Volume,
}

impl AllocKind {
    /// Returns the script keyword for this allocator.
    pub fn keyword(&self) -> &'static str {
        match self {
            AllocKind::Point => "newp",
            AllocKind::Line => "newl",
            AllocKind::LineLoop => "newll",
            AllocKind::Surface => "news",
            AllocKind::SurfaceLoop => "newsl",
            AllocKind::Volume => "newv",
        }
    }

    /// Resolves a script keyword to an allocator kind.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "newp" => Some(AllocKind::Point),
            "newl" => Some(AllocKind::Line),
            "newll" => Some(AllocKind::LineLoop),
            "news" => Some(AllocKind::Surface),
            "newsl" => Some(AllocKind::SurfaceLoop),
            "newv" => Some(AllocKind::Volume),
            _ => None,
        }
    }
}

/// Dimension class of a physical group (`Physical Point|Line|Surface|Volume`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DimensionClass {
    Point,
    Curve,
    Surface,
    Volume,
}

impl DimensionClass {
    /// Returns the keyword used in `Physical` statements.
    pub fn keyword(&self) -> &'static str {
        match self {
            DimensionClass::Point => "Point",
            DimensionClass::Curve => "Line",
            DimensionClass::Surface => "Surface",
            DimensionClass::Volume => "Volume",
        }
    }

    /// Resolves a `Physical` keyword. Accepts both the legacy `Line` and the
    /// newer `Curve` spelling for the 1-dimensional class.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "Point" => Some(DimensionClass::Point),
            "Line" | "Curve" => Some(DimensionClass::Curve),
            "Surface" => Some(DimensionClass::Surface),
            "Volume" => Some(DimensionClass::Volume),
            _ => None,
        }
    }

    /// Topological dimension (0-3).
    pub fn dim(&self) -> u8 {
        match self {
            DimensionClass::Point => 0,
            DimensionClass::Curve => 1,
            DimensionClass::Surface => 2,
            DimensionClass::Volume => 3,
        }
    }
}

impl std::fmt::Display for DimensionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// An argument expression: numeric literal, variable reference, allocator
/// keyword, or negation. A leading `-` on an entity reference encodes
/// reversed traversal orientation, so negation is preserved structurally
/// rather than folded into the value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Expr<'a> {
    /// Numeric literal: `0.5`, `3`, `1e-2`
    Number(f64),
    /// Variable reference: `lc`, `p1`
    Ident(&'a str),
    /// Allocator keyword: `newp`, `newll`, ...
    Alloc(AllocKind),
    /// Unary minus: `-l3` (reversed orientation) or `-0.5`
    Neg(Box<Expr<'a>>),
}

impl<'a> Expr<'a> {
    /// Evaluates the expression if it is a pure numeric literal (folding
    /// negation). Identifiers and allocators require interpreter context.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Number(n) => Some(*n),
            Expr::Neg(inner) => inner.as_number().map(|n| -n),
            _ => None,
        }
    }

    /// `true` if the expression carries an odd number of leading minus signs.
    pub fn is_negated(&self) -> bool {
        match self {
            Expr::Neg(inner) => !inner.is_negated(),
            _ => false,
        }
    }

    /// Strips all leading negations, returning the innermost expression.
    pub fn unsigned(&self) -> &Expr<'a> {
        match self {
            Expr::Neg(inner) => inner.unsigned(),
            other => other,
        }
    }
}

/// Argument list. Inline capacity of 4 covers coordinates, line endpoints
/// and most loop references without heap allocation.
pub type ExprList<'a> = SmallVec<[Expr<'a>; 4]>;

/// One parsed `.geo` statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Statement<'a> {
    /// `ident = newp;` or `lc = 0.5;`
    Assign { name: &'a str, value: Expr<'a> },
    /// `Point(t) = {x, y, z [, lc]};`
    Point { tag: Expr<'a>, args: ExprList<'a> },
    /// `Line(t) = {start, end};`
    Line { tag: Expr<'a>, args: ExprList<'a> },
    /// `Line Loop(t) = {±l1, ±l2, ...};`
    LineLoop { tag: Expr<'a>, args: ExprList<'a> },
    /// `Plane Surface(t) = {ll [, hole loops...]};`
    PlaneSurface { tag: Expr<'a>, args: ExprList<'a> },
    /// `Surface Loop(t) = {s1, s2, ...};`
    SurfaceLoop { tag: Expr<'a>, args: ExprList<'a> },
    /// `Volume(t) = {sl};`
    Volume { tag: Expr<'a>, args: ExprList<'a> },
    /// `Physical Surface("name") = {refs};`
    Physical {
        dim: DimensionClass,
        name: &'a str,
        members: ExprList<'a>,
    },
    /// `Periodic Surface {targets} = {sources} Translate {dx, dy, dz};`
    Periodic {
        targets: ExprList<'a>,
        sources: ExprList<'a>,
        translation: [Expr<'a>; 3],
    },
}

impl<'a> Statement<'a> {
    /// Short kind name, used for statistics and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Assign { .. } => "Assign",
            Statement::Point { .. } => "Point",
            Statement::Line { .. } => "Line",
            Statement::LineLoop { .. } => "Line Loop",
            Statement::PlaneSurface { .. } => "Plane Surface",
            Statement::SurfaceLoop { .. } => "Surface Loop",
            Statement::Volume { .. } => "Volume",
            Statement::Physical { .. } => "Physical",
            Statement::Periodic { .. } => "Periodic Surface",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_keyword_round_trip() {
        for kind in [
            AllocKind::Point,
            AllocKind::Line,
            AllocKind::LineLoop,
            AllocKind::Surface,
            AllocKind::SurfaceLoop,
            AllocKind::Volume,
        ] {
            assert_eq!(AllocKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(AllocKind::from_keyword("newx"), None);
    }

    #[test]
    fn dimension_class_keywords() {
        assert_eq!(
            DimensionClass::from_keyword("Line"),
            Some(DimensionClass::Curve)
        );
        assert_eq!(
            DimensionClass::from_keyword("Curve"),
            Some(DimensionClass::Curve)
        );
        assert_eq!(DimensionClass::Surface.dim(), 2);
        assert_eq!(DimensionClass::from_keyword("Shell"), None);
    }

    #[test]
    fn expr_negation_folding() {
        let e = Expr::Neg(Box::new(Expr::Number(3.5)));
        assert_eq!(e.as_number(), Some(-3.5));
        assert!(e.is_negated());

        let double = Expr::Neg(Box::new(Expr::Neg(Box::new(Expr::Ident("l1")))));
        assert!(!double.is_negated());
        assert_eq!(double.unsigned(), &Expr::Ident("l1"));
    }
}
