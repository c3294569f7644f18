// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end test: a periodic unit cube built from script text, checked for
//! structure, then round-tripped through both the writer and JSON.

use geoscript_core::statement::DimensionClass;
use geoscript_model::{build_model, from_json, to_json, SurfaceTag};

/// Unit cube with the top face periodic to the bottom and the right face
/// periodic to the left.
const PERIODIC_CUBE: &str = "\
lc = 0.25;

// Bottom face corners.
Point(1) = {0, 0, 0, lc};
Point(2) = {1, 0, 0, lc};
Point(3) = {1, 1, 0, lc};
Point(4) = {0, 1, 0, lc};

// Top face corners.
Point(5) = {0, 0, 1, lc};
Point(6) = {1, 0, 1, lc};
Point(7) = {1, 1, 1, lc};
Point(8) = {0, 1, 1, lc};

// Bottom edges.
Line(1) = {1, 2};
Line(2) = {2, 3};
Line(3) = {3, 4};
Line(4) = {4, 1};

// Top edges.
Line(5) = {5, 6};
Line(6) = {6, 7};
Line(7) = {7, 8};
Line(8) = {8, 5};

// Vertical edges.
Line(9) = {1, 5};
Line(10) = {2, 6};
Line(11) = {3, 7};
Line(12) = {4, 8};

Line Loop(1) = {1, 2, 3, 4};
Line Loop(2) = {5, 6, 7, 8};
Line Loop(3) = {1, 10, -5, -9};
Line Loop(4) = {2, 11, -6, -10};
Line Loop(5) = {3, 12, -7, -11};
Line Loop(6) = {4, 9, -8, -12};

Plane Surface(1) = {1};
Plane Surface(2) = {2};
Plane Surface(3) = {3};
Plane Surface(4) = {4};
Plane Surface(5) = {5};
Plane Surface(6) = {6};

Surface Loop(1) = {1, 2, 3, 4, 5, 6};
Volume(1) = {1};

Physical Volume(\"domain\") = {1};
Physical Surface(\"dirichlet\") = {3, 5};

Periodic Surface {2} = {1} Translate {0, 0, 1};
Periodic Surface {4} = {6} Translate {1, 0, 0};
";

#[test]
fn cube_builds_with_expected_counts() {
    let model = build_model(PERIODIC_CUBE).unwrap();

    assert_eq!(model.point_count(), 8);
    assert_eq!(model.line_count(), 12);
    assert_eq!(model.line_loop_count(), 6);
    assert_eq!(model.surface_count(), 6);
    assert_eq!(model.surface_loop_count(), 1);
    assert_eq!(model.volume_count(), 1);
}

#[test]
fn physical_groups_resolve_by_dimension_and_name() {
    let model = build_model(PERIODIC_CUBE).unwrap();

    let domain = model
        .physical_group(DimensionClass::Volume, "domain")
        .unwrap();
    assert_eq!(domain.members, vec![1]);

    let dirichlet = model
        .physical_group(DimensionClass::Surface, "dirichlet")
        .unwrap();
    assert_eq!(dirichlet.members, vec![3, 5]);

    assert!(model
        .physical_group(DimensionClass::Point, "dirichlet")
        .is_none());
}

#[test]
fn periodic_relations_carry_their_translations() {
    let model = build_model(PERIODIC_CUBE).unwrap();
    let rels = model.periodic_relations();
    assert_eq!(rels.len(), 2);

    assert_eq!(rels[0].target, SurfaceTag(2));
    assert_eq!(rels[0].source, SurfaceTag(1));
    let v = rels[0].transform.translation_vector();
    assert_eq!((v.x, v.y, v.z), (0.0, 0.0, 1.0));

    assert_eq!(rels[1].target, SurfaceTag(4));
    assert_eq!(rels[1].source, SurfaceTag(6));
    let v = rels[1].transform.translation_vector();
    assert_eq!((v.x, v.y, v.z), (1.0, 0.0, 0.0));
}

#[test]
fn writer_round_trip_preserves_structure() {
    let model = build_model(PERIODIC_CUBE).unwrap();
    let script = model.to_geo();
    let rebuilt = build_model(&script).unwrap();
    assert_eq!(model, rebuilt);

    // Re-emitting the canonical form is a fixed point.
    assert_eq!(rebuilt.to_geo(), script);
}

#[test]
fn json_round_trip_preserves_structure() {
    let model = build_model(PERIODIC_CUBE).unwrap();
    let json = to_json(&model).unwrap();
    let restored = from_json(&json).unwrap();
    assert_eq!(model, restored);
}

#[test]
fn allocators_build_the_same_bottom_face() {
    let script = "\
        p1 = newp; Point(p1) = {0, 0, 0};\n\
        p2 = newp; Point(p2) = {1, 0, 0};\n\
        p3 = newp; Point(p3) = {1, 1, 0};\n\
        p4 = newp; Point(p4) = {0, 1, 0};\n\
        l1 = newl; Line(l1) = {p1, p2};\n\
        l2 = newl; Line(l2) = {p2, p3};\n\
        l3 = newl; Line(l3) = {p3, p4};\n\
        l4 = newl; Line(l4) = {p4, p1};\n\
        ll = newll; Line Loop(ll) = {l1, l2, l3, l4};\n\
        s = news; Plane Surface(s) = {ll};\n";
    let model = build_model(script).unwrap();

    assert_eq!(model.point_count(), 4);
    assert_eq!(model.surface_count(), 1);
    // Fresh allocators count up from 1 in each namespace.
    let surface = model.surface(SurfaceTag(1)).unwrap();
    assert_eq!(surface.outer_loop.value(), 1);
}
