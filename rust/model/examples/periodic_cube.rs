// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builds a periodic unit cube from script text and prints a summary plus
//! the canonical re-serialized form.
//!
//! Run with: `cargo run --example periodic_cube`

use geoscript_core::parser::StatementScanner;
use geoscript_model::build_model;

const CUBE: &str = "\
lc = 0.25;
Point(1) = {0, 0, 0, lc};
Point(2) = {1, 0, 0, lc};
Point(3) = {1, 1, 0, lc};
Point(4) = {0, 1, 0, lc};
Point(5) = {0, 0, 1, lc};
Point(6) = {1, 0, 1, lc};
Point(7) = {1, 1, 1, lc};
Point(8) = {0, 1, 1, lc};
Line(1) = {1, 2};
Line(2) = {2, 3};
Line(3) = {3, 4};
Line(4) = {4, 1};
Line(5) = {5, 6};
Line(6) = {6, 7};
Line(7) = {7, 8};
Line(8) = {8, 5};
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
Periodic Surface {2} = {1} Translate {0, 0, 1};
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Statement counts ===");
    let mut counts: Vec<_> = StatementScanner::new(CUBE)
        .count_by_kind()
        .into_iter()
        .collect();
    counts.sort();
    for (kind, count) in counts {
        println!("  {kind}: {count}");
    }

    let model = build_model(CUBE)?;

    println!("\n=== Model ===");
    println!("  points:        {}", model.point_count());
    println!("  lines:         {}", model.line_count());
    println!("  line loops:    {}", model.line_loop_count());
    println!("  surfaces:      {}", model.surface_count());
    println!("  surface loops: {}", model.surface_loop_count());
    println!("  volumes:       {}", model.volume_count());
    for group in model.physical_groups() {
        println!(
            "  physical {} \"{}\": {} member(s)",
            group.dim,
            group.name,
            group.members.len()
        );
    }
    for rel in model.periodic_relations() {
        let v = rel.transform.translation_vector();
        println!(
            "  periodic: surface {} = surface {} translated by ({}, {}, {})",
            rel.target, rel.source, v.x, v.y, v.z
        );
    }

    println!("\n=== Canonical form ===");
    print!("{}", model.to_geo());

    Ok(())
}
