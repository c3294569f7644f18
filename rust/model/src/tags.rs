// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tag types for the geometry model's entity tables.
//!
//! Each entity category has its own tag namespace. Tags are the script's own
//! positive integers (`Point(5)` stores under `PointTag(5)`), so they
//! round-trip through serialization unchanged, unlike generational keys.

use serde::{Deserialize, Serialize};

macro_rules! tag_types {
    ($($(#[$doc:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
                Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(pub u32);

            impl $name {
                /// Raw tag value as it appears in the script.
                pub fn value(&self) -> u32 {
                    self.0
                }
            }

            impl From<u32> for $name {
                fn from(tag: u32) -> Self {
                    $name(tag)
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )+
    };
}

tag_types! {
    /// Tag for a point (position in 3D space).
    PointTag,

    /// Tag for a line (directed segment between two points).
    LineTag,

    /// Tag for a line loop (signed closed cycle of lines).
    LineLoopTag,

    /// Tag for a plane surface (region bounded by line loops).
    SurfaceTag,

    /// Tag for a surface loop (closed shell of surfaces).
    SurfaceLoopTag,

    /// Tag for a volume (region bounded by a surface loop).
    VolumeTag,
}

/// Discriminant for entity categories, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Point = 0,
    Line = 1,
    LineLoop = 2,
    Surface = 3,
    SurfaceLoop = 4,
    Volume = 5,
}

impl EntityKind {
    /// Returns the category name as it appears in the script grammar.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Point => "Point",
            EntityKind::Line => "Line",
            EntityKind::LineLoop => "Line Loop",
            EntityKind::Surface => "Plane Surface",
            EntityKind::SurfaceLoop => "Surface Loop",
            EntityKind::Volume => "Volume",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_display_is_raw_value() {
        assert_eq!(PointTag(7).to_string(), "7");
        assert_eq!(VolumeTag::from(1).value(), 1);
    }

    #[test]
    fn entity_kind_names() {
        assert_eq!(EntityKind::Point.as_str(), "Point");
        assert_eq!(EntityKind::LineLoop.as_str(), "Line Loop");
        assert_eq!(EntityKind::Surface.as_str(), "Plane Surface");
    }

    #[test]
    fn entity_kind_ordering_follows_the_dag() {
        assert!(EntityKind::Point < EntityKind::Line);
        assert!(EntityKind::Line < EntityKind::LineLoop);
        assert!(EntityKind::LineLoop < EntityKind::Surface);
        assert!(EntityKind::Surface < EntityKind::SurfaceLoop);
        assert!(EntityKind::SurfaceLoop < EntityKind::Volume);
    }
}
