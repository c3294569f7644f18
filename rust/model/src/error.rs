// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry model construction.

use crate::tags::{
    EntityKind, LineLoopTag, LineTag, PointTag, SurfaceLoopTag, SurfaceTag, VolumeTag,
};

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a geometry model. All errors are
/// fatal: a malformed script aborts construction at the failing statement.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Point tag not found in the model.
    #[error("point not found: {0}")]
    PointNotFound(PointTag),

    /// Line tag not found in the model.
    #[error("line not found: {0}")]
    LineNotFound(LineTag),

    /// Line loop tag not found in the model.
    #[error("line loop not found: {0}")]
    LineLoopNotFound(LineLoopTag),

    /// Surface tag not found in the model.
    #[error("surface not found: {0}")]
    SurfaceNotFound(SurfaceTag),

    /// Surface loop tag not found in the model.
    #[error("surface loop not found: {0}")]
    SurfaceLoopNotFound(SurfaceLoopTag),

    /// Volume tag not found in the model.
    #[error("volume not found: {0}")]
    VolumeNotFound(VolumeTag),

    /// An entity tag was declared twice within its namespace.
    #[error("duplicate {0} tag: {1}")]
    DuplicateTag(EntityKind, u32),

    /// Sign-adjusted line traversal does not chain into a closed cycle.
    #[error("line loop does not close: position {at} endpoint does not meet position {next}")]
    UnclosedLoop { at: usize, next: usize },

    /// A line loop must reference at least one line.
    #[error("line loop must reference at least one line")]
    EmptyLoop,

    /// A surface loop must reference at least one surface.
    #[error("surface loop must reference at least one surface")]
    EmptyShell,

    /// A script identifier was used before being assigned.
    #[error("unbound variable: {0}")]
    UnboundVariable(String),

    /// A tag expression did not evaluate to a positive integer.
    #[error("expected a positive integer tag, got {0}")]
    InvalidTag(f64),

    /// A constructor received the wrong number of arguments.
    #[error("{constructor} expects {expected} arguments, got {got}")]
    WrongArity {
        constructor: &'static str,
        expected: &'static str,
        got: usize,
    },

    /// Periodic surface lists must pair elementwise.
    #[error("periodic surface lists differ in length: {targets} targets vs {sources} sources")]
    PeriodicLengthMismatch { targets: usize, sources: usize },

    /// Script parser error.
    #[error("parser error: {0}")]
    Parse(#[from] geoscript_core::Error),

    /// Snapshot serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Wraps a construction error with the 1-based line of the failing
    /// statement.
    #[error("at line {line}: {source}")]
    Statement {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach a statement line number, unless one is already attached.
    pub fn at_line(line: usize, error: Error) -> Error {
        match error {
            already @ Error::Statement { .. } => already,
            other => Error::Statement {
                line,
                source: Box::new(other),
            },
        }
    }
}
