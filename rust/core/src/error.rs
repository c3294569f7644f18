// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for `.geo` script parsing.

use thiserror::Error;

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing a geometry script
#[derive(Error, Debug)]
pub enum Error {
    /// A statement could not be parsed. `line` is 1-based; `message` quotes
    /// the failing statement for diagnostics.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A statement parsed but was followed by junk before the terminator.
    #[error("trailing input after statement at line {line}: {rest:?}")]
    TrailingInput { line: usize, rest: String },
}

impl Error {
    /// Create a parse error with a line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}
