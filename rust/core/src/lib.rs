// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Geoscript Core Parser
//!
//! Parser for Gmsh-style `.geo` geometry-description scripts, built with
//! [nom](https://docs.rs/nom). Provides zero-copy statement parsing and fast
//! script scanning for geometry build scripts.
//!
//! ## Overview
//!
//! This crate provides the parsing layer of geoscript-lite:
//!
//! - **Statement Parsing**: Zero-copy parsing of the `.geo` grammar
//!   (constructors, physical groups, periodicity, tag allocators)
//! - **Script Scanning**: [memchr](https://docs.rs/memchr)-accelerated
//!   statement splitting with comment skipping and line tracking
//! - **Fast Numerics**: Float parsing via
//!   [fast-float](https://docs.rs/fast-float), integers via
//!   [lexical-core](https://docs.rs/lexical-core)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use geoscript_core::{parse_statement, Statement, StatementScanner};
//!
//! // Scan a script statement by statement
//! let script = "p0 = newp;\nPoint(p0) = {0, 0, 0};";
//! let mut scanner = StatementScanner::new(script);
//!
//! while let Some((line, text)) = scanner.next_statement() {
//!     println!("line {}: {}", line, text);
//! }
//!
//! // Parse an individual statement
//! let stmt = parse_statement("Line(3) = {1, 2};").unwrap();
//! assert!(matches!(stmt, Statement::Line { .. }));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for parsed statements

pub mod error;
pub mod fast_parse;
pub mod parser;
pub mod statement;

pub use error::{Error, Result};
pub use parser::{
    parse_script, parse_statement, parse_statement_at, statement_kind, StatementScanner,
};
pub use statement::{AllocKind, DimensionClass, Expr, ExprList, Statement};
