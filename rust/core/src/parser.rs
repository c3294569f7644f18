// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `.geo` statement parser using nom
//!
//! Zero-copy statement parsing and fast script scanning.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::{map, map_opt, verify},
    multi::separated_list1,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::fast_parse;
use crate::statement::{AllocKind, DimensionClass, Expr, ExprList, Statement};

/// Skip whitespace
fn ws(input: &str) -> IResult<&str, ()> {
    map(take_while(|c: char| c.is_whitespace()), |_| ())(input)
}

/// Parse an identifier: letters, digits, underscores; no leading digit
fn identifier(input: &str) -> IResult<&str, &str> {
    verify(
        take_while1(|c: char| c.is_alphanumeric() || c == '_'),
        |s: &str| !s.as_bytes()[0].is_ascii_digit(),
    )(input)
}

/// Match one exact keyword as a whole word
fn word<'a>(expected: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    verify(identifier, move |s: &str| s == expected)
}

/// Parse a numeric literal: 42, 3.14, 0., .5, 1e-2
fn number(input: &str) -> IResult<&str, Expr> {
    let starts_number = input
        .as_bytes()
        .first()
        .is_some_and(|&b| fast_parse::is_number_start(b));
    let len = if starts_number {
        fast_parse::number_len(input)
    } else {
        0
    };
    if len == 0 {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Float,
        )));
    }
    match fast_parse::parse_number(&input[..len]) {
        Some(value) => Ok((&input[len..], Expr::Number(value))),
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Float,
        ))),
    }
}

/// Parse an identifier or allocator keyword (newp, newl, newll, news, newsl, newv)
fn ident_or_alloc(input: &str) -> IResult<&str, Expr> {
    map(identifier, |name| match AllocKind::from_keyword(name) {
        Some(kind) => Expr::Alloc(kind),
        None => Expr::Ident(name),
    })(input)
}

/// Parse an expression: number, identifier, allocator, or unary minus.
/// A leading `-` on an entity reference encodes reversed orientation.
fn expr(input: &str) -> IResult<&str, Expr> {
    preceded(
        ws,
        alt((
            map(preceded(pair(char('-'), ws), expr), |e| {
                Expr::Neg(Box::new(e))
            }),
            number,
            ident_or_alloc,
        )),
    )(input)
}

/// Parse a brace-delimited argument list: {a, b, c}
fn brace_list(input: &str) -> IResult<&str, ExprList> {
    map(
        delimited(
            preceded(ws, char('{')),
            separated_list1(preceded(ws, char(',')), expr),
            preceded(ws, char('}')),
        ),
        |items| items.into_iter().collect(),
    )(input)
}

/// Parse the tag argument: (t)
fn paren_tag(input: &str) -> IResult<&str, Expr> {
    delimited(preceded(ws, char('(')), expr, preceded(ws, char(')')))(input)
}

/// Parse a constructor body: (t) = {args};
fn constructor_body(input: &str) -> IResult<&str, (Expr, ExprList)> {
    terminated(
        pair(paren_tag, preceded(preceded(ws, char('=')), brace_list)),
        preceded(ws, char(';')),
    )(input)
}

/// Parse a double-quoted physical group name
fn quoted_name(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_while(|c: char| c != '"'), char('"'))(input)
}

fn point_statement(input: &str) -> IResult<&str, Statement> {
    map(preceded(word("Point"), constructor_body), |(tag, args)| {
        Statement::Point { tag, args }
    })(input)
}

fn line_loop_statement(input: &str) -> IResult<&str, Statement> {
    map(
        preceded(
            pair(word("Line"), preceded(ws, word("Loop"))),
            constructor_body,
        ),
        |(tag, args)| Statement::LineLoop { tag, args },
    )(input)
}

fn line_statement(input: &str) -> IResult<&str, Statement> {
    map(preceded(word("Line"), constructor_body), |(tag, args)| {
        Statement::Line { tag, args }
    })(input)
}

fn plane_surface_statement(input: &str) -> IResult<&str, Statement> {
    map(
        preceded(
            pair(word("Plane"), preceded(ws, word("Surface"))),
            constructor_body,
        ),
        |(tag, args)| Statement::PlaneSurface { tag, args },
    )(input)
}

fn surface_loop_statement(input: &str) -> IResult<&str, Statement> {
    map(
        preceded(
            pair(word("Surface"), preceded(ws, word("Loop"))),
            constructor_body,
        ),
        |(tag, args)| Statement::SurfaceLoop { tag, args },
    )(input)
}

fn volume_statement(input: &str) -> IResult<&str, Statement> {
    map(preceded(word("Volume"), constructor_body), |(tag, args)| {
        Statement::Volume { tag, args }
    })(input)
}

/// Physical Point|Line|Surface|Volume("name") = {refs};
fn physical_statement(input: &str) -> IResult<&str, Statement> {
    map(
        tuple((
            word("Physical"),
            preceded(ws, map_opt(identifier, DimensionClass::from_keyword)),
            delimited(
                preceded(ws, char('(')),
                preceded(ws, quoted_name),
                preceded(ws, char(')')),
            ),
            preceded(preceded(ws, char('=')), brace_list),
            preceded(ws, char(';')),
        )),
        |(_, dim, name, members, _)| Statement::Physical { dim, name, members },
    )(input)
}

/// Periodic Surface {targets} = {sources} Translate {dx, dy, dz};
fn periodic_statement(input: &str) -> IResult<&str, Statement> {
    map_opt(
        tuple((
            word("Periodic"),
            preceded(ws, word("Surface")),
            brace_list,
            preceded(ws, char('=')),
            brace_list,
            preceded(ws, word("Translate")),
            brace_list,
            preceded(ws, char(';')),
        )),
        |(_, _, targets, _, sources, _, translation, _)| {
            let mut it = translation.into_iter();
            match (it.next(), it.next(), it.next(), it.next()) {
                (Some(dx), Some(dy), Some(dz), None) => Some(Statement::Periodic {
                    targets,
                    sources,
                    translation: [dx, dy, dz],
                }),
                _ => None, // translation vector must have exactly 3 components
            }
        },
    )(input)
}

/// ident = newp; or lc = 0.5;
fn assign_statement(input: &str) -> IResult<&str, Statement> {
    map(
        tuple((
            identifier,
            preceded(ws, char('=')),
            expr,
            preceded(ws, char(';')),
        )),
        |(name, _, value, _)| Statement::Assign { name, value },
    )(input)
}

fn statement(input: &str) -> IResult<&str, Statement> {
    preceded(
        ws,
        alt((
            point_statement,
            line_loop_statement, // before Line: shares the leading keyword
            line_statement,
            plane_surface_statement,
            surface_loop_statement,
            volume_statement,
            physical_statement,
            periodic_statement,
            assign_statement, // last: any identifier matches
        )),
    )(input)
}

/// Parse a single semicolon-terminated statement. Errors report line 1.
///
/// Example: `Point(1) = {0, 0, 0};`
pub fn parse_statement(input: &str) -> Result<Statement> {
    parse_statement_at(input, 1)
}

/// Parse a single statement, reporting `line` (1-based) in errors.
pub fn parse_statement_at(input: &str, line: usize) -> Result<Statement> {
    match statement(input) {
        Ok((rest, stmt)) => {
            let rest = rest.trim();
            if rest.is_empty() {
                Ok(stmt)
            } else {
                Err(Error::TrailingInput {
                    line,
                    rest: rest.chars().take(40).collect(),
                })
            }
        }
        Err(e) => Err(Error::parse(
            line,
            format!(
                "failed to parse statement: {}, input: {:?}",
                e,
                &input[..input.len().min(100)]
            ),
        )),
    }
}

/// Parse an entire script into (line, statement) pairs, in source order.
pub fn parse_script(source: &str) -> Result<Vec<(usize, Statement)>> {
    let mut scanner = StatementScanner::new(source);
    let mut statements = Vec::new();
    while let Some((line, text)) = scanner.next_statement() {
        statements.push((line, parse_statement_at(text, line)?));
    }
    Ok(statements)
}

/// Fast statement scanner - splits a script into statements without parsing
/// them, skipping `//` comments and tracking 1-based line numbers.
pub struct StatementScanner<'a> {
    content: &'a str,
    position: usize,
    line: usize,
}

impl<'a> StatementScanner<'a> {
    /// Create a new scanner
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            position: 0,
            line: 1,
        }
    }

    /// Returns the next semicolon-terminated statement and the line it
    /// starts on. An unterminated trailing statement is returned as-is and
    /// left for the parser to reject.
    pub fn next_statement(&mut self) -> Option<(usize, &'a str)> {
        let bytes = self.content.as_bytes();
        let len = bytes.len();

        loop {
            // Skip whitespace, counting lines
            while self.position < len && bytes[self.position].is_ascii_whitespace() {
                if bytes[self.position] == b'\n' {
                    self.line += 1;
                }
                self.position += 1;
            }
            if self.position >= len {
                return None;
            }

            // Skip // comments to end of line
            if bytes[self.position] == b'/'
                && self.position + 1 < len
                && bytes[self.position + 1] == b'/'
            {
                match memchr::memchr(b'\n', &bytes[self.position..]) {
                    Some(offset) => {
                        // The newline is consumed (and counted) by the
                        // whitespace loop on the next pass.
                        self.position += offset;
                        continue;
                    }
                    None => {
                        self.position = len;
                        return None;
                    }
                }
            }

            break;
        }

        let start = self.position;
        let start_line = self.line;

        // Find the terminating semicolon, skipping double-quoted spans so a
        // physical-group name may contain `;`.
        let mut cursor = start;
        let end = loop {
            match memchr::memchr2(b';', b'"', &bytes[cursor..]) {
                Some(offset) if bytes[cursor + offset] == b';' => {
                    break cursor + offset + 1;
                }
                Some(offset) => {
                    let quote = cursor + offset;
                    match memchr::memchr(b'"', &bytes[quote + 1..]) {
                        Some(close) => cursor = quote + 1 + close + 1,
                        // Unclosed quote; hand the rest to the parser
                        None => break len,
                    }
                }
                None => break len,
            }
        };

        self.line += memchr::memchr_iter(b'\n', &bytes[start..end]).count();
        self.position = end;

        Some((start_line, &self.content[start..end]))
    }

    /// Count statements by leading keyword phrase ("Point", "Line Loop",
    /// "Physical Surface", ...). Assignments count under "Assign".
    pub fn count_by_kind(&mut self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();

        while let Some((_, text)) = self.next_statement() {
            *counts.entry(statement_kind(text)).or_insert(0) += 1;
        }

        counts
    }

    /// Reset scanner to beginning
    pub fn reset(&mut self) {
        self.position = 0;
        self.line = 1;
    }
}

/// Classify a raw statement by its leading keyword phrase without parsing it.
pub fn statement_kind(text: &str) -> String {
    let mut words: Vec<&str> = Vec::new();
    let mut rest = text.trim_start();

    while rest
        .chars()
        .next()
        .map(|c| c.is_alphabetic() || c == '_')
        .unwrap_or(false)
    {
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        words.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }

    if words.len() == 1 && rest.starts_with('=') {
        "Assign".to_string()
    } else {
        words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::Expr;

    #[test]
    fn test_expr_number() {
        assert_eq!(expr("3.14"), Ok(("", Expr::Number(3.14))));
        assert_eq!(expr("0."), Ok(("", Expr::Number(0.0))));
        assert_eq!(expr("1e-2"), Ok(("", Expr::Number(0.01))));
    }

    #[test]
    fn test_expr_negation() {
        let (_, e) = expr("-l3").unwrap();
        assert!(e.is_negated());
        assert_eq!(e.unsigned(), &Expr::Ident("l3"));

        let (_, e) = expr("-2.5").unwrap();
        assert_eq!(e.as_number(), Some(-2.5));
    }

    #[test]
    fn test_expr_alloc() {
        assert_eq!(expr("newp"), Ok(("", Expr::Alloc(AllocKind::Point))));
        assert_eq!(expr("newsl"), Ok(("", Expr::Alloc(AllocKind::SurfaceLoop))));
        // Not an allocator keyword, just an identifier
        assert_eq!(expr("newfoo"), Ok(("", Expr::Ident("newfoo"))));
    }

    #[test]
    fn test_point_statement() {
        let stmt = parse_statement("Point(1) = {0, 0, 1};").unwrap();
        match stmt {
            Statement::Point { tag, args } => {
                assert_eq!(tag.as_number(), Some(1.0));
                assert_eq!(args.len(), 3);
                assert_eq!(args[2].as_number(), Some(1.0));
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn test_point_with_char_length() {
        let stmt = parse_statement("Point(p) = {0, 0, 0, lc};").unwrap();
        match stmt {
            Statement::Point { tag, args } => {
                assert_eq!(tag, Expr::Ident("p"));
                assert_eq!(args.len(), 4);
                assert_eq!(args[3], Expr::Ident("lc"));
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn test_line_loop_statement() {
        let stmt = parse_statement("Line Loop(7) = {1, 2, -3, -4};").unwrap();
        match stmt {
            Statement::LineLoop { args, .. } => {
                assert_eq!(args.len(), 4);
                assert!(!args[0].is_negated());
                assert!(args[2].is_negated());
                assert_eq!(args[2].unsigned(), &Expr::Number(3.0));
            }
            other => panic!("expected Line Loop, got {other:?}"),
        }
    }

    #[test]
    fn test_line_vs_line_loop() {
        assert!(matches!(
            parse_statement("Line(1) = {1, 2};").unwrap(),
            Statement::Line { .. }
        ));
        assert!(matches!(
            parse_statement("Line Loop(1) = {1, 2};").unwrap(),
            Statement::LineLoop { .. }
        ));
    }

    #[test]
    fn test_plane_surface_and_volume() {
        assert!(matches!(
            parse_statement("Plane Surface(1) = {1};").unwrap(),
            Statement::PlaneSurface { .. }
        ));
        assert!(matches!(
            parse_statement("Surface Loop(1) = {1, 2, 3, 4, 5, 6};").unwrap(),
            Statement::SurfaceLoop { .. }
        ));
        assert!(matches!(
            parse_statement("Volume(1) = {1};").unwrap(),
            Statement::Volume { .. }
        ));
    }

    #[test]
    fn test_physical_statement() {
        let stmt = parse_statement(r#"Physical Surface("dirichlet") = {1, 2};"#).unwrap();
        match stmt {
            Statement::Physical { dim, name, members } => {
                assert_eq!(dim, DimensionClass::Surface);
                assert_eq!(name, "dirichlet");
                assert_eq!(members.len(), 2);
            }
            other => panic!("expected Physical, got {other:?}"),
        }
    }

    #[test]
    fn test_periodic_statement() {
        let stmt =
            parse_statement("Periodic Surface {2} = {1} Translate {1, 0, 0};").unwrap();
        match stmt {
            Statement::Periodic {
                targets,
                sources,
                translation,
            } => {
                assert_eq!(targets.len(), 1);
                assert_eq!(sources.len(), 1);
                assert_eq!(translation[0].as_number(), Some(1.0));
                assert_eq!(translation[2].as_number(), Some(0.0));
            }
            other => panic!("expected Periodic, got {other:?}"),
        }
    }

    #[test]
    fn test_periodic_requires_three_components() {
        assert!(parse_statement("Periodic Surface {2} = {1} Translate {1, 0};").is_err());
    }

    #[test]
    fn test_assign_statement() {
        let stmt = parse_statement("p1 = newp;").unwrap();
        assert_eq!(
            stmt,
            Statement::Assign {
                name: "p1",
                value: Expr::Alloc(AllocKind::Point)
            }
        );

        let stmt = parse_statement("lc = 0.5;").unwrap();
        assert_eq!(
            stmt,
            Statement::Assign {
                name: "lc",
                value: Expr::Number(0.5)
            }
        );
    }

    #[test]
    fn test_trailing_input_rejected() {
        assert!(parse_statement("Point(1) = {0, 0, 0}; junk").is_err());
    }

    #[test]
    fn test_scanner_skips_comments_and_tracks_lines() {
        let script = "// header comment\np1 = newp;\n\n// another\nPoint(p1) = {0, 0, 0};\n";
        let mut scanner = StatementScanner::new(script);

        let (line, text) = scanner.next_statement().unwrap();
        assert_eq!(line, 2);
        assert_eq!(text, "p1 = newp;");

        let (line, text) = scanner.next_statement().unwrap();
        assert_eq!(line, 5);
        assert_eq!(text, "Point(p1) = {0, 0, 0};");

        assert!(scanner.next_statement().is_none());
    }

    #[test]
    fn test_scanner_keeps_quoted_semicolons() {
        let script = "Physical Surface(\"inlet;left\") = {1};\nPoint(1) = {0, 0, 0};\n";
        let mut scanner = StatementScanner::new(script);

        let (_, text) = scanner.next_statement().unwrap();
        assert_eq!(text, "Physical Surface(\"inlet;left\") = {1};");

        let (line, text) = scanner.next_statement().unwrap();
        assert_eq!(line, 2);
        assert_eq!(text, "Point(1) = {0, 0, 0};");
    }

    #[test]
    fn test_parse_script_accepts_quoted_semicolons() {
        // The scanner and the grammar must agree on statement boundaries
        let script = "Physical Surface(\"inlet;left\") = {1};\n";
        let statements = parse_script(script).unwrap();
        assert_eq!(statements.len(), 1);
        match &statements[0].1 {
            Statement::Physical { name, .. } => assert_eq!(*name, "inlet;left"),
            other => panic!("expected Physical, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_statement_errors_are_one_based() {
        let err = parse_statement("Point(1) = ;").unwrap_err();
        match err {
            Error::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_scanner_count_by_kind() {
        let script = "\
p = newp;
Point(p) = {0, 0, 0};
Point(2) = {1, 0, 0};
Line(1) = {1, 2};
Line Loop(1) = {1};
Physical Surface(\"wall\") = {1};
";
        let mut scanner = StatementScanner::new(script);
        let counts = scanner.count_by_kind();

        assert_eq!(counts.get("Assign"), Some(&1));
        assert_eq!(counts.get("Point"), Some(&2));
        assert_eq!(counts.get("Line"), Some(&1));
        assert_eq!(counts.get("Line Loop"), Some(&1));
        assert_eq!(counts.get("Physical Surface"), Some(&1));
    }

    #[test]
    fn test_parse_script() {
        let script = "// cube corner\np0 = newp;\nPoint(p0) = {0, 0, 0};\n";
        let statements = parse_script(script).unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].0, 2);
        assert!(matches!(statements[1].1, Statement::Point { .. }));
    }

    #[test]
    fn test_parse_script_reports_failing_line() {
        let script = "p0 = newp;\nPoint(p0) = ;\n";
        let err = parse_script(script).unwrap_err();
        match err {
            Error::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }
}
