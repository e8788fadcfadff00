//! Parsing of module-definition text.
//!
//! One definition per line, in the form `name -> output, output, ...`.
//! The kind is tagged by a name-prefix convention: `%name` is a
//! flip-flop, `&name` is a conjunction, and the single literal name
//! `broadcaster` is the broadcast module. The prefix is stripped before
//! the name is used anywhere else.
//!
//! Blank lines are skipped. Surrounding whitespace is insignificant.

use crate::def::{ModuleDef, ModuleKind, BROADCASTER};
use crate::error::ParseError;

/// Parse a complete definition listing into an ordered `ModuleDef` list.
///
/// The returned order is the input order; network construction depends
/// on it (conjunction wiring, fingerprint bit order).
///
/// # Errors
///
/// [`ParseError::MalformedLine`] if a line is not `name -> outputs`, or
/// [`ParseError::UnknownKind`] if a left-hand name carries no prefix and
/// is not `broadcaster`. Errors carry the 1-based line number.
pub fn parse_definitions(input: &str) -> Result<Vec<ModuleDef>, ParseError> {
    let mut defs = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let malformed = || ParseError::MalformedLine {
            line: line_no,
            text: line.to_string(),
        };

        let (lhs, rhs) = line.split_once("->").ok_or_else(|| malformed())?;
        let lhs = lhs.trim();
        let rhs = rhs.trim();

        let (kind, name) = if let Some(rest) = lhs.strip_prefix('%') {
            (ModuleKind::FlipFlop, rest)
        } else if let Some(rest) = lhs.strip_prefix('&') {
            (ModuleKind::Conjunction, rest)
        } else if lhs == BROADCASTER {
            (ModuleKind::Broadcast, lhs)
        } else {
            return Err(ParseError::UnknownKind {
                line: line_no,
                name: lhs.to_string(),
            });
        };
        if !is_name(name) {
            return Err(malformed());
        }

        let outputs: Vec<String> = rhs.split(',').map(|s| s.trim().to_string()).collect();
        if outputs.iter().any(|o| !is_name(o)) {
            return Err(malformed());
        }

        defs.push(ModuleDef {
            name: name.to_string(),
            kind,
            outputs,
        });
    }

    Ok(defs)
}

/// A valid name: one or more word characters.
fn is_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
