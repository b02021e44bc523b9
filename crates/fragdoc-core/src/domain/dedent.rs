//! Indentation removal for fragment bodies.
//!
//! The dedent width is the number of leading spaces of the body's first line.
//! Exactly that many leading characters are dropped from *every* line, even
//! lines that are indented less (they lose real text, or become empty).
//! Tabs are rejected outright because widths are counted in spaces.

use thiserror::Error;

/// A tab was found in a fragment body.
///
/// Positions are 1-based and relative to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tab character at body line {line}, column {column}")]
pub struct TabFound {
    pub line: usize,
    pub column: usize,
}

/// Remove the first line's indentation from every line of `body`.
pub fn dedent(body: &str) -> Result<String, TabFound> {
    if let Some(offset) = body.find('\t') {
        return Err(tab_position(body, offset));
    }

    let width = indent_width(body);
    let lines: Vec<&str> = body.split('\n').map(|line| drop_chars(line, width)).collect();
    Ok(lines.join("\n"))
}

/// Number of leading space characters.
pub fn indent_width(body: &str) -> usize {
    body.len() - body.trim_start_matches(' ').len()
}

fn drop_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((idx, _)) => &line[idx..],
        None => "",
    }
}

fn tab_position(body: &str, offset: usize) -> TabFound {
    let before = &body[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    TabFound {
        line,
        column: body[line_start..offset].chars().count() + 1,
    }
}
