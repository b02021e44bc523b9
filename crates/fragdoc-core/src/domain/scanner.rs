//! Index-based scanner for delimited code fragments.
//!
//! A fragment looks like this in any source file:
//!
//! ```text
//! /*** CODE FRAGMENT <name> ***/
//! <body>
//! /*** END CODE FRAGMENT ***/
//! ```
//!
//! The scanner walks the text with plain substring searches for the two
//! literal delimiters. There is no regex engine involved, so adversarial
//! input cannot trigger backtracking blowups.
//!
//! ## Matching rules
//!
//! - The start marker line must end with ` ***/` immediately followed by `\n`.
//!   The name is everything between `CODE FRAGMENT ` and that terminator.
//! - The body starts on the next line and ends at the first end marker that
//!   is preceded by a newline and whitespace only. The newline and the
//!   trailing whitespace run are not part of the body. Whitespace here also
//!   covers the separator controls `\x1c`..=`\x1f`.
//! - Unterminated or malformed markers yield nothing. They are never errors.

/// Opening delimiter, up to the fragment name.
pub const START_MARKER: &str = "/*** CODE FRAGMENT ";

/// Closes the start marker line, right after the name.
pub const NAME_TERMINATOR: &str = " ***/";

/// Closing delimiter, carries no payload.
pub const END_MARKER: &str = "/*** END CODE FRAGMENT ***/";

/// A fragment as found in the text, before dedenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFragment<'a> {
    /// Text between `CODE FRAGMENT ` and ` ***/`.
    pub name: &'a str,
    /// Raw body with original indentation.
    pub body: &'a str,
    /// 1-based line number of the start marker.
    pub line: usize,
}

/// Iterator over the non-overlapping fragments of a text, left to right.
#[derive(Debug, Clone)]
pub struct FragmentScanner<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
    line_pos: usize,
    exhausted: bool,
}

impl<'a> FragmentScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
            line_pos: 0,
            exhausted: false,
        }
    }

    /// Line number of byte offset `offset`, counted incrementally.
    ///
    /// Offsets passed here never decrease.
    fn line_at(&mut self, offset: usize) -> usize {
        self.line += self.text[self.line_pos..offset].matches('\n').count();
        self.line_pos = offset;
        self.line
    }
}

impl<'a> Iterator for FragmentScanner<'a> {
    type Item = RawFragment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            let Some(found) = self.text[self.pos..].find(START_MARKER) else {
                self.exhausted = true;
                break;
            };
            let start = self.pos + found;

            let Some((name, body_start)) = parse_header(self.text, start + START_MARKER.len())
            else {
                // Not a well-formed start line; keep looking past this marker.
                self.pos = start + 1;
                continue;
            };

            let Some((body_end, resume)) = find_close(self.text, body_start) else {
                // No end marker can close a later fragment either.
                self.exhausted = true;
                break;
            };

            let line = self.line_at(start);
            self.pos = resume;
            return Some(RawFragment {
                name,
                body: &self.text[body_start..body_end],
                line,
            });
        }
        None
    }
}

/// Scan `text` and collect every fragment.
pub fn scan(text: &str) -> Vec<RawFragment<'_>> {
    FragmentScanner::new(text).collect()
}

/// Parse the rest of a start marker line.
///
/// Returns the fragment name and the offset where the body begins.
fn parse_header(text: &str, name_start: usize) -> Option<(&str, usize)> {
    let line_end = name_start + text[name_start..].find('\n')?;
    let name = text[name_start..line_end].strip_suffix(NAME_TERMINATOR)?;
    Some((name, line_end + 1))
}

/// Find the end marker closing a body that starts at `body_start`.
///
/// Returns `(body_end, resume)` where `resume` is the offset just past the
/// end marker.
fn find_close(text: &str, body_start: usize) -> Option<(usize, usize)> {
    let mut search = body_start;
    while let Some(found) = text[search..].find(END_MARKER) {
        let end = search + found;
        let preceding = &text[body_start..end];
        let run_start = body_start + preceding.trim_end_matches(is_space).len();
        if let Some(nl) = text[run_start..end].find('\n') {
            return Some((run_start + nl, end + END_MARKER.len()));
        }
        search = end + 1;
    }
    None
}

/// Unicode whitespace plus the file, group, record and unit separators.
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}
