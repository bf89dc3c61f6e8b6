// This file is part of OpenFA.
//
// OpenFA is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// OpenFA is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with OpenFA.  If not, see <http://www.gnu.org/licenses/>.
//! Line-oriented scanner: strips block/line comments, tracks description
//! blocks, and hands back `(line_no, text)` pairs for the classifier.

/// A single scanned line, 1-indexed to match diagnostic output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    pub line_no: usize,
    pub text: String,
}

#[derive(Debug, Default)]
struct ScannerState {
    in_block_comment: bool,
    in_description: bool,
    blank_lines: usize,
}

/// Strips comments and description-block framing from an iterator of raw
/// lines, yielding only the lines a classifier should see. Description-block
/// content is passed through verbatim (including otherwise-comment-looking
/// text), matching the "captured until end_description" rule.
pub struct Scanner<I> {
    lines: I,
    state: ScannerState,
    line_no: usize,
}

impl<I: Iterator<Item = String>> Scanner<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            state: ScannerState::default(),
            line_no: 0,
        }
    }

    pub fn blank_line_count(&self) -> usize {
        self.state.blank_lines
    }
}

impl<I: Iterator<Item = String>> Iterator for Scanner<I> {
    type Item = ScannedLine;

    fn next(&mut self) -> Option<ScannedLine> {
        loop {
            let raw = self.lines.next()?;
            self.line_no += 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                self.state.blank_lines += 1;
                continue;
            }

            if self.state.in_block_comment {
                if trimmed.eq_ignore_ascii_case("end_comment") {
                    self.state.in_block_comment = false;
                }
                continue;
            }

            if trimmed.eq_ignore_ascii_case("comment") {
                self.state.in_block_comment = true;
                continue;
            }

            if self.state.in_description {
                if trimmed.eq_ignore_ascii_case("end_description") {
                    self.state.in_description = false;
                    continue;
                }
                return Some(ScannedLine {
                    line_no: self.line_no,
                    text: raw,
                });
            }

            if trimmed.eq_ignore_ascii_case("description") {
                self.state.in_description = true;
                return Some(ScannedLine {
                    line_no: self.line_no,
                    text: trimmed.to_string(),
                });
            }

            if trimmed.starts_with(';') || trimmed.starts_with("//") {
                continue;
            }

            // Strip a trailing same-line comment, but only outside
            // description blocks (handled above).
            let stripped = strip_inline_comment(trimmed);
            if stripped.is_empty() {
                continue;
            }

            return Some(ScannedLine {
                line_no: self.line_no,
                text: stripped.to_string(),
            });
        }
    }
}

fn strip_inline_comment(line: &str) -> &str {
    let semi = line.find(';');
    let slashslash = line.find("//");
    let cut = match (semi, slashslash) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    };
    match cut {
        Some(i) => line[..i].trim_end(),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(lines: &[&str]) -> Vec<String> {
        Scanner::new(lines.iter().map(|s| s.to_string()))
            .map(|l| l.text)
            .collect()
    }

    #[test]
    fn strips_block_comments() {
        let out = scan(&["nodes", "comment", "0,0,0,0", "end_comment", "1,1,0,0"]);
        assert_eq!(out, vec!["nodes".to_string(), "1,1,0,0".to_string()]);
    }

    #[test]
    fn strips_single_line_comments() {
        let out = scan(&["; a comment", "nodes", "// also a comment", "0,0,0,0"]);
        assert_eq!(out, vec!["nodes".to_string(), "0,0,0,0".to_string()]);
    }

    #[test]
    fn passes_description_block_verbatim() {
        let out = scan(&["description", "; not a comment here", "end_description", "nodes"]);
        assert_eq!(
            out,
            vec![
                "description".to_string(),
                "; not a comment here".to_string(),
                "nodes".to_string()
            ]
        );
    }

    #[test]
    fn tracks_blank_lines() {
        let mut scanner = Scanner::new(
            ["nodes", "", "", "0,0,0,0"]
                .iter()
                .map(|s| s.to_string()),
        );
        let collected: Vec<_> = (&mut scanner).collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(scanner.blank_line_count(), 2);
    }
}
