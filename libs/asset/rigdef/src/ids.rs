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
use std::fmt;

use crate::error::DiagnosticList;

/// A node reference as written in a rig-def file: either a decimal number or
/// a name. The two are separate namespaces until resolved by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeId {
    Numbered(i64),
    Named(String),
}

impl NodeId {
    pub fn as_numbered(&self) -> Option<i64> {
        match self {
            NodeId::Numbered(n) => Some(*n),
            NodeId::Named(_) => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Numbered(n) => write!(f, "{n}"),
            NodeId::Named(s) => write!(f, "{s}"),
        }
    }
}

/// A `start-end` span of node ids, expanded inclusively by the builder after
/// any required start/end swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRange {
    pub start: NodeId,
    pub end: NodeId,
}

/// Parses one node-id token: `-?[0-9]+` is numeric, everything matching
/// `[A-Za-z_][A-Za-z0-9_-]*` is a name. Negative numeric ids are legacy
/// input; they are flipped positive with a warning, matching the historical
/// parser's back-compat behaviour.
pub fn parse_node_id(
    token: &str,
    line_no: usize,
    section: &str,
    module_name: &str,
    diags: &mut DiagnosticList,
) -> NodeId {
    if let Ok(n) = token.parse::<i64>() {
        if n < 0 {
            diags.warning(
                line_no,
                section,
                module_name,
                format!("negative node id `{n}` coerced to `{}` (legacy)", -n),
            );
            return NodeId::Numbered(-n);
        }
        return NodeId::Numbered(n);
    }
    NodeId::Named(token.to_string())
}

/// As `parse_node_id`, but the literal `-1` means "absent".
pub fn parse_node_id_optional(
    token: &str,
    line_no: usize,
    section: &str,
    module_name: &str,
    diags: &mut DiagnosticList,
) -> Option<NodeId> {
    if token.trim() == "-1" {
        return None;
    }
    Some(parse_node_id(token, line_no, section, module_name, diags))
}

/// Parses a `start-end` range token, or a bare id as a single-element range.
pub fn parse_node_range(
    token: &str,
    line_no: usize,
    section: &str,
    module_name: &str,
    diags: &mut DiagnosticList,
) -> NodeRange {
    if let Some((a, b)) = token.split_once('-') {
        // Careful: a name may itself contain `-`, and a negative numeric id
        // begins with `-`. Only treat this as a range if both halves parse
        // as plausible ids on their own (non-empty).
        if !a.is_empty() && !b.is_empty() {
            let start = parse_node_id(a, line_no, section, module_name, diags);
            let end = parse_node_id(b, line_no, section, module_name, diags);
            return NodeRange { start, end };
        }
    }
    let id = parse_node_id(token, line_no, section, module_name, diags);
    NodeRange {
        start: id.clone(),
        end: id,
    }
}

/// Scans a string of single-letter option flags against a caller-supplied
/// set of recognized letters. Unknown letters warn and are ignored; known
/// letters are returned in encounter order.
pub fn parse_option_letters(
    token: &str,
    known: &[char],
    line_no: usize,
    section: &str,
    module_name: &str,
    diags: &mut DiagnosticList,
) -> Vec<char> {
    let mut found = Vec::new();
    for c in token.chars() {
        if known.contains(&c) {
            found.push(c);
        } else if !c.is_whitespace() {
            diags.warning(
                line_no,
                section,
                module_name,
                format!("unknown option letter `{c}` ignored"),
            );
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        let mut diags = DiagnosticList::new();
        assert_eq!(
            parse_node_id("42", 1, "nodes", "root", &mut diags),
            NodeId::Numbered(42)
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn negative_ids_are_coerced_with_warning() {
        let mut diags = DiagnosticList::new();
        assert_eq!(
            parse_node_id("-5", 1, "nodes", "root", &mut diags),
            NodeId::Numbered(5)
        );
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn named_ids_parse() {
        let mut diags = DiagnosticList::new();
        assert_eq!(
            parse_node_id("front_left", 1, "nodes", "root", &mut diags),
            NodeId::Named("front_left".to_string())
        );
    }

    #[test]
    fn optional_minus_one_is_absent() {
        let mut diags = DiagnosticList::new();
        assert_eq!(
            parse_node_id_optional("-1", 1, "wheels", "root", &mut diags),
            None
        );
    }

    #[test]
    fn ranges_expand_from_dash_token() {
        let mut diags = DiagnosticList::new();
        let range = parse_node_range("3-7", 1, "flexbodies", "root", &mut diags);
        assert_eq!(range.start, NodeId::Numbered(3));
        assert_eq!(range.end, NodeId::Numbered(7));
    }

    #[test]
    fn single_token_is_a_one_element_range() {
        let mut diags = DiagnosticList::new();
        let range = parse_node_range("9", 1, "flexbodies", "root", &mut diags);
        assert_eq!(range.start, NodeId::Numbered(9));
        assert_eq!(range.end, NodeId::Numbered(9));
    }
}
