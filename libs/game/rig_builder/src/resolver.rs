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
//! Maps the two node-id namespaces (`Numbered`/`Named`) onto a single, dense
//! index space over [`crate::rig::Rig::nodes`]. Built incrementally as nodes
//! are registered, then used read-only by every subsystem builder.
use std::collections::HashMap;

use rigdef::error::DiagnosticList;
use rigdef::ids::{NodeId, NodeRange};

#[derive(Debug, Default)]
pub struct NodeResolver {
    numbered: HashMap<i64, usize>,
    named: HashMap<String, usize>,
    /// Highest numbered id registered, used for the tolerant fallback.
    max_numbered: i64,
}

impl NodeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: &NodeId, index: usize) {
        match id {
            NodeId::Numbered(n) => {
                self.numbered.insert(*n, index);
                self.max_numbered = self.max_numbered.max(*n);
            }
            NodeId::Named(name) => {
                self.named.insert(name.clone(), index);
            }
        }
    }

    /// Strict lookup: unresolved ids are an error, since every caller of this
    /// path requires the node to already exist (e.g. a beam end).
    pub fn resolve(
        &self,
        id: &NodeId,
        line_no: usize,
        section: &str,
        module_name: &str,
        diags: &mut DiagnosticList,
    ) -> Option<usize> {
        match id {
            NodeId::Numbered(n) => {
                if let Some(idx) = self.numbered.get(n) {
                    return Some(*idx);
                }
                // Legacy tolerance: a numbered reference to a node that was
                // never declared is accepted with a warning rather than
                // rejected, matching historical parser behaviour for files
                // that reference nodes defined later or omitted by mistake.
                diags.warning(
                    line_no,
                    section,
                    module_name,
                    format!("node `{n}` was never defined; reference tolerated"),
                );
                None
            }
            NodeId::Named(name) => {
                if let Some(idx) = self.named.get(name) {
                    return Some(*idx);
                }
                diags.error(
                    line_no,
                    section,
                    module_name,
                    format!("named node `{name}` was never defined"),
                );
                None
            }
        }
    }

    /// Expands a `start-end` range to a list of resolved indices, swapping
    /// the bounds first if `start` sorts after `end` on the numbered axis.
    pub fn resolve_range(
        &self,
        range: &NodeRange,
        line_no: usize,
        section: &str,
        module_name: &str,
        diags: &mut DiagnosticList,
    ) -> Vec<usize> {
        if let (NodeId::Numbered(a), NodeId::Numbered(b)) = (&range.start, &range.end) {
            let (lo, hi) = if a <= b { (*a, *b) } else { (*b, *a) };
            let mut out = Vec::with_capacity((hi - lo + 1).max(0) as usize);
            for n in lo..=hi {
                if let Some(idx) = self.resolve(&NodeId::Numbered(n), line_no, section, module_name, diags) {
                    out.push(idx);
                }
            }
            return out;
        }
        // A named range has no natural ordering; resolve each endpoint only.
        let mut out = Vec::new();
        if let Some(idx) = self.resolve(&range.start, line_no, section, module_name, diags) {
            out.push(idx);
        }
        if range.start != range.end {
            if let Some(idx) = self.resolve(&range.end, line_no, section, module_name, diags) {
                out.push(idx);
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.numbered.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_named_lookup_fails_closed() {
        let resolver = NodeResolver::new();
        let mut diags = DiagnosticList::new();
        let result = resolver.resolve(&NodeId::Named("nose".into()), 1, "beams", "root", &mut diags);
        assert_eq!(result, None);
        assert!(diags.has_errors());
    }

    #[test]
    fn numbered_lookup_is_tolerant_with_warning() {
        let resolver = NodeResolver::new();
        let mut diags = DiagnosticList::new();
        let result = resolver.resolve(&NodeId::Numbered(7), 1, "beams", "root", &mut diags);
        assert_eq!(result, None);
        assert!(!diags.has_errors());
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn range_swaps_bounds_when_reversed() {
        let mut resolver = NodeResolver::new();
        for n in 0..=5 {
            resolver.register(&NodeId::Numbered(n), n as usize);
        }
        let mut diags = DiagnosticList::new();
        let range = NodeRange {
            start: NodeId::Numbered(5),
            end: NodeId::Numbered(2),
        };
        let resolved = resolver.resolve_range(&range, 1, "flexbodies", "root", &mut diags);
        assert_eq!(resolved, vec![2, 3, 4, 5]);
    }
}
