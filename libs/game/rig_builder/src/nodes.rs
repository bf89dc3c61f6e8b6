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
use rigdef::error::DiagnosticList;
use rigdef::records::Node;

use crate::limits::{self, MAX_NODES};
use crate::resolver::NodeResolver;
use crate::rig::{BuiltNode, Rig};

const SECTION: &str = "nodes";

pub fn build_nodes(
    rig: &mut Rig,
    resolver: &mut NodeResolver,
    nodes: &[Node],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for node in nodes {
        let built = BuiltNode {
            position: node.position,
            options: node.options,
            load_weight: node.load_weight_override.unwrap_or(node.defaults.load_weight),
            friction: node.defaults.friction,
            volume: node.defaults.volume,
            surface: node.defaults.surface,
            detacher_group: node.detacher_group,
            wheel_id: None,
            wheel_ring: 0,
        };
        if let Some(index) = limits::try_push(&mut rig.nodes, built, MAX_NODES, SECTION, module_name, diags) {
            resolver.register(&node.id, index);
        }
    }
}

/// Registers a node synthesized by the wheel/cinecam builders directly
/// (i.e. one with no corresponding `rigdef::records::Node`), returning its
/// dense index.
pub fn push_synthetic_node(rig: &mut Rig, node: BuiltNode, module_name: &str, diags: &mut DiagnosticList) -> Option<usize> {
    limits::try_push(&mut rig.nodes, node, MAX_NODES, SECTION, module_name, diags)
}
