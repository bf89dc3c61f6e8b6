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
//! Flexbodies bind a mesh to a `forset` of nodes (a list of ids and
//! `start-end` ranges, spec.md §4.4), resolved here to dense indices.
use rigdef::error::DiagnosticList;
use rigdef::records::Flexbody;

use crate::limits::{self, MAX_FLEXBODIES};
use crate::resolver::NodeResolver;
use crate::rig::{BuiltFlexbody, Rig};

const SECTION: &str = "flexbodies";

pub fn build_flexbodies(
    rig: &mut Rig,
    resolver: &NodeResolver,
    flexbodies: &[Flexbody],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for flexbody in flexbodies {
        let Some(reference_node) = resolver.resolve(&flexbody.reference_node, 0, SECTION, module_name, diags) else {
            continue;
        };
        let Some(x_axis_node) = resolver.resolve(&flexbody.x_axis_node, 0, SECTION, module_name, diags) else {
            continue;
        };
        let Some(y_axis_node) = resolver.resolve(&flexbody.y_axis_node, 0, SECTION, module_name, diags) else {
            continue;
        };
        let mut forset_nodes = Vec::new();
        if flexbody.forset.is_empty() {
            diags.warning(0, SECTION, module_name, "flexbody has no forset; it will bind to no nodes");
        }
        for range in &flexbody.forset {
            forset_nodes.extend(resolver.resolve_range(range, 0, SECTION, module_name, diags));
        }
        limits::try_push(
            &mut rig.flexbodies,
            BuiltFlexbody {
                reference_node,
                x_axis_node,
                y_axis_node,
                offset: flexbody.offset,
                rotation: flexbody.rotation,
                mesh_name: flexbody.mesh_name.clone(),
                forset_nodes,
                camera_settings: flexbody.camera_settings,
            },
            MAX_FLEXBODIES,
            SECTION,
            module_name,
            diags,
        );
    }
}
