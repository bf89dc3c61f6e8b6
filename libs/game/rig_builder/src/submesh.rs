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
//! A `submesh` with `backmesh` set expands into three render passes: the
//! original front-facing cab, a transparent copy, and a back-facing copy
//! (spec.md §4.4), so double-sided cab panels don't need to be authored by
//! hand three times over.
use rigdef::error::DiagnosticList;
use rigdef::records::Submesh;

use crate::limits::{self, MAX_CABS, MAX_TEXCOORDS};
use crate::resolver::NodeResolver;
use crate::rig::{BuiltCab, BuiltSubmesh, BuiltTexcoord, Rig};

const SECTION: &str = "submesh";

fn resolve_one(
    rig: &mut Rig,
    resolver: &NodeResolver,
    submesh: &Submesh,
    transparent: bool,
    back_facing: bool,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let mut texcoords = Vec::new();
    for tc in &submesh.texcoords {
        if let Some(node) = resolver.resolve(&tc.node, 0, SECTION, module_name, diags) {
            if texcoords.len() >= MAX_TEXCOORDS {
                diags.error(0, SECTION, module_name, format!("capacity exceeded ({MAX_TEXCOORDS}); dropping texcoord"));
                break;
            }
            texcoords.push(BuiltTexcoord { node, u: tc.u, v: tc.v });
        }
    }
    let mut cab_triangles = Vec::new();
    for cab in &submesh.cab_triangles {
        let mut nodes = [0usize; 3];
        let mut ok = true;
        for (i, id) in cab.nodes.iter().enumerate() {
            match resolver.resolve(id, 0, SECTION, module_name, diags) {
                Some(idx) => nodes[i] = idx,
                None => ok = false,
            }
        }
        if ok {
            if cab_triangles.len() >= MAX_CABS {
                diags.error(0, SECTION, module_name, format!("capacity exceeded ({MAX_CABS}); dropping cab triangle"));
                break;
            }
            cab_triangles.push(BuiltCab { nodes, options: cab.options });
        }
    }
    rig.submeshes.push(BuiltSubmesh { texcoords, cab_triangles, transparent, back_facing });
}

pub fn build_submeshes(
    rig: &mut Rig,
    resolver: &NodeResolver,
    submeshes: &[Submesh],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for submesh in submeshes {
        resolve_one(rig, resolver, submesh, false, false, module_name, diags);
        if submesh.backmesh {
            resolve_one(rig, resolver, submesh, true, false, module_name, diags);
            resolve_one(rig, resolver, submesh, false, true, module_name, diags);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use rigdef::defaults::NodeDefaults;
    use rigdef::ids::NodeId;
    use rigdef::records::{Cab, CabOptions, Node};
    use std::rc::Rc;

    fn sample_node(id: i64) -> Node {
        Node {
            id: NodeId::Numbered(id),
            position: Vector3::zeros(),
            options: Default::default(),
            load_weight_override: None,
            detacher_group: 0,
            defaults: Rc::new(NodeDefaults::default()),
            beam_defaults: Rc::new(rigdef::defaults::BeamDefaults::default()),
        }
    }

    #[test]
    fn backmesh_triples_the_submesh() {
        let mut rig = Rig::default();
        let mut resolver = NodeResolver::new();
        let mut diags = DiagnosticList::new();
        crate::nodes::build_nodes(&mut rig, &mut resolver, &[sample_node(0), sample_node(1), sample_node(2)], "root", &mut diags);

        let submesh = Submesh {
            backmesh: true,
            texcoords: Vec::new(),
            cab_triangles: vec![Cab {
                nodes: [NodeId::Numbered(0), NodeId::Numbered(1), NodeId::Numbered(2)],
                options: CabOptions::empty(),
            }],
        };
        build_submeshes(&mut rig, &resolver, &[submesh], "root", &mut diags);
        assert_eq!(rig.submeshes.len(), 3);
        assert!(rig.submeshes.iter().any(|s| s.transparent));
        assert!(rig.submeshes.iter().any(|s| s.back_facing));
    }
}
