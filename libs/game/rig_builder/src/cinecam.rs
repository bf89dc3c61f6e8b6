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
//! A cinecam node plus 8 beams holding it to the surrounding structure
//! (spec.md §4.3.2). The beams take the cinecam's own spring/damping instead
//! of the ambient beam defaults' springiness/damping, keeping every other
//! beam-default field (material, thresholds, diameter) as-is.
use rigdef::error::DiagnosticList;
use rigdef::records::{BeamOptions, Cinecam};

use crate::beams::{make_beam, push_beam};
use crate::nodes::push_synthetic_node;
use crate::resolver::NodeResolver;
use crate::rig::{BuiltBeamKind, BuiltNode, Rig};

const SECTION: &str = "cinecam";

pub fn build_cinecams(
    rig: &mut Rig,
    resolver: &NodeResolver,
    cinecams: &[Cinecam],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for cinecam in cinecams {
        let node = BuiltNode {
            position: cinecam.position,
            options: cinecam.node_defaults.options,
            load_weight: cinecam.node_defaults.load_weight,
            friction: cinecam.node_defaults.friction,
            volume: cinecam.node_defaults.volume,
            surface: cinecam.node_defaults.surface,
            detacher_group: 0,
            wheel_id: None,
            wheel_ring: 0,
        };
        let Some(cam_index) = push_synthetic_node(rig, node, module_name, diags) else {
            continue;
        };

        let mut nodes = [cam_index; 8];
        let mut beams = [0usize; 8];
        let mut ok = true;
        for (i, target) in cinecam.nodes.iter().enumerate() {
            let Some(target_index) = resolver.resolve(target, 0, SECTION, module_name, diags) else {
                ok = false;
                continue;
            };
            nodes[i] = target_index;
            let mut beam = make_beam(
                [cam_index, target_index],
                BuiltBeamKind::Invisible,
                &cinecam.beam_defaults,
                BeamOptions::INVISIBLE,
                0,
            );
            beam.springiness = cinecam.spring;
            beam.damping_constant = cinecam.damping;
            if let Some(idx) = push_beam(rig, beam, module_name, diags) {
                beams[i] = idx;
            } else {
                ok = false;
            }
        }
        if !ok {
            diags.warning(0, SECTION, module_name, "cinecam built with unresolved support beams");
        }
        rig.cinecams.push(crate::rig::BuiltCinecam {
            position: cinecam.position,
            nodes,
            beams,
        });
    }
}
