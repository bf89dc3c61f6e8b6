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
//! Rotators apply a kinematic rotation to an existing plate of nodes; unlike
//! beams/wheels they create no new geometry, only resolved references.
use rigdef::error::DiagnosticList;
use rigdef::records::{Rotator, Rotator2};

use crate::resolver::NodeResolver;
use crate::rig::{BuiltRotator, Rig};

const SECTION: &str = "rotators";

fn resolve_plate(
    resolver: &NodeResolver,
    ids: &[rigdef::ids::NodeId; 4],
    module_name: &str,
    diags: &mut DiagnosticList,
) -> Option<[usize; 4]> {
    let mut out = [0usize; 4];
    for (i, id) in ids.iter().enumerate() {
        out[i] = resolver.resolve(id, 0, SECTION, module_name, diags)?;
    }
    Some(out)
}

pub fn build_rotators(
    rig: &mut Rig,
    resolver: &NodeResolver,
    rotators: &[Rotator],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for rotator in rotators {
        let Some(a) = resolver.resolve(&rotator.axis_nodes[0], 0, SECTION, module_name, diags) else { continue };
        let Some(b) = resolver.resolve(&rotator.axis_nodes[1], 0, SECTION, module_name, diags) else { continue };
        let Some(base_plate) = resolve_plate(resolver, &rotator.base_plate_nodes, module_name, diags) else { continue };
        let Some(rotating_plate) = resolve_plate(resolver, &rotator.rotating_plate_nodes, module_name, diags) else { continue };
        rig.rotators.push(BuiltRotator {
            axis_nodes: [a, b],
            base_plate_nodes: base_plate,
            rotating_plate_nodes: rotating_plate,
            rate: rotator.rate,
            spin_left_key: rotator.spin_left_key,
            spin_right_key: rotator.spin_right_key,
            engine_coupling: rotator.engine_coupling,
            needs_engine: rotator.needs_engine,
            rotating_force: None,
            tolerance: None,
        });
    }
}

/// `rotators2` is processed once, same as `rotators` (spec.md §9 open
/// question: duplicate processing would double-apply every rotation).
pub fn build_rotators2(
    rig: &mut Rig,
    resolver: &NodeResolver,
    rotators: &[Rotator2],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for rotator in rotators {
        let base = &rotator.base;
        let Some(a) = resolver.resolve(&base.axis_nodes[0], 0, SECTION, module_name, diags) else { continue };
        let Some(b) = resolver.resolve(&base.axis_nodes[1], 0, SECTION, module_name, diags) else { continue };
        let Some(base_plate) = resolve_plate(resolver, &base.base_plate_nodes, module_name, diags) else { continue };
        let Some(rotating_plate) = resolve_plate(resolver, &base.rotating_plate_nodes, module_name, diags) else { continue };
        rig.rotators.push(BuiltRotator {
            axis_nodes: [a, b],
            base_plate_nodes: base_plate,
            rotating_plate_nodes: rotating_plate,
            rate: base.rate,
            spin_left_key: base.spin_left_key,
            spin_right_key: base.spin_right_key,
            engine_coupling: base.engine_coupling,
            needs_engine: base.needs_engine,
            rotating_force: Some(rotator.rotating_force),
            tolerance: Some(rotator.tolerance),
        });
    }
}
