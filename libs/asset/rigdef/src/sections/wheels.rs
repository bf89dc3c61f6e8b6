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
use crate::defaults::DefaultsStack;
use crate::error::DiagnosticList;
use crate::fields::split_fields;
use crate::ids::{parse_node_id, NodeId};
use crate::module::Module;
use crate::records::{
    BaseWheel, BaseWheel2, Braking, FlexBodyWheel, MeshWheel, MeshWheel2, MeshWheelSide,
    Propulsion, Wheel, Wheel2,
};

const WHEELS: &str = "wheels";
const WHEELS2: &str = "wheels2";
const MESHWHEELS: &str = "meshwheels";
const MESHWHEELS2: &str = "meshwheels2";
const FLEXBODYWHEELS: &str = "flexbodywheels";

/// Numeric sentinel meaning "no rigidity node". Some variants historically
/// also accept `-1` for the same purpose (spec.md §9 open question); both
/// are treated identically here.
const RIGIDITY_NONE_SENTINEL: i64 = 9999;

fn parse_braking(v: i64) -> Braking {
    match v {
        1 => Braking::Yes,
        2 => Braking::DirectionalLeft,
        3 => Braking::DirectionalRight,
        4 => Braking::OnlyFoot,
        _ => Braking::No,
    }
}

fn parse_propulsion(v: i64) -> Propulsion {
    match v {
        1 => Propulsion::Forward,
        2 => Propulsion::Backward,
        _ => Propulsion::None,
    }
}

fn rigidity_from(id: NodeId) -> Option<NodeId> {
    match id.as_numbered() {
        Some(n) if n == RIGIDITY_NONE_SENTINEL || n == -1 => None,
        _ => Some(id),
    }
}

/// `radius, width, num_rays, node1, node2, rigidity_node, braking,
///  propulsion, arm_node, mass, spring, damping, face_material, band_material`.
pub fn parse_wheel(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 14 {
        diags.error(line_no, WHEELS, module_name, "expected 14 fields");
        return;
    }
    let Some(radius) = fields[0].parse::<f32>().ok() else {
        diags.error(line_no, WHEELS, module_name, "non-numeric radius");
        return;
    };
    let Some(base) = parse_base_wheel(module_name, WHEELS, &fields[1..10], defaults, line_no, diags) else {
        return;
    };
    let (Some(spring), Some(damping)) = (fields[10].parse::<f32>().ok(), fields[11].parse::<f32>().ok()) else {
        diags.error(line_no, WHEELS, module_name, "non-numeric spring/damping");
        return;
    };

    module.wheels.push(Wheel {
        base,
        radius,
        springiness: spring,
        damping,
        face_material_name: fields[12].clone(),
        band_material_name: fields[13].clone(),
    });
}

/// `rim_radius, tyre_radius, width, num_rays, node1, node2, rigidity_node,
///  braking, propulsion, arm_node, mass, tyre_springiness, tyre_damping,
///  rim_springiness, rim_damping, face_material, band_material`.
#[allow(clippy::too_many_lines)]
pub fn parse_wheel2(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 17 {
        diags.error(line_no, WHEELS2, module_name, "expected 17 fields");
        return;
    }
    let (Some(rim_radius), Some(tyre_radius)) =
        (fields[0].parse::<f32>().ok(), fields[1].parse::<f32>().ok())
    else {
        diags.error(line_no, WHEELS2, module_name, "non-numeric radii");
        return;
    };
    let Some(base) = parse_base_wheel(module_name, WHEELS2, &fields[2..11], defaults, line_no, diags) else {
        return;
    };
    let mut nums = [0f32; 4];
    for (i, field) in fields[11..15].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => nums[i] = v,
            Err(_) => {
                diags.error(line_no, WHEELS2, module_name, format!("non-numeric field {i}"));
                return;
            }
        }
    }

    module.wheels2.push(Wheel2 {
        base: BaseWheel2 {
            base,
            rim_radius,
            tyre_radius,
            tyre_springiness: nums[0],
            tyre_damping: nums[1],
        },
        face_material_name: fields[15].clone(),
        band_material_name: fields[16].clone(),
        rim_springiness: nums[2],
        rim_damping: nums[3],
    });
}

/// `width, num_rays, node1, node2, rigidity_node, braking, propulsion,
///  arm_node, mass, side, mesh_name, material_name, rim_radius, tyre_radius,
///  spring, damping`.
pub fn parse_meshwheel(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 16 {
        diags.error(line_no, MESHWHEELS, module_name, "expected 16 fields");
        return;
    }
    let Some(base) = parse_base_wheel(module_name, MESHWHEELS, &fields[0..9], defaults, line_no, diags) else {
        return;
    };
    let Some(side) = parse_side(&fields[9], line_no, MESHWHEELS, module_name, diags) else {
        return;
    };
    let (Some(rim_radius), Some(tyre_radius), Some(spring), Some(damping)) = (
        fields[12].parse::<f32>().ok(),
        fields[13].parse::<f32>().ok(),
        fields[14].parse::<f32>().ok(),
        fields[15].parse::<f32>().ok(),
    ) else {
        diags.error(line_no, MESHWHEELS, module_name, "non-numeric trailing fields");
        return;
    };

    module.meshwheels.push(MeshWheel {
        base,
        side,
        mesh_name: fields[10].clone(),
        material_name: fields[11].clone(),
        rim_radius,
        tyre_radius,
        spring,
        damping,
    });
}

/// `rim_radius, tyre_radius, width, num_rays, node1, node2, rigidity_node,
///  braking, propulsion, arm_node, mass, tyre_springiness, tyre_damping,
///  side, mesh_name, material_name`. Rim spring/damp come from beam-defaults.
pub fn parse_meshwheel2(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 16 {
        diags.error(line_no, MESHWHEELS2, module_name, "expected 16 fields");
        return;
    }
    let (Some(rim_radius), Some(tyre_radius)) =
        (fields[0].parse::<f32>().ok(), fields[1].parse::<f32>().ok())
    else {
        diags.error(line_no, MESHWHEELS2, module_name, "non-numeric radii");
        return;
    };
    let Some(base) = parse_base_wheel(module_name, MESHWHEELS2, &fields[2..11], defaults, line_no, diags) else {
        return;
    };
    let (Some(tyre_springiness), Some(tyre_damping)) =
        (fields[11].parse::<f32>().ok(), fields[12].parse::<f32>().ok())
    else {
        diags.error(line_no, MESHWHEELS2, module_name, "non-numeric tyre spring/damp");
        return;
    };
    let Some(side) = parse_side(&fields[13], line_no, MESHWHEELS2, module_name, diags) else {
        return;
    };

    module.meshwheels2.push(MeshWheel2 {
        base: BaseWheel2 {
            base,
            rim_radius,
            tyre_radius,
            tyre_springiness,
            tyre_damping,
        },
        side,
        mesh_name: fields[14].clone(),
        material_name: fields[15].clone(),
    });
}

/// `rim_radius, tyre_radius, width, num_rays, node1, node2, rigidity_node,
///  braking, propulsion, arm_node, mass, tyre_springiness, tyre_damping,
///  rim_springiness, rim_damping, side, rim_mesh_name, tyre_mesh_name`.
#[allow(clippy::too_many_lines)]
pub fn parse_flexbodywheel(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 18 {
        diags.error(line_no, FLEXBODYWHEELS, module_name, "expected 18 fields");
        return;
    }
    let (Some(rim_radius), Some(tyre_radius)) =
        (fields[0].parse::<f32>().ok(), fields[1].parse::<f32>().ok())
    else {
        diags.error(line_no, FLEXBODYWHEELS, module_name, "non-numeric radii");
        return;
    };
    let Some(base) = parse_base_wheel(module_name, FLEXBODYWHEELS, &fields[2..11], defaults, line_no, diags) else {
        return;
    };
    let mut nums = [0f32; 4];
    for (i, field) in fields[11..15].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => nums[i] = v,
            Err(_) => {
                diags.error(line_no, FLEXBODYWHEELS, module_name, format!("non-numeric field {i}"));
                return;
            }
        }
    }
    let Some(side) = parse_side(&fields[15], line_no, FLEXBODYWHEELS, module_name, diags) else {
        return;
    };

    module.flexbodywheels.push(FlexBodyWheel {
        base: BaseWheel2 {
            base,
            rim_radius,
            tyre_radius,
            tyre_springiness: nums[0],
            tyre_damping: nums[1],
        },
        side,
        rim_springiness: nums[2],
        rim_damping: nums[3],
        rim_mesh_name: fields[16].clone(),
        tyre_mesh_name: fields[17].clone(),
    });
}

fn parse_side(
    token: &str,
    line_no: usize,
    section: &str,
    module_name: &str,
    diags: &mut DiagnosticList,
) -> Option<MeshWheelSide> {
    match token.chars().next() {
        Some('r') | Some('R') => Some(MeshWheelSide::Right),
        Some('l') | Some('L') => Some(MeshWheelSide::Left),
        _ => {
            diags.error(line_no, section, module_name, format!("invalid wheel side `{token}`"));
            None
        }
    }
}

/// Parses the 9-field shape shared by all variants:
/// `width, num_rays, node1, node2, rigidity_node, braking, propulsion,
///  arm_node, mass`.
fn parse_base_wheel(
    module_name: &str,
    section: &str,
    fields: &[String],
    defaults: &DefaultsStack,
    line_no: usize,
    diags: &mut DiagnosticList,
) -> Option<BaseWheel> {
    let (Some(width), Some(num_rays)) = (fields[0].parse::<f32>().ok(), fields[1].parse::<u32>().ok()) else {
        diags.error(line_no, section, module_name, "non-numeric width/num_rays");
        return None;
    };
    if num_rays == 0 {
        diags.error(line_no, section, module_name, "wheel with 0 rays");
        return None;
    }
    let n1 = parse_node_id(&fields[2], line_no, section, module_name, diags);
    let n2 = parse_node_id(&fields[3], line_no, section, module_name, diags);
    let rigidity = parse_node_id(&fields[4], line_no, section, module_name, diags);
    let (Some(braking_val), Some(propulsion_val)) =
        (fields[5].parse::<i64>().ok(), fields[6].parse::<i64>().ok())
    else {
        diags.error(line_no, section, module_name, "non-numeric braking/propulsion");
        return None;
    };
    let arm_node = parse_node_id(&fields[7], line_no, section, module_name, diags);
    let Some(mass) = fields[8].parse::<f32>().ok() else {
        diags.error(line_no, section, module_name, "non-numeric mass");
        return None;
    };

    Some(BaseWheel {
        width,
        num_rays,
        nodes: [n1, n2],
        rigidity_node: rigidity_from(rigidity),
        braking: parse_braking(braking_val),
        propulsion: parse_propulsion(propulsion_val),
        reference_arm_node: arm_node,
        mass,
        node_defaults: defaults.node_defaults.clone(),
        beam_defaults: defaults.beam_defaults.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_ring_wheel_with_propulsion() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_wheel(
            &mut module,
            &defaults,
            "0.5, 0.2, 4, 0, 1, 9999, 0, 1, 0, 10, 8000, 400, face, band",
            1,
            "root",
            &mut diags,
        );
        assert!(diags.is_empty(), "{:?}", diags.iter().collect::<Vec<_>>());
        assert_eq!(module.wheels.len(), 1);
        let w = &module.wheels[0];
        assert_eq!(w.base.num_rays, 4);
        assert_eq!(w.base.rigidity_node, None);
        assert_eq!(w.base.propulsion, Propulsion::Forward);
        assert_eq!(w.base.braking, Braking::No);
    }

    #[test]
    fn zero_rays_is_an_error() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_wheel(
            &mut module,
            &defaults,
            "0.5, 0.2, 0, 0, 1, 9999, 0, 1, 0, 10, 8000, 400, face, band",
            1,
            "root",
            &mut diags,
        );
        assert!(module.wheels.is_empty());
        assert!(diags.has_errors());
    }
}
